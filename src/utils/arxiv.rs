//! Canonical arXiv id handling.
//!
//! Snapshot repositories reference papers either by bare id (`2101.00001`)
//! or by URL (`https://arxiv.org/abs/2101.00001`). Everything downstream
//! (paper lookup, badges, links) works on the canonical `<digits>.<digits>`
//! form extracted here.

use once_cell::sync::Lazy;
use regex::Regex;

/// Matches the id segment that follows a slash in an arXiv URL,
/// e.g. `/abs/2101.00001` or `/pdf/2101.00001v2`.
static ID_AFTER_SLASH: Lazy<Option<Regex>> = Lazy::new(|| Regex::new(r"/(\d+\.\d+)").ok());

/// Extract the canonical arXiv id from a raw id string or URL.
///
/// A value without a slash is already an id and is returned unchanged. A
/// value with slashes yields the first `<digits>.<digits>` segment found
/// after one, or nothing when no such segment exists.
///
/// # Examples
///
/// ```
/// use stargazer::utils::arxiv::extract_arxiv_id;
///
/// assert_eq!(extract_arxiv_id("2101.00001"), Some("2101.00001".to_string()));
/// assert_eq!(
///     extract_arxiv_id("https://arxiv.org/abs/2101.00001"),
///     Some("2101.00001".to_string())
/// );
/// assert_eq!(extract_arxiv_id("https://example.com/paper"), None);
/// ```
pub fn extract_arxiv_id(id_or_url: &str) -> Option<String> {
    if id_or_url.is_empty() {
        return None;
    }
    if !id_or_url.contains('/') {
        return Some(id_or_url.to_string());
    }

    let pattern = ID_AFTER_SLASH.as_ref()?;
    pattern
        .captures(id_or_url)
        .and_then(|captures| captures.get(1))
        .map(|m| m.as_str().to_string())
}

/// Abstract-page URL for a canonical id.
pub fn abs_url(id: &str) -> String {
    format!("https://arxiv.org/abs/{}", id)
}
