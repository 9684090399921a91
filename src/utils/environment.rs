use std::env;
use std::path::PathBuf;

/// Environment variable naming the default data location.
pub const DATA_ENV_VAR: &str = "STARGAZER_DATA";

/// Resolve the data location: the `--data` argument wins, then the
/// `STARGAZER_DATA` environment variable, then the current directory.
pub fn resolve_data_location(flag: Option<&str>) -> String {
    if let Some(value) = flag {
        return value.to_string();
    }
    match env::var(DATA_ENV_VAR) {
        Ok(value) if !value.is_empty() => value,
        _ => ".".to_string(),
    }
}

/// Expand a leading `~` to the home directory. Paths without a tilde pass
/// through unchanged, as does `~` itself when no home directory is known.
pub fn expand_tilde(path: &str) -> PathBuf {
    if path == "~" {
        if let Some(home) = dirs::home_dir() {
            return home;
        }
    } else if let Some(rest) = path.strip_prefix("~/") {
        if let Some(home) = dirs::home_dir() {
            return home.join(rest);
        }
    }
    PathBuf::from(path)
}
