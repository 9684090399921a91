//! Result ordering.
//!
//! Sorting runs on the index list produced by filtering, so the catalog rows
//! themselves never move. The comparison is stable: rows that compare equal
//! keep their snapshot key order.

use std::cmp::Ordering;

use chrono::{DateTime, Utc};

use crate::filters::linked_paper;
use crate::models::{ArxivIndex, ArxivPaper, RepoEntry};

/// Sortable columns, in the order the sort cycle visits them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortField {
    Stars,
    Name,
    UpdatedAt,
    CreatedAt,
    PushedAt,
    StarredAt,
    ArxivPublished,
    ArxivUpdated,
}

impl SortField {
    pub const ALL: [SortField; 8] = [
        SortField::Stars,
        SortField::Name,
        SortField::UpdatedAt,
        SortField::CreatedAt,
        SortField::PushedAt,
        SortField::StarredAt,
        SortField::ArxivPublished,
        SortField::ArxivUpdated,
    ];

    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "stars" => Some(SortField::Stars),
            "name" => Some(SortField::Name),
            "updated_at" => Some(SortField::UpdatedAt),
            "created_at" => Some(SortField::CreatedAt),
            "pushed_at" => Some(SortField::PushedAt),
            "starred_at" => Some(SortField::StarredAt),
            "arxiv_published" => Some(SortField::ArxivPublished),
            "arxiv_updated" => Some(SortField::ArxivUpdated),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            SortField::Stars => "stars",
            SortField::Name => "name",
            SortField::UpdatedAt => "updated_at",
            SortField::CreatedAt => "created_at",
            SortField::PushedAt => "pushed_at",
            SortField::StarredAt => "starred_at",
            SortField::ArxivPublished => "arxiv_published",
            SortField::ArxivUpdated => "arxiv_updated",
        }
    }

    /// The field after this one in the cycle, wrapping at the end.
    pub fn next(&self) -> SortField {
        let pos = Self::ALL.iter().position(|f| f == self).unwrap_or(0);
        Self::ALL[(pos + 1) % Self::ALL.len()]
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDirection {
    Ascending,
    Descending,
}

impl SortDirection {
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "asc" | "ascending" => Some(SortDirection::Ascending),
            "desc" | "descending" => Some(SortDirection::Descending),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            SortDirection::Ascending => "asc",
            SortDirection::Descending => "desc",
        }
    }

    pub fn toggled(&self) -> SortDirection {
        match self {
            SortDirection::Ascending => SortDirection::Descending,
            SortDirection::Descending => SortDirection::Ascending,
        }
    }
}

/// Active sort selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SortState {
    pub field: SortField,
    pub direction: SortDirection,
}

impl Default for SortState {
    /// Most recently starred first.
    fn default() -> Self {
        SortState { field: SortField::StarredAt, direction: SortDirection::Descending }
    }
}

impl SortState {
    /// Select a sort field: re-selecting the active field flips the
    /// direction, switching fields starts over descending.
    pub fn select(&mut self, field: SortField) {
        if self.field == field {
            self.direction = self.direction.toggled();
        } else {
            self.field = field;
            self.direction = SortDirection::Descending;
        }
    }

    pub fn flip(&mut self) {
        self.direction = self.direction.toggled();
    }
}

/// Sort catalog indices in place according to the active sort state.
///
/// Descending is the exact reverse of ascending for the same field. Rows
/// missing the sort value order before rows that have one, so descending
/// pushes them to the bottom.
pub fn sort_entries(
    indices: &mut [usize],
    entries: &[RepoEntry],
    papers: &ArxivIndex,
    state: SortState,
) {
    indices.sort_by(|&a, &b| {
        let ordering = compare_entries(&entries[a], &entries[b], papers, state.field);
        match state.direction {
            SortDirection::Ascending => ordering,
            SortDirection::Descending => ordering.reverse(),
        }
    });
}

fn compare_entries(
    a: &RepoEntry,
    b: &RepoEntry,
    papers: &ArxivIndex,
    field: SortField,
) -> Ordering {
    match field {
        SortField::Stars => a.repo.metadata.stars.cmp(&b.repo.metadata.stars),
        SortField::Name => a
            .key
            .to_lowercase()
            .cmp(&b.key.to_lowercase())
            .then_with(|| a.key.cmp(&b.key)),
        SortField::UpdatedAt => a.repo.metadata.updated_at.cmp(&b.repo.metadata.updated_at),
        SortField::CreatedAt => a.repo.metadata.created_at.cmp(&b.repo.metadata.created_at),
        SortField::PushedAt => a.repo.metadata.pushed_at.cmp(&b.repo.metadata.pushed_at),
        SortField::StarredAt => a.repo.metadata.starred_at.cmp(&b.repo.metadata.starred_at),
        SortField::ArxivPublished => {
            paper_date(a, papers, |p| p.published).cmp(&paper_date(b, papers, |p| p.published))
        }
        SortField::ArxivUpdated => {
            paper_date(a, papers, |p| p.updated).cmp(&paper_date(b, papers, |p| p.updated))
        }
    }
}

/// Paper timestamp for an entry, with the epoch standing in when the entry
/// has no resolvable paper or the paper has no such date.
fn paper_date(
    entry: &RepoEntry,
    papers: &ArxivIndex,
    pick: impl Fn(&ArxivPaper) -> Option<DateTime<Utc>>,
) -> DateTime<Utc> {
    linked_paper(entry, papers).and_then(pick).unwrap_or(DateTime::UNIX_EPOCH)
}
