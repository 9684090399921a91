use chrono::{DateTime, NaiveDate, Utc};

use super::ast::{Condition, Conjunction, Operator, Query, SearchField};
use crate::models::{ArxivIndex, ArxivPaper, RepoEntry};

/// A condition field resolved against one repository
enum FieldValue<'a> {
    Text(&'a str),
    Number(i64),
    Date(DateTime<Utc>),
    List(&'a [String]),
}

/// Decide whether one repository matches the full search state.
///
/// The free-text query is a case-insensitive substring match against the
/// repository key and its description; an empty query matches everything.
/// Conditions evaluate left to right, folding the running result through
/// each condition's declared conjunction (no precedence, no grouping).
pub fn matches(entry: &RepoEntry, papers: &ArxivIndex, query: &Query) -> bool {
    matches_text(entry, &query.text) && matches_conditions(entry, papers, &query.conditions)
}

/// Filter a slice of entries, returning the indices of matches in order.
#[must_use]
pub fn filter_entries(entries: &[RepoEntry], papers: &ArxivIndex, query: &Query) -> Vec<usize> {
    entries
        .iter()
        .enumerate()
        .filter(|(_, entry)| matches(entry, papers, query))
        .map(|(i, _)| i)
        .collect()
}

fn matches_text(entry: &RepoEntry, text: &str) -> bool {
    if text.is_empty() {
        return true;
    }
    let needle = text.to_lowercase();
    if entry.key.to_lowercase().contains(&needle) {
        return true;
    }
    entry
        .repo
        .metadata
        .description
        .as_ref()
        .is_some_and(|description| description.to_lowercase().contains(&needle))
}

fn matches_conditions(entry: &RepoEntry, papers: &ArxivIndex, conditions: &[Condition]) -> bool {
    let Some((first, rest)) = conditions.split_first() else {
        return true;
    };

    let mut result = evaluate_condition(entry, papers, first);
    for condition in rest {
        let next = evaluate_condition(entry, papers, condition);
        result = match condition.conjunction {
            Conjunction::And => result && next,
            Conjunction::Or => result || next,
        };
    }

    result
}

/// Evaluate a single condition. A field that resolves to nothing is always
/// unsatisfied, as is an operator applied to a value kind it cannot compare.
fn evaluate_condition(entry: &RepoEntry, papers: &ArxivIndex, condition: &Condition) -> bool {
    let Some(value) = resolve_field(entry, papers, condition.field) else {
        return false;
    };

    match condition.operator {
        Operator::Contains => string_op(&value, &condition.value, |s, v| s.contains(v)),
        Operator::Equals => string_op(&value, &condition.value, |s, v| s == v),
        Operator::StartsWith => string_op(&value, &condition.value, |s, v| s.starts_with(v)),
        Operator::EndsWith => string_op(&value, &condition.value, |s, v| s.ends_with(v)),
        Operator::GreaterThan => match value {
            FieldValue::Number(n) => parse_number(&condition.value).is_some_and(|v| n > v),
            _ => false,
        },
        Operator::LessThan => match value {
            FieldValue::Number(n) => parse_number(&condition.value).is_some_and(|v| n < v),
            _ => false,
        },
        Operator::After => match value {
            FieldValue::Date(d) => parse_date_value(&condition.value).is_some_and(|v| d > v),
            _ => false,
        },
        Operator::Before => match value {
            FieldValue::Date(d) => parse_date_value(&condition.value).is_some_and(|v| d < v),
            _ => false,
        },
        Operator::Includes => match value {
            FieldValue::List(items) => list_membership(items, &condition.value),
            _ => false,
        },
        Operator::Excludes => match value {
            FieldValue::List(items) => !list_membership(items, &condition.value),
            _ => false,
        },
    }
}

/// Resolve a field to its value for one repository. `None` means the field
/// has no value here (missing description, no linked paper, and so on).
fn resolve_field<'a>(
    entry: &'a RepoEntry,
    papers: &'a ArxivIndex,
    field: SearchField,
) -> Option<FieldValue<'a>> {
    let metadata = &entry.repo.metadata;
    match field {
        SearchField::Name => Some(FieldValue::Text(&entry.key)),
        SearchField::Description => metadata.description.as_deref().map(FieldValue::Text),
        SearchField::Language => metadata.language.as_deref().map(FieldValue::Text),
        SearchField::Stars => Some(FieldValue::Number(metadata.stars)),
        SearchField::CreatedAt => metadata.created_at.map(FieldValue::Date),
        SearchField::UpdatedAt => metadata.updated_at.map(FieldValue::Date),
        SearchField::PushedAt => metadata.pushed_at.map(FieldValue::Date),
        SearchField::StarredAt => metadata.starred_at.map(FieldValue::Date),
        SearchField::Lists => Some(FieldValue::List(&entry.repo.lists)),
        SearchField::ArxivCategory => {
            linked_paper(entry, papers).map(|paper| FieldValue::List(&paper.categories))
        }
        SearchField::ArxivPublished => {
            linked_paper(entry, papers).and_then(|paper| paper.published).map(FieldValue::Date)
        }
        SearchField::ArxivUpdated => {
            linked_paper(entry, papers).and_then(|paper| paper.updated).map(FieldValue::Date)
        }
        SearchField::ArxivPrimary => linked_paper(entry, papers).map(|_| FieldValue::Text("yes")),
    }
}

/// The paper linked to a repository, if its canonical id resolves.
pub fn linked_paper<'a>(entry: &RepoEntry, papers: &'a ArxivIndex) -> Option<&'a ArxivPaper> {
    let id = entry.arxiv_id.as_deref()?;
    papers.get(id)
}

/// Case-insensitive string comparison on a value's display form, applied
/// element-wise when the value is a list (any element may satisfy).
fn string_op(value: &FieldValue, raw: &str, op: impl Fn(&str, &str) -> bool) -> bool {
    let needle = raw.to_lowercase();
    match value {
        FieldValue::Text(s) => op(&s.to_lowercase(), &needle),
        FieldValue::Number(n) => op(&n.to_string(), &needle),
        FieldValue::Date(d) => op(&format_date_value(*d).to_lowercase(), &needle),
        FieldValue::List(items) => items.iter().any(|item| op(&item.to_lowercase(), &needle)),
    }
}

/// Membership test for list operators: the raw value splits on commas into
/// candidates, and any candidate contained in any element satisfies it.
fn list_membership(items: &[String], raw: &str) -> bool {
    raw.split(',').any(|candidate| {
        let needle = candidate.to_lowercase();
        items.iter().any(|item| item.to_lowercase().contains(&needle))
    })
}

fn parse_number(value: &str) -> Option<i64> {
    value.trim().parse::<i64>().ok()
}

/// Parse a condition value as a point in time: RFC3339, or a bare
/// `YYYY-MM-DD` taken as midnight UTC.
fn parse_date_value(value: &str) -> Option<DateTime<Utc>> {
    if let Ok(datetime) = value.parse::<DateTime<Utc>>() {
        return Some(datetime);
    }
    let date = NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d").ok()?;
    Some(date.and_hms_opt(0, 0, 0)?.and_utc())
}

/// Display form of a date for the string operators; matches the snapshot's
/// own `Z`-suffixed second-precision strings.
fn format_date_value(datetime: DateTime<Utc>) -> String {
    datetime.format("%Y-%m-%dT%H:%M:%SZ").to_string()
}
