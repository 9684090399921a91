//! Condition parser for the advanced search.
//!
//! Parses user-provided condition expressions into [`Condition`] lists for
//! evaluation. Supports field-based conditions with per-kind operators and
//! quoted values.
//!
//! # Syntax
//!
//! ```text
//! conditions := condition ((AND | OR) condition)*
//! condition  := field:value | field:operator:value | field:"quoted value"
//! field      := name | description | language | stars | created_at | updated_at
//!             | pushed_at | starred_at | lists | arxiv_category
//!             | arxiv_published | arxiv_updated | arxiv_primary
//! ```
//!
//! # Examples
//!
//! ```rust
//! # use stargazer::filters::parser::parse_conditions;
//! // Default operator for the field's kind (text defaults to contains)
//! let conditions = parse_conditions("name:transformers").unwrap();
//!
//! // Explicit operator
//! let conditions = parse_conditions("stars:greater_than:100").unwrap();
//!
//! // Multiple conditions, implicit AND
//! let conditions = parse_conditions("language:equals:rust stars:greater_than:100").unwrap();
//!
//! // Explicit OR
//! let conditions = parse_conditions("lists:includes:ml OR lists:includes:nlp").unwrap();
//!
//! // Quoted values for spaces
//! let conditions = parse_conditions("description:contains:\"deep learning\"").unwrap();
//! ```
//!
//! # Validation
//!
//! - The operator must be allowed for the field's kind (a `stars` condition
//!   cannot use `includes`)
//! - `greater_than`/`less_than` values must parse as integers
//! - `after`/`before` values must be `YYYY-MM-DD` or RFC3339
//! - Empty fields or values are rejected
//!
//! Omitting the operator picks the field's default: `contains` for text,
//! `equals` for numbers and dates, `includes` for lists. Conditions joined
//! without a keyword get `AND`.

use anyhow::{Context, Result, anyhow};
use chrono::{DateTime, NaiveDate, Utc};

use super::ast::{Condition, Conjunction, Operator, SearchField};

/// Token types produced by the tokenizer
#[derive(Debug, Clone, PartialEq, Eq)]
enum Token {
    /// field:value or field:operator:value
    Condition { field: String, operator: Option<String>, value: String },
    /// AND keyword
    And,
    /// OR keyword
    Or,
}

/// Tokenize condition input into tokens
///
/// Supports:
/// - field:value and field:operator:value patterns
/// - quoted values with spaces (field:"some value", field:op:"some value")
/// - AND/OR keywords (case-insensitive)
/// - Whitespace separation
fn tokenize(input: &str) -> Result<Vec<Token>> {
    let mut tokens = Vec::new();
    let mut chars = input.chars().peekable();

    while let Some(&ch) = chars.peek() {
        if ch.is_whitespace() {
            chars.next();
            continue;
        }

        let word = read_word(&mut chars);
        if word.is_empty() {
            return Err(anyhow!("Unexpected character in condition input"));
        }

        match word.to_uppercase().as_str() {
            "AND" => tokens.push(Token::And),
            "OR" => tokens.push(Token::Or),
            _ => {
                let Some(colon_pos) = word.find(':') else {
                    return Err(anyhow!(
                        "Invalid token: '{}' (expected field:value or AND/OR)",
                        word
                    ));
                };

                let field = word[..colon_pos].to_string();
                let rest = &word[colon_pos + 1..];

                // A second segment that names an operator makes this a
                // field:operator:value triplet; anything else is all value.
                let (operator, mut value) = match rest.find(':') {
                    Some(op_end) if Operator::parse(&rest[..op_end]).is_some() => {
                        (Some(rest[..op_end].to_string()), rest[op_end + 1..].to_string())
                    }
                    _ => (None, rest.to_string()),
                };

                if value.starts_with('"') {
                    value = read_quoted_value(&mut chars, &value)?;
                }

                if field.is_empty() || value.is_empty() {
                    return Err(anyhow!("Invalid field:value format: {}", word));
                }

                tokens.push(Token::Condition { field, operator, value });
            }
        }
    }

    Ok(tokens)
}

/// Read a word (until whitespace or end)
fn read_word(chars: &mut std::iter::Peekable<std::str::Chars>) -> String {
    let mut word = String::new();

    while let Some(&ch) = chars.peek() {
        if ch.is_whitespace() {
            break;
        }
        word.push(ch);
        chars.next();
    }

    word
}

/// Read a quoted value, handling the case where the word already contains the
/// opening quote (and possibly the closing one)
fn read_quoted_value(
    chars: &mut std::iter::Peekable<std::str::Chars>,
    initial: &str,
) -> Result<String> {
    let mut value = initial[1..].to_string();

    if let Some(quote_pos) = value.find('"') {
        return Ok(value[..quote_pos].to_string());
    }

    for ch in chars.by_ref() {
        if ch == '"' {
            return Ok(value);
        }
        value.push(ch);
    }

    Err(anyhow!("Unterminated quoted string"))
}

/// Parse a condition expression into an ordered condition list.
///
/// Each condition carries the conjunction linking it to the previous one;
/// conditions joined without an explicit keyword default to AND.
pub fn parse_conditions(input: &str) -> Result<Vec<Condition>> {
    if input.trim().is_empty() {
        return Ok(Vec::new());
    }

    let tokens = tokenize(input).context("Failed to tokenize conditions")?;

    let mut conditions: Vec<Condition> = Vec::new();
    let mut pending = Conjunction::And;
    let mut expecting_condition = true;

    for token in tokens {
        match token {
            Token::Condition { field, operator, value } => {
                let search_field = parse_field(&field)?;
                let op = resolve_operator(search_field, operator.as_deref())?;
                validate_value(search_field, op, &value)?;

                conditions.push(
                    Condition::new(search_field, op, value).with_conjunction(pending),
                );
                pending = Conjunction::And;
                expecting_condition = false;
            }
            Token::And => {
                if expecting_condition {
                    return Err(anyhow!("Unexpected AND operator (expected field:value)"));
                }
                pending = Conjunction::And;
                expecting_condition = true;
            }
            Token::Or => {
                if expecting_condition {
                    return Err(anyhow!("Unexpected OR operator (expected field:value)"));
                }
                pending = Conjunction::Or;
                expecting_condition = true;
            }
        }
    }

    if expecting_condition && !conditions.is_empty() {
        return Err(anyhow!("Conditions ended with a connective (expected field:value)"));
    }

    Ok(conditions)
}

/// Parse a field name into the SearchField enum
fn parse_field(field: &str) -> Result<SearchField> {
    SearchField::parse(field).ok_or_else(|| {
        anyhow!(
            "Unknown field: '{}' (valid fields: {})",
            field,
            field_names().join(", ")
        )
    })
}

fn field_names() -> Vec<&'static str> {
    SearchField::ALL.iter().map(SearchField::as_str).collect()
}

/// Resolve the operator for a condition: explicit ones must be allowed for
/// the field's kind, omitted ones fall back to the kind's default.
fn resolve_operator(field: SearchField, operator: Option<&str>) -> Result<Operator> {
    let kind = field.kind();
    let Some(name) = operator else {
        return Ok(kind.default_operator());
    };

    let op = Operator::parse(name)
        .ok_or_else(|| anyhow!("Unknown operator: '{}'", name))?;

    if !kind.allowed_operators().contains(&op) {
        let allowed: Vec<&str> =
            kind.allowed_operators().iter().map(Operator::as_str).collect();
        return Err(anyhow!(
            "Operator '{}' is not valid for field '{}' (valid: {})",
            op.as_str(),
            field.as_str(),
            allowed.join(", ")
        ));
    }

    Ok(op)
}

/// Validate the condition value where the operator gives it a type
fn validate_value(field: SearchField, operator: Operator, value: &str) -> Result<()> {
    match operator {
        Operator::GreaterThan | Operator::LessThan => {
            if value.trim().parse::<i64>().is_err() {
                return Err(anyhow!(
                    "Invalid number: '{}' for field '{}'",
                    value,
                    field.as_str()
                ));
            }
        }
        Operator::After | Operator::Before => {
            if !is_valid_date_value(value) {
                return Err(anyhow!(
                    "Invalid date: '{}' (expected YYYY-MM-DD or RFC3339)",
                    value
                ));
            }
        }
        _ => {}
    }
    Ok(())
}

/// Accept strict YYYY-MM-DD or a full RFC3339 timestamp
fn is_valid_date_value(s: &str) -> bool {
    if s.len() == 10 {
        return NaiveDate::parse_from_str(s, "%Y-%m-%d").is_ok();
    }
    s.parse::<DateTime<Utc>>().is_ok()
}
