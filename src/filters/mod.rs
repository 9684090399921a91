pub mod apply;
pub mod ast;
pub mod parser;

pub use apply::{filter_entries, linked_paper, matches};
pub use ast::{Condition, Conjunction, FieldKind, Operator, Query, SearchField};
pub use parser::parse_conditions;
