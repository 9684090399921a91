pub mod arxiv;
pub mod environment;
pub mod terminal;

pub use arxiv::{abs_url, extract_arxiv_id};
pub use environment::{expand_tilde, resolve_data_location};
pub use terminal::{single_line, strip_ansi_codes};
