/// Repository and derived-arXiv fields a condition can target
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchField {
    /// The `"owner/name"` key
    Name,
    Description,
    Language,
    Stars,
    CreatedAt,
    UpdatedAt,
    PushedAt,
    StarredAt,
    /// User-defined list tags
    Lists,
    /// Categories of the linked paper
    ArxivCategory,
    ArxivPublished,
    ArxivUpdated,
    /// `"yes"` when a linked paper resolves in the metadata map
    ArxivPrimary,
}

/// Semantic kind of a field, deciding which operators apply
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    Text,
    Number,
    Date,
    List,
}

/// Condition operators
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operator {
    Contains,
    Equals,
    StartsWith,
    EndsWith,
    GreaterThan,
    LessThan,
    After,
    Before,
    Includes,
    Excludes,
}

/// Logical connective linking a condition to the one before it
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Conjunction {
    #[default]
    And,
    Or,
}

impl SearchField {
    /// Every searchable field, in display order.
    pub const ALL: [SearchField; 13] = [
        SearchField::Name,
        SearchField::Description,
        SearchField::Language,
        SearchField::Stars,
        SearchField::CreatedAt,
        SearchField::UpdatedAt,
        SearchField::PushedAt,
        SearchField::StarredAt,
        SearchField::Lists,
        SearchField::ArxivCategory,
        SearchField::ArxivPublished,
        SearchField::ArxivUpdated,
        SearchField::ArxivPrimary,
    ];

    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "name" => Some(SearchField::Name),
            "description" => Some(SearchField::Description),
            "language" => Some(SearchField::Language),
            "stars" => Some(SearchField::Stars),
            "created_at" => Some(SearchField::CreatedAt),
            "updated_at" => Some(SearchField::UpdatedAt),
            "pushed_at" => Some(SearchField::PushedAt),
            "starred_at" => Some(SearchField::StarredAt),
            "lists" => Some(SearchField::Lists),
            "arxiv_category" => Some(SearchField::ArxivCategory),
            "arxiv_published" => Some(SearchField::ArxivPublished),
            "arxiv_updated" => Some(SearchField::ArxivUpdated),
            "arxiv_primary" => Some(SearchField::ArxivPrimary),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            SearchField::Name => "name",
            SearchField::Description => "description",
            SearchField::Language => "language",
            SearchField::Stars => "stars",
            SearchField::CreatedAt => "created_at",
            SearchField::UpdatedAt => "updated_at",
            SearchField::PushedAt => "pushed_at",
            SearchField::StarredAt => "starred_at",
            SearchField::Lists => "lists",
            SearchField::ArxivCategory => "arxiv_category",
            SearchField::ArxivPublished => "arxiv_published",
            SearchField::ArxivUpdated => "arxiv_updated",
            SearchField::ArxivPrimary => "arxiv_primary",
        }
    }

    pub fn kind(&self) -> FieldKind {
        match self {
            SearchField::Stars => FieldKind::Number,
            SearchField::CreatedAt
            | SearchField::UpdatedAt
            | SearchField::PushedAt
            | SearchField::StarredAt
            | SearchField::ArxivPublished
            | SearchField::ArxivUpdated => FieldKind::Date,
            SearchField::Lists | SearchField::ArxivCategory => FieldKind::List,
            SearchField::Name
            | SearchField::Description
            | SearchField::Language
            | SearchField::ArxivPrimary => FieldKind::Text,
        }
    }
}

impl FieldKind {
    /// Operators valid for this kind, first one being the default when a
    /// condition omits the operator.
    pub fn allowed_operators(&self) -> &'static [Operator] {
        match self {
            FieldKind::Text => {
                &[Operator::Contains, Operator::Equals, Operator::StartsWith, Operator::EndsWith]
            }
            FieldKind::Number => &[Operator::Equals, Operator::GreaterThan, Operator::LessThan],
            FieldKind::Date => &[Operator::Equals, Operator::After, Operator::Before],
            FieldKind::List => &[Operator::Includes, Operator::Excludes],
        }
    }

    pub fn default_operator(&self) -> Operator {
        self.allowed_operators()[0]
    }
}

impl Operator {
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "contains" => Some(Operator::Contains),
            "equals" => Some(Operator::Equals),
            "starts_with" => Some(Operator::StartsWith),
            "ends_with" => Some(Operator::EndsWith),
            "greater_than" => Some(Operator::GreaterThan),
            "less_than" => Some(Operator::LessThan),
            "after" => Some(Operator::After),
            "before" => Some(Operator::Before),
            "includes" => Some(Operator::Includes),
            "excludes" => Some(Operator::Excludes),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Operator::Contains => "contains",
            Operator::Equals => "equals",
            Operator::StartsWith => "starts_with",
            Operator::EndsWith => "ends_with",
            Operator::GreaterThan => "greater_than",
            Operator::LessThan => "less_than",
            Operator::After => "after",
            Operator::Before => "before",
            Operator::Includes => "includes",
            Operator::Excludes => "excludes",
        }
    }
}

impl Conjunction {
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_uppercase().as_str() {
            "AND" => Some(Conjunction::And),
            "OR" => Some(Conjunction::Or),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Conjunction::And => "AND",
            Conjunction::Or => "OR",
        }
    }
}

/// One structured search condition
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Condition {
    pub field: SearchField,
    pub operator: Operator,
    pub value: String,
    /// Connective to the previous condition; ignored on the first one
    pub conjunction: Conjunction,
}

impl Condition {
    pub fn new(field: SearchField, operator: Operator, value: impl Into<String>) -> Self {
        Self { field, operator, value: value.into(), conjunction: Conjunction::And }
    }

    pub fn with_conjunction(mut self, conjunction: Conjunction) -> Self {
        self.conjunction = conjunction;
        self
    }
}

/// Complete search state: free text plus structured conditions
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Query {
    pub text: String,
    pub conditions: Vec<Condition>,
}

impl Query {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_text(text: impl Into<String>) -> Self {
        Self { text: text.into(), conditions: Vec::new() }
    }

    /// True when the query constrains nothing (matches every repository).
    pub fn is_empty(&self) -> bool {
        self.text.is_empty() && self.conditions.is_empty()
    }
}
