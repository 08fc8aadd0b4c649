use mongodb::bson::{Bson, Document, doc};

/// Predicate over stored documents. Rendered to MongoDB query syntax by
/// [`Filter::to_document`] and evaluated in process by [`Filter::matches`];
/// both agree on every variant.
#[derive(Clone, Debug, Default, PartialEq)]
pub enum Filter {
    /// Matches every document.
    #[default]
    All,
    /// Every clause must match. An empty list matches everything.
    And(Vec<Filter>),
    /// At least one clause must match. An empty list matches nothing.
    Or(Vec<Filter>),
    /// Equal to the field, or to one element of an array field.
    Eq { field: String, value: Bson },
    /// Case-insensitive literal substring match on a string field.
    ContainsIgnoreCase { field: String, needle: String },
    /// The field holds every listed string; a scalar field counts as a
    /// one-element array. An empty list matches nothing.
    ContainsAll { field: String, values: Vec<String> },
}

impl Filter {
    pub fn eq(field: impl Into<String>, value: impl Into<Bson>) -> Self {
        Self::Eq {
            field: field.into(),
            value: value.into(),
        }
    }

    pub fn contains_ignore_case(field: impl Into<String>, needle: impl Into<String>) -> Self {
        Self::ContainsIgnoreCase {
            field: field.into(),
            needle: needle.into(),
        }
    }

    pub fn contains_all(field: impl Into<String>, values: Vec<String>) -> Self {
        Self::ContainsAll {
            field: field.into(),
            values,
        }
    }

    /// Conjunction of `clauses`, collapsed: no clause is `All`, one clause is itself.
    pub fn all_of(clauses: Vec<Filter>) -> Self {
        let mut clauses: Vec<Filter> = clauses
            .into_iter()
            .filter(|clause| *clause != Filter::All)
            .collect();
        match clauses.len() {
            0 => Filter::All,
            1 => clauses.remove(0),
            _ => Filter::And(clauses),
        }
    }

    pub fn to_document(&self) -> Document {
        match self {
            Filter::All => Document::new(),
            Filter::And(clauses) => match clauses.as_slice() {
                [] => Document::new(),
                [single] => single.to_document(),
                many => {
                    let clauses: Vec<Document> = many.iter().map(Filter::to_document).collect();
                    doc! { "$and": clauses }
                }
            },
            // `$or` rejects an empty array; `$nor: [{}]` is the "match nothing" form.
            Filter::Or(clauses) if clauses.is_empty() => doc! { "$nor": [{}] },
            Filter::Or(clauses) => {
                let clauses: Vec<Document> = clauses.iter().map(Filter::to_document).collect();
                doc! { "$or": clauses }
            }
            Filter::Eq { field, value } => {
                let mut out = Document::new();
                out.insert(field.clone(), value.clone());
                out
            }
            Filter::ContainsIgnoreCase { field, needle } => {
                let mut out = Document::new();
                out.insert(
                    field.clone(),
                    doc! { "$regex": regex::escape(needle), "$options": "i" },
                );
                out
            }
            Filter::ContainsAll { field, values } => {
                let mut out = Document::new();
                out.insert(field.clone(), doc! { "$all": values.clone() });
                out
            }
        }
    }

    pub fn matches(&self, document: &Document) -> bool {
        match self {
            Filter::All => true,
            Filter::And(clauses) => clauses.iter().all(|clause| clause.matches(document)),
            Filter::Or(clauses) => clauses.iter().any(|clause| clause.matches(document)),
            Filter::Eq { field, value } => match document.get(field) {
                Some(Bson::Array(items)) if !matches!(value, Bson::Array(_)) => {
                    items.contains(value)
                }
                found => found == Some(value),
            },
            Filter::ContainsIgnoreCase { field, needle } => {
                let needle = needle.to_lowercase();
                match document.get(field) {
                    Some(Bson::String(text)) => text.to_lowercase().contains(&needle),
                    Some(Bson::Array(items)) => items.iter().any(|item| {
                        matches!(item, Bson::String(text) if text.to_lowercase().contains(&needle))
                    }),
                    _ => false,
                }
            }
            Filter::ContainsAll { field, values } => {
                let items = match document.get(field) {
                    Some(Bson::Array(items)) => items.as_slice(),
                    Some(scalar) => std::slice::from_ref(scalar),
                    None => return false,
                };
                !values.is_empty()
                    && values
                        .iter()
                        .all(|wanted| items.iter().any(|item| item.as_str() == Some(wanted.as_str())))
            }
        }
    }
}
