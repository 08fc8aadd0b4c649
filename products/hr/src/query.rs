use platform_store::Filter;
use serde::Deserialize;

use crate::HrError;

pub const DEFAULT_LIMIT: u32 = 200;
pub const MAX_LIMIT: u32 = 500;

/// Fields the free-text term is matched against.
pub const SEARCH_FIELDS: [&str; 8] = [
    "firstName",
    "lastName",
    "full_name",
    "title",
    "department",
    "email",
    "phone",
    "location",
];

/// Raw query-string parameters of a list request, before validation.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct ListParams {
    pub q: Option<String>,
    pub department: Option<String>,
    pub location: Option<String>,
    #[serde(rename = "isActive")]
    pub is_active: Option<String>,
    pub tags: Option<String>,
    pub limit: Option<String>,
}

/// A validated list request.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EmployeeQuery {
    pub text: Option<String>,
    pub department: Option<String>,
    pub location: Option<String>,
    pub is_active: Option<bool>,
    pub tags: Vec<String>,
    pub limit: u32,
}

impl Default for EmployeeQuery {
    fn default() -> Self {
        Self {
            text: None,
            department: None,
            location: None,
            is_active: None,
            tags: Vec::new(),
            limit: DEFAULT_LIMIT,
        }
    }
}

impl TryFrom<ListParams> for EmployeeQuery {
    type Error = HrError;

    fn try_from(params: ListParams) -> Result<Self, Self::Error> {
        let limit = match params.limit.as_deref() {
            Some(raw) => parse_limit(raw)?,
            None => DEFAULT_LIMIT,
        };
        let is_active = params
            .is_active
            .as_deref()
            .map(|raw| parse_bool("isActive", raw))
            .transpose()?;
        Ok(Self {
            text: non_empty(params.q),
            department: non_empty(params.department),
            location: non_empty(params.location),
            is_active,
            tags: params.tags.as_deref().map(split_tags).unwrap_or_default(),
            limit,
        })
    }
}

impl EmployeeQuery {
    /// Store filter for this request: every present criterion must hold,
    /// the free-text term matching any one of [`SEARCH_FIELDS`].
    pub fn filter(&self) -> Filter {
        let mut clauses = Vec::new();
        if let Some(text) = &self.text {
            clauses.push(Filter::Or(
                SEARCH_FIELDS
                    .iter()
                    .map(|field| Filter::contains_ignore_case(*field, text.as_str()))
                    .collect(),
            ));
        }
        if let Some(department) = &self.department {
            clauses.push(Filter::eq("department", department.as_str()));
        }
        if let Some(location) = &self.location {
            clauses.push(Filter::eq("location", location.as_str()));
        }
        if let Some(is_active) = self.is_active {
            clauses.push(Filter::eq("isActive", is_active));
        }
        if !self.tags.is_empty() {
            clauses.push(Filter::contains_all("tags", self.tags.clone()));
        }
        Filter::all_of(clauses)
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|value| !value.is_empty())
}

fn parse_limit(raw: &str) -> Result<u32, HrError> {
    let value: i64 = raw
        .trim()
        .parse()
        .map_err(|_| HrError::InvalidInput(format!("limit must be an integer, got `{raw}`")))?;
    if value > i64::from(MAX_LIMIT) {
        return Err(HrError::InvalidInput(format!(
            "limit must be at most {MAX_LIMIT}"
        )));
    }
    if value < 1 {
        return Err(HrError::InvalidInput("limit must be at least 1".into()));
    }
    Ok(value as u32)
}

fn parse_bool(name: &str, raw: &str) -> Result<bool, HrError> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "true" | "t" | "1" | "yes" | "y" | "on" => Ok(true),
        "false" | "f" | "0" | "no" | "n" | "off" => Ok(false),
        _ => Err(HrError::InvalidInput(format!(
            "{name} must be a boolean, got `{raw}`"
        ))),
    }
}

fn split_tags(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|tag| !tag.is_empty())
        .map(str::to_string)
        .collect()
}
