//! HR slice: the employee directory. Translates list requests into store
//! filters, normalizes stored documents into [`Employee`] records and seeds
//! demo data.

mod employee;
mod query;
mod seed;

use platform_api::ApiError;
use platform_store::{DocumentStore, StoreError, StoreHandle};
use serde::Serialize;
use thiserror::Error;
use tracing::debug;

pub use employee::{Employee, normalize_document};
pub use query::{DEFAULT_LIMIT, EmployeeQuery, ListParams, MAX_LIMIT, SEARCH_FIELDS};
pub use seed::{sample_employees, seed_employees};

/// Collection holding employee documents.
pub const COLLECTION: &str = "employee";

#[derive(Debug, Error, Clone, PartialEq)]
pub enum HrError {
    #[error("{0}")]
    InvalidInput(String),
    #[error(transparent)]
    Store(#[from] StoreError),
}

pub type HrResult<T> = Result<T, HrError>;

impl From<HrError> for ApiError {
    fn from(value: HrError) -> Self {
        match value {
            HrError::InvalidInput(msg) => ApiError::InvalidInput(msg),
            HrError::Store(err @ StoreError::Unavailable(_)) => {
                ApiError::ServiceUnavailable(err.to_string())
            }
            HrError::Store(err) => ApiError::internal(err.into()),
        }
    }
}

/// Response envelope for list requests.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct EmployeeList {
    pub items: Vec<Employee>,
    pub count: usize,
}

/// Fetches at most `query.limit` matching employees and normalizes them.
pub async fn list_employees(
    store: &dyn DocumentStore,
    query: &EmployeeQuery,
) -> HrResult<EmployeeList> {
    let filter = query.filter();
    debug!(?filter, limit = query.limit, "listing employees");
    let documents = store.find(COLLECTION, &filter, query.limit).await?;
    let items: Vec<Employee> = documents.into_iter().map(Employee::from_document).collect();
    Ok(EmployeeList {
        count: items.len(),
        items,
    })
}

/// Directory operations over an injected store handle.
#[derive(Clone, Debug)]
pub struct Directory {
    store: StoreHandle,
}

impl Directory {
    pub fn new(store: StoreHandle) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &StoreHandle {
        &self.store
    }

    /// Runs a validated query. Fails with `StoreError::Unavailable` before
    /// touching anything when no store is configured.
    pub async fn list(&self, query: &EmployeeQuery) -> HrResult<EmployeeList> {
        list_employees(self.store.require()?, query).await
    }

    /// Inserts the sample set once; returns how many records made it in.
    pub async fn seed(&self) -> HrResult<u64> {
        let store = self.store.require()?;
        Ok(seed_employees(store).await)
    }
}
