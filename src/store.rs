//! Persistence gateway for employee records.
//!
//! Callers only see [`StoreError::NotFound`] for a missing update target and
//! never inspect driver error codes themselves.

use async_trait::async_trait;
use thiserror::Error;

use crate::model::employee::{Employee, EmployeeChanges, NewEmployee};

pub mod memory;
pub mod mysql;

pub use memory::MemoryEmployeeStore;
pub use mysql::MySqlEmployeeStore;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("employee not found")]
    NotFound,
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
    #[error("corrupt employee row: {0}")]
    Corrupt(String),
}

#[async_trait]
pub trait EmployeeStore: Send + Sync {
    /// Insert a record; the store assigns `id`, `createdAt` and `updatedAt`.
    async fn create(&self, employee: NewEmployee) -> Result<Employee, StoreError>;

    /// All records in the store's natural order.
    async fn find_all(&self) -> Result<Vec<Employee>, StoreError>;

    async fn find_by_id(&self, id: u64) -> Result<Option<Employee>, StoreError>;

    /// Apply a partial update and return the refreshed record.
    /// Returns [`StoreError::NotFound`] when no record has this id.
    async fn update(&self, id: u64, changes: EmployeeChanges) -> Result<Employee, StoreError>;
}

#[cfg(test)]
pub(crate) mod testing {
    use super::*;

    /// Store whose every call fails with a driver error.
    pub struct FailingStore;

    #[async_trait]
    impl EmployeeStore for FailingStore {
        async fn create(&self, _: NewEmployee) -> Result<Employee, StoreError> {
            Err(sqlx::Error::PoolTimedOut.into())
        }

        async fn find_all(&self) -> Result<Vec<Employee>, StoreError> {
            Err(sqlx::Error::PoolTimedOut.into())
        }

        async fn find_by_id(&self, _: u64) -> Result<Option<Employee>, StoreError> {
            Err(sqlx::Error::PoolTimedOut.into())
        }

        async fn update(&self, _: u64, _: EmployeeChanges) -> Result<Employee, StoreError> {
            Err(sqlx::Error::PoolTimedOut.into())
        }
    }

    pub fn john_doe() -> NewEmployee {
        use crate::model::employee::{Gender, ProfileColor, Salutation};

        NewEmployee {
            employee_number: 12345,
            first_name: "John".into(),
            last_name: "Doe".into(),
            full_name: "John Doe".into(),
            gender: Gender::Male,
            salutation: Salutation::Mr,
            gross_salary_py: 50000.0,
            profile_color: ProfileColor::Blue,
        }
    }
}
