use std::sync::Arc;
use tracing::{error, info};

use crate::error::AppError;
use crate::model::employee::{Employee, EmployeeChanges, NewEmployee};
use crate::store::{EmployeeStore, StoreError};

/// Employee use cases on top of an injected [`EmployeeStore`].
#[derive(Clone)]
pub struct EmployeeService {
    store: Arc<dyn EmployeeStore>,
}

impl EmployeeService {
    pub fn new(store: Arc<dyn EmployeeStore>) -> Self {
        Self { store }
    }

    pub async fn create(&self, employee: NewEmployee) -> Result<Employee, AppError> {
        match self.store.create(employee).await {
            Ok(created) => {
                info!(employee_id = created.id, "Employee created");
                Ok(created)
            }
            Err(e) => {
                error!(error = %e, "Failed to create employee");
                Err(AppError::internal("Failed to create employee", e))
            }
        }
    }

    pub async fn list(&self) -> Result<Vec<Employee>, AppError> {
        self.store.find_all().await.map_err(|e| {
            error!(error = %e, "Failed to fetch employees");
            AppError::internal("Failed to fetch employees", e)
        })
    }

    /// `Ok(None)` when no record has this id.
    pub async fn get_by_id(&self, id: u64) -> Result<Option<Employee>, AppError> {
        self.store.find_by_id(id).await.map_err(|e| {
            error!(error = %e, employee_id = id, "Failed to fetch employee");
            AppError::internal("Failed to fetch employee", e)
        })
    }

    /// `Ok(None)` when the target does not exist. An empty change set writes
    /// nothing and returns the current record.
    pub async fn update(
        &self,
        id: u64,
        changes: EmployeeChanges,
    ) -> Result<Option<Employee>, AppError> {
        let result = if changes.is_empty() {
            self.store
                .find_by_id(id)
                .await
                .and_then(|found| found.ok_or(StoreError::NotFound))
        } else {
            self.store.update(id, changes).await
        };

        match result {
            Ok(updated) => {
                info!(employee_id = id, "Employee updated");
                Ok(Some(updated))
            }
            Err(StoreError::NotFound) => Ok(None),
            Err(e) => {
                error!(error = %e, employee_id = id, "Failed to update employee");
                Err(AppError::internal("Failed to update employee", e))
            }
        }
    }
}
