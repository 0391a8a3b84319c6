use async_trait::async_trait;
use chrono::Utc;
use std::collections::BTreeMap;
use std::sync::{Mutex, MutexGuard, PoisonError};

use super::{EmployeeStore, StoreError};
use crate::model::employee::{Employee, EmployeeChanges, NewEmployee};

/// In-process store used when no database is configured.
#[derive(Default)]
pub struct MemoryEmployeeStore {
    inner: Mutex<Inner>,
}

#[derive(Default)]
struct Inner {
    last_id: u64,
    rows: BTreeMap<u64, Employee>,
}

impl MemoryEmployeeStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, Inner> {
        // no mutation below can panic halfway, so poisoned data is still consistent
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

#[async_trait]
impl EmployeeStore for MemoryEmployeeStore {
    async fn create(&self, new: NewEmployee) -> Result<Employee, StoreError> {
        let mut inner = self.lock();
        inner.last_id += 1;

        let now = Utc::now();
        let employee = Employee {
            id: inner.last_id,
            employee_number: new.employee_number,
            first_name: new.first_name,
            last_name: new.last_name,
            full_name: new.full_name,
            gender: new.gender,
            salutation: new.salutation,
            gross_salary_py: new.gross_salary_py,
            profile_color: new.profile_color,
            created_at: now,
            updated_at: now,
        };
        inner.rows.insert(employee.id, employee.clone());
        Ok(employee)
    }

    async fn find_all(&self) -> Result<Vec<Employee>, StoreError> {
        Ok(self.lock().rows.values().cloned().collect())
    }

    async fn find_by_id(&self, id: u64) -> Result<Option<Employee>, StoreError> {
        Ok(self.lock().rows.get(&id).cloned())
    }

    async fn update(&self, id: u64, changes: EmployeeChanges) -> Result<Employee, StoreError> {
        let mut inner = self.lock();
        let employee = inner.rows.get_mut(&id).ok_or(StoreError::NotFound)?;

        changes.apply_to(employee);
        employee.updated_at = Utc::now();
        Ok(employee.clone())
    }
}
