use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{FromRow, MySqlPool};
use tracing::debug;

use super::{EmployeeStore, StoreError};
use crate::model::employee::{Employee, EmployeeChanges, NewEmployee};
use crate::utils::db_utils::{build_update_sql, execute_update};

const SELECT_EMPLOYEE: &str = r#"
    SELECT
        id,
        employee_number,
        first_name,
        last_name,
        full_name,
        gender,
        salutation,
        gross_salary_py,
        profile_color,
        created_at,
        updated_at
    FROM employees
"#;

/// Row as stored; enum columns hold the upper-case variant name.
#[derive(FromRow)]
struct EmployeeRow {
    id: u64,
    employee_number: i64,
    first_name: String,
    last_name: String,
    full_name: String,
    gender: String,
    salutation: String,
    gross_salary_py: f64,
    profile_color: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl TryFrom<EmployeeRow> for Employee {
    type Error = StoreError;

    fn try_from(row: EmployeeRow) -> Result<Self, Self::Error> {
        let corrupt = |column: &str, value: &str| {
            StoreError::Corrupt(format!("employee {}: bad {} {:?}", row.id, column, value))
        };

        Ok(Employee {
            id: row.id,
            employee_number: row.employee_number,
            gender: row
                .gender
                .parse()
                .map_err(|_| corrupt("gender", &row.gender))?,
            salutation: row
                .salutation
                .parse()
                .map_err(|_| corrupt("salutation", &row.salutation))?,
            profile_color: row
                .profile_color
                .parse()
                .map_err(|_| corrupt("profile_color", &row.profile_color))?,
            first_name: row.first_name,
            last_name: row.last_name,
            full_name: row.full_name,
            gross_salary_py: row.gross_salary_py,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

pub struct MySqlEmployeeStore {
    pool: MySqlPool,
}

impl MySqlEmployeeStore {
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl EmployeeStore for MySqlEmployeeStore {
    async fn create(&self, new: NewEmployee) -> Result<Employee, StoreError> {
        let result = sqlx::query(
            r#"
            INSERT INTO employees
            (employee_number, first_name, last_name, full_name, gender, salutation, gross_salary_py, profile_color)
            VALUES (?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(new.employee_number)
        .bind(&new.first_name)
        .bind(&new.last_name)
        .bind(&new.full_name)
        .bind(new.gender.as_ref())
        .bind(new.salutation.as_ref())
        .bind(new.gross_salary_py)
        .bind(new.profile_color.as_ref())
        .execute(&self.pool)
        .await?;

        let id = result.last_insert_id();
        debug!(employee_id = id, "Inserted employee");

        self.find_by_id(id)
            .await?
            .ok_or_else(|| StoreError::Corrupt(format!("employee {} missing after insert", id)))
    }

    async fn find_all(&self) -> Result<Vec<Employee>, StoreError> {
        sqlx::query_as::<_, EmployeeRow>(SELECT_EMPLOYEE)
            .fetch_all(&self.pool)
            .await?
            .into_iter()
            .map(Employee::try_from)
            .collect()
    }

    async fn find_by_id(&self, id: u64) -> Result<Option<Employee>, StoreError> {
        let sql = format!("{} WHERE id = ?", SELECT_EMPLOYEE);

        sqlx::query_as::<_, EmployeeRow>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .map(Employee::try_from)
            .transpose()
    }

    async fn update(&self, id: u64, changes: EmployeeChanges) -> Result<Employee, StoreError> {
        if let Some(update) = build_update_sql("employees", &changes, "id", id) {
            debug!(sql = %update.sql, employee_id = id, "Updating employee");
            // MySQL reports unchanged rows as unaffected, so existence is
            // decided by the read below rather than by this count.
            execute_update(&self.pool, update).await?;
        }

        self.find_by_id(id).await?.ok_or(StoreError::NotFound)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::employee::{Gender, ProfileColor, Salutation};

    fn row() -> EmployeeRow {
        EmployeeRow {
            id: 3,
            employee_number: 12345,
            first_name: "John".into(),
            last_name: "Doe".into(),
            full_name: "John Doe".into(),
            gender: "MALE".into(),
            salutation: "MR".into(),
            gross_salary_py: 50000.0,
            profile_color: "BLUE".into(),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn row_converts_to_typed_record() {
        let employee = Employee::try_from(row()).unwrap();

        assert_eq!(employee.id, 3);
        assert_eq!(employee.gender, Gender::Male);
        assert_eq!(employee.salutation, Salutation::Mr);
        assert_eq!(employee.profile_color, ProfileColor::Blue);
        assert_eq!(employee.full_name, "John Doe");
    }

    #[test]
    fn unknown_enum_value_is_corrupt() {
        let mut bad_gender = row();
        bad_gender.gender = "OTHER".into();
        match Employee::try_from(bad_gender) {
            Err(StoreError::Corrupt(msg)) => {
                assert!(msg.contains("employee 3"));
                assert!(msg.contains("gender"));
                assert!(msg.contains("OTHER"));
            }
            other => panic!("expected corrupt row, got {:?}", other),
        }

        let mut bad_color = row();
        bad_color.profile_color = "blue".into();
        assert!(matches!(
            Employee::try_from(bad_color),
            Err(StoreError::Corrupt(msg)) if msg.contains("profile_color")
        ));

        let mut bad_salutation = row();
        bad_salutation.salutation = "SIR".into();
        assert!(matches!(
            Employee::try_from(bad_salutation),
            Err(StoreError::Corrupt(_))
        ));
    }
}
