use sqlx::MySqlPool;

use crate::model::employee::EmployeeChanges;

/// ===============================
/// SQL bindable value enum
/// ===============================
#[derive(Debug, PartialEq)]
pub enum SqlValue {
    String(String),
    I64(i64),
    U64(u64),
    F64(f64),
}

/// ===============================
/// SQL update container
/// ===============================
#[derive(Debug)]
pub struct SqlUpdate {
    pub sql: String,
    pub values: Vec<SqlValue>,
}

/// ===============================
/// Build partial UPDATE SQL
/// ===============================
///
/// Only columns present in `changes` appear in the SET clause; `updated_at`
/// is always refreshed. Returns `None` when there is nothing to write.
pub fn build_update_sql(
    table: &str,
    changes: &EmployeeChanges,
    id_column: &str,
    id_value: u64,
) -> Option<SqlUpdate> {
    let mut columns: Vec<&str> = Vec::new();
    let mut values = Vec::new();

    let mut set = |column, value| {
        columns.push(column);
        values.push(value);
    };

    if let Some(v) = changes.employee_number {
        set("employee_number", SqlValue::I64(v));
    }
    if let Some(v) = &changes.first_name {
        set("first_name", SqlValue::String(v.clone()));
    }
    if let Some(v) = &changes.last_name {
        set("last_name", SqlValue::String(v.clone()));
    }
    if let Some(v) = &changes.full_name {
        set("full_name", SqlValue::String(v.clone()));
    }
    if let Some(v) = changes.gender {
        set("gender", SqlValue::String(v.to_string()));
    }
    if let Some(v) = changes.salutation {
        set("salutation", SqlValue::String(v.to_string()));
    }
    if let Some(v) = changes.gross_salary_py {
        set("gross_salary_py", SqlValue::F64(v));
    }
    if let Some(v) = changes.profile_color {
        set("profile_color", SqlValue::String(v.to_string()));
    }

    if columns.is_empty() {
        return None;
    }

    let set_clause = columns
        .iter()
        .map(|c| format!("{} = ?", c))
        .chain(std::iter::once("updated_at = CURRENT_TIMESTAMP(3)".to_string()))
        .collect::<Vec<_>>()
        .join(", ");

    let sql = format!("UPDATE {} SET {} WHERE {} = ?", table, set_clause, id_column);

    // WHERE id = ?
    values.push(SqlValue::U64(id_value));

    Some(SqlUpdate { sql, values })
}

/// ===============================
/// Execute the update
/// ===============================
pub async fn execute_update(pool: &MySqlPool, update: SqlUpdate) -> Result<u64, sqlx::Error> {
    let mut query = sqlx::query(&update.sql);

    for value in update.values {
        query = match value {
            SqlValue::String(v) => query.bind(v),
            SqlValue::I64(v) => query.bind(v),
            SqlValue::U64(v) => query.bind(v),
            SqlValue::F64(v) => query.bind(v),
        };
    }

    let result = query.execute(pool).await?;
    Ok(result.rows_affected())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::employee::{Gender, ProfileColor};

    #[test]
    fn empty_changes_build_nothing() {
        assert!(build_update_sql("employees", &EmployeeChanges::default(), "id", 1).is_none());
    }

    #[test]
    fn only_supplied_columns_are_set() {
        let changes = EmployeeChanges {
            first_name: Some("Jane".into()),
            gender: Some(Gender::Female),
            profile_color: Some(ProfileColor::Red),
            ..Default::default()
        };

        let update = build_update_sql("employees", &changes, "id", 9).unwrap();

        assert_eq!(
            update.sql,
            "UPDATE employees SET first_name = ?, gender = ?, profile_color = ?, \
             updated_at = CURRENT_TIMESTAMP(3) WHERE id = ?"
        );
        assert_eq!(
            update.values,
            vec![
                SqlValue::String("Jane".into()),
                SqlValue::String("FEMALE".into()),
                SqlValue::String("RED".into()),
                SqlValue::U64(9),
            ]
        );
    }

    #[test]
    fn numeric_columns_bind_typed_values() {
        let changes = EmployeeChanges {
            employee_number: Some(777),
            gross_salary_py: Some(61000.5),
            ..Default::default()
        };

        let update = build_update_sql("employees", &changes, "id", 3).unwrap();

        assert!(update.sql.starts_with("UPDATE employees SET employee_number = ?, gross_salary_py = ?,"));
        assert_eq!(update.values[0], SqlValue::I64(777));
        assert_eq!(update.values[1], SqlValue::F64(61000.5));
    }
}
