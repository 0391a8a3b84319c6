use comfy_table::{Table, presets::UTF8_FULL};

use crate::client::api::EmployeeApi;
use crate::model::employee::Employee;

const HEADER: [&str; 5] = [
    "Employee Number",
    "First Name",
    "Last Name",
    "Salutation",
    "Profile Color",
];

/// Display form of an enum name: `"MRS"` becomes `"Mrs"`.
pub fn display_case(value: &str) -> String {
    let mut chars = value.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect(),
        None => String::new(),
    }
}

/// One rendered table line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmployeeRow {
    pub id: u64,
    pub employee_number: i64,
    pub first_name: String,
    pub last_name: String,
    pub salutation: String,
    pub profile_color: String,
}

impl From<&Employee> for EmployeeRow {
    fn from(employee: &Employee) -> Self {
        Self {
            id: employee.id,
            employee_number: employee.employee_number,
            first_name: employee.first_name.clone(),
            last_name: employee.last_name.clone(),
            salutation: display_case(employee.salutation.as_ref()),
            profile_color: display_case(employee.profile_color.as_ref()),
        }
    }
}

pub fn render(employees: &[Employee]) -> Table {
    let mut table = Table::new();
    table.load_preset(UTF8_FULL).set_header(HEADER);

    for row in employees.iter().map(EmployeeRow::from) {
        table.add_row(vec![
            row.employee_number.to_string(),
            row.first_name,
            row.last_name,
            row.salutation,
            row.profile_color,
        ]);
    }
    table
}

/// Fetch the whole collection once and render it. Fetch failures render empty.
pub async fn load(api: &EmployeeApi) -> Table {
    render(&api.list_employees().await)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::employee::{Gender, ProfileColor, Salutation};
    use chrono::Utc;

    fn employee(salutation: Salutation, color: ProfileColor) -> Employee {
        Employee {
            id: 1,
            employee_number: 12345,
            first_name: "John".into(),
            last_name: "Doe".into(),
            full_name: "John Doe".into(),
            gender: Gender::Male,
            salutation,
            gross_salary_py: 50000.0,
            profile_color: color,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn display_case_capitalizes_first_letter_only() {
        assert_eq!(display_case("MRS"), "Mrs");
        assert_eq!(display_case("DEFAULT"), "Default");
        assert_eq!(display_case("x"), "X");
        assert_eq!(display_case(""), "");
    }

    #[test]
    fn rows_use_display_case() {
        let row = EmployeeRow::from(&employee(Salutation::Mx, ProfileColor::Green));
        assert_eq!(row.salutation, "Mx");
        assert_eq!(row.profile_color, "Green");
        assert_eq!(row.employee_number, 12345);
    }

    #[test]
    fn table_has_one_line_per_employee() {
        let table = render(&[
            employee(Salutation::Mr, ProfileColor::Blue),
            employee(Salutation::Dr, ProfileColor::Red),
        ]);
        assert_eq!(table.row_iter().count(), 2);

        let text = table.to_string();
        assert!(text.contains("Employee Number"));
        assert!(text.contains("Blue"));
        assert!(text.contains("Dr"));
    }

    #[test]
    fn empty_collection_renders_header_only() {
        let table = render(&[]);
        assert_eq!(table.row_iter().count(), 0);
        assert!(table.to_string().contains("Profile Color"));
    }
}
