//! Employee form state with the client-side input schema.
//!
//! The form keeps two derived values in step with user input: `full_name`
//! follows the first and last name, and `gender` follows the salutation.
//! The schema here is separate from the server-side validation.

use crate::client::api::{ClientError, EmployeeApi};
use crate::model::employee::{Employee, Gender, NewEmployee, ProfileColor, Salutation};
use crate::validation::FieldError;

fn is_alphabetic(value: &str) -> bool {
    value.chars().all(|c| c.is_ascii_alphabetic() || c.is_whitespace())
}

/// Digits only, leading zeros dropped, thousands separated by spaces:
/// `"0050000x"` becomes `"50 000"`.
pub fn format_thousands(value: &str) -> String {
    let digits: String = value.chars().filter(char::is_ascii_digit).collect();
    let digits = digits.trim_start_matches('0');

    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(' ');
        }
        out.push(c);
    }
    out
}

/// Whole-unit salary for display: `-1234567.8` becomes `"-1 234 568"`.
pub fn format_salary(amount: f64) -> String {
    let whole = format!("{:.0}", amount.abs());
    let digits = match format_thousands(&whole) {
        d if d.is_empty() => "0".to_string(),
        d => d,
    };
    if amount < 0.0 && digits != "0" {
        format!("-{}", digits)
    } else {
        digits
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct EmployeeForm {
    /// Set when editing; submit then patches this record instead of creating one.
    employee_id: Option<u64>,
    first_name: String,
    last_name: String,
    full_name: String,
    salutation: Option<Salutation>,
    gender: Gender,
    employee_number: String,
    gross_salary: String,
    profile_color: Option<ProfileColor>,
}

impl Default for EmployeeForm {
    fn default() -> Self {
        Self {
            employee_id: None,
            first_name: String::new(),
            last_name: String::new(),
            full_name: String::new(),
            salutation: None,
            gender: Gender::Unspecified,
            employee_number: String::new(),
            gross_salary: String::new(),
            profile_color: Some(ProfileColor::Default),
        }
    }
}

impl EmployeeForm {
    /// Empty form for a new employee.
    pub fn new() -> Self {
        Self::default()
    }

    /// Form pre-filled from an existing record.
    pub fn edit(employee: &Employee) -> Self {
        Self {
            employee_id: Some(employee.id),
            first_name: employee.first_name.clone(),
            last_name: employee.last_name.clone(),
            full_name: employee.full_name.clone(),
            salutation: Some(employee.salutation),
            gender: employee.gender,
            employee_number: employee.employee_number.to_string(),
            gross_salary: employee.gross_salary_py.to_string(),
            profile_color: Some(employee.profile_color),
        }
    }

    pub fn employee_id(&self) -> Option<u64> {
        self.employee_id
    }

    pub fn full_name(&self) -> &str {
        &self.full_name
    }

    pub fn gender(&self) -> Gender {
        self.gender
    }

    fn refresh_full_name(&mut self) {
        self.full_name = format!("{} {}", self.first_name, self.last_name)
            .trim()
            .to_string();
    }

    pub fn set_first_name(&mut self, value: &str) {
        self.first_name = value.to_string();
        self.refresh_full_name();
    }

    pub fn set_last_name(&mut self, value: &str) {
        self.last_name = value.to_string();
        self.refresh_full_name();
    }

    /// Selecting a salutation also overwrites the gender.
    pub fn set_salutation(&mut self, salutation: Salutation) {
        self.salutation = Some(salutation);
        self.gender = salutation.implied_gender();
    }

    pub fn set_gender(&mut self, gender: Gender) {
        self.gender = gender;
    }

    pub fn set_employee_number(&mut self, value: &str) {
        self.employee_number = value.to_string();
    }

    pub fn set_gross_salary(&mut self, value: &str) {
        self.gross_salary = value.to_string();
    }

    pub fn set_profile_color(&mut self, color: ProfileColor) {
        self.profile_color = Some(color);
    }

    /// Apply the form schema and build the payload to submit.
    pub fn validate(&self) -> Result<NewEmployee, Vec<FieldError>> {
        let mut errors = Vec::new();

        for (field, label, value) in [
            ("firstName", "First Name", &self.first_name),
            ("lastName", "Last Name", &self.last_name),
        ] {
            if value.chars().count() < 2 {
                errors.push(FieldError::new(
                    field,
                    format!("{} must be at least 2 characters", label),
                ));
            }
            if !is_alphabetic(value) {
                errors.push(FieldError::new(
                    field,
                    format!("{} must contain only alphabetic characters", label),
                ));
            }
        }

        if self.salutation.is_none() {
            errors.push(FieldError::new("salutation", "Please select a salutation"));
        }

        let employee_number = self
            .employee_number
            .trim()
            .parse::<i64>()
            .ok()
            .filter(|n| *n >= 0);
        if employee_number.is_none() {
            errors.push(FieldError::new(
                "employeeNumber",
                "Employee number must be a non-negative number",
            ));
        }

        if self.full_name.chars().count() < 2 {
            errors.push(FieldError::new(
                "fullName",
                "Full Name must be at least 2 characters",
            ));
        }

        let salary: String = self.gross_salary.chars().filter(|c| !c.is_whitespace()).collect();
        let gross_salary_py = salary.parse::<f64>().ok().filter(|s| s.is_finite());
        if gross_salary_py.is_none() {
            errors.push(FieldError::new(
                "grossSalaryPY",
                "Gross salary must be a valid number",
            ));
        }

        if self.profile_color.is_none() {
            errors.push(FieldError::new("profileColor", "Please select a profile color"));
        }

        match (self.salutation, employee_number, gross_salary_py, self.profile_color) {
            (Some(salutation), Some(employee_number), Some(gross_salary_py), Some(profile_color))
                if errors.is_empty() =>
            {
                Ok(NewEmployee {
                    employee_number,
                    first_name: self.first_name.clone(),
                    last_name: self.last_name.clone(),
                    full_name: self.full_name.clone(),
                    gender: self.gender,
                    salutation,
                    gross_salary_py,
                    profile_color,
                })
            }
            _ => Err(errors),
        }
    }

    /// Validate, then create or update through the API depending on whether
    /// the form was opened for an existing employee.
    pub async fn submit(&self, api: &EmployeeApi) -> Result<Employee, SubmitError> {
        let payload = self.validate().map_err(SubmitError::Invalid)?;

        let saved = match self.employee_id {
            Some(id) => api.update_employee(id, &payload).await?,
            None => api.create_employee(&payload).await?,
        };
        Ok(saved)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum SubmitError {
    #[error("form is invalid: {}", summarize(.0))]
    Invalid(Vec<FieldError>),
    #[error(transparent)]
    Api(#[from] ClientError),
}

fn summarize(errors: &[FieldError]) -> String {
    errors
        .iter()
        .map(|e| format!("{}: {}", e.field, e.message))
        .collect::<Vec<_>>()
        .join("; ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn filled() -> EmployeeForm {
        let mut form = EmployeeForm::new();
        form.set_first_name("John");
        form.set_last_name("Doe");
        form.set_salutation(Salutation::Mr);
        form.set_employee_number("12345");
        form.set_gross_salary("50 000");
        form.set_profile_color(ProfileColor::Blue);
        form
    }

    fn fields(errors: &[FieldError]) -> Vec<&str> {
        errors.iter().map(|e| e.field.as_str()).collect()
    }

    #[test]
    fn full_name_follows_first_and_last_name() {
        let mut form = EmployeeForm::new();
        form.set_first_name("John");
        assert_eq!(form.full_name(), "John");

        form.set_last_name("Doe");
        assert_eq!(form.full_name(), "John Doe");

        form.set_first_name("");
        assert_eq!(form.full_name(), "Doe");
    }

    #[test]
    fn salutation_overrides_chosen_gender() {
        let mut form = EmployeeForm::new();
        form.set_gender(Gender::Female);
        form.set_salutation(Salutation::Mr);
        assert_eq!(form.gender(), Gender::Male);

        form.set_salutation(Salutation::Ms);
        assert_eq!(form.gender(), Gender::Female);

        form.set_salutation(Salutation::Dr);
        assert_eq!(form.gender(), Gender::Unspecified);
    }

    #[test]
    fn filled_form_builds_payload() {
        let payload = filled().validate().unwrap();

        assert_eq!(payload.full_name, "John Doe");
        assert_eq!(payload.gender, Gender::Male);
        assert_eq!(payload.employee_number, 12345);
        assert_eq!(payload.gross_salary_py, 50000.0);
        assert_eq!(payload.profile_color, ProfileColor::Blue);
    }

    #[test]
    fn new_form_defaults() {
        let form = EmployeeForm::new();
        assert_eq!(form.gender(), Gender::Unspecified);
        assert_eq!(form.employee_id(), None);

        let errors = form.validate().unwrap_err();
        assert_eq!(
            fields(&errors),
            vec![
                "firstName",
                "lastName",
                "salutation",
                "employeeNumber",
                "fullName",
                "grossSalaryPY"
            ]
        );
    }

    #[test]
    fn names_must_be_alphabetic_and_two_characters() {
        let mut form = filled();
        form.set_first_name("J");
        form.set_last_name("D0e");

        let errors = form.validate().unwrap_err();
        assert_eq!(
            errors,
            vec![
                FieldError::new("firstName", "First Name must be at least 2 characters"),
                FieldError::new("lastName", "Last Name must contain only alphabetic characters"),
            ]
        );
    }

    #[test]
    fn negative_employee_number_is_rejected() {
        let mut form = filled();
        form.set_employee_number("-4");
        assert_eq!(fields(&form.validate().unwrap_err()), vec!["employeeNumber"]);
    }

    #[test]
    fn salary_must_be_numeric() {
        let mut form = filled();
        form.set_gross_salary("fifty");
        assert_eq!(fields(&form.validate().unwrap_err()), vec!["grossSalaryPY"]);
    }

    #[test]
    fn edit_form_keeps_id_and_values() {
        let employee = Employee {
            id: 4,
            employee_number: 77,
            first_name: "Ada".into(),
            last_name: "Lovelace".into(),
            full_name: "Ada Lovelace".into(),
            gender: Gender::Female,
            salutation: Salutation::Mrs,
            gross_salary_py: 90000.0,
            profile_color: ProfileColor::Green,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };

        let form = EmployeeForm::edit(&employee);
        assert_eq!(form.employee_id(), Some(4));

        let payload = form.validate().unwrap();
        assert_eq!(payload.employee_number, 77);
        assert_eq!(payload.gross_salary_py, 90000.0);
        assert_eq!(payload.salutation, Salutation::Mrs);
    }

    #[test]
    fn thousands_are_space_separated() {
        assert_eq!(format_thousands("50000"), "50 000");
        assert_eq!(format_thousands("0001234567"), "1 234 567");
        assert_eq!(format_thousands("12a3"), "123");
        assert_eq!(format_thousands("000"), "");
    }

    #[test]
    fn salary_display_keeps_zero_and_sign() {
        assert_eq!(format_salary(50000.0), "50 000");
        assert_eq!(format_salary(0.0), "0");
        assert_eq!(format_salary(0.4), "0");
        assert_eq!(format_salary(-1234567.8), "-1 234 568");
        assert_eq!(format_salary(-0.2), "0");
    }

    #[test]
    fn submit_error_lists_fields() {
        let err = SubmitError::Invalid(vec![FieldError::new("salutation", "Please select a salutation")]);
        assert_eq!(
            err.to_string(),
            "form is invalid: salutation: Please select a salutation"
        );
    }
}
