use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use strum_macros::{AsRefStr, Display, EnumString};
use utoipa::ToSchema;

#[derive(
    Debug, Copy, Clone, Eq, PartialEq, Serialize, Deserialize, Display, EnumString, AsRefStr, ToSchema,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum Gender {
    Male,
    Female,
    Unspecified,
}

#[derive(
    Debug, Copy, Clone, Eq, PartialEq, Serialize, Deserialize, Display, EnumString, AsRefStr, ToSchema,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum Salutation {
    Dr,
    Mr,
    Ms,
    Mrs,
    Mx,
}

impl Salutation {
    /// Gender the form assumes for a salutation. Titles that say nothing
    /// about gender map to `Unspecified`.
    pub fn implied_gender(self) -> Gender {
        match self {
            Salutation::Mr => Gender::Male,
            Salutation::Mrs | Salutation::Ms => Gender::Female,
            Salutation::Mx | Salutation::Dr => Gender::Unspecified,
        }
    }
}

#[derive(
    Debug, Copy, Clone, Eq, PartialEq, Serialize, Deserialize, Display, EnumString, AsRefStr, ToSchema,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum ProfileColor {
    Green,
    Blue,
    Red,
    Default,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
#[schema(
    example = json!({
        "id": 1,
        "employeeNumber": 12345,
        "firstName": "John",
        "lastName": "Doe",
        "fullName": "John Doe",
        "gender": "MALE",
        "salutation": "MR",
        "grossSalaryPY": 50000,
        "profileColor": "BLUE",
        "createdAt": "2024-09-01T10:00:00.000Z",
        "updatedAt": "2024-09-01T10:00:00.000Z"
    })
)]
pub struct Employee {
    #[schema(example = 1)]
    pub id: u64,

    #[schema(example = 12345)]
    pub employee_number: i64,

    #[schema(example = "John")]
    pub first_name: String,

    #[schema(example = "Doe")]
    pub last_name: String,

    #[schema(example = "John Doe")]
    pub full_name: String,

    pub gender: Gender,

    pub salutation: Salutation,

    #[serde(rename = "grossSalaryPY")]
    #[schema(example = 50000)]
    pub gross_salary_py: f64,

    pub profile_color: ProfileColor,

    #[schema(value_type = String, format = DateTime)]
    pub created_at: DateTime<Utc>,

    #[schema(value_type = String, format = DateTime)]
    pub updated_at: DateTime<Utc>,
}

/// Body of `POST /employees`, and the payload the client form submits.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct NewEmployee {
    #[schema(example = 12345)]
    pub employee_number: i64,
    #[schema(example = "John")]
    pub first_name: String,
    #[schema(example = "Doe")]
    pub last_name: String,
    #[schema(example = "John Doe")]
    pub full_name: String,
    pub gender: Gender,
    pub salutation: Salutation,
    #[serde(rename = "grossSalaryPY")]
    #[schema(example = 50000)]
    pub gross_salary_py: f64,
    pub profile_color: ProfileColor,
}

/// Body of `PATCH /employees/{id}`. Only the supplied fields change.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct EmployeeChanges {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub employee_number: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub full_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gender: Option<Gender>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub salutation: Option<Salutation>,
    #[serde(rename = "grossSalaryPY", skip_serializing_if = "Option::is_none")]
    pub gross_salary_py: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub profile_color: Option<ProfileColor>,
}

impl EmployeeChanges {
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// Copy every supplied field onto `employee`. Timestamps are left to the store.
    pub fn apply_to(&self, employee: &mut Employee) {
        if let Some(v) = self.employee_number {
            employee.employee_number = v;
        }
        if let Some(v) = &self.first_name {
            employee.first_name = v.clone();
        }
        if let Some(v) = &self.last_name {
            employee.last_name = v.clone();
        }
        if let Some(v) = &self.full_name {
            employee.full_name = v.clone();
        }
        if let Some(v) = self.gender {
            employee.gender = v;
        }
        if let Some(v) = self.salutation {
            employee.salutation = v;
        }
        if let Some(v) = self.gross_salary_py {
            employee.gross_salary_py = v;
        }
        if let Some(v) = self.profile_color {
            employee.profile_color = v;
        }
    }
}
