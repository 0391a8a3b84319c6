//! Client side of the employee records service: an HTTP client for the API,
//! the employee form with its own input schema, and the list table.

pub mod api;
pub mod form;
pub mod table;

pub use api::{ClientError, EmployeeApi};
pub use form::EmployeeForm;
