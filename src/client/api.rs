use reqwest::StatusCode;
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::time::Duration;
use thiserror::Error;
use tracing::warn;

use crate::model::employee::{Employee, NewEmployee};

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("{message} ({status})")]
    Api { status: StatusCode, message: String },
}

/// Pull a readable message out of an API error body such as
/// `{"error": "Validation failed", "details": [{"field": .., "message": ..}]}`.
fn error_message(body: &str, fallback: &str) -> String {
    let Ok(value) = serde_json::from_str::<Value>(body) else {
        return fallback.to_string();
    };
    let Some(error) = value.get("error").and_then(Value::as_str) else {
        return fallback.to_string();
    };

    let fields: Vec<&str> = ["details", "missingFields"]
        .iter()
        .filter_map(|key| value.get(*key).and_then(Value::as_array))
        .flatten()
        .filter_map(|e| e.get("message").and_then(Value::as_str))
        .collect();

    if fields.is_empty() {
        error.to_string()
    } else {
        format!("{}: {}", error, fields.join("; "))
    }
}

/// HTTP client for the `/employees` routes.
#[derive(Debug, Clone)]
pub struct EmployeeApi {
    client: reqwest::Client,
    base_url: String,
}

impl EmployeeApi {
    /// `base_url` includes the API prefix, e.g. `http://localhost:3001/api`.
    pub fn new(base_url: &str) -> Result<Self, ClientError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(30))
            .build()?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn handle_response<T: DeserializeOwned>(
        resp: reqwest::Response,
        fallback: &str,
    ) -> Result<T, ClientError> {
        let status = resp.status();
        if !status.is_success() {
            let text = resp.text().await.unwrap_or_default();
            return Err(ClientError::Api {
                status,
                message: error_message(&text, fallback),
            });
        }
        resp.json().await.map_err(Into::into)
    }

    async fn send_json<B: Serialize>(
        &self,
        req: reqwest::RequestBuilder,
        body: &B,
        fallback: &str,
    ) -> Result<Employee, ClientError> {
        let resp = req.json(body).send().await?;
        Self::handle_response(resp, fallback).await
    }

    async fn try_list(&self) -> Result<Vec<Employee>, ClientError> {
        let resp = self.client.get(self.url("/employees")).send().await?;
        Self::handle_response(resp, "Failed to fetch employees").await
    }

    async fn try_get(&self, id: u64) -> Result<Employee, ClientError> {
        let resp = self
            .client
            .get(self.url(&format!("/employees/{}", id)))
            .send()
            .await?;
        Self::handle_response(resp, "Failed to fetch employee").await
    }

    /// All employees; a failed fetch degrades to an empty list.
    pub async fn list_employees(&self) -> Vec<Employee> {
        match self.try_list().await {
            Ok(employees) => employees,
            Err(e) => {
                warn!(error = %e, "Error fetching employees");
                Vec::new()
            }
        }
    }

    /// One employee; a failed fetch (including 404) degrades to `None`.
    pub async fn get_employee(&self, id: u64) -> Option<Employee> {
        match self.try_get(id).await {
            Ok(employee) => Some(employee),
            Err(e) => {
                warn!(error = %e, employee_id = id, "Error fetching employee");
                None
            }
        }
    }

    pub async fn create_employee(&self, data: &NewEmployee) -> Result<Employee, ClientError> {
        let req = self.client.post(self.url("/employees"));
        self.send_json(req, data, "Failed to create employee").await
    }

    pub async fn update_employee(
        &self,
        id: u64,
        data: &NewEmployee,
    ) -> Result<Employee, ClientError> {
        let req = self.client.patch(self.url(&format!("/employees/{}", id)));
        self.send_json(req, data, "Failed to update employee").await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validation_details_are_joined_into_the_message() {
        let body = r#"{"error":"Validation failed","details":[
            {"field":"gender","message":"Gender must be either MALE, FEMALE, or UNSPECIFIED"},
            {"field":"grossSalaryPY","message":"Gross salary must be a valid number"}]}"#;

        assert_eq!(
            error_message(body, "Failed to update employee"),
            "Validation failed: Gender must be either MALE, FEMALE, or UNSPECIFIED; \
             Gross salary must be a valid number"
        );
    }

    #[test]
    fn missing_fields_are_read_as_well() {
        let body = r#"{"error":"Validation failed","missingFields":[
            {"field":"firstName","message":"firstName is required"}]}"#;
        assert_eq!(
            error_message(body, "x"),
            "Validation failed: firstName is required"
        );
    }

    #[test]
    fn plain_error_and_garbage_bodies() {
        assert_eq!(
            error_message(r#"{"error":"Employee not found"}"#, "x"),
            "Employee not found"
        );
        assert_eq!(
            error_message("<html>bad gateway</html>", "Failed to create employee"),
            "Failed to create employee"
        );
        assert_eq!(error_message(r#"{"message":1}"#, "fallback"), "fallback");
    }

    #[test]
    fn base_url_loses_trailing_slash() {
        let api = EmployeeApi::new("http://localhost:3001/api/").unwrap();
        assert_eq!(api.url("/employees"), "http://localhost:3001/api/employees");
    }

    #[tokio::test]
    async fn unreachable_server_degrades_reads() {
        // port 9 (discard) is not expected to serve HTTP
        let api = EmployeeApi::new("http://127.0.0.1:9/api").unwrap();
        assert!(api.list_employees().await.is_empty());
        assert!(api.get_employee(1).await.is_none());
    }
}
