use crate::model::employee::{
    Employee, EmployeeChanges, Gender, NewEmployee, ProfileColor, Salutation,
};
use crate::validation::FieldError;
use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Employee Records API",
        version = "1.0.0",
        description = r#"
## Employee Records

List, view, create and edit employee records.

- Create requests must carry every employee field.
- Update requests (`PATCH`) may carry any subset; only supplied fields change.
- Every supplied enumerated or numeric field is validated on both paths.

Validation failures answer `400` with `{ "error": "Validation failed", ... }`,
unknown ids answer `404` with `{ "error": "Employee not found" }`.
"#,
    ),
    paths(
        crate::api::employee::create_employee,
        crate::api::employee::list_employees,
        crate::api::employee::get_employee,
        crate::api::employee::update_employee,
    ),
    components(
        schemas(
            Employee,
            NewEmployee,
            EmployeeChanges,
            Gender,
            Salutation,
            ProfileColor,
            FieldError
        )
    ),
    tags(
        (name = "Employee", description = "Employee management APIs"),
    )
)]
pub struct ApiDoc;

impl ApiDoc {
    /// The document with every route mounted under `prefix`, as `routes::configure` does.
    pub fn with_prefix(prefix: &str) -> utoipa::openapi::OpenApi {
        let prefix = prefix.trim_end_matches('/');
        let mut doc = Self::openapi();
        doc.paths.paths = std::mem::take(&mut doc.paths.paths)
            .into_iter()
            .map(|(path, item)| (format!("{}{}", prefix, path), item))
            .collect();
        doc
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn document_lists_every_employee_route() {
        let doc = ApiDoc::with_prefix("/api");
        let paths: Vec<&str> = doc.paths.paths.keys().map(String::as_str).collect();

        assert!(paths.contains(&"/api/employees"));
        assert!(paths.contains(&"/api/employees/{id}"));
        assert!(doc.components.is_some());
    }

    #[test]
    fn paths_follow_the_configured_prefix() {
        for prefix in ["/v2", "/v2/"] {
            let doc = ApiDoc::with_prefix(prefix);
            let paths: Vec<&str> = doc.paths.paths.keys().map(String::as_str).collect();
            assert_eq!(paths.len(), 2);
            assert!(paths.contains(&"/v2/employees"));
            assert!(paths.contains(&"/v2/employees/{id}"));
        }
    }
}
