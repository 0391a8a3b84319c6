use crate::{
    config::Config,
    error::AppError,
    model::employee::{EmployeeChanges, NewEmployee},
    service::EmployeeService,
    validation::{FieldError, REQUIRED_FIELDS, ValidationMode, validate},
};
use actix_web::{HttpResponse, web};
use serde_json::{Map, Value, json};
use tracing::debug;

/// Only the known employee fields of a create body are considered.
fn pick_known_fields(body: &Value) -> Map<String, Value> {
    let mut fields = Map::new();
    if let Some(obj) = body.as_object() {
        for key in REQUIRED_FIELDS {
            if let Some(v) = obj.get(key) {
                fields.insert(key.to_string(), v.clone());
            }
        }
    }
    fields
}

/// 500 with the route's message; the failure chain is only exposed outside production.
fn internal_error(config: &Config, route_message: &str, err: &AppError) -> HttpResponse {
    let mut body = json!({ "error": route_message });
    if !config.is_production() {
        body["detail"] = json!(err.detail());
    }
    HttpResponse::build(err.status()).json(body)
}

fn not_found() -> HttpResponse {
    HttpResponse::NotFound().json(json!({ "error": "Employee not found" }))
}

/// Create Employee
#[utoipa::path(
    post,
    path = "/employees",
    request_body = NewEmployee,
    responses(
        (status = 201, description = "Employee created", body = crate::model::employee::Employee),
        (status = 400, description = "Validation failed", body = Object, example = json!({
            "error": "Validation failed",
            "missingFields": [{ "field": "firstName", "message": "firstName is required" }]
        })),
        (status = 500, description = "Internal server error", body = Object, example = json!({
            "error": "Error creating employee"
        }))
    ),
    tag = "Employee"
)]
pub async fn create_employee(
    service: web::Data<EmployeeService>,
    config: web::Data<Config>,
    body: web::Json<Value>,
) -> HttpResponse {
    let fields = pick_known_fields(&body);

    let errors = validate(&fields, ValidationMode::Create);
    if !errors.is_empty() {
        debug!(?errors, "Rejected employee create");
        return HttpResponse::BadRequest().json(json!({
            "error": "Validation failed",
            "missingFields": errors
        }));
    }

    let employee: NewEmployee = match serde_json::from_value(Value::Object(fields)) {
        Ok(e) => e,
        Err(e) => {
            return HttpResponse::BadRequest().json(json!({
                "error": "Validation failed",
                "missingFields": [FieldError::new("body", e.to_string())]
            }));
        }
    };

    match service.create(employee).await {
        Ok(created) => HttpResponse::Created().json(created),
        Err(e) => internal_error(&config, "Error creating employee", &e),
    }
}

/// List Employees
#[utoipa::path(
    get,
    path = "/employees",
    responses(
        (status = 200, description = "All employees", body = [crate::model::employee::Employee]),
        (status = 500, description = "Internal server error", body = Object, example = json!({
            "error": "Error fetching employees"
        }))
    ),
    tag = "Employee"
)]
pub async fn list_employees(
    service: web::Data<EmployeeService>,
    config: web::Data<Config>,
) -> HttpResponse {
    match service.list().await {
        Ok(employees) => HttpResponse::Ok().json(employees),
        Err(e) => internal_error(&config, "Error fetching employees", &e),
    }
}

/// Get Employee by ID
#[utoipa::path(
    get,
    path = "/employees/{id}",
    params(
        ("id", Path, description = "Employee ID")
    ),
    responses(
        (status = 200, description = "Employee found", body = crate::model::employee::Employee),
        (status = 404, description = "Employee not found", body = Object, example = json!({
            "error": "Employee not found"
        })),
        (status = 500, description = "Internal server error", body = Object, example = json!({
            "error": "Error fetching employee"
        }))
    ),
    tag = "Employee"
)]
pub async fn get_employee(
    service: web::Data<EmployeeService>,
    config: web::Data<Config>,
    path: web::Path<u64>,
) -> HttpResponse {
    let employee_id = path.into_inner();

    match service.get_by_id(employee_id).await {
        Ok(Some(employee)) => HttpResponse::Ok().json(employee),
        Ok(None) => not_found(),
        Err(e) => internal_error(&config, "Error fetching employee", &e),
    }
}

/// Update Employee
#[utoipa::path(
    patch,
    path = "/employees/{id}",
    params(
        ("id", Path, description = "Employee ID")
    ),
    request_body = EmployeeChanges,
    responses(
        (status = 200, description = "Employee updated", body = crate::model::employee::Employee),
        (status = 400, description = "Validation failed", body = Object, example = json!({
            "error": "Validation failed",
            "details": [{
                "field": "gender",
                "message": "Gender must be either MALE, FEMALE, or UNSPECIFIED"
            }]
        })),
        (status = 404, description = "Employee not found", body = Object, example = json!({
            "error": "Employee not found"
        })),
        (status = 500, description = "Internal server error", body = Object, example = json!({
            "error": "Error updating employee"
        }))
    ),
    tag = "Employee"
)]
pub async fn update_employee(
    service: web::Data<EmployeeService>,
    config: web::Data<Config>,
    path: web::Path<u64>,
    body: web::Json<Value>,
) -> HttpResponse {
    let employee_id = path.into_inner();

    let Some(fields) = body.as_object() else {
        return HttpResponse::BadRequest().json(json!({
            "error": "Validation failed",
            "details": [FieldError::new("body", "Request body must be a JSON object")]
        }));
    };

    let errors = validate(fields, ValidationMode::Update);
    if !errors.is_empty() {
        debug!(?errors, employee_id, "Rejected employee update");
        return HttpResponse::BadRequest().json(json!({
            "error": "Validation failed",
            "details": errors
        }));
    }

    let changes: EmployeeChanges = match serde_json::from_value(body.into_inner()) {
        Ok(c) => c,
        Err(e) => {
            return HttpResponse::BadRequest().json(json!({
                "error": "Validation failed",
                "details": [FieldError::new("body", e.to_string())]
            }));
        }
    };

    match service.update(employee_id, changes).await {
        Ok(Some(employee)) => HttpResponse::Ok().json(employee),
        Ok(None) => not_found(),
        Err(e) => internal_error(&config, "Error updating employee", &e),
    }
}
