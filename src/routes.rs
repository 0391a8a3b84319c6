use crate::{api::employee, config::Config};
use actix_cors::Cors;
use actix_governor::{
    Governor, GovernorConfig, GovernorConfigBuilder, PeerIpKeyExtractor,
    governor::middleware::NoOpMiddleware,
};
use actix_web::{
    HttpResponse,
    error::InternalError,
    http::header,
    middleware::Condition,
    web,
};
use serde_json::json;

// Per-client limiter; disabled (and never consulted) when the rate is 0
fn build_limiter(requests_per_min: u32) -> GovernorConfig<PeerIpKeyExtractor, NoOpMiddleware> {
    let per_ms = if requests_per_min == 0 {
        1
    } else {
        (60_000 / requests_per_min as u64).max(1)
    };
    GovernorConfigBuilder::default()
        .milliseconds_per_request(per_ms)
        .burst_size(requests_per_min.max(1))
        .key_extractor(PeerIpKeyExtractor)
        .finish()
        .unwrap_or_default()
}

/// Cross-origin policy for the browser client.
pub fn cors(config: &Config) -> Cors {
    let cors = Cors::default()
        .allowed_methods(vec!["GET", "POST", "PUT", "DELETE", "PATCH"])
        .allowed_headers(vec![header::CONTENT_TYPE, header::AUTHORIZATION]);

    if config.allowed_origins.is_empty() {
        return cors.allow_any_origin();
    }
    config
        .allowed_origins
        .iter()
        .fold(cors, |cors, origin| cors.allowed_origin(origin))
}

pub fn configure(cfg: &mut web::ServiceConfig, config: Config) {
    let production = config.is_production();

    // Extractor failures answer in the same JSON shape as the handlers
    cfg.app_data(web::JsonConfig::default().error_handler(move |err, _req| {
        let mut body = json!({ "error": "Invalid JSON body" });
        if !production {
            body["detail"] = json!(err.to_string());
        }
        InternalError::from_response(err, HttpResponse::BadRequest().json(body)).into()
    }));
    cfg.app_data(web::PathConfig::default().error_handler(|err, _req| {
        // no record can match an id that is not a non-negative integer
        InternalError::from_response(
            err,
            HttpResponse::NotFound().json(json!({ "error": "Employee not found" })),
        )
        .into()
    }));

    let limiter = build_limiter(config.rate_per_min);

    cfg.service(
        web::scope(&config.api_prefix)
            .wrap(Condition::new(config.rate_per_min > 0, Governor::new(&limiter)))
            .service(
                web::scope("/employees")
                    // /employees
                    .service(
                        web::resource("")
                            .route(web::post().to(employee::create_employee))
                            .route(web::get().to(employee::list_employees)),
                    )
                    // /employees/{id}
                    .service(
                        web::resource("/{id}")
                            .route(web::get().to(employee::get_employee))
                            .route(web::patch().to(employee::update_employee)),
                    ),
            ),
    );

    cfg.default_service(web::to(|| async {
        HttpResponse::NotFound().json(json!({ "error": "Not found" }))
    }));
}
