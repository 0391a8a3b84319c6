use actix_web::middleware::{Logger, NormalizePath};
use actix_web::web::Data;
use actix_web::{App, HttpServer};
use dotenvy::dotenv;
use tracing::info;
use tracing_appender::rolling;
use tracing_subscriber::EnvFilter;
use utoipa_swagger_ui::SwaggerUi;

use employee_records::config::Config;
use employee_records::db::init_store;
use employee_records::docs::ApiDoc;
use employee_records::routes;
use employee_records::service::EmployeeService;

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();

    let config = Config::from_env()?;

    // Rolling daily log
    let file_appender = rolling::daily(&config.log_dir, "app.log");
    let (non_blocking, _guard) = tracing_appender::non_blocking(file_appender);

    tracing_subscriber::fmt()
        .with_writer(non_blocking)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_ansi(false)
        .with_target(false)
        .with_level(true)
        .with_thread_ids(false)
        .with_thread_names(false)
        .pretty()
        .init();

    info!(
        host = %config.host,
        port = config.port,
        prefix = %config.api_prefix,
        "Server starting..."
    );

    let store = init_store(&config).await?;
    let service = Data::new(EmployeeService::new(store));
    let config_data = Data::new(config.clone());
    let server_addr = (config.host.clone(), config.port);

    HttpServer::new(move || {
        App::new()
            .wrap(Logger::default())
            .wrap(NormalizePath::trim())
            .wrap(routes::cors(&config))
            .service(
                SwaggerUi::new("/swagger-ui/{_:.*}")
                    .url(
                        "/api-doc/openapi.json",
                        ApiDoc::with_prefix(&config.api_prefix),
                    ),
            )
            .app_data(service.clone())
            .app_data(config_data.clone())
            .configure(|cfg| routes::configure(cfg, config.clone()))
    })
    .bind(server_addr)?
    .run()
    .await?;

    Ok(())
}
