#[cfg(feature = "server")]
use actix_cors::Cors;
#[cfg(feature = "server")]
use actix_web::{App, HttpServer, middleware, web};
#[cfg(feature = "server")]
use tera::Tera;

#[cfg(feature = "server")]
use crate::models::config::ServerConfig;
#[cfg(feature = "server")]
use crate::repository::CsvRowRepository;
#[cfg(feature = "server")]
use crate::routes::api::api_v1_rows;
#[cfg(feature = "server")]
use crate::routes::main::show_index;

#[cfg(feature = "component")]
pub mod component;
#[cfg(feature = "data")]
pub mod domain;
#[cfg(feature = "data")]
pub mod dto;
#[cfg(feature = "server")]
pub mod error_conversions;
#[cfg(feature = "server")]
pub mod models;
#[cfg(feature = "data")]
pub mod pagination;
#[cfg(feature = "server")]
pub mod repository;
#[cfg(feature = "server")]
pub mod routes;
#[cfg(feature = "server")]
pub mod services;

/// Builds and runs the Actix-Web HTTP server using the provided configuration.
#[cfg(feature = "server")]
pub async fn run(server_config: ServerConfig) -> std::io::Result<()> {
    server_config
        .table
        .validate()
        .map_err(|e| std::io::Error::other(format!("Invalid table configuration: {e}")))?;

    // The dataset is loaded once and shared read-only between workers.
    let repo = CsvRowRepository::from_path(&server_config.dataset_path).map_err(|e| {
        std::io::Error::other(format!(
            "Failed to load dataset {}: {e}",
            server_config.dataset_path
        ))
    })?;

    let tera = Tera::new(&server_config.templates_dir)
        .map_err(|e| std::io::Error::other(format!("Template parsing error(s): {e}")))?;

    let bind_address = (server_config.address.clone(), server_config.port);
    log::info!(
        "Serving {} rows from {} on {}:{}",
        repo.len(),
        server_config.dataset_path,
        bind_address.0,
        bind_address.1
    );

    HttpServer::new(move || {
        App::new()
            .wrap(middleware::Compress::default())
            .wrap(middleware::Logger::default())
            .service(
                web::scope("/api")
                    .wrap(Cors::permissive())
                    .service(api_v1_rows),
            )
            .service(show_index)
            .app_data(web::Data::new(tera.clone()))
            .app_data(web::Data::new(repo.clone()))
            .app_data(web::Data::new(server_config.clone()))
    })
    .bind(bind_address)?
    .run()
    .await
}
