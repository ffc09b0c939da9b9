use actix_web::{HttpResponse, Responder, get, web};
use log::error;

use crate::dto::api::RowsQuery;
use crate::models::config::ServerConfig;
use crate::repository::CsvRowRepository;
use crate::routes::service_error_response;
use crate::services::rows::list_rows;

#[get("/v1/rows")]
pub async fn api_v1_rows(
    params: web::Query<RowsQuery>,
    repo: web::Data<CsvRowRepository>,
    server_config: web::Data<ServerConfig>,
) -> impl Responder {
    match list_rows(repo.get_ref(), &server_config.table, params.into_inner()) {
        Ok(page) => HttpResponse::Ok().json(page),
        Err(e) => {
            error!("Failed to list rows: {e}");
            service_error_response(&e)
        }
    }
}
