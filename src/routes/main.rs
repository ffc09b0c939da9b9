use actix_web::{HttpRequest, Responder, get, web};
use tera::{Context, Tera};

use crate::domain::request_state::RequestState;
use crate::models::config::ServerConfig;
use crate::routes::render_template;

/// Host page carrying the table markup the component binds to.
#[get("/")]
pub async fn show_index(
    req: HttpRequest,
    tera: web::Data<Tera>,
    server_config: web::Data<ServerConfig>,
) -> impl Responder {
    let state = RequestState::resolve(req.query_string(), &server_config.table);

    let mut context = Context::new();
    context.insert("table", &server_config.table);
    context.insert("state", &state);
    if let Some(search) = state.search() {
        context.insert("search_query", search.as_str());
    }

    render_template(&tera, "main/index.html", &context)
}
