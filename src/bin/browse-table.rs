//! Terminal driver for the table component against a running host.
//!
//! Reads `sort <column>`, `page <n>` and `search <term>` commands from stdin
//! and prints the materialized table after each load. The optional first
//! argument is the page query string the table starts from.

use std::env;
use std::io::{self, BufRead};

use dotenvy::dotenv;
use tera::Tera;

use pushkind_datatable::component::events::TableEvent;
use pushkind_datatable::component::history::HistoryStack;
use pushkind_datatable::component::http::HttpDataSource;
use pushkind_datatable::component::templates::{LinkPagination, TeraRowTemplate};
use pushkind_datatable::component::view::MaterializedView;
use pushkind_datatable::component::{DataTable, LoadOutcome, Renderers};
use pushkind_datatable::models::config::ServerConfig;

/// Approximate terminal row height used to size the loading placeholder.
const ROW_HEIGHT: u32 = 1;

enum Command {
    Event(TableEvent),
    Quit,
}

fn parse_command(line: &str) -> Result<Option<Command>, String> {
    let line = line.trim();
    if line.is_empty() {
        return Ok(None);
    }
    let (verb, rest) = line.split_once(' ').unwrap_or((line, ""));
    let rest = rest.trim();

    let command = match verb {
        "sort" if !rest.is_empty() => Command::Event(TableEvent::sort(rest)),
        "page" => {
            let page = rest
                .parse::<usize>()
                .map_err(|_| format!("not a page number: {rest:?}"))?;
            Command::Event(TableEvent::paginate(page))
        }
        "search" => Command::Event(TableEvent::search(rest)),
        "quit" | "exit" => Command::Quit,
        _ => return Err(format!("unknown command: {line}")),
    };
    Ok(Some(command))
}

fn report(outcome: &LoadOutcome, view: &MaterializedView) {
    match outcome {
        LoadOutcome::Rendered {
            rows, page_count, ..
        } => println!("{view}({rows} rows, {page_count} pages)"),
        LoadOutcome::Stale => {}
        LoadOutcome::FetchFailed(_) | LoadOutcome::RenderFailed(_) => println!("{view}"),
    }
}

#[actix_web::main]
async fn main() {
    dotenv().ok(); // Load .env file
    env_logger::init_from_env(env_logger::Env::default().default_filter_or("warn"));

    let server_config = match ServerConfig::load() {
        Ok(server_config) => server_config,
        Err(err) => {
            log::error!("Error loading server config: {err}");
            std::process::exit(1);
        }
    };

    let url_query = env::args().nth(1).unwrap_or_default();

    let tera = match Tera::new(&server_config.templates_dir) {
        Ok(tera) => tera,
        Err(err) => {
            log::error!("Template parsing error(s): {err}");
            std::process::exit(1);
        }
    };

    let rows = match TeraRowTemplate::new(tera, &server_config.table.rows_template) {
        Ok(rows) => rows,
        Err(err) => {
            log::error!("Invalid table configuration: {err}");
            std::process::exit(1);
        }
    };

    let source = match server_config.endpoint_url() {
        Ok(endpoint) => HttpDataSource::with_client(reqwest::Client::new(), endpoint),
        Err(err) => {
            log::error!("Invalid table configuration: {err}");
            std::process::exit(1);
        }
    };

    let view = MaterializedView::new(&server_config.table, ROW_HEIGHT);
    let mut table = match DataTable::new(
        server_config.table.clone(),
        &url_query,
        source,
        Renderers::new(rows, LinkPagination),
        view,
        HistoryStack::new(),
    ) {
        Ok(table) => table,
        Err(err) => {
            log::error!("Failed to initialize table: {err}");
            std::process::exit(1);
        }
    };

    let outcome = table.load().await;
    report(&outcome, table.view());

    for line in io::stdin().lock().lines() {
        let line = match line {
            Ok(line) => line,
            Err(err) => {
                log::error!("Failed to read command: {err}");
                break;
            }
        };

        let event = match parse_command(&line) {
            Ok(Some(Command::Event(event))) => event,
            Ok(Some(Command::Quit)) => break,
            Ok(None) => continue,
            Err(message) => {
                eprintln!("{message}");
                continue;
            }
        };

        match table.dispatch(event).await {
            Ok(outcome) => report(&outcome, table.view()),
            Err(err) => eprintln!("{err}"),
        }
    }

    if let Some(entry) = table.navigator().current() {
        println!("?{}", entry.query);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_table_commands() {
        assert!(matches!(
            parse_command("sort name"),
            Ok(Some(Command::Event(TableEvent::Sort { column }))) if column == "name"
        ));
        assert!(matches!(
            parse_command("page 3"),
            Ok(Some(Command::Event(TableEvent::Paginate { page: 3 })))
        ));
        assert!(matches!(
            parse_command("search  acme corp "),
            Ok(Some(Command::Event(TableEvent::Search { term }))) if term == "acme corp"
        ));
        assert!(matches!(parse_command("quit"), Ok(Some(Command::Quit))));
        assert!(matches!(parse_command("   "), Ok(None)));
    }

    #[test]
    fn rejects_malformed_commands() {
        assert!(parse_command("page two").is_err());
        assert!(parse_command("sort").is_err());
        assert!(parse_command("jump 4").is_err());
    }
}
