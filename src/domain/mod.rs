//! Domain types of the remote data table.

pub mod request_state;
pub mod server_page;
pub mod table;
pub mod types;
