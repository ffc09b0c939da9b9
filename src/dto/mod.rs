//! DTO modules shared by the table component and the paged JSON endpoint.

pub mod api;
