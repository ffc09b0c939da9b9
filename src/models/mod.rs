//! Configuration models of the table host.

pub mod config;
