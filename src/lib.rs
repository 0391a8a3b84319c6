//! Employee records: REST API, persistence gateway and the form/table client.

pub mod api;
pub mod client;
pub mod config;
pub mod db;
pub mod docs;
pub mod error;
pub mod model;
pub mod routes;
pub mod service;
pub mod store;
pub mod utils;
pub mod validation;
