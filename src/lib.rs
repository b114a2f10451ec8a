// Library exports so the gateway crate and integration tests can reuse the
// engines without the service binary.

pub mod ai;
pub mod config;
pub mod db;
pub mod error;
pub mod geo;
pub mod hub;
pub mod kafka;
pub mod models;
pub mod processor;
pub mod routing;
pub mod scoring;
pub mod store;
