//! Module for searching historical transactions through the indexer.

pub mod handlers;
pub mod routes;
