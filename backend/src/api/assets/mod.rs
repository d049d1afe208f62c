//! Module for the asset API: issuing Algorand assets and listing the ones
//! created through this application.

pub mod handlers;
pub mod routes;
