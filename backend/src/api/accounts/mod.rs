//! Module for the standalone account API.
//!
//! Standalone accounts are generated locally and keep their key in the
//! database. These endpoints create, list and inspect them, fund them from the
//! sandbox and transfer microAlgos out of them.

pub mod handlers;
pub mod routes;
