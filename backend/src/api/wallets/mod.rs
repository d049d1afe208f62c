//! Module for the wallet API.
//!
//! Wallets are created in kmd and mirrored in the database; their accounts are
//! generated by kmd on request.

pub mod handlers;
pub mod routes;
