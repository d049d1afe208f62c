//! Module for core business logic services.
//!
//! This module encapsulates services that perform specific business operations
//! and orchestrate interactions between different parts of the application,
//! such as managing node connections, submitting transactions, managing wallets
//! or aggregating account data.

pub mod data_aggregator;
pub mod ledger;
pub mod node_manager;
pub mod wallets;
