//! Core bookkeeping logic for Tally.
//!
//! This crate contains pure business logic with ZERO web or database dependencies.
//! Storage is reached only through the [`store::LedgerStore`] trait, which the
//! caller injects.
//!
//! # Modules
//!
//! - `ledger` - Double-entry transaction validation and posting
//! - `store` - Ledger store interface and an in-memory implementation
//! - `reports` - Trial balance, income statement and balance sheet

pub mod ledger;
pub mod reports;
pub mod store;
