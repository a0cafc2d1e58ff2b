//! Reactive financial state core for a personal finance tracker.
//!
//! Two independent state containers make up the core: the
//! [`finance::FinanceStore`] owns the expense, income, debt, and category
//! collections and derives aggregates from them; the
//! [`settings::SettingsStore`] owns the user-preferences record, resolves
//! the effective theme against the system color-scheme signal, and
//! persists preferences through a pluggable storage slot. The presentation
//! layer consumes both; neither depends on the other.

pub mod display;
pub mod error;
pub mod finance;
pub mod models;
pub mod service;
pub mod settings;
pub mod storage;
