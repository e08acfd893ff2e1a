//! Runora - personal budget and expense tracking
//!
//! This library holds the core of the Runora budgeting app: one JSON document
//! with monthly budgets, expenses filed by month, and tags, owned by a store
//! that validates every mutation, keeps the remaining balance up to date, and
//! applies a recurring monthly budget when a new month starts.
//!
//! # Architecture
//!
//! The crate is organized into the following modules:
//!
//! - `config`: Path resolution and user settings
//! - `error`: Custom error types
//! - `models`: The budget document and its records (expenses, tags, money, months)
//! - `storage`: Whole-document JSON storage with atomic writes
//! - `services`: Pure derivations (balance, rollover, spending summary)
//! - `store`: The single owner and writer of the document
//! - `backup`: Export and import of the whole document
//! - `cli`: Command handlers for the `runora` binary
//! - `display`: Table formatting for terminal output
//! - `logging`: Tracing subscriber setup
//!
//! # Example
//!
//! ```rust,ignore
//! use runora::config::{paths::RunoraPaths, settings::Settings};
//! use runora::storage::open_json_storage;
//! use runora::store::Store;
//!
//! let paths = RunoraPaths::new()?;
//! let settings = Settings::load_or_create(&paths)?;
//! let mut store = Store::open(open_json_storage(&paths)?, settings);
//! println!("{}", store.remaining_balance());
//! ```

pub mod backup;
pub mod cli;
pub mod config;
pub mod display;
pub mod error;
pub mod logging;
pub mod models;
pub mod services;
pub mod storage;
pub mod store;

pub use error::{RunoraError, RunoraResult};
pub use store::Store;
