//! Quotebook Core Library
//!
//! This crate provides the core functionality for Quotebook, a local-first
//! quote collection with optional sync against a remote HTTP endpoint.
//!
//! # Architecture
//!
//! - **Slots**: durable JSON files for the quote list and selected category,
//!   plus in-memory session slots
//! - **Session**: the single owner of the store; user actions and sync
//!   cycles both go through it
//! - **Surface**: trait implemented by the front end to render quotes
//!
//! # Quick Start
//!
//! ```text
//! let config = Config::load()?;
//! let mut session = Session::open(&config, surface)?;
//!
//! session.add_quote("Simplicity is prerequisite for reliability.", "Engineering")?;
//! session.filter_quotes("Engineering")?;
//! ```
//!
//! # Modules
//!
//! - `session`: Coordinator for user actions and sync (main entry point)
//! - `store`: Ordered, persisted quote list
//! - `categories`: Category list and persisted selection
//! - `display`: Random selection and the `Surface` trait
//! - `codec`: JSON import/export
//! - `sync`: Remote endpoint client, merge, and poller
//! - `storage`: Durable and session slots
//! - `config`: Application configuration

pub mod categories;
pub mod codec;
pub mod config;
pub mod display;
pub mod error;
pub mod ids;
pub mod models;
pub mod session;
pub mod storage;
pub mod store;
pub mod sync;

pub use config::Config;
pub use display::{Pick, Surface};
pub use error::{QuoteError, QuoteResult};
pub use models::{ImportedQuote, Quote, RemoteQuote, ALL_CATEGORY};
pub use session::Session;
pub use storage::{FileSlots, MemorySlots, SlotStore, StorageError};
pub use store::QuoteStore;
