//! Storage layer
//!
//! Quote state is kept in named key-value slots.
//!
//! ## Architecture
//!
//! - **FileSlots**: durable slots, one JSON file per key in the data directory
//! - **MemorySlots**: session slots, gone when the process exits

pub mod error;
pub mod slots;

pub use error::{StorageError, StorageResult};
pub use slots::{
    read_json, write_json, FileSlots, MemorySlots, SlotStore, SLOT_LAST_CATEGORY,
    SLOT_LAST_QUOTE_INDEX, SLOT_QUOTES,
};
