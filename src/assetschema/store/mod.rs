//! # Storage Layer
//!
//! The engine keeps its whole configuration in one owned [`SchemaState`]
//! snapshot. A [`DataStore`] hands that snapshot out for reading and accepts a
//! complete replacement on commit.
//!
//! ## Copy-on-write Commits
//!
//! Commands never edit the live snapshot. They clone it, apply their change to
//! the clone, and commit the clone as a whole. A command that fails (unknown
//! id, locked attribute) returns before committing, so an `Err` always means
//! the stored state is exactly what it was before the call.
//!
//! ## Implementations
//!
//! - [`memory::InMemoryStore`]: the only live store. State lives for the
//!   lifetime of the process.
//! - [`seed::load_seed`]: reads the JSON catalog a store is seeded from.
//!   Nothing is ever written back.
//!
//! ## Seed Format
//!
//! ```text
//! {
//!   "categories":        [Category, ...],
//!   "global_attributes": [GlobalAttribute, ...],
//!   "system_catalog":    { "<category id>": [Attribute, ...] },
//!   "custom_catalog":    { "<category id>": [Attribute, ...] }
//! }
//! ```

use crate::error::Result;

pub mod memory;
pub mod seed;
mod state;

pub use state::SchemaState;

/// Abstract owner of the schema snapshot.
pub trait DataStore {
    /// Current snapshot
    fn state(&self) -> &SchemaState;

    /// Replace the snapshot wholesale
    fn commit(&mut self, next: SchemaState) -> Result<()>;
}
