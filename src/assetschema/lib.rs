//! # Assetschema Architecture
//!
//! Assetschema is the **attribute configuration and inheritance engine** behind
//! asset forms. Assets (equipment, fixtures) are classified by a tree of
//! categories. Each category declares attributes, inherits the enabled
//! attributes of its ancestors, and shares a catalog of global attributes with
//! every other asset. The engine keeps that configuration consistent and turns
//! it into the buckets a form renderer draws.
//!
//! It is a library first; the `assetschema` binary is a read-only inspector
//! over a seeded catalog.
//!
//! ## Layers
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │  CLI Layer (main.rs, args.rs, print.rs)                     │
//! │  - Parses arguments, seeds the store, prints results        │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  API Layer (api.rs)                                         │
//! │  - Owns the store and config, dispatches to commands        │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Command Layer (commands/*.rs)                              │
//! │  - Mutations: categories, attributes, globals               │
//! │  - Readers: inherit (ancestor resolver), form (organizer)   │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Storage Layer (store/)                                     │
//! │  - SchemaState snapshot, DataStore trait, seed loader       │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Consistency
//!
//! Mutations are the only writers. Each one works on a copy of the snapshot
//! and commits the copy whole, so a mutation either fully applies or returns an
//! error and leaves the state as it was. Unknown ids surface as `*NotFound`
//! errors and protected targets as [`error::SchemaError::Locked`].
//!
//! Every walk up the tree is bounded by a visited set and
//! [`config::SchemaConfig::max_ancestor_depth`], so dangling parents and cycles
//! end the walk instead of hanging it.
//!
//! ## Module Overview
//!
//! - [`api`]: The API facade
//! - [`commands`]: Mutations and readers
//! - [`store`]: Snapshot, storage trait, seeding
//! - [`model`]: Categories, attributes, configs
//! - [`ids`]: Id generation
//! - [`config`]: Configuration
//! - [`error`]: Error types

pub mod api;
pub mod commands;
pub mod config;
pub mod error;
pub mod ids;
pub mod model;
pub mod store;
