//! # codex-contracts
//!
//! Shared types and errors for the Codex lineage toolkit.
//!
//! Every crate in the workspace imports from here. No business logic lives in
//! this crate, only data definitions and error types.

pub mod content;
pub mod error;
pub mod index;
pub mod record;
pub mod report;
