//! # stackdock-compose
//!
//! The in-progress composed deployment descriptor and the pure functions that
//! act on it.
//!
//! Handles:
//! - **Document**: the working `ComposeDocument` and per-service blocks.
//! - **Options**: per-service build options and the static option descriptor
//!   declaring which configuration dimensions are legal.
//! - **Merge**: descriptor-guarded merge operations applying one service's
//!   requested overrides onto its own block.
//! - **Checks**: cross-service conflict checkers producing `Issue` data.

pub mod checks;
pub mod document;
pub mod merge;
pub mod options;
