//! # stackdock-pipeline
//!
//! The build pipeline: drives the four-phase builder lifecycle
//! (compile → issues → optional assume+recompile → build) once per selected
//! service template, in selection order, against one shared working document,
//! then runs the cross-service conflict checks over the accumulated result.
//!
//! Strictly single-threaded and sequential: the shared document and script
//! lists are mutated without synchronization, and selection order is a
//! correctness dependency for deterministic conflict messages.

pub mod artifacts;
pub mod pipeline;

pub use artifacts::BuildArtifacts;
pub use pipeline::BuildPipeline;
