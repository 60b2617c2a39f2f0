//! # stackdock-catalog
//!
//! The service catalog: one self-contained template per deployable unit,
//! all exposing the same capability set through the [`ServiceTemplate`]
//! trait, looked up by name through the [`TemplateRegistry`].
//!
//! Templates are static data providers (ports, display metadata, help
//! links, default blocks) plus the four-phase builder lifecycle driven by
//! the pipeline: compile, issues, assume, build.

pub mod registry;
pub mod services;
pub mod template;

pub use registry::TemplateRegistry;
pub use template::{BuildContext, HelpLinks, ServiceMeta, ServiceTemplate};
