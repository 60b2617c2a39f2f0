//! Compile-merge logic: descriptor-guarded merge operations.
//!
//! Each function folds one dimension of a service's requested overrides onto
//! that service's block. The operations are independent, order-insensitive,
//! and idempotent. Requests outside the descriptor's declared surface are
//! dropped silently here; the conflict checkers report separately on what
//! should be flagged.

use crate::document::{LoggingBlock, ServiceBlock};
use crate::options::{BuildOptions, OptionDescriptor};

/// Applies requested port remaps onto the block.
///
/// A remap is accepted only when its container port is declared in the
/// descriptor's label set; an accepted remap replaces any previous mapping
/// for the same container port.
pub fn merge_ports(block: &mut ServiceBlock, options: &BuildOptions, descriptor: &OptionDescriptor) {
    for remap in &options.ports {
        if !descriptor.declares_container_port(remap.container) {
            tracing::debug!(remap = %remap, "dropping undeclared port remap");
            continue;
        }
        if let Some(existing) = block
            .ports
            .iter_mut()
            .find(|p| p.container == remap.container)
        {
            existing.host = remap.host;
        } else {
            block.ports.push(*remap);
        }
    }
}

/// Applies requested environment overrides for declared keys only.
pub fn merge_environment(
    block: &mut ServiceBlock,
    options: &BuildOptions,
    descriptor: &OptionDescriptor,
) {
    for (key, value) in &options.environment {
        if !descriptor.declares_env_key(key) {
            tracing::debug!(key = %key, "dropping undeclared environment override");
            continue;
        }
        let _ = block.environment.insert(key.clone(), value.clone());
    }
}

/// Applies the selected image tag when it is in the descriptor's allowed set.
///
/// The repository part of the block's image reference is kept; only the tag
/// after the last `:` is replaced.
pub fn merge_image_tag(
    block: &mut ServiceBlock,
    options: &BuildOptions,
    descriptor: &OptionDescriptor,
) {
    let Some(tag) = options.image_tag.as_deref() else {
        return;
    };
    if !descriptor.image_tags.iter().any(|t| t == tag) {
        tracing::debug!(tag = %tag, "dropping unlisted image tag");
        return;
    }
    if let Some(image) = block.image.as_deref() {
        let repository = image.rsplit_once(':').map_or(image, |(repo, _)| repo);
        block.image = Some(format!("{repository}:{tag}"));
    }
}

/// Toggles the standard logging block, only for services that support it.
pub fn merge_logging(
    block: &mut ServiceBlock,
    options: &BuildOptions,
    descriptor: &OptionDescriptor,
) {
    if !descriptor.logging {
        return;
    }
    match options.logging {
        Some(true) => block.logging = Some(LoggingBlock::default()),
        Some(false) => block.logging = None,
        None => {}
    }
}

/// Sets the network mode, only for services that participate in networking.
///
/// A network mode is exclusive with named networks, so setting one clears the
/// block's network list.
pub fn merge_network_mode(
    block: &mut ServiceBlock,
    options: &BuildOptions,
    descriptor: &OptionDescriptor,
) {
    if !descriptor.networks {
        return;
    }
    if let Some(mode) = &options.network_mode {
        block.network_mode = Some(mode.clone());
        block.networks.clear();
    }
}

/// Attaches the service to named user-defined networks.
pub fn merge_networks(
    block: &mut ServiceBlock,
    options: &BuildOptions,
    descriptor: &OptionDescriptor,
) {
    if !descriptor.networks {
        return;
    }
    for network in &options.networks {
        if !block.networks.contains(network) {
            block.networks.push(network.clone());
        }
    }
}
