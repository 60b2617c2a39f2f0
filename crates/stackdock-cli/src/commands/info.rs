//! `sdock info` — Show help links, ports, and helper commands for a service.

use clap::Args;
use stackdock_catalog::TemplateRegistry;

/// Arguments for the `info` subcommand.
#[derive(Args, Debug)]
pub struct InfoArgs {
    /// Catalog name of the service.
    pub service: String,
}

/// Executes the `info` command.
///
/// # Errors
///
/// Returns an error if the service is not in the catalog.
pub fn execute(args: InfoArgs) -> anyhow::Result<()> {
    let registry = TemplateRegistry::with_builtins();
    let template = registry.require(&args.service)?;

    let meta = template.meta();
    let help = template.help();
    let descriptor = template.config_options();

    println!("{} ({})", meta.display_name, template.name());
    println!("  website: {}", help.website);
    println!("  docs:    {}", help.docs);

    if !descriptor.labeled_ports.is_empty() {
        println!("  ports:");
        for (mapping, label) in &descriptor.labeled_ports {
            println!("    {mapping} ({label})");
        }
    }

    let deps = template.dependencies();
    if !deps.is_empty() {
        println!("  requires: {}", deps.join(", "));
    }

    let commands = template.commands();
    if !commands.is_empty() {
        println!("  commands:");
        for (name, command) in &commands {
            println!("    {name}: {command}");
        }
    }

    Ok(())
}
