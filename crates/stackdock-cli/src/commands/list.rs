//! `sdock list` — List the cataloged service templates.

use clap::Args;
use stackdock_catalog::TemplateRegistry;

use crate::output::format_table;

/// Arguments for the `list` subcommand.
#[derive(Args, Debug)]
pub struct ListArgs {
    /// Only show services carrying this tag.
    #[arg(short, long)]
    pub tag: Option<String>,
}

/// Executes the `list` command.
///
/// # Errors
///
/// Infallible in practice; the signature matches the dispatch table.
pub fn execute(args: ListArgs) -> anyhow::Result<()> {
    let registry = TemplateRegistry::with_builtins();

    let rows: Vec<[String; 3]> = registry
        .iter()
        .filter(|t| {
            args.tag
                .as_ref()
                .is_none_or(|tag| t.meta().tags.iter().any(|candidate| candidate == tag))
        })
        .map(|t| {
            let meta = t.meta();
            [t.name().to_string(), meta.display_name, meta.tags.join(", ")]
        })
        .collect();

    println!("{}", format_table(["NAME", "DISPLAY NAME", "TAGS"], &rows));
    Ok(())
}
