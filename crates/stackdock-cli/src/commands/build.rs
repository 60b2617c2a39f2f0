//! `sdock build` — Compose the selected services and write the artifacts.

use std::collections::BTreeMap;
use std::path::PathBuf;

use clap::Args;
use stackdock_catalog::TemplateRegistry;
use stackdock_common::constants;
use stackdock_pipeline::artifacts::{render_script, render_zip_manifest};
use stackdock_pipeline::BuildPipeline;

/// Arguments for the `build` subcommand.
#[derive(Args, Debug)]
pub struct BuildArgs {
    /// Service to include, in order; repeatable.
    #[arg(short, long = "service", required = true)]
    pub services: Vec<String>,

    /// Directory to write the generated artifacts into.
    #[arg(short, long, default_value = ".")]
    pub output: PathBuf,
}

/// Executes the `build` command.
///
/// Detected conflicts are reported but never abort the run; a faulting
/// phase does.
///
/// # Errors
///
/// Returns an error if composition fails or the artifacts cannot be written.
pub fn execute(args: BuildArgs) -> anyhow::Result<()> {
    tracing::info!(services = ?args.services, "composing stack");

    let registry = TemplateRegistry::with_builtins();
    let pipeline = BuildPipeline::new(&registry);
    let artifacts = pipeline.run(&args.services, &BTreeMap::new())?;

    if artifacts.has_issues() {
        println!("Found {} issue(s):", artifacts.issues.len());
        for issue in &artifacts.issues {
            println!("  {issue}");
        }
    }

    std::fs::create_dir_all(&args.output)?;
    let compose_path = args.output.join(constants::DEFAULT_COMPOSE_FILE);
    std::fs::write(&compose_path, serde_yaml::to_string(&artifacts.document)?)?;
    std::fs::write(
        args.output.join(constants::PREBUILD_SCRIPT_FILE),
        render_script("pre-build steps", &artifacts.prebuild),
    )?;
    std::fs::write(
        args.output.join(constants::POSTBUILD_SCRIPT_FILE),
        render_script("post-build steps", &artifacts.postbuild),
    )?;
    std::fs::write(
        args.output.join(constants::ZIP_MANIFEST_FILE),
        render_zip_manifest(&artifacts.zip_entries),
    )?;

    println!(
        "Composed {} service(s) -> {}",
        artifacts.document.services.len(),
        compose_path.display()
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn build_writes_all_artifacts() {
        let dir = tempfile::tempdir().expect("tempdir");
        let args = BuildArgs {
            services: vec!["mosquitto".to_string()],
            output: dir.path().to_path_buf(),
        };
        execute(args).expect("execute");

        for file in [
            constants::DEFAULT_COMPOSE_FILE,
            constants::PREBUILD_SCRIPT_FILE,
            constants::POSTBUILD_SCRIPT_FILE,
            constants::ZIP_MANIFEST_FILE,
        ] {
            assert!(dir.path().join(file).exists(), "{file} missing");
        }

        let yaml = std::fs::read_to_string(dir.path().join(constants::DEFAULT_COMPOSE_FILE))
            .expect("read compose file");
        assert!(yaml.contains("eclipse-mosquitto"), "got: {yaml}");
    }

    #[test]
    fn build_with_unknown_service_fails() {
        let dir = tempfile::tempdir().expect("tempdir");
        let args = BuildArgs {
            services: vec!["ghost".to_string()],
            output: dir.path().to_path_buf(),
        };
        assert!(execute(args).is_err());
    }
}
