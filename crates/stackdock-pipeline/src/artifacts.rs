//! The build artifact manifest: composed document, issue list, ordered
//! script fragments, and the file-packaging list.

use stackdock_common::types::{Issue, ScriptFragment, ZipEntry};
use stackdock_compose::document::ComposeDocument;

/// Output of one full pipeline run.
///
/// The zip list and script lists are handed to the external packager; the
/// document is serialized by the caller.
#[derive(Debug, Clone)]
pub struct BuildArtifacts {
    /// The composed deployment descriptor.
    pub document: ComposeDocument,
    /// Every finding collected across the run, in detection order.
    pub issues: Vec<Issue>,
    /// File-packaging entries, in build order.
    pub zip_entries: Vec<ZipEntry>,
    /// Pre-build script fragments, in insertion order.
    pub prebuild: Vec<ScriptFragment>,
    /// Post-build script fragments, in insertion order.
    pub postbuild: Vec<ScriptFragment>,
}

impl BuildArtifacts {
    /// Returns whether any conflict or missing dependency was detected.
    #[must_use]
    pub fn has_issues(&self) -> bool {
        !self.issues.is_empty()
    }
}

/// Assembles an executable shell script from ordered fragments.
///
/// Each fragment becomes a commented block tagged with its owning service;
/// fragment order is preserved exactly.
#[must_use]
pub fn render_script(title: &str, fragments: &[ScriptFragment]) -> String {
    let mut script = String::new();
    script.push_str("#!/usr/bin/env bash\n");
    script.push_str(&format!(
        "# {title} (generated by {})\n",
        stackdock_common::constants::APP_NAME
    ));
    script.push_str("set -e\n");
    for fragment in fragments {
        script.push('\n');
        script.push_str(&format!("# [{}] {}\n", fragment.service, fragment.comment));
        script.push_str(&fragment.code);
        script.push('\n');
    }
    script
}

/// Renders the packaging list as one `source -> destination` line per entry.
#[must_use]
pub fn render_zip_manifest(entries: &[ZipEntry]) -> String {
    entries
        .iter()
        .map(|e| format!("{} -> {}\n", e.full_path.display(), e.zip_name))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn render_script_preserves_fragment_order() {
        let fragments = vec![
            ScriptFragment::new("alpha", "first", "echo one"),
            ScriptFragment::new("beta", "second", "echo two"),
            ScriptFragment::new("alpha", "third", "echo three"),
        ];
        let script = render_script("post-build steps", &fragments);

        let one = script.find("echo one").expect("one");
        let two = script.find("echo two").expect("two");
        let three = script.find("echo three").expect("three");
        assert!(one < two && two < three, "got: {script}");
        assert!(script.starts_with("#!/usr/bin/env bash\n"));
        assert!(script.contains("# [beta] second"), "got: {script}");
    }

    #[test]
    fn render_script_keeps_duplicate_fragments() {
        let fragment = ScriptFragment::new("svc", "same", "echo same");
        let script = render_script("pre-build steps", &[fragment.clone(), fragment]);
        assert_eq!(script.matches("echo same").count(), 2);
    }

    #[test]
    fn zip_manifest_lists_every_entry() {
        let entries = vec![
            ZipEntry::new("templates/mosquitto/mosquitto.conf", "mosquitto/mosquitto.conf"),
            ZipEntry::new("templates/telegraf/telegraf.conf", "telegraf/telegraf.conf"),
        ];
        let manifest = render_zip_manifest(&entries);
        assert_eq!(manifest.lines().count(), 2);
        assert!(
            manifest.contains("-> mosquitto/mosquitto.conf"),
            "got: {manifest}"
        );
    }
}
