//! System-wide constants and default paths.

/// Compose schema version written into every generated document.
pub const COMPOSE_VERSION: &str = "3.8";

/// Default output file name for the composed deployment descriptor.
pub const DEFAULT_COMPOSE_FILE: &str = "docker-compose.yml";

/// File name of the generated pre-build script.
pub const PREBUILD_SCRIPT_FILE: &str = "prebuild.sh";

/// File name of the generated post-build script.
pub const POSTBUILD_SCRIPT_FILE: &str = "postbuild.sh";

/// File name of the emitted packaging manifest.
pub const ZIP_MANIFEST_FILE: &str = "zip-manifest.txt";

/// Root directory (relative to the stack) for per-service bind-mount volumes.
pub const VOLUMES_DIR: &str = "./volumes";

/// Directory holding per-service static assets shipped with the catalog.
pub const TEMPLATE_ASSET_DIR: &str = "templates";

/// Restart policy applied to services that do not override it.
pub const DEFAULT_RESTART_POLICY: &str = "unless-stopped";

/// Application name used in CLI output and generated script headers.
pub const APP_NAME: &str = "stackdock";

/// Binary name for the CLI.
pub const BIN_NAME: &str = "sdock";
