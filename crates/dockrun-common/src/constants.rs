//! System-wide constants and default paths.

use std::path::PathBuf;
use std::sync::OnceLock;

/// Application name used in CLI output and state files.
pub const APP_NAME: &str = "dockrun";

/// Binary name for the CLI.
pub const BIN_NAME: &str = "dockrun";

/// Name of the per-workspace file listing tracked container ids.
pub const WORKSPACE_FILE_NAME: &str = ".dockerrc";

/// Name of the user-level configuration file inside the data directory.
pub const CONFIG_FILE_NAME: &str = "config.json";

/// Name of the local state index inside the data directory.
pub const STATE_FILE_NAME: &str = "state.json";

/// Default Docker-compatible CLI binary.
pub const DEFAULT_RUNTIME_BIN: &str = "docker";

/// Grace period, in seconds, passed to the runtime's stop call.
pub const DEFAULT_STOP_TIMEOUT_SECS: u32 = 10;

/// Fallback data directory when no home directory is set.
pub const SYSTEM_DATA_DIR: &str = "/var/lib/dockrun";

/// Returns `$HOME/.dockrun`, falling back to `/var/lib/dockrun`.
fn resolve_data_dir() -> PathBuf {
    std::env::var("HOME")
        .or_else(|_| std::env::var("USERPROFILE"))
        .map_or_else(
            |_| PathBuf::from(SYSTEM_DATA_DIR),
            |home| PathBuf::from(home).join(".dockrun"),
        )
}

static DATA_DIR: OnceLock<PathBuf> = OnceLock::new();

/// Returns the resolved data directory for this session.
pub fn data_dir() -> &'static PathBuf {
    DATA_DIR.get_or_init(resolve_data_dir)
}

/// Returns the default user configuration file path.
pub fn default_config_file() -> PathBuf {
    data_dir().join(CONFIG_FILE_NAME)
}

/// Returns the default local state index path.
pub fn default_state_file() -> PathBuf {
    data_dir().join(STATE_FILE_NAME)
}
