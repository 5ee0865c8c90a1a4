//! Platform-specific locations for the layout store and the log file.

use std::path::PathBuf;

use directories::ProjectDirs;

const QUALIFIER: &str = "dev";
const ORGANIZATION: &str = "mapa17";
const APPLICATION: &str = "tvgrid";

fn project_dirs() -> Option<ProjectDirs> {
    ProjectDirs::from(QUALIFIER, ORGANIZATION, APPLICATION)
}

/// Directory of the key/value store.
///
/// - Linux: `$XDG_DATA_HOME/tvgrid` or `~/.local/share/tvgrid`
/// - macOS: `~/Library/Application Support/dev.mapa17.tvgrid`
/// - Windows: `C:\Users\<User>\AppData\Roaming\mapa17\tvgrid\data`
pub fn store_dir() -> Option<PathBuf> {
    project_dirs().map(|dirs| dirs.data_dir().to_path_buf())
}

/// Log file, overwritten on every start.
pub fn log_file() -> Option<PathBuf> {
    project_dirs().map(|dirs| dirs.cache_dir().join("tvgrid.log"))
}
