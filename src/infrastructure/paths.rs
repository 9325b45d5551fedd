//! Path utilities for the Zellij plugin sandbox.
//!
//! Inside the sandbox the host filesystem is mounted under `/host`, which
//! usually resolves to the directory Zellij was started from (typically the
//! user's home). Tilde paths from the configuration are mapped onto that mount,
//! and paths shown to the user are mapped back.

use std::path::{Path, PathBuf};

const HOST_ROOT: &str = "/host";

/// Returns the data directory used for traces and default exports.
///
/// # Examples
///
/// ```
/// use tierboard::infrastructure::get_data_dir;
///
/// assert_eq!(get_data_dir().to_str(), Some("/host/.local/share/zellij/tierboard"));
/// ```
#[must_use]
pub fn get_data_dir() -> PathBuf {
    PathBuf::from(HOST_ROOT).join(".local/share/zellij").join("tierboard")
}

/// Directory that receives board exports.
///
/// `configured` comes from the `export_dir` plugin option; without it exports
/// land in `<data dir>/exports`.
#[must_use]
pub fn get_export_dir(configured: Option<&str>) -> PathBuf {
    configured
        .map(str::trim)
        .filter(|dir| !dir.is_empty())
        .map_or_else(|| get_data_dir().join("exports"), |dir| PathBuf::from(expand_tilde(dir)))
}

/// Expands tilde paths onto the `/host` mount.
///
/// # Examples
///
/// ```
/// use tierboard::infrastructure::expand_tilde;
///
/// assert_eq!(expand_tilde("~/lists"), "/host/lists");
/// assert_eq!(expand_tilde("~"), "/host");
/// assert_eq!(expand_tilde("/tmp/lists"), "/tmp/lists");
/// ```
#[must_use]
pub fn expand_tilde(path: &str) -> String {
    if path.starts_with("~/") {
        path.replacen('~', HOST_ROOT, 1)
    } else if path == "~" {
        HOST_ROOT.to_string()
    } else {
        path.to_string()
    }
}

/// Renders a sandbox path the way the user knows it, `~`-relative when it
/// lives under the host mount.
#[must_use]
pub fn display_path(path: &Path) -> String {
    let text = path.to_string_lossy();
    match text.strip_prefix(HOST_ROOT) {
        Some("") => "~".to_string(),
        Some(rest) if rest.starts_with('/') => format!("~{rest}"),
        _ => text.into_owned(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn export_dir_defaults_under_data_dir() {
        assert_eq!(get_export_dir(None), get_data_dir().join("exports"));
        assert_eq!(get_export_dir(Some("  ")), get_data_dir().join("exports"));
        assert_eq!(get_export_dir(Some("~/tier-lists")), PathBuf::from("/host/tier-lists"));
    }

    #[test]
    fn display_path_maps_host_back_to_home() {
        assert_eq!(display_path(Path::new("/host/lists/a.md")), "~/lists/a.md");
        assert_eq!(display_path(Path::new("/host")), "~");
        assert_eq!(display_path(Path::new("/hostile/a.md")), "/hostile/a.md");
        assert_eq!(display_path(Path::new("/tmp/a.md")), "/tmp/a.md");
    }
}
