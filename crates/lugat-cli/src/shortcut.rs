//! Desktop launcher
//!
//! Writes a freedesktop `Lugat.desktop` entry that starts the TUI in a
//! terminal. Best effort: nothing here is allowed to stop the app starting.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use lugat_core::Config;
use tracing::{debug, info};

/// File name of the launcher
pub const SHORTCUT_FILE: &str = "Lugat.desktop";

/// Create the launcher on the user's desktop if it is missing
///
/// Returns the path written, or `None` if a launcher already existed or the
/// platform has no freedesktop launchers.
pub fn ensure_desktop_shortcut() -> Result<Option<PathBuf>> {
    if !cfg!(unix) || cfg!(target_os = "macos") {
        return Ok(None);
    }

    let desktop = dirs::desktop_dir().context("No desktop directory for this user")?;
    let exe = std::env::current_exe().context("Failed to locate the lugat executable")?;
    write_shortcut(&desktop, &exe)
}

/// Run at TUI start when `desktop_shortcut` is enabled; never fails
pub fn try_create_on_startup(config: &Config) {
    if !config.desktop_shortcut {
        return;
    }

    match ensure_desktop_shortcut() {
        Ok(Some(path)) => info!("Created desktop shortcut {:?}", path),
        Ok(None) => debug!("Desktop shortcut already present"),
        Err(e) => debug!("Desktop shortcut not created: {:#}", e),
    }
}

/// Write the launcher into `dir` unless one is already there
fn write_shortcut(dir: &Path, exe: &Path) -> Result<Option<PathBuf>> {
    let path = dir.join(SHORTCUT_FILE);
    if path.exists() {
        return Ok(None);
    }

    fs::write(&path, desktop_entry(exe))
        .with_context(|| format!("Failed to write {:?}", path))?;

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        fs::set_permissions(&path, fs::Permissions::from_mode(0o755))
            .with_context(|| format!("Failed to mark {:?} executable", path))?;
    }

    Ok(Some(path))
}

fn desktop_entry(exe: &Path) -> String {
    format!(
        "[Desktop Entry]\n\
         Type=Application\n\
         Name=Lugat\n\
         Comment=Dictionary lookup history\n\
         Exec=\"{}\" tui\n\
         Terminal=true\n\
         Categories=Office;Dictionary;\n",
        exe.display()
    )
}
