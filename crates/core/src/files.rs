//! File output helpers.

use std::io::Write;
use std::path::Path;

/// Replace `path` with `contents` via a temporary file in the same directory.
///
/// Readers see either the previous file or the complete new one. Missing
/// parent directories are created. A replaced file keeps its permissions; a
/// new one gets the usual `0o666` less the umask.
pub fn write_atomic(path: &Path, contents: &str) -> std::io::Result<()> {
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    std::fs::create_dir_all(dir)?;

    let existing = std::fs::metadata(path).ok().map(|m| m.permissions());

    let mut temp_file = new_temp_file(dir)?;
    temp_file.write_all(contents.as_bytes())?;
    temp_file.flush()?;
    if let Some(permissions) = existing {
        temp_file.as_file().set_permissions(permissions)?;
    }
    temp_file.persist(path).map_err(|e| e.error)?;

    Ok(())
}

#[cfg(unix)]
fn new_temp_file(dir: &Path) -> std::io::Result<tempfile::NamedTempFile> {
    use std::os::unix::fs::PermissionsExt;

    // The umask applies on creation, as for a plain `File::create`.
    tempfile::Builder::new()
        .permissions(std::fs::Permissions::from_mode(0o666))
        .tempfile_in(dir)
}

#[cfg(not(unix))]
fn new_temp_file(dir: &Path) -> std::io::Result<tempfile::NamedTempFile> {
    tempfile::NamedTempFile::new_in(dir)
}
