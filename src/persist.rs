//! Durable file helpers shared by the vault, the authenticator and the
//! KDF profile.
//!
//! Writes go to a temp file in the target's directory which is flushed
//! and then renamed over the target, so a reader never sees a
//! half-written file.  Files are created with mode `0600` and their
//! directory with mode `0700` on Unix.

use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use tracing::warn;

use crate::errors::Result;

/// Read `path`, returning `None` if it does not exist.
pub fn read_optional(path: &Path) -> Result<Option<Vec<u8>>> {
    match fs::read(path) {
        Ok(bytes) => Ok(Some(bytes)),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
        Err(e) => Err(e.into()),
    }
}

/// Create `dir` (and parents) with owner-only permissions.
pub fn ensure_private_dir(dir: &Path) -> Result<()> {
    if dir.as_os_str().is_empty() || dir.is_dir() {
        return Ok(());
    }
    fs::create_dir_all(dir)?;

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        fs::set_permissions(dir, fs::Permissions::from_mode(0o700))?;
    }

    Ok(())
}

/// Write `data` to `path` atomically.
///
/// The directory is synced after the rename so the new entry survives a
/// crash, not just the file contents.
pub fn write_atomic(path: &Path, data: &[u8]) -> Result<()> {
    let parent = parent_dir(path);
    ensure_private_dir(parent)?;

    let tmp_path = temp_path_for(path);
    if let Err(e) = write_synced(&tmp_path, data) {
        let _ = fs::remove_file(&tmp_path);
        return Err(e.into());
    }
    if let Err(e) = fs::rename(&tmp_path, path) {
        let _ = fs::remove_file(&tmp_path);
        return Err(e.into());
    }
    // The new contents are in place; a failed directory sync only weakens
    // durability, so it must not be reported as a failed write.
    if let Err(e) = sync_dir(parent) {
        warn!(dir = %parent.display(), error = %e, "directory sync failed");
    }

    Ok(())
}

/// The directory holding `path`; `.` for a bare file name.
fn parent_dir(path: &Path) -> &Path {
    match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    }
}

/// `.<name>.tmp` next to the target, so the rename stays on one filesystem.
fn temp_path_for(path: &Path) -> PathBuf {
    parent_dir(path).join(format!(
        ".{}.tmp",
        path.file_name().unwrap_or_default().to_string_lossy()
    ))
}

#[cfg(unix)]
fn sync_dir(dir: &Path) -> io::Result<()> {
    fs::File::open(dir)?.sync_all()
}

// Directory handles cannot be synced this way off Unix.
#[cfg(not(unix))]
fn sync_dir(_dir: &Path) -> io::Result<()> {
    Ok(())
}

fn write_synced(path: &Path, data: &[u8]) -> io::Result<()> {
    let mut options = fs::OpenOptions::new();
    options.write(true).create(true).truncate(true);

    #[cfg(unix)]
    {
        use std::os::unix::fs::OpenOptionsExt;
        options.mode(0o600);
    }

    let mut file = options.open(path)?;
    file.write_all(data)?;
    file.sync_all()
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn read_optional_missing_file_is_none() {
        let tmp = TempDir::new().unwrap();
        assert!(read_optional(&tmp.path().join("nope")).unwrap().is_none());
    }

    #[test]
    fn write_atomic_creates_parent_and_leaves_no_temp_file() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("nested").join("data.enc");

        write_atomic(&path, b"first").unwrap();
        write_atomic(&path, b"second").unwrap();

        assert_eq!(fs::read(&path).unwrap(), b"second");
        assert!(!temp_path_for(&path).exists());
    }

    #[test]
    fn bare_file_name_lives_in_current_dir() {
        assert_eq!(parent_dir(Path::new("data.enc")), Path::new("."));
        assert_eq!(temp_path_for(Path::new("data.enc")), Path::new("./.data.enc.tmp"));
        assert_eq!(parent_dir(Path::new("/v/data.enc")), Path::new("/v"));
    }

    #[cfg(unix)]
    #[test]
    fn directory_sync_succeeds_after_rename() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("pin.hash");
        write_atomic(&path, b"abc").unwrap();

        sync_dir(tmp.path()).unwrap();
        assert_eq!(fs::read(&path).unwrap(), b"abc");
    }

    #[cfg(unix)]
    #[test]
    fn write_atomic_uses_owner_only_permissions() {
        use std::os::unix::fs::PermissionsExt;

        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("secret");
        write_atomic(&path, b"x").unwrap();

        let mode = fs::metadata(&path).unwrap().permissions().mode();
        assert_eq!(mode & 0o777, 0o600);
    }
}
