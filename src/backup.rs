//! Startup snapshot of the hosts file.
//!
//! Before the engine first overwrites the target, its contents are copied to
//! `hosts.<YYYYMMDD>` in the backup directory, or `hosts.<YYYYMMDD>.<N>` when
//! earlier backups from the same day exist.

use chrono::NaiveDate;
use std::fs::{self, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use tracing::info;

use crate::error::HostsError;

/// Prefix shared by every backup file name.
const BACKUP_PREFIX: &str = "hosts";

/// Base backup file name for a date, e.g. `hosts.20240101`.
pub fn backup_file_name(date: NaiveDate) -> String {
    format!("{}.{}", BACKUP_PREFIX, date.format("%Y%m%d"))
}

/// Backup paths in probing order: `hosts.<date>`, then `hosts.<date>.1`, `.2`, ...
fn candidates(dir: &Path, date: NaiveDate) -> impl Iterator<Item = PathBuf> + '_ {
    let base = backup_file_name(date);
    (0u32..).map(move |attempt| {
        if attempt == 0 {
            dir.join(&base)
        } else {
            dir.join(format!("{}.{}", base, attempt))
        }
    })
}

/// A path whose existence cannot be determined is treated as taken.
fn is_taken(path: &Path) -> bool {
    path.try_exists().unwrap_or(true)
}

/// Copy `target` into a fresh backup file in `dir` and return its path.
///
/// Fails if the target cannot be read or the backup cannot be written. The
/// backup is created with create-new semantics, so an existing file is never
/// overwritten even if one appears between probing and writing.
pub fn snapshot(target: &Path, dir: &Path, date: NaiveDate) -> Result<PathBuf, HostsError> {
    let contents = fs::read(target).map_err(|source| HostsError::BackupRead {
        path: target.to_path_buf(),
        source,
    })?;

    for path in candidates(dir, date).filter(|path| !is_taken(path)) {
        match write_new(&path, &contents) {
            Ok(()) => {
                info!(
                    source = %target.display(),
                    backup = %path.display(),
                    bytes = contents.len(),
                    "backed up hosts file"
                );
                return Ok(path);
            }
            Err(e) if e.kind() == io::ErrorKind::AlreadyExists => continue,
            Err(source) => return Err(HostsError::BackupWrite { path, source }),
        }
    }

    Err(HostsError::BackupWrite {
        path: dir.join(backup_file_name(date)),
        source: io::Error::new(io::ErrorKind::AlreadyExists, "no unused backup name"),
    })
}

fn write_new(path: &Path, contents: &[u8]) -> io::Result<()> {
    let mut file = OpenOptions::new()
        .write(true)
        .create_new(true)
        .open(path)?;
    file.write_all(contents)?;
    file.sync_all()
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn jan_first() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 1, 1).unwrap()
    }

    #[test]
    fn test_backup_file_name_is_zero_padded() {
        let date = NaiveDate::from_ymd_opt(2024, 3, 7).unwrap();
        assert_eq!(backup_file_name(date), "hosts.20240307");
    }

    #[test]
    fn test_candidates_probe_unsuffixed_then_numbered() {
        let dir = Path::new("/backups");
        let paths: Vec<PathBuf> = candidates(dir, jan_first()).take(3).collect();
        assert_eq!(
            paths,
            vec![
                dir.join("hosts.20240101"),
                dir.join("hosts.20240101.1"),
                dir.join("hosts.20240101.2"),
            ]
        );
    }

    #[test]
    fn test_snapshot_copies_contents_verbatim() {
        let dir = tempdir().unwrap();
        let target = dir.path().join("hosts");
        let original = b"127.0.0.1 localhost\n::1 localhost\n\xff raw\n";
        fs::write(&target, original).unwrap();

        let backup = snapshot(&target, dir.path(), jan_first()).unwrap();

        assert_eq!(backup, dir.path().join("hosts.20240101"));
        assert_eq!(fs::read(&backup).unwrap(), original);
    }

    #[test]
    fn test_snapshot_never_overwrites_same_day_backups() {
        let dir = tempdir().unwrap();
        let target = dir.path().join("hosts");
        fs::write(&target, "new").unwrap();
        fs::write(dir.path().join("hosts.20240101"), "first").unwrap();
        fs::write(dir.path().join("hosts.20240101.1"), "second").unwrap();

        let backup = snapshot(&target, dir.path(), jan_first()).unwrap();

        assert_eq!(backup, dir.path().join("hosts.20240101.2"));
        assert_eq!(
            fs::read_to_string(dir.path().join("hosts.20240101")).unwrap(),
            "first"
        );
        assert_eq!(
            fs::read_to_string(dir.path().join("hosts.20240101.1")).unwrap(),
            "second"
        );
        assert_eq!(fs::read_to_string(backup).unwrap(), "new");
    }

    #[test]
    fn test_snapshot_missing_target_is_error() {
        let dir = tempdir().unwrap();
        let err = snapshot(&dir.path().join("absent"), dir.path(), jan_first()).unwrap_err();
        assert!(matches!(err, HostsError::BackupRead { .. }));
    }

    #[test]
    fn test_snapshot_unwritable_dir_is_error() {
        let dir = tempdir().unwrap();
        let target = dir.path().join("hosts");
        fs::write(&target, "x").unwrap();

        let err = snapshot(&target, &dir.path().join("no/such/dir"), jan_first()).unwrap_err();
        assert!(matches!(err, HostsError::BackupWrite { .. }));
    }
}
