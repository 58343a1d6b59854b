//! Backup naming and retention. Rotation and pruning both need the same view
//! of the log directory; metadata is gathered at scan time so files are
//! statted exactly once per pass.

use crate::error::Error;
use chrono::{DateTime, Local};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::{Duration, SystemTime};

/// `logs/app.log` decomposed into the pieces backup names are built from.
pub(super) struct NameParts {
    pub dir: PathBuf,
    /// File stem, `app`.
    pub base: String,
    /// Extension including the dot, `.log`; empty when the path has none.
    pub ext: String,
}

pub(super) fn split_path(path: &Path) -> NameParts {
    // A bare filename has Some("") as its parent; both cases mean "here".
    let dir = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p.to_path_buf(),
        _ => PathBuf::from("."),
    };
    let file = path.file_name().and_then(|n| n.to_str()).unwrap_or("log");
    match file.rsplit_once('.') {
        Some((base, ext)) if !base.is_empty() => NameParts {
            dir,
            base: base.to_string(),
            ext: format!(".{ext}"),
        },
        _ => NameParts {
            dir,
            base: file.to_string(),
            ext: String::new(),
        },
    }
}

/// Builds `<base>.<timestamp>[.<seq>]<ext>`, bumping `seq` past collisions so
/// two rotations within the format's resolution never clobber each other.
pub(super) fn backup_path(
    path: &Path,
    now: DateTime<Local>,
    time_format: &str,
    seq: &mut u64,
) -> PathBuf {
    let parts = split_path(path);
    let stamp = now.format(time_format).to_string();

    let plain = parts.dir.join(format!("{}.{stamp}{}", parts.base, parts.ext));
    if !plain.exists() && !gz_sibling(&plain).exists() {
        return plain;
    }
    loop {
        *seq += 1;
        let candidate = parts
            .dir
            .join(format!("{}.{stamp}.{}{}", parts.base, *seq, parts.ext));
        if !candidate.exists() && !gz_sibling(&candidate).exists() {
            return candidate;
        }
    }
}

/// `path` with `.gz` appended; `Path::with_extension` would replace the real
/// extension instead.
pub(super) fn gz_sibling(path: &Path) -> PathBuf {
    let mut s = path.as_os_str().to_os_string();
    s.push(".gz");
    PathBuf::from(s)
}

/// One backup with the metadata pruning needs, captured at scan time.
pub(super) struct BackupInfo {
    pub path: PathBuf,
    pub modified: SystemTime,
}

/// Enumerates sibling files matching `<base>.<middle><ext>[.gz]`, excluding
/// the live file itself.
pub(super) fn list_backups(path: &Path) -> Result<Vec<BackupInfo>, Error> {
    let parts = split_path(path);
    let prefix = format!("{}.", parts.base);
    let live = path.file_name().and_then(|n| n.to_str()).unwrap_or("").to_string();

    let mut backups = Vec::new();
    for entry in fs::read_dir(&parts.dir)? {
        let entry = entry?;
        let Ok(name) = entry.file_name().into_string() else {
            continue;
        };
        if name == live || !name.starts_with(&prefix) {
            continue;
        }
        let matches_ext = parts.ext.is_empty()
            || name.ends_with(&parts.ext)
            || name.ends_with(&format!("{}.gz", parts.ext));
        if !matches_ext || entry.path().is_dir() {
            continue;
        }
        let meta = entry.metadata()?;
        let modified = meta.modified().unwrap_or(SystemTime::UNIX_EPOCH);
        backups.push(BackupInfo {
            path: entry.path(),
            modified,
        });
    }
    Ok(backups)
}

/// Deletes backups past `max_age` (by mtime), then the oldest beyond
/// `max_backups`. Runs after every rotation; the directory scan is cheap at
/// realistic backup counts.
pub(super) fn prune(
    path: &Path,
    max_age: Option<Duration>,
    max_backups: Option<usize>,
    now: SystemTime,
) -> Result<(), Error> {
    let mut backups = list_backups(path)?;
    backups.sort_by_key(|b| b.modified);

    if let Some(max_age) = max_age {
        backups.retain(|b| {
            let expired = now
                .duration_since(b.modified)
                .is_ok_and(|age| age > max_age);
            if expired {
                let _ = fs::remove_file(&b.path);
            }
            !expired
        });
    }

    if let Some(max_backups) = max_backups
        && backups.len() > max_backups
    {
        let excess = backups.len() - max_backups;
        for b in backups.drain(..excess) {
            fs::remove_file(&b.path)?;
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn split_decomposes_stem_and_extension() {
        let parts = split_path(Path::new("logs/app.log"));
        assert_eq!(parts.base, "app");
        assert_eq!(parts.ext, ".log");
        assert_eq!(parts.dir, Path::new("logs"));
    }

    #[test]
    fn split_handles_missing_extension() {
        let parts = split_path(Path::new("app"));
        assert_eq!(parts.base, "app");
        assert_eq!(parts.ext, "");
        assert_eq!(parts.dir, Path::new("."));
    }

    #[test]
    fn split_keeps_only_last_extension() {
        let parts = split_path(Path::new("/var/log/app.2024.log"));
        assert_eq!(parts.base, "app.2024");
        assert_eq!(parts.ext, ".log");
    }
}
