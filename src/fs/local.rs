//! Filesystem access through the kernel (`std::fs`)

use super::{EntryStat, EntryType, Filesystem};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Kernel-backed filesystem, local or network mounted
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalFs;

impl Filesystem for LocalFs {
    fn stat(&self, path: &Path) -> io::Result<EntryStat> {
        EntryStat::from_metadata(&fs::metadata(path)?)
    }

    fn lstat(&self, path: &Path) -> io::Result<EntryStat> {
        EntryStat::from_metadata(&fs::symlink_metadata(path)?)
    }

    fn entry_type(&self, path: &Path) -> io::Result<EntryType> {
        Ok(EntryType::from_file_type(fs::symlink_metadata(path)?.file_type()))
    }

    fn list_dir(&self, path: &Path) -> io::Result<Vec<PathBuf>> {
        let mut children = fs::read_dir(path)?
            .map(|entry| entry.map(|e| path.join(e.file_name())))
            .collect::<io::Result<Vec<_>>>()?;
        children.sort();
        Ok(children)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_list_dir_sorted_absolute() {
        let dir = tempdir().unwrap();
        for name in ["c", "a", "b"] {
            fs::write(dir.path().join(name), b"x").unwrap();
        }

        let children = LocalFs.list_dir(dir.path()).unwrap();
        assert_eq!(
            children,
            vec![dir.path().join("a"), dir.path().join("b"), dir.path().join("c")]
        );
    }

    #[test]
    fn test_missing_path_is_not_found() {
        let dir = tempdir().unwrap();
        let missing = dir.path().join("missing");

        let err = LocalFs.stat(&missing).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::NotFound);
        assert!(LocalFs.list_dir(&missing).is_err());
    }

    #[cfg(unix)]
    #[test]
    fn test_symlink_not_followed() {
        let dir = tempdir().unwrap();
        let target = dir.path().join("target");
        fs::write(&target, vec![0u8; 4096]).unwrap();
        let link = dir.path().join("link");
        std::os::unix::fs::symlink(&target, &link).unwrap();

        assert_eq!(LocalFs.entry_type(&link).unwrap(), EntryType::Symlink);
        let lstat = LocalFs.lstat(&link).unwrap();
        assert_eq!(lstat.entry_type, EntryType::Symlink);
        assert_ne!(lstat.size, 4096);
        assert_eq!(LocalFs.stat(&link).unwrap().size, 4096);
    }
}
