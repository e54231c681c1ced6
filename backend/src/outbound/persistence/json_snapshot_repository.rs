//! JSON file adapter for [`SnapshotRepository`].
//!
//! Writes go to a uniquely named sibling temp file which is flushed and then
//! renamed over the target, so a crash mid-write leaves either the previous
//! document or the new one on disk, never a torn file.

use std::io::{self, Write};
use std::path::{Path, PathBuf};

use cap_std::{ambient_authority, fs::Dir};
use tracing::debug;
use uuid::Uuid;

use super::document::StoreDocument;
use crate::domain::StoreSnapshot;
use crate::domain::ports::{SnapshotRepository, SnapshotRepositoryError};

/// Snapshot repository persisting to a single JSON file.
#[derive(Debug)]
pub struct JsonFileSnapshotRepository {
    dir: Dir,
    dir_path: PathBuf,
    file_name: PathBuf,
}

fn io_error(path: &Path, err: io::Error) -> SnapshotRepositoryError {
    SnapshotRepositoryError::io(format!("{}: {err}", path.display()))
}

impl JsonFileSnapshotRepository {
    /// Open the repository for `path`, creating its parent directory if
    /// needed. The file itself is only created by the first save.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, SnapshotRepositoryError> {
        let path = path.as_ref();
        let file_name = path
            .file_name()
            .map(PathBuf::from)
            .ok_or_else(|| {
                SnapshotRepositoryError::io(format!("{} does not name a file", path.display()))
            })?;
        let dir_path = match path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
            _ => PathBuf::from("."),
        };

        Dir::create_ambient_dir_all(&dir_path, ambient_authority())
            .map_err(|err| io_error(&dir_path, err))?;
        let dir = Dir::open_ambient_dir(&dir_path, ambient_authority())
            .map_err(|err| io_error(&dir_path, err))?;

        Ok(Self {
            dir,
            dir_path,
            file_name,
        })
    }

    /// Full path of the snapshot file.
    pub fn path(&self) -> PathBuf {
        self.dir_path.join(&self.file_name)
    }

    fn temp_name(&self) -> PathBuf {
        PathBuf::from(format!(
            ".{}.tmp-{}",
            self.file_name.display(),
            Uuid::new_v4().simple()
        ))
    }

    fn write_temp(&self, temp: &Path, bytes: &[u8]) -> io::Result<()> {
        let mut file = self.dir.create(temp)?;
        file.write_all(bytes)?;
        file.sync_all()
    }
}

impl SnapshotRepository for JsonFileSnapshotRepository {
    fn load(&self) -> Result<Option<StoreSnapshot>, SnapshotRepositoryError> {
        let raw = match self.dir.read_to_string(&self.file_name) {
            Ok(raw) => raw,
            Err(err) if err.kind() == io::ErrorKind::NotFound => return Ok(None),
            Err(err) => return Err(io_error(&self.path(), err)),
        };
        let document: StoreDocument = serde_json::from_str(&raw)
            .map_err(|err| SnapshotRepositoryError::corrupt(err.to_string()))?;
        StoreSnapshot::try_from(document).map(Some)
    }

    fn save(&self, snapshot: &StoreSnapshot) -> Result<(), SnapshotRepositoryError> {
        let bytes = serde_json::to_vec_pretty(&StoreDocument::from(snapshot))
            .map_err(|err| SnapshotRepositoryError::serialization(err.to_string()))?;

        let temp = self.temp_name();
        let written = self
            .write_temp(&temp, &bytes)
            .and_then(|()| self.dir.rename(&temp, &self.dir, &self.file_name));
        if let Err(err) = written {
            let _cleanup = self.dir.remove_file(&temp);
            return Err(io_error(&self.path(), err));
        }
        debug!(path = %self.path().display(), bytes = bytes.len(), "snapshot saved");
        Ok(())
    }

    fn remove(&self) -> Result<(), SnapshotRepositoryError> {
        match self.dir.remove_file(&self.file_name) {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(err) => Err(io_error(&self.path(), err)),
        }
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use crate::domain::{PasswordHash, User, UserId, Username};
    use rstest::{fixture, rstest};
    use tempfile::TempDir;

    #[fixture]
    fn temp_dir() -> TempDir {
        tempfile::tempdir().expect("temp dir")
    }

    fn sample_snapshot() -> StoreSnapshot {
        StoreSnapshot {
            users: vec![User::new(
                UserId::random(),
                Username::new("org1").expect("username"),
                PasswordHash::new("$argon2id$v=19$stub").expect("hash"),
            )],
            ..StoreSnapshot::default()
        }
    }

    #[rstest]
    fn load_returns_none_before_first_save(temp_dir: TempDir) {
        let repo = JsonFileSnapshotRepository::open(temp_dir.path().join("store.json"))
            .expect("open");
        assert!(repo.load().expect("load").is_none());
    }

    #[rstest]
    fn save_then_load_restores_snapshot(temp_dir: TempDir) {
        let repo = JsonFileSnapshotRepository::open(temp_dir.path().join("nested/store.json"))
            .expect("open");
        let snapshot = sample_snapshot();

        repo.save(&snapshot).expect("save");
        assert_eq!(repo.load().expect("load"), Some(snapshot));
    }

    #[rstest]
    fn save_leaves_no_temp_files_behind(temp_dir: TempDir) {
        let repo = JsonFileSnapshotRepository::open(temp_dir.path().join("store.json"))
            .expect("open");
        repo.save(&sample_snapshot()).expect("first save");
        repo.save(&StoreSnapshot::default()).expect("second save");

        let names: Vec<_> = std::fs::read_dir(temp_dir.path())
            .expect("read dir")
            .map(|entry| entry.expect("entry").file_name())
            .collect();
        assert_eq!(names, vec![std::ffi::OsString::from("store.json")]);
        assert_eq!(repo.load().expect("load"), Some(StoreSnapshot::default()));
    }

    #[rstest]
    fn remove_is_idempotent(temp_dir: TempDir) {
        let repo = JsonFileSnapshotRepository::open(temp_dir.path().join("store.json"))
            .expect("open");
        repo.save(&sample_snapshot()).expect("save");

        repo.remove().expect("first remove");
        repo.remove().expect("second remove");
        assert!(repo.load().expect("load").is_none());
    }

    #[rstest]
    fn malformed_file_is_corrupt(temp_dir: TempDir) {
        let path = temp_dir.path().join("store.json");
        std::fs::write(&path, b"{ not json").expect("write");
        let repo = JsonFileSnapshotRepository::open(&path).expect("open");

        let err = repo.load().expect_err("corrupt");
        assert!(matches!(err, SnapshotRepositoryError::Corrupt { .. }));
    }
}
