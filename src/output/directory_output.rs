use std::fs;
use std::io::Write;
#[cfg(unix)]
use std::os::unix::fs::PermissionsExt;
use std::path::{Path, PathBuf};

use tempfile::{Builder, NamedTempFile, TempPath};
use tracing::{debug, warn};

use crate::output::{DocumentSink, OutputError};

const STAGING_PREFIX: &str = ".swish2pdf-";
const STAGING_SUFFIX: &str = ".tmp";
const BACKUP_SUFFIX: &str = ".bak";

/// Mode of written documents, before the umask.
#[cfg(unix)]
const DOCUMENT_MODE: u32 = 0o644;

/// A document moved into place, and the file it replaced, if any.
struct Placed {
    target: PathBuf,
    backup: Option<TempPath>
}

/// Writes documents into a directory on disk.
///
/// Each document is staged as a hidden temporary file next to its final
/// location and renamed into place on commit. Uncommitted temporary files are
/// removed when the output is dropped. If a rename fails during commit, the
/// documents already placed are removed and any files they replaced are
/// restored.
pub struct DirectoryOutput {
    directory: PathBuf,
    staged: Vec<(PathBuf, NamedTempFile)>
}

impl DirectoryOutput {
    /// Opens `directory`, creating it and any missing parents.
    pub fn create(directory: impl Into<PathBuf>) -> Result<Self, OutputError> {
        let directory = directory.into();

        fs::create_dir_all(&directory).map_err(|error| OutputError::new(&directory, error))?;

        Ok(Self {
            directory,
            staged: Vec::new()
        })
    }

    fn builder(suffix: &str) -> Builder<'_, '_> {
        let mut builder = Builder::new();
        builder.prefix(STAGING_PREFIX).suffix(suffix);

        #[cfg(unix)]
        builder.permissions(fs::Permissions::from_mode(DOCUMENT_MODE));

        builder
    }

    /// Moves `target` aside so it can be put back if the commit fails.
    fn back_up(&self, target: &Path) -> Result<Option<TempPath>, OutputError> {
        if !target.exists() {
            return Ok(None);
        }

        let backup = Self::builder(BACKUP_SUFFIX)
            .tempfile_in(&self.directory)
            .map_err(|error| OutputError::new(target, error))?
            .into_temp_path();

        fs::rename(target, &backup).map_err(|error| OutputError::new(target, error))?;

        Ok(Some(backup))
    }

    fn place(&self, target: &Path, file: NamedTempFile) -> Result<Placed, OutputError> {
        let backup = self.back_up(target)?;

        if let Err(error) = file.persist(target) {
            if let Some(backup) = backup {
                restore(target, backup);
            }

            return Err(OutputError::new(target, error.error));
        }

        Ok(Placed { target: target.to_path_buf(), backup })
    }
}

fn restore(target: &Path, backup: TempPath) {
    if let Err(error) = backup.persist(target) {
        warn!("Could not restore {}: {}", target.display(), error.error);
    }
}

fn roll_back(placed: Vec<Placed>) {
    for Placed { target, backup } in placed.into_iter().rev() {
        match backup {
            Some(backup) => restore(&target, backup),
            None => {
                if let Err(error) = fs::remove_file(&target) {
                    warn!("Could not remove {}: {error}", target.display());
                }
            }
        }

        debug!("Rolled back {}", target.display());
    }
}

impl DocumentSink for DirectoryOutput {
    fn stage(&mut self, name: &str, bytes: &[u8]) -> Result<(), OutputError> {
        let target = self.directory.join(name);

        let mut file = Self::builder(STAGING_SUFFIX)
            .tempfile_in(&self.directory)
            .map_err(|error| OutputError::new(&target, error))?;

        file.write_all(bytes).map_err(|error| OutputError::new(&target, error))?;
        file.as_file().sync_all().map_err(|error| OutputError::new(&target, error))?;

        debug!("Staged {} ({} bytes) as {}", target.display(), bytes.len(), file.path().display());

        self.staged.push((target, file));

        Ok(())
    }

    fn commit(&mut self) -> Result<usize, OutputError> {
        let staged = std::mem::take(&mut self.staged);
        let mut placed = Vec::with_capacity(staged.len());

        for (target, file) in staged {
            match self.place(&target, file) {
                Ok(document) => {
                    debug!("Wrote {}", target.display());
                    placed.push(document);
                }
                Err(error) => {
                    roll_back(placed);
                    return Err(error);
                }
            }
        }

        //NOTE: dropping the backups deletes the replaced files
        Ok(placed.len())
    }
}
