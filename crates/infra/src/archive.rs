//! Filesystem archive for downloaded specification sheets
//!
//! Every downloaded sheet is kept on disk as an audit artifact before it is
//! parsed, so a bad extraction can always be replayed against the original
//! bytes.

use std::path::{Path, PathBuf};

use settler_core::ports::SheetArchive;
use settler_domain::{Result, SettlerError};
use tracing::debug;

/// Archive writing sheets into a flat directory as
/// `{store_name}_{invoice_id}_{month_name}.xlsx`.
pub struct FileSheetArchive {
    dir: PathBuf,
}

impl FileSheetArchive {
    pub fn new<P: AsRef<Path>>(dir: P) -> Self {
        Self { dir: dir.as_ref().to_path_buf() }
    }
}

impl SheetArchive for FileSheetArchive {
    fn store(
        &self,
        store_name: &str,
        invoice_id: &str,
        month_name: &str,
        bytes: &[u8],
    ) -> Result<PathBuf> {
        std::fs::create_dir_all(&self.dir).map_err(|err| {
            SettlerError::Internal(format!(
                "cannot create archive dir {}: {err}",
                self.dir.display()
            ))
        })?;

        let path = self.dir.join(format!("{store_name}_{invoice_id}_{month_name}.xlsx"));
        std::fs::write(&path, bytes).map_err(|err| {
            SettlerError::Internal(format!("cannot archive sheet {}: {err}", path.display()))
        })?;

        debug!(path = %path.display(), bytes = bytes.len(), "specification sheet archived");
        Ok(path)
    }
}
