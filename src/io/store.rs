use std::{
    collections::HashMap,
    fs::File,
    io::{BufReader, BufWriter, ErrorKind, Write},
    path::{Path, PathBuf},
};

use tempfile::NamedTempFile;

use crate::{
    common::error::StoreError,
    domain::account::Account,
    io::{reader, writer},
};

/// Keeps the whole ledger in one file.
#[derive(Debug, Clone)]
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Replaces the file with `accounts`.
    ///
    /// The data goes to a temporary file in the same directory which is then
    /// renamed over the target, so a failed save leaves the previous file intact.
    pub fn save(&self, accounts: &HashMap<String, Account>) -> Result<(), StoreError> {
        let dir = match self.path.parent() {
            Some(p) if !p.as_os_str().is_empty() => p,
            _ => Path::new("."),
        };
        let mut tmp = NamedTempFile::new_in(dir)?;
        {
            let mut out = BufWriter::new(tmp.as_file_mut());
            writer::write_accounts(&mut out, accounts)?;
            out.flush()?;
        }
        tmp.as_file().sync_all()?;
        tmp.persist(&self.path).map_err(|e| e.error)?;
        Ok(())
    }

    /// Reads the file. A file that does not exist yet is an empty ledger.
    pub fn load(&self) -> Result<HashMap<String, Account>, StoreError> {
        let file = match File::open(&self.path) {
            Ok(f) => f,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(HashMap::new()),
            Err(e) => return Err(e.into()),
        };
        reader::read_accounts(BufReader::new(file))
    }
}
