use std::fs;
use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};

use uuid::Uuid;

/// somewhere to keep the raw bytes of uploaded files. Keys are opaque to the backend
pub trait StorageBackend: Send + Sync {
    /// durably stores everything readable from `contents` under `key`, returning how many bytes were written
    fn write(&self, key: &str, contents: &mut dyn Read) -> io::Result<u64>;

    /// returns the bytes stored under `key`. A missing key is an [`io::ErrorKind::NotFound`] error
    fn read(&self, key: &str) -> io::Result<Vec<u8>>;

    /// removes the bytes stored under `key`. Removing a missing key is not an error
    fn remove(&self, key: &str) -> io::Result<()>;
}

/// stores each key as a file beneath `root`, with `/` in the key becoming a directory
pub struct DiskStorage {
    root: PathBuf,
}

impl DiskStorage {
    pub fn new(root: &str) -> DiskStorage {
        DiskStorage {
            root: PathBuf::from(root),
        }
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.root.join(Path::new(key))
    }
}

impl StorageBackend for DiskStorage {
    fn write(&self, key: &str, contents: &mut dyn Read) -> io::Result<u64> {
        let path = self.path_for(key);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let mut file = fs::File::create(&path)?;
        let copied = (|| -> io::Result<u64> {
            let written = io::copy(contents, &mut file)?;
            file.flush()?;
            file.sync_all()?;
            Ok(written)
        })();
        drop(file);
        if copied.is_err() {
            // a half written file has no record pointing at it
            if let Err(e) = fs::remove_file(&path) {
                log::error!("Failed to remove partial upload {}: {e:?}", path.display());
            }
        }
        copied
    }

    fn read(&self, key: &str) -> io::Result<Vec<u8>> {
        fs::read(self.path_for(key))
    }

    fn remove(&self, key: &str) -> io::Result<()> {
        match fs::remove_file(self.path_for(key)) {
            Err(e) if e.kind() != io::ErrorKind::NotFound => Err(e),
            _ => Ok(()),
        }
    }
}

/// builds a key that can't collide with any other upload: the owner, a fresh v4 uuid, and the file name
pub fn storage_key(user_id: &str, file_name: &str) -> String {
    let owner: String = user_id
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() || c == '-' || c == '_' { c } else { '_' })
        .collect();
    format!("{owner}/{}_{file_name}", Uuid::new_v4())
}

#[cfg(not(test))]
pub fn upload_dir() -> String {
    crate::config::DRIVE_CONFIG.storage.upload_dir.clone()
}

#[cfg(test)]
pub fn upload_dir() -> String {
    let thread_name = crate::test::current_thread_name();
    format!("./{thread_name}_uploads")
}
