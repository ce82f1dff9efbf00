use std::path::{Path, PathBuf};

use tracing::trace;

use crate::error::{Result, TelegramError};
use crate::telegram::Telegram;

/// A telegram payload stored on disk.
///
/// The file is opened and read in full on every [`read`](Self::read) call
/// — contents are never cached, so edits made between cycles show up in
/// the next emission.
#[derive(Debug, Clone)]
pub struct PayloadFile {
    path: PathBuf,
}

impl PayloadFile {
    /// Reference a payload file. The path is not touched until the first
    /// read.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// The payload path.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the current file contents as a telegram.
    pub fn read(&self) -> Result<Telegram> {
        let bytes = std::fs::read(&self.path).map_err(|source| TelegramError::Read {
            path: self.path.clone(),
            source,
        })?;
        trace!(path = %self.path.display(), len = bytes.len(), "payload read");
        Ok(Telegram::new(bytes))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn unique_temp_dir(tag: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!(
            "simhanp1-payload-{tag}-{}-{}",
            std::process::id(),
            std::time::SystemTime::now()
                .duration_since(std::time::UNIX_EPOCH)
                .expect("time should be after epoch")
                .as_nanos()
        ));
        std::fs::create_dir_all(&dir).expect("temp dir should be creatable");
        dir
    }

    #[test]
    fn reads_current_contents() {
        let dir = unique_temp_dir("read");
        let path = dir.join("hanp1_1.data");
        std::fs::write(&path, b"first half").expect("payload should be writable");

        let payload = PayloadFile::new(&path);
        assert_eq!(payload.read().expect("read should succeed").as_bytes(), b"first half");

        let _ = std::fs::remove_dir_all(&dir);
    }

    #[test]
    fn rereads_after_modification() {
        let dir = unique_temp_dir("reread");
        let path = dir.join("hanp1_1.data");
        std::fs::write(&path, b"before").expect("payload should be writable");

        let payload = PayloadFile::new(&path);
        assert_eq!(payload.read().expect("first read").as_bytes(), b"before");

        std::fs::write(&path, b"after").expect("payload should be rewritable");
        assert_eq!(payload.read().expect("second read").as_bytes(), b"after");

        let _ = std::fs::remove_dir_all(&dir);
    }

    #[test]
    fn missing_file_error_carries_path() {
        let dir = unique_temp_dir("missing");
        let path = dir.join("hanp1_2.data");

        let payload = PayloadFile::new(&path);
        let err = payload.read().expect_err("read should fail");
        match &err {
            TelegramError::Read { path: reported, .. } => assert_eq!(reported, &path),
            other => panic!("unexpected error: {other}"),
        }
        assert!(err.to_string().contains("hanp1_2.data"));

        let _ = std::fs::remove_dir_all(&dir);
    }
}
