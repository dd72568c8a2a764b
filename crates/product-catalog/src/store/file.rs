//! Whole-file JSON persistence shared by the blob store and the account file.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

/// Contents of `path`, or `None` when the file is missing or holds only whitespace.
pub(crate) async fn read_document(path: &Path) -> std::io::Result<Option<Vec<u8>>> {
    match tokio::fs::read(path).await {
        Ok(bytes) if bytes.iter().all(u8::is_ascii_whitespace) => Ok(None),
        Ok(bytes) => Ok(Some(bytes)),
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
        Err(e) => Err(e),
    }
}

/// Writes `bytes` to a sibling `.tmp` file, then renames it over `path`, creating the
/// parent directory if needed.
pub(crate) async fn replace_document(path: &Path, bytes: &[u8]) -> std::io::Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        tokio::fs::create_dir_all(parent).await?;
    }
    let staging = staging_path(path);
    tokio::fs::write(&staging, bytes).await?;
    tokio::fs::rename(&staging, path).await
}

pub(crate) fn staging_path(path: &Path) -> PathBuf {
    let mut name = path
        .file_name()
        .map(|n| n.to_os_string())
        .unwrap_or_else(|| "document".into());
    name.push(".tmp");
    path.with_file_name(name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_replace_then_read() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("a").join("doc.json");

        assert_eq!(read_document(&path).await.unwrap(), None);
        replace_document(&path, b"[1]").await.unwrap();
        replace_document(&path, b"[2]").await.unwrap();

        assert_eq!(read_document(&path).await.unwrap(), Some(b"[2]".to_vec()));
        assert!(!staging_path(&path).exists());
    }

    #[tokio::test]
    async fn test_blank_file_reads_as_absent() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("doc.json");
        std::fs::write(&path, b" \n").unwrap();
        assert_eq!(read_document(&path).await.unwrap(), None);
    }
}
