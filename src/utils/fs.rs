//! File system utilities.

use std::path::Path;

use tokio::io::AsyncWriteExt;

/// Write bytes atomically (write to temp, then rename).
///
/// Parent directories are created as needed. Readers never observe a
/// partially written file.
pub async fn write_atomic(path: &Path, bytes: &[u8]) -> std::io::Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        tokio::fs::create_dir_all(parent).await?;
    }

    let tmp = temp_path(path);
    if let Err(e) = write_then_rename(&tmp, path, bytes).await {
        let _ = tokio::fs::remove_file(&tmp).await;
        return Err(e);
    }
    Ok(())
}

async fn write_then_rename(tmp: &Path, path: &Path, bytes: &[u8]) -> std::io::Result<()> {
    let mut file = tokio::fs::File::create(tmp).await?;
    file.write_all(bytes).await?;
    file.flush().await?;
    file.sync_all().await?;
    drop(file);

    tokio::fs::rename(tmp, path).await
}

// Sibling of the target so the rename stays on one filesystem.
fn temp_path(path: &Path) -> std::path::PathBuf {
    let mut name = path.file_name().unwrap_or_default().to_os_string();
    name.push(".tmp");
    path.with_file_name(name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_write_creates_parents() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("docs/nested/out.json");

        write_atomic(&path, b"hello").await.unwrap();
        assert_eq!(std::fs::read(&path).unwrap(), b"hello");
    }

    #[tokio::test]
    async fn test_write_replaces_contents() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("out.json");

        write_atomic(&path, b"a much longer first payload").await.unwrap();
        write_atomic(&path, b"short").await.unwrap();

        assert_eq!(std::fs::read(&path).unwrap(), b"short");
        assert!(!tmp.path().join("out.json.tmp").exists());
    }

    #[tokio::test]
    async fn test_failed_write_removes_temp_file() {
        let tmp = TempDir::new().unwrap();
        // A non-empty directory at the target makes the final step fail.
        let path = tmp.path().join("out.json");
        std::fs::create_dir_all(path.join("occupied")).unwrap();

        assert!(write_atomic(&path, b"hello").await.is_err());
        assert!(!tmp.path().join("out.json.tmp").exists());
        assert!(path.is_dir());
    }

    #[test]
    fn test_temp_path_is_sibling() {
        assert_eq!(
            temp_path(Path::new("docs/rss.xml")),
            Path::new("docs/rss.xml.tmp")
        );
    }
}
