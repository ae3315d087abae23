use std::path::{Path, PathBuf};

use chrono::Utc;
use uuid::Uuid;

use crate::error::{HeadshotError, Result};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredUpload {
    pub filename: String,
    pub path: PathBuf,
}

/// Local directory holding raw uploads.
#[derive(Debug, Clone)]
pub struct UploadStore {
    dir: PathBuf,
    max_bytes: usize,
}

impl UploadStore {
    pub fn new(dir: impl Into<PathBuf>, max_bytes: usize) -> Self {
        Self {
            dir: dir.into(),
            max_bytes,
        }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn max_bytes(&self) -> usize {
        self.max_bytes
    }

    pub fn check_size(&self, len: usize) -> Result<()> {
        if len > self.max_bytes {
            return Err(HeadshotError::Upload(format!(
                "File too large (max {} bytes)",
                self.max_bytes
            )));
        }
        Ok(())
    }

    pub async fn save(
        &self,
        field: &str,
        original_name: Option<&str>,
        bytes: &[u8],
    ) -> Result<StoredUpload> {
        self.check_size(bytes.len())?;
        tokio::fs::create_dir_all(&self.dir).await.map_err(|e| {
            HeadshotError::UploadFailed(format!("{}: {}", self.dir.display(), e))
        })?;

        let filename = unique_file_name(field, original_name);
        let path = self.dir.join(&filename);
        tokio::fs::write(&path, bytes)
            .await
            .map_err(|e| HeadshotError::UploadFailed(format!("{}: {}", path.display(), e)))?;

        log::info!("📥 Stored upload {} ({} bytes)", filename, bytes.len());
        Ok(StoredUpload { filename, path })
    }
}

/// `<field>-<unix millis>-<uuid>.<ext>`.
pub fn unique_file_name(field: &str, original_name: Option<&str>) -> String {
    format!(
        "{}-{}-{}.{}",
        sanitize_component(field),
        Utc::now().timestamp_millis(),
        Uuid::new_v4().simple(),
        extension_of(original_name)
    )
}

fn sanitize_component(value: &str) -> String {
    let cleaned: String = value
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || *c == '_' || *c == '-')
        .collect();
    if cleaned.is_empty() {
        "upload".to_string()
    } else {
        cleaned
    }
}

fn extension_of(original_name: Option<&str>) -> String {
    original_name
        .and_then(|name| Path::new(name).extension())
        .and_then(|ext| ext.to_str())
        .map(str::to_ascii_lowercase)
        .filter(|ext| (1..=5).contains(&ext.len()) && ext.chars().all(|c| c.is_ascii_alphanumeric()))
        .unwrap_or_else(|| "bin".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_file_name_keeps_extension() {
        let name = unique_file_name("image", Some("Portrait.JPG"));
        assert!(name.starts_with("image-"));
        assert!(name.ends_with(".jpg"));
    }

    #[test]
    fn test_file_name_without_usable_extension() {
        assert!(unique_file_name("image", None).ends_with(".bin"));
        assert!(unique_file_name("image", Some("photo")).ends_with(".bin"));
        assert!(unique_file_name("image", Some("x.j p g")).ends_with(".bin"));
    }

    #[test]
    fn test_file_names_are_unique() {
        assert_ne!(
            unique_file_name("image", Some("a.png")),
            unique_file_name("image", Some("a.png"))
        );
    }

    #[test]
    fn test_field_is_sanitized() {
        assert!(unique_file_name("../etc", Some("a.png")).starts_with("etc-"));
    }

    #[tokio::test]
    async fn test_save_writes_into_upload_dir() {
        let dir = tempfile::tempdir().unwrap();
        let store = UploadStore::new(dir.path().join("uploads"), 1024);

        let stored = store.save("image", Some("me.png"), b"pixels").await.unwrap();
        assert_eq!(std::fs::read(&stored.path).unwrap(), b"pixels");
        assert!(stored.path.starts_with(store.dir()));
        assert_eq!(stored.path.file_name().unwrap().to_str().unwrap(), stored.filename);
    }

    #[tokio::test]
    async fn test_oversized_upload_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let store = UploadStore::new(dir.path(), 4);

        let result = store.save("image", Some("big.png"), b"too many bytes").await;
        assert!(matches!(result, Err(HeadshotError::Upload(_))));
    }

    #[tokio::test]
    async fn test_unwritable_upload_dir_is_storage_failure() {
        let dir = tempfile::tempdir().unwrap();
        let blocker = dir.path().join("not-a-dir");
        std::fs::write(&blocker, b"file").unwrap();
        let store = UploadStore::new(blocker.join("uploads"), 1024);

        let err = store.save("image", Some("me.png"), b"pixels").await.unwrap_err();
        assert!(matches!(err, HeadshotError::UploadFailed(_)));
        assert_eq!(err.to_error_response().error, "Failed to upload image");
    }
}
