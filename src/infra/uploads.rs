use crate::error::AppError;
use chrono::Utc;
use rand::Rng;
use std::path::{Path, PathBuf};
use tracing::{error, warn};

/// Local file storage under the uploads directory. Serves two jobs: a
/// staging area for files awaiting handoff to an external host, and
/// permanent storage for QR images when no image host is configured.
pub struct UploadStore {
    root: PathBuf,
}

/// Staged file removed on drop, so every exit path of an upload attempt
/// cleans up after itself.
pub struct StagedFile {
    path: PathBuf,
}

impl StagedFile {
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Drop for StagedFile {
    fn drop(&mut self) {
        if let Err(e) = std::fs::remove_file(&self.path) {
            warn!("Failed to remove staged file {}: {}", self.path.display(), e);
        }
    }
}

impl UploadStore {
    pub fn new(upload_dir: &str) -> Result<Self, AppError> {
        let root = PathBuf::from(upload_dir);
        std::fs::create_dir_all(root.join("staging")).map_err(|e| {
            error!("Failed to create upload directory {}: {}", root.display(), e);
            AppError::Internal
        })?;
        Ok(Self { root })
    }

    fn unique_name(prefix: &str, original_name: &str) -> String {
        let suffix: u32 = rand::thread_rng().gen_range(0..1_000_000_000);
        let ext = Path::new(original_name)
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| format!(".{}", e))
            .unwrap_or_default();
        format!("{}{}-{}{}", prefix, Utc::now().timestamp_millis(), suffix, ext)
    }

    /// Writes the bytes to the staging area and returns the guard that
    /// deletes them again.
    pub async fn stage(&self, original_name: &str, bytes: &[u8]) -> Result<StagedFile, AppError> {
        let path = self.root.join("staging").join(Self::unique_name("", original_name));
        tokio::fs::write(&path, bytes).await.map_err(|e| {
            error!("Failed to stage upload {}: {}", path.display(), e);
            AppError::Internal
        })?;
        Ok(StagedFile { path })
    }

    /// Stores a QR image permanently and returns its public `/uploads/...`
    /// path.
    pub async fn store_qr_image(&self, original_name: &str, bytes: &[u8]) -> Result<String, AppError> {
        let file_name = Self::unique_name("qr-", original_name);
        let path = self.root.join(&file_name);
        tokio::fs::write(&path, bytes).await.map_err(|e| {
            error!("Failed to store QR image {}: {}", path.display(), e);
            AppError::Internal
        })?;
        Ok(format!("/uploads/{}", file_name))
    }

    /// Best-effort delete of a file previously returned by
    /// `store_qr_image`. Paths outside `/uploads/` are ignored.
    pub async fn remove_public_path(&self, public_path: &str) {
        let Some(file_name) = public_path.strip_prefix("/uploads/") else {
            return;
        };
        if file_name.contains('/') || file_name.contains("..") {
            return;
        }
        if let Err(e) = tokio::fs::remove_file(self.root.join(file_name)).await {
            warn!("Failed to remove local file {}: {}", public_path, e);
        }
    }
}
