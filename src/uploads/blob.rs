use crate::error::AppError;

use rand::Rng;
use std::path::{Path, PathBuf};

pub const MAX_UPLOAD_BYTES: usize = 12 * 1024 * 1024;
pub const ALLOWED_EXTENSIONS: [&str; 4] = ["jpg", "jpeg", "png", "gif"];

/// URL prefix under which stored blobs are served.
pub const PUBLIC_PREFIX: &str = "/uploads";

/// Image files on the local filesystem, flat under one root directory.
#[derive(Debug, Clone)]
pub struct BlobStore {
    root: PathBuf,
}

impl BlobStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Writes an image and returns its public path (`/uploads/<name>`).
    ///
    /// The stored name is `<prefix><millis>-<random>.<ext>`; the client's file
    /// name only contributes its extension.
    pub async fn save(
        &self,
        prefix: &str,
        original_name: &str,
        bytes: &[u8],
    ) -> Result<String, AppError> {
        let extension = validate_image(original_name, bytes.len())?;

        let millis = chrono::Utc::now().timestamp_millis();
        let suffix: u32 = rand::thread_rng().gen_range(0..1_000_000_000);
        let file_name = format!("{}{}-{}.{}", prefix, millis, suffix, extension);

        tokio::fs::create_dir_all(&self.root)
            .await
            .map_err(|e| AppError::Internal(format!("Failed to create upload dir: {}", e)))?;

        let path = self.root.join(&file_name);
        tokio::fs::write(&path, bytes)
            .await
            .map_err(|e| AppError::Internal(format!("Failed to write {}: {}", path.display(), e)))?;

        tracing::info!("Stored upload {} ({} bytes)", file_name, bytes.len());
        Ok(format!("{}/{}", PUBLIC_PREFIX, file_name))
    }
}

/// Accepts jpg/jpeg/png/gif up to the size limit and returns the lowercased
/// extension.
pub fn validate_image(original_name: &str, len: usize) -> Result<String, AppError> {
    let extension = Path::new(original_name)
        .extension()
        .and_then(|ext| ext.to_str())
        .map(str::to_ascii_lowercase)
        .filter(|ext| ALLOWED_EXTENSIONS.contains(&ext.as_str()))
        .ok_or_else(|| {
            AppError::InvalidArgument("Only image files (jpg, jpeg, png, gif) are allowed".to_string())
        })?;

    if len == 0 {
        return Err(AppError::InvalidArgument("No file uploaded".to_string()));
    }
    if len > MAX_UPLOAD_BYTES {
        return Err(AppError::InvalidArgument(
            "File too large (maximum 12 MB)".to_string(),
        ));
    }

    Ok(extension)
}

pub fn profile_prefix(user_id: &str) -> String {
    format!("profile_{}_", user_id)
}
