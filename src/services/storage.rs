//! Attendance photo storage on the local filesystem

use std::path::{Path, PathBuf};

use base64::Engine;

use crate::{
    config::StorageConfig,
    error::{AppError, AppResult},
};

#[derive(Clone)]
pub struct StorageService {
    photo_dir: PathBuf,
}

impl StorageService {
    pub fn new(config: &StorageConfig) -> Self {
        Self {
            photo_dir: PathBuf::from(&config.photo_dir),
        }
    }

    /// Decode and write an attendance photo. The file name is derived from
    /// the attendance id, so a retried upload overwrites the same file
    /// instead of accumulating copies.
    pub async fn store_photo(
        &self,
        attendance_id: i32,
        file_name: &str,
        image_base64: &str,
    ) -> AppResult<String> {
        let bytes = base64::engine::general_purpose::STANDARD
            .decode(image_base64)
            .map_err(|_| AppError::Validation("Invalid base64 image payload".to_string()))?;

        let extension = Path::new(file_name)
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or("jpg");

        let path = self
            .photo_dir
            .join(format!("attendance_{}.{}", attendance_id, extension));

        tokio::fs::create_dir_all(&self.photo_dir)
            .await
            .map_err(|e| AppError::Internal(format!("Failed to create photo directory: {}", e)))?;

        tokio::fs::write(&path, bytes)
            .await
            .map_err(|e| AppError::Internal(format!("Failed to write photo: {}", e)))?;

        Ok(path.to_string_lossy().into_owned())
    }
}
