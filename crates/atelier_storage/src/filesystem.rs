//! Filesystem-based media storage.
//!
//! Files are stored content-addressed by SHA-256:
//! `{base_path}/{type}/{hash[0:2]}/{hash[2:4]}/{hash}.{ext}`
//!
//! ```text
//! ~/.local/share/atelier/media/
//! ├── images/
//! │   └── ab/cd/abcdef123456....jpg
//! ├── audio/
//! └── video/
//!     └── ef/01/ef0123456789....mp4
//! ```

use crate::compute_hash;
use async_trait::async_trait;
use atelier_core::MediaHandle;
use atelier_error::{AtelierResult, StorageError, StorageErrorKind};
use atelier_interface::MediaStore;
use std::path::{Path, PathBuf};

const SCHEME: &str = "file://";

/// Content-addressed media store on the local filesystem.
#[derive(Debug, Clone)]
pub struct FileSystemMediaStore {
    base_path: PathBuf,
}

impl FileSystemMediaStore {
    /// Create a new filesystem store rooted at `base_path`.
    ///
    /// # Errors
    ///
    /// Returns error if the directory cannot be created.
    #[tracing::instrument(skip(base_path))]
    pub fn new(base_path: impl Into<PathBuf>) -> AtelierResult<Self> {
        let base_path = base_path.into();

        std::fs::create_dir_all(&base_path).map_err(|e| {
            StorageError::new(StorageErrorKind::DirectoryCreation(format!(
                "{}: {}",
                base_path.display(),
                e
            )))
        })?;

        tracing::info!(path = %base_path.display(), "Created filesystem media store");
        Ok(Self { base_path })
    }

    fn type_dir(mime_type: &str) -> &'static str {
        match mime_type.split('/').next() {
            Some("image") => "images",
            Some("audio") => "audio",
            Some("video") => "video",
            _ => "other",
        }
    }

    fn extension(mime_type: &str) -> &'static str {
        match mime_type {
            "image/jpeg" => "jpg",
            "image/png" => "png",
            "image/webp" => "webp",
            "audio/wav" | "audio/x-wav" => "wav",
            "video/mp4" => "mp4",
            "video/webm" => "webm",
            _ => "bin",
        }
    }

    fn get_path(&self, hash: &str, mime_type: &str) -> PathBuf {
        self.base_path
            .join(Self::type_dir(mime_type))
            .join(&hash[0..2])
            .join(&hash[2..4])
            .join(format!("{}.{}", hash, Self::extension(mime_type)))
    }

    fn handle_path(handle: &MediaHandle) -> AtelierResult<&Path> {
        handle
            .locator()
            .strip_prefix(SCHEME)
            .map(Path::new)
            .ok_or_else(|| StorageError::new(StorageErrorKind::NotFound(handle.locator().clone())).into())
    }
}

#[async_trait]
impl MediaStore for FileSystemMediaStore {
    #[tracing::instrument(skip(self, data), fields(size = data.len()))]
    async fn store(&self, data: &[u8], mime_type: &str) -> AtelierResult<MediaHandle> {
        let hash = compute_hash(data);
        let path = self.get_path(&hash, mime_type);
        let handle = MediaHandle::new(
            format!("{}{}", SCHEME, path.display()),
            mime_type,
            data.len() as u64,
            hash.clone(),
        );

        if tokio::fs::try_exists(&path).await.unwrap_or(false) {
            tracing::debug!(hash = %hash, path = %path.display(), "Media already stored");
            return Ok(handle);
        }

        if let Some(parent) = path.parent() {
            tokio::fs::create_dir_all(parent).await.map_err(|e| {
                StorageError::new(StorageErrorKind::DirectoryCreation(format!(
                    "{}: {}",
                    parent.display(),
                    e
                )))
            })?;
        }

        // Temp file + rename so readers never see a partial file
        let temp_path = path.with_extension("tmp");
        tokio::fs::write(&temp_path, data).await.map_err(|e| {
            StorageError::new(StorageErrorKind::FileWrite(format!(
                "{}: {}",
                temp_path.display(),
                e
            )))
        })?;
        tokio::fs::rename(&temp_path, &path).await.map_err(|e| {
            StorageError::new(StorageErrorKind::FileWrite(format!(
                "rename {} to {}: {}",
                temp_path.display(),
                path.display(),
                e
            )))
        })?;

        tracing::info!(hash = %hash, path = %path.display(), "Stored media file");
        Ok(handle)
    }

    #[tracing::instrument(skip(self, handle), fields(locator = %handle.locator()))]
    async fn retrieve(&self, handle: &MediaHandle) -> AtelierResult<Vec<u8>> {
        let path = Self::handle_path(handle)?;

        let data = tokio::fs::read(path).await.map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                StorageError::new(StorageErrorKind::NotFound(handle.locator().clone()))
            } else {
                StorageError::new(StorageErrorKind::FileRead(format!(
                    "{}: {}",
                    path.display(),
                    e
                )))
            }
        })?;

        let actual = compute_hash(&data);
        if &actual != handle.content_hash() {
            return Err(StorageError::new(StorageErrorKind::HashMismatch {
                expected: handle.content_hash().clone(),
                actual,
            })
            .into());
        }

        Ok(data)
    }
}
