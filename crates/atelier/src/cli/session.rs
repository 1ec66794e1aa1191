//! Studio assembly for the CLI.

use atelier::{
    AtelierResult, EnvCredentialProvider, FileSystemMediaStore, HttpTransport, ImageInput,
    JsonFileStore, StorageError, StorageErrorKind, Studio, StudioComponentsBuilder, StudioConfig,
};
use std::path::Path;
use std::sync::Arc;
use tracing::debug;

/// Load configuration, layering `path` over the defaults when given.
pub fn load_config(path: Option<&Path>) -> AtelierResult<StudioConfig> {
    match path {
        Some(path) => StudioConfig::from_file(path),
        None => StudioConfig::load(),
    }
}

/// Build a studio backed by the filesystem and the live service, and resolve
/// its readiness.
pub async fn open_studio(config: StudioConfig) -> AtelierResult<Studio> {
    let media = FileSystemMediaStore::new(config.media_dir())?;
    let state = JsonFileStore::new(config.state_file())?;
    debug!(data_dir = %config.data_dir().display(), "Opening studio");

    let components = StudioComponentsBuilder::default()
        .config(config)
        .credentials(Arc::new(EnvCredentialProvider::default()))
        .transport(Arc::new(HttpTransport::new()))
        .key_value(Arc::new(state))
        .media(Arc::new(media))
        .build()
        .map_err(|e| atelier::ConfigError::new(e.to_string()))?;

    let mut studio = Studio::new(components)?;
    studio.check_readiness().await;
    Ok(studio)
}

/// Read an image file, inferring its MIME type from the extension.
pub async fn read_image(path: &Path) -> AtelierResult<ImageInput> {
    let mime_type = image_mime_type(path).ok_or_else(|| {
        StorageError::new(StorageErrorKind::FileRead(format!(
            "{}: unsupported image type",
            path.display()
        )))
    })?;
    let bytes = tokio::fs::read(path).await.map_err(|e| {
        StorageError::new(StorageErrorKind::FileRead(format!("{}: {}", path.display(), e)))
    })?;
    Ok(ImageInput::new(bytes, mime_type))
}

/// Write bytes to `path`.
pub async fn write_file(path: &Path, bytes: &[u8]) -> AtelierResult<()> {
    tokio::fs::write(path, bytes).await.map_err(|e| {
        StorageError::new(StorageErrorKind::FileWrite(format!("{}: {}", path.display(), e)))
    })?;
    Ok(())
}

fn image_mime_type(path: &Path) -> Option<&'static str> {
    let extension = path.extension()?.to_str()?.to_ascii_lowercase();
    match extension.as_str() {
        "png" => Some("image/png"),
        "jpg" | "jpeg" => Some("image/jpeg"),
        "webp" => Some("image/webp"),
        "gif" => Some("image/gif"),
        _ => None,
    }
}
