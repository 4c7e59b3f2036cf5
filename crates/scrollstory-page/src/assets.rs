//! Readiness gate for resources the page needs before it is wired.

use std::path::PathBuf;

use async_trait::async_trait;
use scrollstory_core::error::DomainError;
use tracing::debug;

/// Resolves once the page's resources are ready to use.
#[async_trait]
pub trait AssetGate: Send + Sync {
    /// Waits until the resources are ready.
    async fn ready(&self) -> Result<(), DomainError>;
}

/// A gate that is always open.
#[derive(Debug, Clone, Copy, Default)]
pub struct ReadyAssets;

#[async_trait]
impl AssetGate for ReadyAssets {
    async fn ready(&self) -> Result<(), DomainError> {
        Ok(())
    }
}

/// Font files that must be readable before the page is wired.
#[derive(Debug, Clone, Default)]
pub struct FontFiles {
    paths: Vec<PathBuf>,
}

impl FontFiles {
    /// Gate over `paths`.
    #[must_use]
    pub fn new(paths: Vec<PathBuf>) -> Self {
        Self { paths }
    }
}

#[async_trait]
impl AssetGate for FontFiles {
    async fn ready(&self) -> Result<(), DomainError> {
        for path in &self.paths {
            let metadata = tokio::fs::metadata(path).await.map_err(|e| {
                DomainError::Infrastructure(format!("font {} unavailable: {e}", path.display()))
            })?;
            if !metadata.is_file() {
                return Err(DomainError::Infrastructure(format!(
                    "font {} is not a file",
                    path.display()
                )));
            }
            debug!(font = %path.display(), "font ready");
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_ready_assets_are_always_ready() {
        assert!(ReadyAssets.ready().await.is_ok());
    }

    #[tokio::test]
    async fn test_existing_font_files_open_the_gate() {
        // Arrange
        let manifest = PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("Cargo.toml");
        let gate = FontFiles::new(vec![manifest]);

        // Act
        let result = gate.ready().await;

        // Assert
        assert!(result.is_ok());
    }

    #[tokio::test]
    async fn test_missing_or_directory_fonts_keep_the_gate_closed() {
        let missing = FontFiles::new(vec![PathBuf::from("/nonexistent/font.woff2")]);
        let directory = FontFiles::new(vec![PathBuf::from(env!("CARGO_MANIFEST_DIR"))]);

        assert!(matches!(
            missing.ready().await,
            Err(DomainError::Infrastructure(_))
        ));
        assert!(matches!(
            directory.ready().await,
            Err(DomainError::Infrastructure(_))
        ));
    }
}
