// Asset path resolution and raw loading

use super::AssetError;
use std::path::{Path, PathBuf};

/// Supported asset types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AssetType {
    Image,
    Font,
}

impl AssetType {
    /// Get the default directory for this asset type
    pub fn default_directory(&self) -> &'static str {
        match self {
            AssetType::Image => "images",
            AssetType::Font => "fonts",
        }
    }
}

/// Resolves and reads asset files below a base directory
#[derive(Debug, Clone)]
pub struct AssetLoader {
    base_path: PathBuf,
}

impl AssetLoader {
    /// Create a new asset loader with the given base path
    pub fn new<P: AsRef<Path>>(base_path: P) -> Self {
        Self {
            base_path: base_path.as_ref().to_path_buf(),
        }
    }

    /// Get the full path for an asset
    pub fn resolve_path(&self, asset_type: AssetType, name: &str) -> PathBuf {
        self.base_path
            .join(asset_type.default_directory())
            .join(name)
    }

    /// Load asset bytes from disk
    pub fn load_bytes(&self, asset_type: AssetType, name: &str) -> Result<Vec<u8>, AssetError> {
        let path = self.resolve_path(asset_type, name);
        read_file(&path)
    }
}

/// Read a whole asset file, mapping a missing file to `NotFound`
pub fn read_file(path: &Path) -> Result<Vec<u8>, AssetError> {
    if !path.exists() {
        return Err(AssetError::NotFound(path.to_string_lossy().to_string()));
    }

    std::fs::read(path).map_err(|e| {
        AssetError::LoadError(format!("Failed to read {}: {}", path.display(), e))
    })
}
