// Asset location and loading
//
// Assets live under a fixed root (`res/` by default) split by type:
// images in `images/`, fonts in `fonts/`.

mod loader;

pub use loader::{read_file, AssetLoader, AssetType};

/// Asset loading errors
#[derive(Debug, thiserror::Error)]
pub enum AssetError {
    #[error("Asset not found: {0}")]
    NotFound(String),

    #[error("Failed to load asset: {0}")]
    LoadError(String),

    #[error("Invalid font {path}: {reason}")]
    InvalidFont { path: String, reason: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_asset_error_display() {
        let err = AssetError::NotFound("res/images/pipe.png".to_string());
        assert_eq!(err.to_string(), "Asset not found: res/images/pipe.png");

        let err = AssetError::InvalidFont {
            path: "res/fonts/title.ttf".to_string(),
            reason: "bad header".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Invalid font res/fonts/title.ttf: bad header"
        );
    }
}
