use thiserror::Error;

/// Errors that can occur while saving or restoring a picture's paint layer
#[derive(Error, Debug)]
pub enum SnapshotError {
    #[error("failed to encode paint layer: {0}")]
    Encode(#[source] image::ImageError),
    #[error("failed to decode paint layer: {0}")]
    Decode(#[source] image::ImageError),
    /// The decode task was dropped before it produced a result
    #[error("restore was cancelled before it finished")]
    RestoreCancelled,
}

/// Errors that can occur while loading the studio configuration
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid config file: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Errors that can occur while turning scene artwork into pixels
#[derive(Error, Debug)]
pub enum SceneError {
    #[error("invalid scene artwork: {0}")]
    Svg(#[from] resvg::usvg::Error),
    #[error("cannot allocate a {0}x{0} scene canvas")]
    Canvas(u32),
}
