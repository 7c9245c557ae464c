//! Error types for heightmap loading and GPU setup.

/// Errors surfaced by the library
#[derive(thiserror::Error, Debug)]
pub enum TopoError {
    #[error("Surface error: {0}")]
    Surface(String),

    #[error("No suitable GPU adapter found")]
    Adapter,

    #[error("Device error: {0}")]
    Device(String),

    #[error("Heightmap error: {0}")]
    Heightmap(#[from] image::ImageError),

    #[error("Invalid heightmap: {0}")]
    InvalidHeightmap(String),
}

impl TopoError {
    pub fn surface<T: ToString>(msg: T) -> Self {
        TopoError::Surface(msg.to_string())
    }

    pub fn device<T: ToString>(msg: T) -> Self {
        TopoError::Device(msg.to_string())
    }
}

pub type Result<T> = std::result::Result<T, TopoError>;
