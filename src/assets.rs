//! Illustrative image lookup
//!
//! Questions and diagnoses reference images by file name. An `AssetResolver`
//! turns a reference into image data, or a typed failure the host degrades
//! to a text line. A missing image never ends a session.

use crate::questions::AssetRef;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, warn};

/// Why an image could not be produced
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AssetError {
    #[error("image not found: {}", .0.display())]
    NotFound(PathBuf),

    #[error("failed to load {}: {reason}", .path.display())]
    Load { path: PathBuf, reason: String },
}

impl AssetError {
    /// Text shown in place of the image
    pub fn placeholder(&self) -> String {
        match self {
            Self::NotFound(_) => "Image not found.".to_string(),
            Self::Load { reason, .. } => format!("Error loading image: {}", reason),
        }
    }
}

/// Container format, sniffed from the file header
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageFormat {
    Jpeg,
    Png,
    Gif,
    Unknown,
}

impl ImageFormat {
    pub fn sniff(bytes: &[u8]) -> Self {
        match bytes {
            [0xFF, 0xD8, 0xFF, ..] => Self::Jpeg,
            [0x89, b'P', b'N', b'G', ..] => Self::Png,
            [b'G', b'I', b'F', b'8', ..] => Self::Gif,
            _ => Self::Unknown,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Jpeg => "JPEG",
            Self::Png => "PNG",
            Self::Gif => "GIF",
            Self::Unknown => "unknown format",
        }
    }
}

/// Loaded image data
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Asset {
    pub reference: AssetRef,
    pub path: PathBuf,
    pub format: ImageFormat,
    pub bytes: Vec<u8>,
}

impl Asset {
    /// One-line description for terminals that cannot draw the image
    pub fn summary(&self) -> String {
        format!(
            "{} ({}, {:.1} KB)",
            self.reference,
            self.format.as_str(),
            self.bytes.len() as f64 / 1024.0
        )
    }
}

/// Maps an asset reference to displayable image data
pub trait AssetResolver {
    fn resolve(&self, asset: &AssetRef) -> Result<Asset, AssetError>;

    /// Resolve to a display line, degrading failures to placeholder text
    fn describe(&self, asset: &AssetRef) -> String {
        match self.resolve(asset) {
            Ok(found) => found.summary(),
            Err(e) => {
                warn!(asset = %asset, error = %e, "Asset unavailable");
                e.placeholder()
            }
        }
    }
}

/// Reads images from a directory on disk
#[derive(Debug, Clone)]
pub struct FsAssetResolver {
    root: PathBuf,
}

impl FsAssetResolver {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }
}

impl AssetResolver for FsAssetResolver {
    fn resolve(&self, asset: &AssetRef) -> Result<Asset, AssetError> {
        let path = self.root.join(asset.file_name());
        debug!(path = %path.display(), "Loading asset");

        let bytes = fs::read(&path).map_err(|e| match e.kind() {
            io::ErrorKind::NotFound => AssetError::NotFound(path.clone()),
            _ => AssetError::Load {
                path: path.clone(),
                reason: e.to_string(),
            },
        })?;

        if bytes.is_empty() {
            return Err(AssetError::Load {
                path,
                reason: "file is empty".to_string(),
            });
        }

        Ok(Asset {
            reference: *asset,
            format: ImageFormat::sniff(&bytes),
            path,
            bytes,
        })
    }
}

/// Resolver for hosts that show no images at all
#[derive(Debug, Clone, Copy, Default)]
pub struct NoAssets;

impl AssetResolver for NoAssets {
    fn resolve(&self, asset: &AssetRef) -> Result<Asset, AssetError> {
        Err(AssetError::NotFound(PathBuf::from(asset.file_name())))
    }
}
