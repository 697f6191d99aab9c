pub mod cubemap;
pub mod faces;
pub mod io;

use std::path::PathBuf;

use thiserror::Error;

pub use cubemap::{Cubemap, FACE_FILES};

#[derive(Debug, Error)]
pub enum Error {
    #[error("failed to access {}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("cubemap face `{face}` not found at {}", .path.display())]
    MissingFace { face: &'static str, path: PathBuf },
    #[error("failed to decode cubemap face {}", .path.display())]
    Image {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },
    #[error("cubemap face `{face}` is {width}x{height}, faces must be square")]
    NotSquare {
        face: &'static str,
        width: u32,
        height: u32,
    },
    #[error("cubemap face `{face}` is {found}px wide, expected {expected}px like the other faces")]
    SizeMismatch {
        face: &'static str,
        expected: u32,
        found: u32,
    },
    #[error("cubemap face `{face}` is empty")]
    EmptyFace { face: &'static str },
    #[error("cubemap needs exactly 6 faces, got {0}")]
    FaceCount(usize),
    #[error("cubemap face `{face}` holds {found} bytes, expected {expected}")]
    Corrupt {
        face: &'static str,
        expected: usize,
        found: usize,
    },
    #[error("failed to decode sky asset {}", .path.display())]
    Decode {
        path: PathBuf,
        #[source]
        source: rmp_serde::decode::Error,
    },
    #[error("failed to encode sky asset {}", .path.display())]
    Encode {
        path: PathBuf,
        #[source]
        source: rmp_serde::encode::Error,
    },
    #[error("{} is neither a directory of cubemap faces nor a .{} asset", .0.display(), io::FILE_EXTENSION)]
    Unsupported(PathBuf),
}
