// SPDX-License-Identifier: MIT

use thiserror::Error;

/// Failures reading or shaping pixel data.
#[derive(Debug, Error)]
pub enum PixelError {
    /// The surface refused pixel read-back (cross-origin or permission
    /// restrictions). Distinct from "no image": the pixels exist but may
    /// not be read.
    #[error("pixel read-back from {source_name} was denied")]
    SurfaceAccessDenied { source_name: String },

    /// A raw buffer's length does not match `width × height × 4`.
    #[error("pixel buffer holds {actual} bytes, expected {expected}")]
    BufferSize { expected: usize, actual: usize },

    /// The surface could not be decoded or read for any other reason.
    #[error("could not read pixels from {source_name}: {reason}")]
    Unreadable { source_name: String, reason: String },
}
