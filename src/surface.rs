// SPDX-License-Identifier: MIT
//
// Image files as pixel surfaces.
//
// Decoding goes through the `image` crate and always lands as RGBA8, the
// layout `PixelBuffer` expects. A permission failure while opening is the
// file-system equivalent of a tainted canvas and is reported as
// `SurfaceAccessDenied`; everything else is `Unreadable`.

use std::io;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use image::{ColorType, ImageError, ImageFormat};
use swatch_pixel::{PixelBuffer, PixelError, PixelSource};
use tracing::debug;

/// An image on disk.
#[derive(Debug, Clone)]
pub struct ImageFile {
    path: PathBuf,
    name: String,
}

impl ImageFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let name = path.display().to_string();
        Self { path, name }
    }

    fn classify(&self, err: ImageError) -> PixelError {
        match err {
            ImageError::IoError(io) if io.kind() == io::ErrorKind::PermissionDenied => {
                PixelError::SurfaceAccessDenied {
                    source_name: self.name.clone(),
                }
            }
            other => PixelError::Unreadable {
                source_name: self.name.clone(),
                reason: other.to_string(),
            },
        }
    }
}

impl PixelSource for ImageFile {
    fn name(&self) -> &str {
        &self.name
    }

    fn read_pixels(&self) -> Result<PixelBuffer, PixelError> {
        let image = image::open(&self.path).map_err(|err| self.classify(err))?;
        let rgba = image.to_rgba8();
        let (width, height) = rgba.dimensions();
        debug!(path = %self.name, width, height, "decoded image");
        PixelBuffer::new(width, height, rgba.into_raw())
    }
}

/// Encode `buffer` to `path`; the format follows the file extension.
///
/// Formats without an alpha channel (JPEG) get the RGB channels only.
pub fn save(buffer: &PixelBuffer, path: &Path) -> Result<()> {
    let opaque = ImageFormat::from_path(path).is_ok_and(|format| format == ImageFormat::Jpeg);
    let written = if opaque {
        let rgb: Vec<u8> = buffer
            .data()
            .chunks_exact(4)
            .flat_map(|px| [px[0], px[1], px[2]])
            .collect();
        image::save_buffer(path, &rgb, buffer.width(), buffer.height(), ColorType::Rgb8)
    } else {
        image::save_buffer(path, buffer.data(), buffer.width(), buffer.height(), ColorType::Rgba8)
    };
    written.with_context(|| format!("failed to write image {}", path.display()))?;
    debug!(path = %path.display(), opaque, "wrote image");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::fs;

    fn temp_path(name: &str) -> PathBuf {
        std::env::temp_dir().join(format!("swatch-{}-{name}", std::process::id()))
    }

    #[test]
    fn png_round_trips_through_a_surface() {
        let path = temp_path("surface.png");
        let data: Vec<u8> = (0..24).map(|v| v * 10).collect();
        let buffer = PixelBuffer::new(3, 2, data).unwrap();

        save(&buffer, &path).unwrap();
        let read = ImageFile::new(&path).read_pixels().unwrap();
        assert_eq!(read, buffer);

        fs::remove_file(&path).unwrap();
    }

    #[test]
    fn jpeg_is_written_without_alpha() {
        for name in ["surface.jpg", "surface.JPEG"] {
            let path = temp_path(name);
            let buffer = PixelBuffer::filled(8, 8, [200, 100, 50, 128]);

            save(&buffer, &path).unwrap();
            let read = ImageFile::new(&path).read_pixels().unwrap();
            assert_eq!((read.width(), read.height()), (8, 8));

            // Lossy, but a flat color survives closely; alpha comes back opaque.
            let [r, g, b, a] = read.pixel(3, 3).unwrap();
            for (got, want) in [(r, 200u8), (g, 100), (b, 50)] {
                assert!(got.abs_diff(want) <= 6, "{name}: {got} vs {want}");
            }
            assert_eq!(a, 255);

            fs::remove_file(&path).unwrap();
        }
    }

    #[test]
    fn missing_file_is_unreadable_not_denied() {
        let err = ImageFile::new(temp_path("missing.png")).read_pixels().unwrap_err();
        assert!(matches!(err, PixelError::Unreadable { .. }), "{err}");
    }

    #[test]
    fn garbage_is_unreadable() {
        let path = temp_path("garbage.png");
        fs::write(&path, b"definitely not a png").unwrap();
        let err = ImageFile::new(&path).read_pixels().unwrap_err();
        assert!(matches!(err, PixelError::Unreadable { .. }), "{err}");
        fs::remove_file(&path).unwrap();
    }

    #[test]
    fn permission_error_maps_to_access_denied() {
        let file = ImageFile::new("locked.png");
        let err = file.classify(ImageError::IoError(io::Error::from(io::ErrorKind::PermissionDenied)));
        assert!(matches!(err, PixelError::SurfaceAccessDenied { ref source_name } if source_name == "locked.png"));
    }
}
