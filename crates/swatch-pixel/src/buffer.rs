// SPDX-License-Identifier: MIT
//
// PixelBuffer — the RGBA byte grid every filter works on.
//
// Design:
//
//   - Flat `Vec<u8>` with row-major indexing. A row's pixels are contiguous,
//     so a left-to-right pass is a linear scan.
//
//   - The length invariant (`width * height * 4`) is checked once, at
//     construction. Filters never re-validate.
//
//   - Passes go through `for_each_pixel`, which walks the buffer in
//     4-byte chunks and hands each one to a closure. Under the `parallel`
//     feature, large buffers are first cut into 256 KiB slabs that rayon
//     processes concurrently.

use crate::error::PixelError;

/// Bytes per pixel (R, G, B, A).
pub const CHANNELS: usize = 4;

/// Slab size for parallel passes; a multiple of `CHANNELS`.
#[cfg(feature = "parallel")]
const PARALLEL_SLAB: usize = CHANNELS * 64 * 1024;

/// An owned RGBA8 image.
///
/// # Examples
///
/// ```
/// use swatch_pixel::PixelBuffer;
///
/// let buf = PixelBuffer::filled(2, 1, [10, 20, 30, 255]);
/// assert_eq!(buf.pixel(1, 0), Some([10, 20, 30, 255]));
/// assert_eq!(buf.pixel(2, 0), None);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PixelBuffer {
    width: u32,
    height: u32,
    data: Vec<u8>,
}

impl PixelBuffer {
    /// Wrap raw RGBA bytes.
    ///
    /// # Errors
    ///
    /// [`PixelError::BufferSize`] if `data.len() != width * height * 4`.
    pub fn new(width: u32, height: u32, data: Vec<u8>) -> Result<Self, PixelError> {
        check_len(data.len(), width, height)?;
        Ok(Self { width, height, data })
    }

    /// A buffer with every pixel set to `rgba`.
    #[must_use]
    pub fn filled(width: u32, height: u32, rgba: [u8; 4]) -> Self {
        let count = width as usize * height as usize;
        Self {
            width,
            height,
            data: rgba.repeat(count),
        }
    }

    #[inline]
    #[must_use]
    pub const fn width(&self) -> u32 {
        self.width
    }

    #[inline]
    #[must_use]
    pub const fn height(&self) -> u32 {
        self.height
    }

    /// Number of pixels (`width * height`).
    #[inline]
    #[must_use]
    pub const fn pixel_count(&self) -> usize {
        self.data.len() / CHANNELS
    }

    #[inline]
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    #[inline]
    #[must_use]
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    #[inline]
    pub fn data_mut(&mut self) -> &mut [u8] {
        &mut self.data
    }

    /// Consume the buffer, returning the raw bytes.
    #[must_use]
    pub fn into_raw(self) -> Vec<u8> {
        self.data
    }

    /// RGBA at `(x, y)`, `None` when out of bounds.
    #[must_use]
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let i = (y as usize * self.width as usize + x as usize) * CHANNELS;
        self.data.get(i..i + CHANNELS)?.try_into().ok()
    }
}

/// A rendering surface that can hand over its pixels.
///
/// Reading may be refused (e.g. a surface tainted by cross-origin content);
/// implementations report that as [`PixelError::SurfaceAccessDenied`] rather
/// than returning an empty buffer.
pub trait PixelSource {
    /// Human-readable name used in errors and logs.
    fn name(&self) -> &str;

    /// Copy out the surface's current pixels.
    ///
    /// # Errors
    ///
    /// `SurfaceAccessDenied` when read-back is not permitted, `Unreadable`
    /// for any other failure.
    fn read_pixels(&self) -> Result<PixelBuffer, PixelError>;
}

/// Verify a raw buffer length against its dimensions.
pub(crate) fn check_len(len: usize, width: u32, height: u32) -> Result<(), PixelError> {
    let expected = width as usize * height as usize * CHANNELS;
    if len == expected {
        Ok(())
    } else {
        Err(PixelError::BufferSize { expected, actual: len })
    }
}

/// Run `f` over every 4-byte pixel of `data`.
///
/// A trailing partial pixel, if any, is left untouched.
pub(crate) fn for_each_pixel<F>(data: &mut [u8], f: F)
where
    F: Fn(&mut [u8]) + Sync + Send,
{
    #[cfg(feature = "parallel")]
    {
        use rayon::prelude::*;

        if data.len() > PARALLEL_SLAB {
            data.par_chunks_mut(PARALLEL_SLAB)
                .for_each(|slab| slab.chunks_exact_mut(CHANNELS).for_each(&f));
            return;
        }
    }

    data.chunks_exact_mut(CHANNELS).for_each(f);
}

/// Round to nearest and clamp into a channel byte.
#[inline]
pub(crate) fn to_channel(v: f64) -> u8 {
    if v.is_nan() {
        return 0;
    }
    // Safe: clamp guarantees 0.0 <= value <= 255.0 before truncation.
    v.round().clamp(0.0, 255.0) as u8
}

// ─── Tests ───────────────────────────────────────────────────────────────────
