//! Bitmap decompression used by compressed bitmap cache orders.

use core::fmt;

/// Expands compressed bitmap cache payloads.
pub trait BitmapDecompressor {
    /// Fills `dst`, exactly `width * height * bytes_per_pixel` bytes long, with rows top-down.
    fn decompress(
        &mut self,
        src: &[u8],
        dst: &mut [u8],
        width: u16,
        height: u16,
        bytes_per_pixel: u8,
    ) -> Result<(), DecompressError>;
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecompressError {
    pub reason: String,
}

impl DecompressError {
    pub fn new(reason: impl Into<String>) -> Self {
        Self { reason: reason.into() }
    }
}

impl fmt::Display for DecompressError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "bitmap decompression failed: {}", self.reason)
    }
}

impl core::error::Error for DecompressError {}

#[cfg(feature = "rle")]
pub use self::rle::RleDecompressor;

#[cfg(feature = "rle")]
mod rle {
    use super::{BitmapDecompressor, DecompressError};

    /// Interleaved RLE decompressor from `ironrdp-graphics`.
    #[derive(Debug, Default)]
    pub struct RleDecompressor {
        buffer: Vec<u8>,
    }

    impl BitmapDecompressor for RleDecompressor {
        fn decompress(
            &mut self,
            src: &[u8],
            dst: &mut [u8],
            width: u16,
            height: u16,
            bytes_per_pixel: u8,
        ) -> Result<(), DecompressError> {
            let bpp = match bytes_per_pixel {
                1 => 8_usize,
                2 => 16,
                3 => 24,
                other => return Err(DecompressError::new(format!("unsupported bytes per pixel: {other}"))),
            };

            ironrdp_graphics::rle::decompress(
                src,
                &mut self.buffer,
                usize::from(width),
                usize::from(height),
                bpp,
            )
            .map_err(|e| DecompressError::new(e.to_string()))?;

            let row_len = usize::from(width) * usize::from(bytes_per_pixel);

            if row_len == 0 || self.buffer.len() != dst.len() {
                return Err(DecompressError::new("decompressed size mismatch"));
            }

            // RLE scanlines come bottom-up.
            for (dst_row, src_row) in dst.chunks_exact_mut(row_len).zip(self.buffer.chunks_exact(row_len).rev()) {
                dst_row.copy_from_slice(src_row);
            }

            Ok(())
        }
    }
}

#[cfg(all(test, feature = "rle"))]
mod tests {
    use super::*;

    #[test]
    fn rle_rows_come_out_top_down() {
        // Single color image run of four 8 bpp pixels.
        let src = [0x84, 1, 2, 3, 4];
        let mut dst = [0; 4];

        RleDecompressor::default().decompress(&src, &mut dst, 2, 2, 1).unwrap();

        assert_eq!(dst, [3, 4, 1, 2]);
    }

    #[test]
    fn unsupported_depth_is_rejected() {
        let mut dst = [0; 16];

        let error = RleDecompressor::default()
            .decompress(&[0x84, 1, 2, 3, 4], &mut dst, 2, 2, 4)
            .unwrap_err();

        assert_eq!(error.reason, "unsupported bytes per pixel: 4");
    }
}
