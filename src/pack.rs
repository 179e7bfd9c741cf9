//! Frame packer: row-major pixels to SSD1306 GDDRAM bytes
//!
//! The host side keeps its image as one sample per pixel, row after row. The SSD1306 wants
//! every byte to be a vertical strip of 8 pixels (bit 0 on top), and with vertical addressing
//! mode the bytes run down the pages of column 0, then column 1, and so on:
//!
//! ```text
//!   byte[x * pages + page] bit i  <=  pixel (x, page * 8 + i)
//! ```
//!
//! The whole frame is repacked on every write. There is no dirty tracking.

use core::convert::Infallible;

use crate::{
    error::{Error, GeometryError},
    geometry::PanelGeometry,
    FRAME_CAPACITY, PAGE_HEIGHT,
};

/// A single pixel sample of the host buffer. Only "lit or not" is ever looked at.
pub trait PixelSample: Copy {
    fn is_lit(self) -> bool;
}

impl PixelSample for bool {
    fn is_lit(self) -> bool {
        self
    }
}

impl PixelSample for u8 {
    fn is_lit(self) -> bool {
        self != 0
    }
}

impl PixelSample for u16 {
    fn is_lit(self) -> bool {
        self != 0
    }
}

impl PixelSample for u32 {
    fn is_lit(self) -> bool {
        self != 0
    }
}

/// A row-major pixel buffer, `width * height` pixels long.
pub trait PixelBuffer {
    /// number of pixels in the buffer
    fn len(&self) -> usize;

    /// whether the pixel at row-major `index` is lit
    fn is_lit(&self, index: usize) -> bool;
}

impl<S: PixelSample> PixelBuffer for [S] {
    fn len(&self) -> usize {
        <[S]>::len(self)
    }

    fn is_lit(&self, index: usize) -> bool {
        self[index].is_lit()
    }
}

impl<S: PixelSample, const N: usize> PixelBuffer for [S; N] {
    fn len(&self) -> usize {
        N
    }

    fn is_lit(&self, index: usize) -> bool {
        self[index].is_lit()
    }
}

/// Packed frame in GDDRAM order, ready to be sent as one data burst.
#[derive(Clone)]
pub struct PackedFrame {
    buf: [u8; FRAME_CAPACITY],
    len: usize,
    pages: usize,
}

impl PackedFrame {
    /// An empty frame, to be filled with `repack()`.
    pub const fn new() -> Self {
        PackedFrame {
            buf: [0; FRAME_CAPACITY],
            len: 0,
            pages: 0,
        }
    }

    /// Rebuilds this frame from `pixels`.
    ///
    /// Fails with `Error::BufferSize` if `pixels` isn't exactly `width * height` long, or
    /// `Error::Geometry` if the frame doesn't fit the controller's RAM. The frame is left
    /// untouched on error.
    pub fn repack<P, E>(&mut self, pixels: &P, geometry: PanelGeometry) -> Result<(), Error<E>>
    where
        P: PixelBuffer + ?Sized,
    {
        let expected = geometry.pixel_count();
        if pixels.len() != expected {
            return Err(Error::BufferSize {
                expected,
                actual: pixels.len(),
            });
        }
        let frame_len = geometry.frame_len();
        if frame_len > FRAME_CAPACITY {
            return Err(Error::Geometry(GeometryError::TooLarge {
                width: geometry.width,
                height: geometry.height,
            }));
        }

        let width = geometry.width as usize;
        let pages = geometry.page_count() as usize;
        let mut out = self.buf[..frame_len].iter_mut();

        for x in 0..width {
            for page in 0..pages {
                let mut byte = 0u8;
                for bit in 0..PAGE_HEIGHT as usize {
                    let row = page * PAGE_HEIGHT as usize + bit;
                    byte |= (pixels.is_lit(row * width + x) as u8) << bit;
                }
                if let Some(slot) = out.next() {
                    *slot = byte;
                }
            }
        }

        self.len = frame_len;
        self.pages = pages;
        Ok(())
    }

    /// the packed bytes
    pub fn as_bytes(&self) -> &[u8] {
        &self.buf[..self.len]
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Reads back the pixel at (x, y). Out of range reads are unlit.
    pub fn is_lit(&self, x: usize, y: usize) -> bool {
        let page_height = PAGE_HEIGHT as usize;
        if self.pages == 0 || y >= self.pages * page_height {
            return false;
        }
        let index = x
            .checked_mul(self.pages)
            .and_then(|column| column.checked_add(y / page_height));
        match index.and_then(|index| self.as_bytes().get(index)) {
            Some(byte) => byte & (1 << (y % page_height)) != 0,
            None => false,
        }
    }
}

impl Default for PackedFrame {
    fn default() -> Self {
        PackedFrame::new()
    }
}

impl core::fmt::Debug for PackedFrame {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("PackedFrame")
            .field("len", &self.len)
            .field("pages", &self.pages)
            .finish()
    }
}

/// Packs `pixels` into a fresh frame. See `PackedFrame::repack()` for the error cases.
pub fn pack<P>(pixels: &P, geometry: PanelGeometry) -> Result<PackedFrame, Error<Infallible>>
where
    P: PixelBuffer + ?Sized,
{
    let mut frame = PackedFrame::new();
    frame.repack(pixels, geometry)?;
    Ok(frame)
}
