//! Graphics support for the SSD1306
//!
//! This module is behind a feature flag. Enable it in your Cargo.toml with feature flag
//! "graphics".
//!
//! It provides `FrameBuffer`, a host side image in row-major order with one bit per pixel,
//! which implements the embedded_graphics `DrawTarget` trait. Draw into it with any
//! embedded_graphics primitive, font or image, then hand it to
//! `MonochromeController::update_display()`:
//!  - `FrameBuffer::new()` with the panel geometry, the same one the driver was configured with
//!  - draw "stuff" into it (Circle's, Text's, embedded_graphics "stuff")
//!  - `update_display(&framebuffer)` packs it and sends it to GDDRAM
//!  - clear, draw and update again for the next frame
//!
//! <https://docs.rs/embedded-graphics/latest/embedded_graphics/>
use core::convert::{Infallible, TryInto};

use embedded_graphics_core::{pixelcolor::BinaryColor, prelude::*};

use crate::{
    error::GeometryError,
    geometry::{Panel, PanelGeometry},
    pack::PixelBuffer,
    FRAME_CAPACITY,
};

/// Row-major 1bpp image with the size of the panel.
#[derive(Clone)]
pub struct FrameBuffer {
    bits: [u8; FRAME_CAPACITY],
    geometry: PanelGeometry,
}

impl FrameBuffer {
    /// An all-off buffer for the given panel.
    ///
    /// Fails for the same geometries `SSD1306::new()` refuses, so a buffer that exists always
    /// fits the controller.
    pub fn new(geometry: PanelGeometry) -> Result<Self, GeometryError> {
        Panel::resolve(geometry)?;
        Ok(FrameBuffer {
            bits: [0; FRAME_CAPACITY],
            geometry,
        })
    }

    pub fn geometry(&self) -> PanelGeometry {
        self.geometry
    }

    /// Set a pixel. Out of bounds coordinates are ignored.
    pub fn set_pixel(&mut self, x: u32, y: u32, color: BinaryColor) {
        let width = self.geometry.width as u32;
        let height = self.geometry.height as u32;
        if x >= width || y >= height {
            return;
        }
        let index = (y * width + x) as usize;
        let mask = 1 << (index % 8);
        let byte = &mut self.bits[index / 8];
        match color {
            BinaryColor::On => *byte |= mask,
            BinaryColor::Off => *byte &= !mask,
        }
    }

    /// Color of a pixel, `None` out of bounds.
    pub fn pixel(&self, x: u32, y: u32) -> Option<BinaryColor> {
        let width = self.geometry.width as u32;
        if x >= width || y >= self.geometry.height as u32 {
            return None;
        }
        let index = (y * width + x) as usize;
        Some(BinaryColor::from(PixelBuffer::is_lit(self, index)))
    }
}

impl PixelBuffer for FrameBuffer {
    fn len(&self) -> usize {
        self.geometry.pixel_count()
    }

    fn is_lit(&self, index: usize) -> bool {
        self.bits[index / 8] & (1 << (index % 8)) != 0
    }
}

impl DrawTarget for FrameBuffer {
    type Color = BinaryColor;
    type Error = Infallible;

    fn draw_iter<I>(&mut self, pixels: I) -> Result<(), Self::Error>
    where
        I: IntoIterator<Item = Pixel<Self::Color>>,
    {
        for Pixel(coord, color) in pixels {
            // negative coordinates fail the conversion and are dropped
            if let Ok((x, y)) = coord.try_into() {
                self.set_pixel(x, y, color);
            }
        }
        Ok(())
    }

    fn clear(&mut self, color: BinaryColor) -> Result<(), Self::Error> {
        let byte: u8 = match color {
            BinaryColor::On => 0xff,
            BinaryColor::Off => 0x00,
        };
        self.bits = [byte; FRAME_CAPACITY];
        Ok(())
    }
}

impl OriginDimensions for FrameBuffer {
    fn size(&self) -> Size {
        Size::new(self.geometry.width.into(), self.geometry.height.into())
    }
}
