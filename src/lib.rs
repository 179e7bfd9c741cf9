//! # Driver for SSD1306 OLED controllers
//!
//! The SSD1306 drives monochrome dot-matrix OLED panels of up to 128x64 pixels over SPI,
//! I2C or a bit-banged serial link. This crate turns a row-major pixel buffer into the
//! controller's page/column layout, keeps the controller's RAM window pointed at the
//! panel, and sends the power-up sequence for the common module sizes (128x64, 128x32,
//! 96x16 and the centered 64x48).
//!
//! ```ignore
//! let spi_backend = SSD1306SpiBackend::new(spi, dc, cs)?;
//! ResetPin::new(rst).pulse(&mut delay)?;
//!
//! let mut display = SSD1306::new(spi_backend, Config::new(128, 32))?;
//! display.attach()?;
//! display.update_display(&pixels[..])?;
//! ```
//!
//! Features:
//!  - `graphics`: an embedded_graphics `DrawTarget` frame buffer
//!  - `defmt`: log through defmt and derive `defmt::Format` on the public types
#![cfg_attr(not(test), no_std)]

#[macro_use]
mod log;

#[cfg(test)]
#[macro_use]
mod testing;

pub mod backend;
pub mod config;
pub mod controller;
pub mod display;
pub mod dummypins;
pub mod error;
pub mod geometry;
pub mod instructions;
pub mod pack;
pub mod reset;

#[cfg(feature = "graphics")]
pub mod graphics;

/// Columns of GDDRAM
pub const CONTROLLER_COLUMNS: u8 = 128;
/// Rows of GDDRAM, 8 pages of 8
pub const CONTROLLER_ROWS: u8 = 64;
/// Rows per page, one bit each in a GDDRAM byte
pub const PAGE_HEIGHT: u8 = 8;
/// Bytes of the largest frame the controller can hold
pub const FRAME_CAPACITY: usize = CONTROLLER_COLUMNS as usize * CONTROLLER_ROWS as usize / 8;

pub use crate::{
    backend::{
        Phase, SSD1306Backend, SSD1306GpioBackend, SSD1306I2cBackend, SSD1306SpiBackend,
        SpiBackendError,
    },
    config::{Config, Orientation},
    controller::MonochromeController,
    display::{DisplayState, SSD1306},
    error::{Error, GeometryError},
    geometry::{Panel, PanelGeometry},
    pack::{pack, PackedFrame, PixelBuffer, PixelSample},
    reset::ResetPin,
};

#[cfg(feature = "graphics")]
pub use crate::graphics::FrameBuffer;

/// Everything needed to set up and drive a display.
pub mod prelude {
    pub use crate::{
        Config, DisplayState, MonochromeController, PanelGeometry, PixelBuffer, ResetPin,
        SSD1306Backend, SSD1306,
    };
}
