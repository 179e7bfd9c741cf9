//! The operations a framebuffer layer needs from a monochrome page-addressed controller.
//!
//! The SSD1306 driver in this crate is one implementation. A framebuffer or UI layer that
//! only talks through this trait can drive any controller of the family (SH1106, SSD1309,
//! ...) that gets an implementation.

use crate::pack::PixelBuffer;

pub trait MonochromeController {
    type Error;

    /// Sends the power-up and configuration sequence. The reset line must have been pulsed.
    fn init(&mut self) -> Result<(), Self::Error>;

    /// Resets the controller's RAM pointers so the next frame lands at the panel origin.
    fn set_window(&mut self) -> Result<(), Self::Error>;

    /// Packs a row-major pixel buffer and sends it as one data burst.
    fn write_frame<P>(&mut self, pixels: &P) -> Result<(), Self::Error>
    where
        P: PixelBuffer + ?Sized;

    /// Sets the contrast. Only the low 8 bits of `level` are used.
    fn set_contrast(&mut self, level: u32) -> Result<(), Self::Error>;

    /// Blanks the display (`true`) or brings it back (`false`).
    fn set_blank(&mut self, blank: bool) -> Result<(), Self::Error>;

    /// Full redraw: reset the window, then write the whole frame.
    fn update_display<P>(&mut self, pixels: &P) -> Result<(), Self::Error>
    where
        P: PixelBuffer + ?Sized,
    {
        self.set_window()?;
        self.write_frame(pixels)
    }
}
