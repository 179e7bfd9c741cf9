//! # Stand-in pin for lines that aren't wired
//!
//! Plenty of SSD1306 breakout boards tie CS permanently low, and some leave RES hooked up
//! to an RC circuit instead of a GPIO. The backends and `ResetPin` still want an `OutputPin`
//! for those, so hand them a `DummyOutputPin`.

use core::convert::Infallible;

use embedded_hal::digital::v2::OutputPin;

/// An `OutputPin` that accepts every state change and does nothing.
#[derive(Debug, Default, Clone, Copy)]
pub struct DummyOutputPin;

impl OutputPin for DummyOutputPin {
    type Error = Infallible;

    fn set_low(&mut self) -> Result<(), Self::Error> {
        Ok(())
    }

    fn set_high(&mut self) -> Result<(), Self::Error> {
        Ok(())
    }
}
