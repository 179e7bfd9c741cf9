//! Hardware reset of the SSD1306
//!
//! The controller comes up in an undefined state after power on, so RES# has to be pulsed
//! low once before the init sequence is sent. The driver itself never touches the reset
//! line: pulse it with `ResetPin` and then call `init()`.

use embedded_hal::{
    blocking::delay::{DelayMs, DelayUs},
    digital::v2::OutputPin,
};

/// How long RES# is held low. The data sheet asks for at least 3us.
pub const RESET_PULSE_US: u16 = 20;

/// How long to wait after releasing RES# before talking to the controller.
pub const RESET_SETTLE_MS: u8 = 120;

/// The RES# line of the display, active low.
pub struct ResetPin<RST> {
    rst: RST,
}

impl<RST, ERR> ResetPin<RST>
where
    RST: OutputPin<Error = ERR>,
{
    pub fn new(rst: RST) -> Self {
        ResetPin { rst }
    }

    /// Pulses RES# low and waits for the controller to come out of reset.
    pub fn pulse<D>(&mut self, delay: &mut D) -> Result<(), ERR>
    where
        D: DelayUs<u16> + DelayMs<u8>,
    {
        self.rst.set_low()?;
        delay.delay_us(RESET_PULSE_US);
        self.rst.set_high()?;
        delay.delay_ms(RESET_SETTLE_MS);
        Ok(())
    }

    pub fn release(self) -> RST {
        self.rst
    }
}
