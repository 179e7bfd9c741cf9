//! Bus backends for the SSD1306
//!
//! The controller only needs one thing from the bus: a way to send some bytes either as
//! commands or as display data. On the 4-wire serial interface that's the D/C pin, on I2C
//! it's the control byte in front of every transfer. `SSD1306Backend` hides which one it is.

use core::iter;

use embedded_hal::{
    blocking::{i2c::WriteIter, spi::Write as SpiWrite},
    digital::v2::OutputPin,
};

/// Whether a transaction goes to the command decoder or to GDDRAM.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Phase {
    Command,
    Data,
}

pub trait SSD1306Backend {
    type Error;

    /// Sends `bytes` as a single transaction in the given phase.
    fn send(&mut self, phase: Phase, bytes: &[u8]) -> Result<(), Self::Error>;
}

impl<B: SSD1306Backend + ?Sized> SSD1306Backend for &mut B {
    type Error = B::Error;

    fn send(&mut self, phase: Phase, bytes: &[u8]) -> Result<(), Self::Error> {
        (**self).send(phase, bytes)
    }
}

/// Bit banged backend, for when there is no SPI peripheral to spare.
pub struct SSD1306GpioBackend<CLK, DIN, DC, CE>
where
    CLK: OutputPin,
    DIN: OutputPin,
    DC: OutputPin,
    CE: OutputPin,
{
    clk: CLK,
    din: DIN,
    dc: DC,
    ce: CE,
}

impl<CLK, DIN, DC, CE, ERR> SSD1306GpioBackend<CLK, DIN, DC, CE>
where
    CLK: OutputPin<Error = ERR>,
    DIN: OutputPin<Error = ERR>,
    DC: OutputPin<Error = ERR>,
    CE: OutputPin<Error = ERR>,
{
    pub fn new(
        mut clk: CLK,
        din: DIN,
        dc: DC,
        mut ce: CE,
    ) -> Result<SSD1306GpioBackend<CLK, DIN, DC, CE>, ERR> {
        // the SSD1306 samples on the rising edge, so idle low
        clk.set_low()?;
        ce.set_high()?;
        Ok(SSD1306GpioBackend { clk, din, dc, ce })
    }

    fn write_bit(&mut self, high: bool) -> Result<(), ERR> {
        if high {
            self.din.set_high()?;
        } else {
            self.din.set_low()?;
        }
        self.clk.set_high()?;
        self.clk.set_low()
    }

    /// Returns the pins.
    pub fn release(self) -> (CLK, DIN, DC, CE) {
        (self.clk, self.din, self.dc, self.ce)
    }
}

impl<CLK, DIN, DC, CE, ERR> SSD1306Backend for SSD1306GpioBackend<CLK, DIN, DC, CE>
where
    CLK: OutputPin<Error = ERR>,
    DIN: OutputPin<Error = ERR>,
    DC: OutputPin<Error = ERR>,
    CE: OutputPin<Error = ERR>,
{
    type Error = ERR;

    fn send(&mut self, phase: Phase, bytes: &[u8]) -> Result<(), ERR> {
        match phase {
            Phase::Data => self.dc.set_high()?,
            Phase::Command => self.dc.set_low()?,
        }
        self.ce.set_low()?;
        for &value in bytes {
            let mut value = value;
            for _ in 0..8 {
                self.write_bit((value & 0x80) == 0x80)?;
                value <<= 1;
            }
        }
        self.ce.set_high()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SpiBackendError<PinErr, SpiErr> {
    Pin(PinErr),
    Spi(SpiErr),
}

/// 4-wire SPI backend: SPI for clock and data, D/C and CE on GPIO.
pub struct SSD1306SpiBackend<SPI, DC, CE>
where
    SPI: SpiWrite<u8>,
    DC: OutputPin,
    CE: OutputPin,
{
    spi: SPI,
    dc: DC,
    ce: CE,
}

impl<SPI, DC, CE, PinErr, SpiErr> SSD1306SpiBackend<SPI, DC, CE>
where
    SPI: SpiWrite<u8, Error = SpiErr>,
    DC: OutputPin<Error = PinErr>,
    CE: OutputPin<Error = PinErr>,
{
    pub fn new(spi: SPI, dc: DC, mut ce: CE) -> Result<SSD1306SpiBackend<SPI, DC, CE>, PinErr> {
        ce.set_high()?;
        Ok(SSD1306SpiBackend { spi, dc, ce })
    }

    /// Returns the SPI bus and pins.
    pub fn release(self) -> (SPI, DC, CE) {
        (self.spi, self.dc, self.ce)
    }
}

impl<SPI, DC, CE, PinErr, SpiErr> SSD1306Backend for SSD1306SpiBackend<SPI, DC, CE>
where
    SPI: SpiWrite<u8, Error = SpiErr>,
    DC: OutputPin<Error = PinErr>,
    CE: OutputPin<Error = PinErr>,
{
    type Error = SpiBackendError<PinErr, SpiErr>;

    fn send(&mut self, phase: Phase, bytes: &[u8]) -> Result<(), Self::Error> {
        match phase {
            Phase::Data => self.dc.set_high().map_err(SpiBackendError::Pin)?,
            Phase::Command => self.dc.set_low().map_err(SpiBackendError::Pin)?,
        }
        self.ce.set_low().map_err(SpiBackendError::Pin)?;
        let written = self.spi.write(bytes).map_err(SpiBackendError::Spi);
        // release CE even if the transfer failed, the bus error wins
        let released = self.ce.set_high().map_err(SpiBackendError::Pin);
        written.and(released)
    }
}

/// I2C address with the SA0 pin low.
pub const I2C_ADDRESS: u8 = 0x3C;

/// I2C address with the SA0 pin high.
pub const I2C_ADDRESS_ALT: u8 = 0x3D;

// control bytes: Co = 0 (stream), D/C# selects command or data
const I2C_CONTROL_COMMAND: u8 = 0x00;
const I2C_CONTROL_DATA: u8 = 0x40;

/// I2C backend. Every transaction becomes one I2C write with the control byte in front.
pub struct SSD1306I2cBackend<I2C> {
    i2c: I2C,
    address: u8,
}

impl<I2C, E> SSD1306I2cBackend<I2C>
where
    I2C: WriteIter<Error = E>,
{
    /// Backend talking to the display at `I2C_ADDRESS`.
    pub fn new(i2c: I2C) -> Self {
        SSD1306I2cBackend::with_address(i2c, I2C_ADDRESS)
    }

    pub fn with_address(i2c: I2C, address: u8) -> Self {
        SSD1306I2cBackend { i2c, address }
    }

    pub fn release(self) -> I2C {
        self.i2c
    }
}

impl<I2C, E> SSD1306Backend for SSD1306I2cBackend<I2C>
where
    I2C: WriteIter<Error = E>,
{
    type Error = E;

    fn send(&mut self, phase: Phase, bytes: &[u8]) -> Result<(), E> {
        let control = match phase {
            Phase::Command => I2C_CONTROL_COMMAND,
            Phase::Data => I2C_CONTROL_DATA,
        };
        self.i2c.write(
            self.address,
            iter::once(control).chain(bytes.iter().copied()),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dummypins::DummyOutputPin;
    use core::convert::Infallible;
    use std::{cell::RefCell, rc::Rc, vec, vec::Vec};

    #[derive(Debug, Clone, PartialEq, Eq)]
    enum Event {
        Dc(bool),
        Ce(bool),
        Clk(bool),
        Din(bool),
        Spi(Vec<u8>),
        I2c(u8, Vec<u8>),
    }

    type Log = Rc<RefCell<Vec<Event>>>;

    struct Pin {
        log: Log,
        event: fn(bool) -> Event,
    }

    impl OutputPin for Pin {
        type Error = Infallible;

        fn set_low(&mut self) -> Result<(), Infallible> {
            self.log.borrow_mut().push((self.event)(false));
            Ok(())
        }

        fn set_high(&mut self) -> Result<(), Infallible> {
            self.log.borrow_mut().push((self.event)(true));
            Ok(())
        }
    }

    struct Spi {
        log: Log,
        fail: bool,
    }

    impl SpiWrite<u8> for Spi {
        type Error = ();

        fn write(&mut self, words: &[u8]) -> Result<(), ()> {
            if self.fail {
                return Err(());
            }
            self.log.borrow_mut().push(Event::Spi(words.to_vec()));
            Ok(())
        }
    }

    struct I2c {
        log: Log,
    }

    impl WriteIter for I2c {
        type Error = Infallible;

        fn write<B>(&mut self, address: u8, bytes: B) -> Result<(), Infallible>
        where
            B: IntoIterator<Item = u8>,
        {
            let bytes = bytes.into_iter().collect();
            self.log.borrow_mut().push(Event::I2c(address, bytes));
            Ok(())
        }
    }

    fn pin(log: &Log, event: fn(bool) -> Event) -> Pin {
        Pin {
            log: log.clone(),
            event,
        }
    }

    #[test]
    fn spi_selects_phase_with_dc() {
        let log: Log = Rc::default();
        let spi = Spi {
            log: log.clone(),
            fail: false,
        };
        let mut backend =
            SSD1306SpiBackend::new(spi, pin(&log, Event::Dc), pin(&log, Event::Ce)).unwrap();

        backend.send(Phase::Command, &[0xAE]).unwrap();
        backend.send(Phase::Data, &[1, 2, 3]).unwrap();

        assert_eq!(
            *log.borrow(),
            vec![
                Event::Ce(true),
                Event::Dc(false),
                Event::Ce(false),
                Event::Spi(vec![0xAE]),
                Event::Ce(true),
                Event::Dc(true),
                Event::Ce(false),
                Event::Spi(vec![1, 2, 3]),
                Event::Ce(true),
            ]
        );
    }

    #[test]
    fn spi_releases_ce_on_failure() {
        let log: Log = Rc::default();
        let spi = Spi {
            log: log.clone(),
            fail: true,
        };
        let mut backend =
            SSD1306SpiBackend::new(spi, pin(&log, Event::Dc), pin(&log, Event::Ce)).unwrap();

        assert_eq!(
            backend.send(Phase::Command, &[0xAF]),
            Err(SpiBackendError::Spi(()))
        );
        assert_eq!(log.borrow().last(), Some(&Event::Ce(true)));
    }

    #[test]
    fn spi_works_with_chip_enable_tied_low() {
        let log: Log = Rc::default();
        let spi = Spi {
            log: log.clone(),
            fail: false,
        };
        let mut backend =
            SSD1306SpiBackend::new(spi, pin(&log, Event::Dc), DummyOutputPin).unwrap();

        backend.send(Phase::Data, &[0x55]).unwrap();
        assert_eq!(
            *log.borrow(),
            vec![Event::Dc(true), Event::Spi(vec![0x55])]
        );
    }

    #[test]
    fn gpio_shifts_msb_first() {
        let log: Log = Rc::default();
        let mut backend = SSD1306GpioBackend::new(
            pin(&log, Event::Clk),
            pin(&log, Event::Din),
            pin(&log, Event::Dc),
            pin(&log, Event::Ce),
        )
        .unwrap();
        log.borrow_mut().clear();

        backend.send(Phase::Command, &[0b1000_0001]).unwrap();

        let log = log.borrow();
        assert_eq!(log[0], Event::Dc(false));
        assert_eq!(log[1], Event::Ce(false));
        let bits: Vec<bool> = log
            .iter()
            .filter_map(|e| match e {
                Event::Din(b) => Some(*b),
                _ => None,
            })
            .collect();
        assert_eq!(
            bits,
            vec![true, false, false, false, false, false, false, true]
        );
        assert_eq!(log.iter().filter(|e| **e == Event::Clk(true)).count(), 8);
        assert_eq!(log.last(), Some(&Event::Ce(true)));
    }

    #[test]
    fn i2c_prefixes_control_byte() {
        let log: Log = Rc::default();
        let mut backend = SSD1306I2cBackend::new(I2c { log: log.clone() });

        backend.send(Phase::Command, &[0x81]).unwrap();
        backend.send(Phase::Data, &[0xFF, 0x00]).unwrap();

        assert_eq!(
            *log.borrow(),
            vec![
                Event::I2c(0x3C, vec![0x00, 0x81]),
                Event::I2c(0x3C, vec![0x40, 0xFF, 0x00]),
            ]
        );
    }
}
