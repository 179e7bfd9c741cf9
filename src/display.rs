//! # Main driver for the SSD1306
//!
//! This module exports the `SSD1306` struct, which keeps the state of one display and
//! implements `MonochromeController` on top of any `SSD1306Backend`.
//!
//! Typical use:
//!  - pulse the reset line (see `ResetPin`)
//!  - `SSD1306::new()` with a backend and a `Config`. This only checks the geometry and
//!    doesn't send anything yet.
//!  - `attach()` (or `init()` followed by `set_contrast()`)
//!  - `update_display()` with a row-major pixel buffer every time the image changes
//!
//! Every frame is written in full. The driver programs vertical addressing mode during init
//! and the frame packer produces bytes in that same order. Changing one without the other
//! renders diagonal garbage.
use crate::{
    backend::{Phase, SSD1306Backend},
    config::{Config, Orientation},
    controller::MonochromeController,
    error::Error,
    geometry::Panel,
    instructions::prelude::*,
    pack::{PackedFrame, PixelBuffer},
};

/// Lifecycle of a display instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DisplayState {
    /// created, nothing sent yet
    Uninitialized,
    /// init sequence started but didn't complete
    Initializing,
    /// panel on, showing RAM
    On,
    /// panel off via `set_blank(true)`, RAM retained
    Blanked,
}

/// State keeping for one SSD1306 and the backend it is attached to.
pub struct SSD1306<Backend> {
    backend: Backend,
    panel: Panel,
    orientation: Orientation,
    contrast: Option<u8>,
    state: DisplayState,
    // transmit buffer, rebuilt for every frame
    frame: PackedFrame,
}

impl<Backend> SSD1306<Backend>
where
    Backend: SSD1306Backend,
{
    /// Create a new driver instance.
    ///
    /// Fails with `Error::Geometry` if the panel size can't be driven by the SSD1306. Nothing
    /// is sent to the display here, call `attach()` or `init()` next.
    pub fn new(backend: Backend, config: Config) -> Result<Self, Error<Backend::Error>> {
        let panel = Panel::resolve(config.geometry)?;
        debug!(
            "ssd1306: {}x{} panel, rotated {}",
            config.geometry.width,
            config.geometry.height,
            config.orientation.degrees()
        );
        Ok(SSD1306 {
            backend,
            panel,
            orientation: config.orientation,
            contrast: config.contrast,
            state: DisplayState::Uninitialized,
            frame: PackedFrame::new(),
        })
    }

    /// Runs the init sequence and then applies the contrast, configured or default.
    pub fn attach(&mut self) -> Result<(), Error<Backend::Error>> {
        self.init()?;
        let contrast = self.resolve_contrast();
        self.set_contrast(contrast.into())
    }

    // Pick the default contrast for the panel height if none is set. A level of 0 counts as
    // unset. `&mut self` makes this read-modify-write exclusive, so the default is applied once.
    fn resolve_contrast(&mut self) -> u8 {
        match self.contrast {
            Some(level) if level != 0 => level,
            _ => {
                let level = self.panel.default_contrast();
                debug!("ssd1306: no contrast configured, using {=u8:#x}", level);
                self.contrast = Some(level);
                level
            }
        }
    }

    // The init sequence for the configured panel, adapted from the Adafruit SSD1306 library.
    fn init_sequence(&self) -> [Instruction; 15] {
        let flipped = self.orientation.is_flipped();
        let geometry = self.panel.geometry();
        [
            Display(false),
            ClockDivide(CLOCK_DIVIDE),
            MultiplexRatio(geometry.height - 1),
            DisplayOffset(0),
            StartLine(0),
            ChargePump(true),
            SegmentRemap(flipped),
            ComScanDirection(if flipped {
                ComScan::Remapped
            } else {
                ComScan::Normal
            }),
            ComPinsConfig(self.panel.com_pins()),
            MemoryAddressingMode(AddressingMode::Vertical),
            PrechargePeriod(PRECHARGE_PERIOD),
            VcomhDeselect(VCOMH_DESELECT),
            EntireDisplayOn(false),
            SetDisplayMode(DisplayMode::Normal),
            Display(true),
        ]
    }

    /// Send one instruction. Opcode and arguments each go out as their own command
    /// transaction, the D/C line has to be low for every one of them.
    pub fn write_command(&mut self, instruction: Instruction) -> Result<(), Error<Backend::Error>> {
        trace!("ssd1306: command {=[u8]:#x}", instruction.bytes().as_slice());
        for byte in instruction.bytes().iter() {
            Error::bus(self.backend.send(Phase::Command, &[*byte]))?;
        }
        Ok(())
    }

    /// Send raw bytes to GDDRAM as one data transaction.
    pub fn write_data(&mut self, data: &[u8]) -> Result<(), Error<Backend::Error>> {
        Error::bus(self.backend.send(Phase::Data, data))
    }

    /// Clears the panel by writing an all-off frame.
    pub fn clear(&mut self) -> Result<(), Error<Backend::Error>> {
        self.set_window()?;
        let len = self.panel.geometry().frame_len();
        let zeroes = [0u8; 128];
        let mut remaining = len;
        // the data pointer keeps advancing between transactions, so chunks are fine here
        while remaining > 0 {
            let chunk = remaining.min(zeroes.len());
            self.write_data(&zeroes[..chunk])?;
            remaining -= chunk;
        }
        Ok(())
    }

    /// Show the RAM content inverted (`true`) or normal (`false`).
    pub fn set_inverted(&mut self, inverted: bool) -> Result<(), Error<Backend::Error>> {
        self.require_initialized()?;
        let mode = if inverted {
            DisplayMode::Inverse
        } else {
            DisplayMode::Normal
        };
        self.write_command(SetDisplayMode(mode))
    }

    fn require_initialized(&self) -> Result<(), Error<Backend::Error>> {
        match self.state {
            DisplayState::Uninitialized => Err(Error::NotInitialized),
            _ => Ok(()),
        }
    }

    pub fn state(&self) -> DisplayState {
        self.state
    }

    /// The stored contrast, `None` until configured or defaulted by `init()`. A stored 0 is
    /// replaced by the panel default on the next `init()`.
    pub fn contrast(&self) -> Option<u8> {
        self.contrast
    }

    pub fn panel(&self) -> Panel {
        self.panel
    }

    pub fn orientation(&self) -> Orientation {
        self.orientation
    }

    /// The frame as it was last packed.
    pub fn packed_frame(&self) -> &PackedFrame {
        &self.frame
    }

    /// Gives the backend back.
    pub fn release(self) -> Backend {
        self.backend
    }
}

impl<Backend> MonochromeController for SSD1306<Backend>
where
    Backend: SSD1306Backend,
{
    type Error = Error<Backend::Error>;

    fn init(&mut self) -> Result<(), Self::Error> {
        self.resolve_contrast();

        self.state = DisplayState::Initializing;
        debug!("ssd1306: init");
        for instruction in self.init_sequence().iter() {
            self.write_command(*instruction)?;
        }
        self.state = DisplayState::On;
        debug!("ssd1306: display on");
        Ok(())
    }

    fn set_window(&mut self) -> Result<(), Self::Error> {
        let (col_start, col_end) = self.panel.column_range();
        let (page_start, page_end) = self.panel.page_range();
        trace!(
            "ssd1306: window columns {}..={} pages {}..={}",
            col_start,
            col_end,
            page_start,
            page_end
        );
        self.write_command(ColumnAddress {
            start: col_start,
            end: col_end,
        })?;
        self.write_command(PageAddress {
            start: page_start,
            end: page_end,
        })
    }

    fn write_frame<P>(&mut self, pixels: &P) -> Result<(), Self::Error>
    where
        P: PixelBuffer + ?Sized,
    {
        let geometry = self.panel.geometry();
        self.frame.repack(pixels, geometry)?;

        let result = self.backend.send(Phase::Data, self.frame.as_bytes());
        if result.is_err() {
            warn!("ssd1306: frame write failed");
        }
        Error::bus(result)
    }

    fn set_contrast(&mut self, level: u32) -> Result<(), Self::Error> {
        self.require_initialized()?;
        let level = (level & 0xFF) as u8;
        self.contrast = Some(level);
        self.write_command(Contrast(level))
    }

    fn set_blank(&mut self, blank: bool) -> Result<(), Self::Error> {
        self.require_initialized()?;
        debug!("ssd1306: blank={}", blank);
        self.write_command(Display(!blank))?;
        self.state = match (self.state, blank) {
            (DisplayState::On, true) => DisplayState::Blanked,
            (DisplayState::Blanked, false) => DisplayState::On,
            (state, _) => state,
        };
        Ok(())
    }
}
