//! # Module defining the instruction set of the SSD1306
//!
//! All instructions are implemented as enum variants, and most arguments are enums as well.
//! The opcodes follow the data sheet:
//! <https://cdn-shop.adafruit.com/datasheets/SSD1306.pdf>
//!
//! Many SSD1306 commands are "double byte" (or triple byte) commands: an opcode followed by
//! one or two argument bytes. The controller latches the D/C line per byte, and some
//! interface boards only sample D/C at the start of a transfer, so the driver sends the
//! opcode and every argument as separate command transactions. `Instruction::bytes()` hands
//! out the raw bytes in order so the caller can do exactly that.
//!
//! ## Contrast
//! The SSD1306 has 256 contrast steps which set the segment output current. Higher is
//! brighter. Panels with 64 rows look right around 0xCF, shorter panels are usually driven
//! at 0x8F because the same current is spread over fewer COM lines.
//!
//! ## Memory addressing
//! The controller has 128 columns by 8 pages of GDDRAM, every byte being a vertical strip of
//! 8 pixels with the least significant bit on top. In vertical addressing mode the RAM
//! pointer walks down the pages of one column before moving on to the next column. The frame
//! packer in this crate produces bytes in exactly that order, so the driver always programs
//! `AddressingMode::Vertical`.
//!
//! ## COM pins
//! How the COM lines are wired to the glass depends on the panel module. 128x64 and 64x48
//! modules use the alternative (interleaved) layout, 128x32 modules the sequential one. Get
//! this wrong and every other row ends up in the wrong place.

/// Default display clock: divide ratio 1, oscillator frequency 8 (the reset value).
pub const CLOCK_DIVIDE: u8 = 0x80;

/// Pre-charge period: phase 1 of 1 DCLK, phase 2 of 15 DCLK. For the internal charge pump.
pub const PRECHARGE_PERIOD: u8 = 0xF1;

/// VCOMH deselect level. The data sheet only lists 0x00, 0x20 and 0x30, yet 0x40 is what
/// the common modules are shipped with.
pub const VCOMH_DESELECT: u8 = 0x40;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
/// COM pins hardware configuration, the second byte of `0xDA`.
pub enum ComPins {
    /// A[4]=0b, sequential COM pin configuration. 128x32 modules.
    Sequential = 0x02,

    /// A[4]=1b, alternative COM pin configuration. 128x64 and 64x48 modules.
    Alternative = 0x12,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
/// How the GDDRAM pointer advances after every data byte.
pub enum AddressingMode {
    /// column first, then page
    Horizontal = 0b00,

    /// page first, then column
    Vertical = 0b01,

    /// column only, wraps within the current page
    Page = 0b10,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
/// COM output scan direction.
pub enum ComScan {
    /// scan from COM0 to COM[N-1]
    Normal,

    /// scan from COM[N-1] to COM0, flips the image vertically
    Remapped,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
/// Whether a set bit in GDDRAM lights a pixel or darkens it.
pub enum DisplayMode {
    /// 1 in RAM: ON in display panel
    Normal,

    /// 0 in RAM: ON in display panel
    Inverse,
}

/// SSD1306 instruction set, the subset needed to run a panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Instruction {
    /// turn the panel on (true) or put it to sleep (false)
    // translates to: 0xAE | on
    Display(bool),

    /// display clock divide ratio and oscillator frequency
    // translates to: 0xD5, ratio
    ClockDivide(u8),

    /// number of active COM lines minus one, 15..=63
    // translates to: 0xA8, ratio
    MultiplexRatio(u8),

    /// vertical shift of the COM lines
    // translates to: 0xD3, offset
    DisplayOffset(u8),

    /// RAM row shown on the top line, 0..=63
    // translates to: 0x40 | line
    StartLine(u8),

    /// enable or disable the internal charge pump regulator
    // translates to: 0x8D, 0x14 or 0x10
    ChargePump(bool),

    /// mirror the columns: column address 127 is mapped to SEG0 when true
    // translates to: 0xA0 | remap
    SegmentRemap(bool),

    /// COM output scan direction
    // translates to: 0xC0 or 0xC8
    ComScanDirection(ComScan),

    /// COM pins hardware layout
    // translates to: 0xDA, config
    ComPinsConfig(ComPins),

    /// GDDRAM pointer increment order
    // translates to: 0x20, mode
    MemoryAddressingMode(AddressingMode),

    /// pre-charge period
    // translates to: 0xD9, period
    PrechargePeriod(u8),

    /// VCOMH deselect level
    // translates to: 0xDB, level
    VcomhDeselect(u8),

    /// light every pixel regardless of RAM (true), or follow RAM content (false)
    // translates to: 0xA4 | on
    EntireDisplayOn(bool),

    /// normal or inverse display
    // translates to: 0xA6 or 0xA7
    SetDisplayMode(DisplayMode),

    /// contrast control for BANK0
    // translates to: 0x81, contrast
    Contrast(u8),

    /// column pointer wrapping range, both ends inclusive
    // translates to: 0x21, start, end
    ColumnAddress { start: u8, end: u8 },

    /// page pointer wrapping range, both ends inclusive
    // translates to: 0x22, start, end
    PageAddress { start: u8, end: u8 },
}

use Instruction::*;

/// The raw bytes of a single instruction: opcode first, then its arguments.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InstructionBytes {
    buf: [u8; 3],
    len: usize,
}

impl InstructionBytes {
    fn one(opcode: u8) -> Self {
        InstructionBytes { buf: [opcode, 0, 0], len: 1 }
    }

    fn two(opcode: u8, arg: u8) -> Self {
        InstructionBytes { buf: [opcode, arg, 0], len: 2 }
    }

    fn three(opcode: u8, first: u8, second: u8) -> Self {
        InstructionBytes { buf: [opcode, first, second], len: 3 }
    }

    /// the bytes as a slice, opcode at index 0
    pub fn as_slice(&self) -> &[u8] {
        &self.buf[..self.len]
    }
}

impl core::ops::Deref for InstructionBytes {
    type Target = [u8];

    fn deref(&self) -> &[u8] {
        self.as_slice()
    }
}

impl Instruction {
    /// Returns the opcode and argument bytes of this instruction, in transmission order.
    pub fn bytes(self) -> InstructionBytes {
        match self {
            Display(on) => InstructionBytes::one(0xAE | on as u8),
            ClockDivide(ratio) => InstructionBytes::two(0xD5, ratio),
            MultiplexRatio(ratio) => InstructionBytes::two(0xA8, ratio),
            DisplayOffset(offset) => InstructionBytes::two(0xD3, offset),
            StartLine(line) => InstructionBytes::one(0x40 | (line & 0x3F)),
            ChargePump(enable) => {
                InstructionBytes::two(0x8D, if enable { 0x14 } else { 0x10 })
            }
            SegmentRemap(remap) => InstructionBytes::one(0xA0 | remap as u8),
            ComScanDirection(ComScan::Normal) => InstructionBytes::one(0xC0),
            ComScanDirection(ComScan::Remapped) => InstructionBytes::one(0xC8),
            ComPinsConfig(pins) => InstructionBytes::two(0xDA, pins as u8),
            MemoryAddressingMode(mode) => InstructionBytes::two(0x20, mode as u8),
            PrechargePeriod(period) => InstructionBytes::two(0xD9, period),
            VcomhDeselect(level) => InstructionBytes::two(0xDB, level),
            EntireDisplayOn(on) => InstructionBytes::one(0xA4 | on as u8),
            SetDisplayMode(DisplayMode::Normal) => InstructionBytes::one(0xA6),
            SetDisplayMode(DisplayMode::Inverse) => InstructionBytes::one(0xA7),
            Contrast(level) => InstructionBytes::two(0x81, level),
            ColumnAddress { start, end } => InstructionBytes::three(0x21, start, end),
            PageAddress { start, end } => InstructionBytes::three(0x22, start, end),
        }
    }
}

/// A prelude for convenience, it pulls all enums into scope.
pub mod prelude {
    pub use super::{
        AddressingMode, ComPins, ComScan, DisplayMode, Instruction, Instruction::*,
        CLOCK_DIVIDE, PRECHARGE_PERIOD, VCOMH_DESELECT,
    };
}
