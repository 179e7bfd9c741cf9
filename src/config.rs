//! Panel configuration: size, rotation and an optional contrast
//!
//! ```
//! use ssd1306::config::Config;
//!
//! let config = Config::new(128, 32).orientation(180).contrast(0x40);
//! assert!(config.orientation.is_flipped());
//! ```

use crate::geometry::PanelGeometry;

/// Rotation of the panel in degrees.
///
/// The SSD1306 can only mirror both axes at once (segment remap plus COM scan direction),
/// which is a 180 degree turn. Anything from 180 up is treated as flipped.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Orientation(u16);

impl Orientation {
    pub const fn from_degrees(degrees: u16) -> Self {
        Orientation(degrees % 360)
    }

    pub fn degrees(&self) -> u16 {
        self.0
    }

    /// whether segments and COM scan are mirrored
    pub fn is_flipped(&self) -> bool {
        self.0 >= 180
    }
}

/// Everything the driver needs to know about the panel before the first command is sent.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Config {
    pub geometry: PanelGeometry,
    pub orientation: Orientation,
    /// contrast to use, `None` or 0 picks the default for the panel height during `init()`
    pub contrast: Option<u8>,
}

impl Config {
    pub fn new(width: u8, height: u8) -> Self {
        Config {
            geometry: PanelGeometry::new(width, height),
            orientation: Orientation::default(),
            contrast: None,
        }
    }

    pub fn orientation(mut self, degrees: u16) -> Self {
        self.orientation = Orientation::from_degrees(degrees);
        self
    }

    pub fn contrast(mut self, level: u8) -> Self {
        self.contrast = Some(level);
        self
    }
}
