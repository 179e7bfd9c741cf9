//! Panel geometry and where the panel sits inside the controller's GDDRAM
//!
//! The SSD1306 addresses 128 columns by 8 pages (64 rows). Most modules are wired so the
//! panel starts at column 0, page 0 and the only thing that changes is the size. The 64x48
//! modules are the odd one out: their glass is hooked up to the middle of the column range,
//! so the active area starts at column 32.
//!
//! That decision is made once, by `Panel::resolve()`, instead of being re-checked every time
//! the addressing window is programmed.

use crate::{
    error::GeometryError,
    instructions::ComPins,
    CONTROLLER_COLUMNS, CONTROLLER_ROWS, PAGE_HEIGHT,
};

/// Contrast used for 64 row panels when none is configured.
pub const DEFAULT_CONTRAST_TALL: u8 = 0xCF;

/// Contrast used for every other panel height when none is configured.
pub const DEFAULT_CONTRAST: u8 = 0x8F;

/// Visible size of the panel in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct PanelGeometry {
    pub width: u8,
    pub height: u8,
}

impl PanelGeometry {
    pub const fn new(width: u8, height: u8) -> Self {
        PanelGeometry { width, height }
    }

    /// number of 8 row pages
    pub fn page_count(&self) -> u8 {
        self.height / PAGE_HEIGHT
    }

    /// number of pixels, and so the length of a row-major pixel buffer
    pub fn pixel_count(&self) -> usize {
        self.width as usize * self.height as usize
    }

    /// number of bytes in a packed frame
    pub fn frame_len(&self) -> usize {
        self.pixel_count() / PAGE_HEIGHT as usize
    }
}

/// A panel geometry resolved against the controller's address space.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Panel {
    /// panel occupies `width` columns and `height / 8` pages starting at the origin
    TopLeft(PanelGeometry),

    /// 64x48 panel mapped to columns 32..=95 and pages 0..=5
    Centered64x48,
}

impl Panel {
    /// Checks the geometry and picks the addressing variant for it.
    pub fn resolve(geometry: PanelGeometry) -> Result<Panel, GeometryError> {
        let PanelGeometry { width, height } = geometry;

        if width == 0 || height == 0 {
            return Err(GeometryError::Empty);
        }
        if height % PAGE_HEIGHT != 0 {
            return Err(GeometryError::PartialPage { height });
        }
        if width > CONTROLLER_COLUMNS || height > CONTROLLER_ROWS {
            return Err(GeometryError::TooLarge { width, height });
        }

        if width == 64 && height == 48 {
            Ok(Panel::Centered64x48)
        } else {
            Ok(Panel::TopLeft(geometry))
        }
    }

    pub fn geometry(&self) -> PanelGeometry {
        match self {
            Panel::TopLeft(geometry) => *geometry,
            Panel::Centered64x48 => PanelGeometry::new(64, 48),
        }
    }

    /// First and last GDDRAM column, inclusive.
    pub fn column_range(&self) -> (u8, u8) {
        match self {
            Panel::TopLeft(geometry) => (0, geometry.width - 1),
            Panel::Centered64x48 => (32, 95),
        }
    }

    /// First and last GDDRAM page, inclusive.
    pub fn page_range(&self) -> (u8, u8) {
        match self {
            Panel::TopLeft(geometry) => (0, geometry.page_count() - 1),
            Panel::Centered64x48 => (0, 5),
        }
    }

    pub fn com_pins(&self) -> ComPins {
        match self.geometry().height {
            64 | 48 => ComPins::Alternative,
            _ => ComPins::Sequential,
        }
    }

    /// Contrast to apply when the user didn't configure one.
    pub fn default_contrast(&self) -> u8 {
        if self.geometry().height == 64 {
            DEFAULT_CONTRAST_TALL
        } else {
            DEFAULT_CONTRAST
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_64x48_is_centered() {
        assert_eq!(
            Panel::resolve(PanelGeometry::new(64, 48)),
            Ok(Panel::Centered64x48)
        );
        for &(w, h) in &[(128, 64), (128, 32), (96, 16), (64, 64), (128, 48)] {
            let geometry = PanelGeometry::new(w, h);
            assert_eq!(Panel::resolve(geometry), Ok(Panel::TopLeft(geometry)));
        }
    }

    #[test]
    fn rejects_what_the_controller_cannot_address() {
        assert_eq!(
            Panel::resolve(PanelGeometry::new(0, 32)),
            Err(GeometryError::Empty)
        );
        assert_eq!(
            Panel::resolve(PanelGeometry::new(128, 0)),
            Err(GeometryError::Empty)
        );
        assert_eq!(
            Panel::resolve(PanelGeometry::new(128, 30)),
            Err(GeometryError::PartialPage { height: 30 })
        );
        assert_eq!(
            Panel::resolve(PanelGeometry::new(132, 64)),
            Err(GeometryError::TooLarge { width: 132, height: 64 })
        );
        assert_eq!(
            Panel::resolve(PanelGeometry::new(128, 72)),
            Err(GeometryError::TooLarge { width: 128, height: 72 })
        );
    }

    #[test]
    fn windows() {
        let full = Panel::resolve(PanelGeometry::new(128, 64)).unwrap();
        assert_eq!(full.column_range(), (0, 127));
        assert_eq!(full.page_range(), (0, 7));

        let short = Panel::resolve(PanelGeometry::new(128, 32)).unwrap();
        assert_eq!(short.column_range(), (0, 127));
        assert_eq!(short.page_range(), (0, 3));

        let small = Panel::resolve(PanelGeometry::new(64, 48)).unwrap();
        assert_eq!(small.column_range(), (32, 95));
        assert_eq!(small.page_range(), (0, 5));
        assert_eq!(small.geometry(), PanelGeometry::new(64, 48));
    }

    #[test]
    fn com_pins_follow_height() {
        let pins = |w, h| Panel::resolve(PanelGeometry::new(w, h)).unwrap().com_pins();
        assert_eq!(pins(128, 64), ComPins::Alternative);
        assert_eq!(pins(64, 48), ComPins::Alternative);
        assert_eq!(pins(128, 48), ComPins::Alternative);
        assert_eq!(pins(128, 32), ComPins::Sequential);
        assert_eq!(pins(96, 16), ComPins::Sequential);
    }

    #[test]
    fn default_contrast_depends_on_height() {
        let contrast = |w, h| {
            Panel::resolve(PanelGeometry::new(w, h))
                .unwrap()
                .default_contrast()
        };
        assert_eq!(contrast(128, 64), 0xCF);
        assert_eq!(contrast(128, 32), 0x8F);
        assert_eq!(contrast(64, 48), 0x8F);
    }

    #[test]
    fn sizes() {
        let geometry = PanelGeometry::new(128, 32);
        assert_eq!(geometry.page_count(), 4);
        assert_eq!(geometry.pixel_count(), 4096);
        assert_eq!(geometry.frame_len(), 512);
    }
}
