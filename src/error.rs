//! Error types of the SSD1306 driver
//!
//! The only runtime failure is the bus, and its error is handed back untouched in
//! `Error::Bus`. The rest are caller mistakes caught before anything is sent to the display.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
/// Why a panel geometry can't be driven by the SSD1306.
pub enum GeometryError {
    /// width or height is zero
    Empty,

    /// height is not a whole number of 8 pixel pages
    PartialPage { height: u8 },

    /// panel is larger than the 128x64 GDDRAM
    TooLarge { width: u8, height: u8 },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
/// Error returned by the driver, generic over the error of the bus backend.
pub enum Error<E> {
    /// the backend failed to send a command or data transaction
    Bus(E),

    /// the configured panel geometry is not supported
    Geometry(GeometryError),

    /// pixel buffer length doesn't match `width * height`
    BufferSize { expected: usize, actual: usize },

    /// the operation needs `init()` to have been called first
    NotInitialized,
}

impl<E> Error<E> {
    // wrap the result of a backend call
    pub(crate) fn bus<T>(result: Result<T, E>) -> Result<T, Error<E>> {
        result.map_err(Error::Bus)
    }
}

impl<E> From<GeometryError> for Error<E> {
    fn from(err: GeometryError) -> Self {
        Error::Geometry(err)
    }
}
