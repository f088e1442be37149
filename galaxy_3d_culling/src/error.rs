//! Error types for the Galaxy3D culling pipeline
//!
//! Errors only surface at setup boundaries: settings validation, renderer-array
//! construction and occlusion-oracle negotiation. The per-frame culling passes
//! never fail; they degrade to empty results or disabled cascades instead.

use std::fmt;

/// Result type for Galaxy3D culling operations
pub type Result<T> = std::result::Result<T, Error>;

/// Galaxy3D culling errors
#[derive(Debug, Clone, PartialEq)]
pub enum Error {
    /// A parameter or descriptor field is out of its valid range
    InvalidParameter(String),

    /// Caller broke a structural precondition (e.g. mismatched parallel arrays)
    PreconditionViolated(String),

    /// The occlusion oracle speaks an interface version this crate cannot drive
    IncompatibleOracle(String),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::InvalidParameter(msg) => write!(f, "Invalid parameter: {}", msg),
            Error::PreconditionViolated(msg) => write!(f, "Precondition violated: {}", msg),
            Error::IncompatibleOracle(msg) => write!(f, "Incompatible occlusion oracle: {}", msg),
        }
    }
}

impl std::error::Error for Error {}

// ===== ERROR MACROS =====

/// Log an ERROR (with file:line) and build an `Error::InvalidParameter`
///
/// # Example
///
/// ```no_run
/// # use galaxy_3d_culling::engine_err;
/// let err = engine_err!("galaxy3d::Settings", "shadow distance {} must be positive", -1.0);
/// ```
#[macro_export]
macro_rules! engine_err {
    ($source:expr, $($arg:tt)*) => {{
        let message = format!($($arg)*);
        $crate::engine_error!($source, "{}", message);
        $crate::galaxy3d::Error::InvalidParameter(message)
    }};
}

/// Log an ERROR and return early with `Err(Error::InvalidParameter)`
///
/// # Example
///
/// ```no_run
/// # use galaxy_3d_culling::engine_bail;
/// fn check(count: usize) -> galaxy_3d_culling::galaxy3d::Result<()> {
///     if count == 0 {
///         engine_bail!("galaxy3d::Settings", "count must be non-zero");
///     }
///     Ok(())
/// }
/// ```
#[macro_export]
macro_rules! engine_bail {
    ($source:expr, $($arg:tt)*) => {
        return Err($crate::engine_err!($source, $($arg)*))
    };
}

#[cfg(test)]
#[path = "error_tests.rs"]
mod tests;
