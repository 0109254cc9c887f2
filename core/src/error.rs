// Copyright (c) 2024 The Webcash Developers

//! The library-wide error type.

use core::fmt;

/// Result alias used across the webcash crates.
pub type Result<T> = core::result::Result<T, Error>;

/// Errors reported by the webcash library.
///
/// The variant ordering is part of the public interface and is kept
/// stable across releases.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum Error {
    /// A precondition was violated: unparseable input, an empty or
    /// NUL-bearing serial, or a façade used outside its lifecycle.
    InvalidArgument,
    /// A caller-provided buffer was too small; `required` is the
    /// capacity that would have sufficed.
    InsufficientCapacity {
        /// Number of entries the caller must provide room for.
        required: usize,
    },
    /// An allocation failed in a host callback.
    OutOfMemory,
    /// A numeric value left the representable range.
    Overflow,
    /// The wallet database handle has already been released.
    DbClosed,
    /// The wallet database could not be opened.
    DbOpenFailed,
    /// The wallet database holds a record the library cannot interpret.
    DbCorrupt,
    /// The append-only recovery log could not be opened.
    LogOpenFailed,
    /// The server façade is not in the connected state.
    NotConnected,
    /// The server connection could not be established.
    ConnectFailed,
    /// The user interface has not been started.
    Headless,
    /// The user interface could not be started.
    StartupFailed,
    /// Reserved; never raised by well-formed code.
    Unknown,
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidArgument => write!(f, "Invalid argument"),
            Self::InsufficientCapacity { required } => {
                write!(f, "Insufficient capacity: {} entries required", required)
            }
            Self::OutOfMemory => write!(f, "Out of memory"),
            Self::Overflow => write!(f, "Numeric overflow"),
            Self::DbClosed => write!(f, "Database is closed"),
            Self::DbOpenFailed => write!(f, "Could not open database"),
            Self::DbCorrupt => write!(f, "Database record is corrupt"),
            Self::LogOpenFailed => write!(f, "Could not open recovery log"),
            Self::NotConnected => write!(f, "Not connected to a server"),
            Self::ConnectFailed => write!(f, "Could not connect to server"),
            Self::Headless => write!(f, "User interface is not running"),
            Self::StartupFailed => write!(f, "User interface failed to start"),
            Self::Unknown => write!(f, "Unknown error"),
        }
    }
}

impl core::error::Error for Error {}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::string::ToString;

    #[test]
    fn display_messages_are_stable() {
        assert_eq!(Error::InvalidArgument.to_string(), "Invalid argument");
        assert_eq!(
            Error::InsufficientCapacity { required: 3 }.to_string(),
            "Insufficient capacity: 3 entries required"
        );
        assert_eq!(Error::Overflow.to_string(), "Numeric overflow");
    }

    #[test]
    fn variants_are_distinct() {
        assert_ne!(Error::DbOpenFailed, Error::LogOpenFailed);
        assert_ne!(Error::NotConnected, Error::ConnectFailed);
        assert_ne!(Error::Headless, Error::StartupFailed);
    }
}
