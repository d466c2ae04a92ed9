//! Crate-wide error type.
//!
//! Every fallible path in the library returns [`Error`]; only the play loop
//! in [`crate::session`] is allowed to end a session on one. Binary entry
//! points wrap these in `anyhow` for display.

use derive_more::{Display, Error};

/// Errors produced by the client.
#[derive(Debug, Clone, Display, Error)]
pub enum Error {
    /// Malformed textual or numeric coordinate input. Recoverable: reject
    /// the single move or re-prompt.
    #[display("invalid coordinate {input:?} for board size {size}")]
    InvalidCoordinate {
        /// The rejected input, as supplied.
        input: String,
        /// Board size the input was parsed against.
        size: u16,
    },

    /// The targeted point already holds a stone.
    #[display("point {coord} is already occupied")]
    CoordinateOccupied {
        /// The occupied coordinate.
        coord: crate::coord::Coord,
    },

    /// A coordinate was built for a different board size than the board it
    /// was played on.
    #[display("coordinate is for a {coord_size}x{coord_size} board, this board is {board_size}x{board_size}")]
    OutOfRange {
        /// Size the coordinate was constructed for.
        coord_size: u16,
        /// Size of the board that rejected it.
        board_size: u16,
    },

    /// The authoritative move history does not replay cleanly from an empty
    /// board. Fatal to board reconstruction.
    #[display("move history does not replay: move #{index}: {message}")]
    IllegalReplay {
        /// Zero-based index of the offending move in the history.
        index: usize,
        /// What went wrong at that move.
        message: String,
    },

    /// Polling for the opponent's move exhausted its attempt cap.
    #[display("gave up waiting for the opponent after {attempts} polls")]
    OpponentTimeout {
        /// Number of polls performed before giving up.
        attempts: u32,
    },

    /// A move or pass could not be delivered to the service. Fatal to the
    /// session; the local board may no longer match the server.
    #[display("could not submit move: {message}")]
    SubmissionFailed {
        /// Service or transport failure description.
        message: String,
    },

    /// The service could not be read (game fetch, listing, pagination).
    /// Fatal to the session; never retried.
    #[display("service request failed: {message}")]
    Fetch {
        /// Service or transport failure description.
        message: String,
    },

    /// A strategy produced a move that cannot apply to the board it was
    /// shown. Programming error; always fatal.
    #[display("strategy {name:?} broke its contract: {message}")]
    StrategyContractViolation {
        /// Name of the offending strategy.
        name: String,
        /// How the returned move failed validation.
        message: String,
    },

    /// Configuration is missing or unreadable.
    #[display("config error: {message}")]
    Config {
        /// What was missing or malformed.
        message: String,
    },

    /// The access token could not be loaded or obtained.
    #[display("auth error: {message}")]
    Auth {
        /// What failed during the token exchange or cache access.
        message: String,
    },

    /// The user asked to leave the session. Not a failure; the play loop
    /// turns this into a clean quit outcome.
    #[display("session closed by user")]
    Quit,
}

impl Error {
    /// Shorthand for a [`Error::Config`] with the given message.
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Shorthand for a [`Error::Auth`] with the given message.
    pub fn auth(message: impl Into<String>) -> Self {
        Self::Auth {
            message: message.into(),
        }
    }

    /// Shorthand for a [`Error::Fetch`] with the given message.
    pub fn fetch(message: impl Into<String>) -> Self {
        Self::Fetch {
            message: message.into(),
        }
    }
}
