//! # Error Types
//!
//! This module defines all error types for the chord generator.
//!
//! Every error is a precondition violation: the generator's catalogs are
//! closed, so once a request passes these checks, selection, spelling,
//! positioning, and inversion are total functions that cannot fail partway.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ChordGenError {
    /// The caller's options rule out every possible chord.
    ///
    /// # Example
    /// ```
    /// # use chordgen::ChordGenError;
    /// let err = ChordGenError::InvalidOptions {
    ///     message: "no chord types enabled".to_string(),
    /// };
    /// assert_eq!(err.to_string(), "Invalid options: no chord types enabled");
    /// ```
    #[error("Invalid options: {message}")]
    InvalidOptions { message: String },

    /// A selection pool was empty at draw time.
    ///
    /// Selection-time filtering is supposed to make this unreachable for
    /// catalog data; hitting it means a catalog entry is misconfigured.
    #[error("Empty selection pool: {pool}")]
    EmptySelection { pool: String },

    /// A tone's spelled pitch sits more than two semitones from its letter's
    /// natural pitch, which no legal accidental can express.
    #[error("Unspellable tone: {letter} displaced {distance} semitones from its natural pitch")]
    UnspellableTone { letter: String, distance: i8 },
}
