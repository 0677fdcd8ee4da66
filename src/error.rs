//! Error types used by `remez_fir_calc`.

use crate::input::Field;
use thiserror::Error;

/// `remez_fir_calc` `Result` type.
pub type Result<T> = core::result::Result<T, Error>;

/// `remez_fir_calc` error.
///
/// This enum represents all the errors that can be produced by the crate,
/// from form-field parsing up to the Remez exchange and the response
/// evaluation.
#[derive(Error, Debug)]
pub enum Error {
    /// A form field does not parse as a number.
    ///
    /// The keystroke filter admits fragments, not whole values, so a field
    /// can still hold text such as `"1..2"` or be empty at submit time.
    #[error("{field} is not a valid number: {value:?}")]
    InvalidNumber {
        /// The field that failed to parse.
        field: Field,
        /// The text the field held.
        value: String,
    },
    /// A parameter is zero, negative, or too large to represent.
    #[error("{field} must be a positive finite number")]
    OutOfRange {
        /// The offending field.
        field: Field,
    },
    /// The band edges [0, cutoff, cutoff + transition width, Nyquist] are not
    /// non-decreasing.
    #[error(
        "invalid band edges: cutoff {cutoff} Hz plus transition width \
         {transition_width} Hz exceeds the Nyquist frequency {nyquist} Hz"
    )]
    InvalidBandEdges {
        /// Cutoff frequency in Hz.
        cutoff: f64,
        /// Transition width in Hz.
        transition_width: f64,
        /// Nyquist frequency (half the sample rate) in Hz.
        nyquist: f64,
    },
    /// The filter has no taps.
    #[error("a filter needs at least one tap")]
    NoTaps,
    /// The tap count leaves fewer than two cosine basis functions, so the
    /// exchange has nothing to optimize over.
    #[error("{num_taps} taps are too few for an equiripple design")]
    TooFewTaps {
        /// The requested tap count.
        num_taps: usize,
    },
    /// The list of bands is empty.
    #[error("the list of bands is empty")]
    BandsEmpty,
    /// The begin of the band is greater than the end of the band.
    #[error("band begin is greater than band end")]
    BandLimitsWrongOrder,
    /// The band limits are out of bounds.
    #[error("band limits out of bounds")]
    BandLimitsOutOfBounds,
    /// The bands overlap.
    #[error("bands overlap")]
    BandsOverlap,
    /// An even length filter cannot have nonzero gain at the Nyquist
    /// frequency.
    #[error("an even length filter must have zero gain at the Nyquist frequency")]
    EvenLengthNyquistGain,
    /// The derivative of the Chebyshev proxy polynomial is zero.
    ///
    /// This error can happen due to numerical errors, and it prevents the
    /// Remez exchange algorithm from continuing.
    #[error("derivative of Chebyshev proxy is zero")]
    ProxyDerivativeZero,
    /// An error happened during the computation of eigenvalues.
    ///
    /// Eigenvalues are computed to find the roots of the derivative of the
    /// Chebyshev proxy. This error can happen due to numerical errors, and it
    /// prevents the Remez exchange algorithm from continuing.
    #[error("unable to compute eigenvalues: {0}")]
    EigenvaluesError(String),
    /// Not enough alternating extrema were found for Remez exchange.
    ///
    /// This error is typically caused by numerical errors.
    #[error("not enough alternating error extrema found")]
    NotEnoughExtrema,
    /// The exchange exhausted its allowed iterations without the error
    /// ripple flattening out.
    ///
    /// This typically means the band edges are too close together for the
    /// requested tap count.
    #[error(
        "no convergence after {iterations} Remez exchange iterations (flatness {flatness:.3e})"
    )]
    DidNotConverge {
        /// Number of exchange iterations performed.
        iterations: usize,
        /// Flatness reached at the last iteration.
        flatness: f64,
    },
    /// The response evaluation grid is too short for the filter.
    #[error("{num_points} response points cannot resolve {num_taps} taps")]
    ResponseTooCoarse {
        /// Number of requested frequency points.
        num_points: usize,
        /// Length of the filter being evaluated.
        num_taps: usize,
    },
}
