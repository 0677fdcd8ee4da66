//! Frequency response evaluation.
//!
//! The magnitude response of an FIR filter is evaluated on a uniform
//! frequency grid by zero-padding the taps and running a forward FFT, the
//! standard `freqz`-style evaluation of the transfer function with numerator
//! equal to the taps and denominator equal to one.

use crate::error::{Error, Result};
use num_traits::Zero;
use rustfft::{FftPlanner, num_complex::Complex};

/// Magnitude response of an FIR filter.
///
/// Produced by [`evaluate_response`]. The curve is immutable once computed.
#[derive(Debug, Clone)]
pub struct ResponseCurve {
    /// (frequency in Hz, gain in dB) pairs.
    ///
    /// The frequencies increase from 0 towards the Nyquist frequency, which
    /// is itself excluded from the grid.
    pub points: Vec<(f64, f64)>,
}

/// Evaluates the magnitude response of an FIR filter.
///
/// The response is computed at `num_points` equally spaced frequencies from
/// 0 (inclusive) to the Nyquist frequency (exclusive), by taking the first
/// half of a forward FFT of length `2 * num_points` over the zero-padded
/// taps. The gain is reported as 20·log10(|H(f)|) in dB.
///
/// A frequency where the response magnitude is exactly zero yields a gain of
/// −∞ dB; no clamping is applied here, so a display layer must clip the
/// plotted range itself.
pub fn evaluate_response(taps: &[f64], num_points: usize, sample_rate: f64) -> Result<ResponseCurve> {
    if num_points == 0 || taps.len() > 2 * num_points {
        return Err(Error::ResponseTooCoarse {
            num_points,
            num_taps: taps.len(),
        });
    }
    let mut planner = FftPlanner::new();
    let fft = planner.plan_fft_forward(2 * num_points);
    let mut buffer = vec![Complex::zero(); 2 * num_points];
    for (b, t) in buffer.iter_mut().zip(taps.iter()) {
        *b = Complex::new(*t, 0.0);
    }
    fft.process(&mut buffer);
    let spacing = sample_rate / buffer.len() as f64;
    let points = buffer[..num_points]
        .iter()
        .enumerate()
        .map(|(j, z)| (j as f64 * spacing, 20.0 * z.norm().log10()))
        .collect();
    Ok(ResponseCurve { points })
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn unit_impulse_is_flat() {
        let curve = evaluate_response(&[1.0], 64, 8000.0).unwrap();
        assert_eq!(curve.points.len(), 64);
        for &(_, gain) in &curve.points {
            assert!(gain.abs() < 1e-12);
        }
    }

    #[test]
    fn grid_spans_zero_to_nyquist() {
        let curve = evaluate_response(&[0.5, 0.5], 100, 8000.0).unwrap();
        assert_eq!(curve.points[0].0, 0.0);
        assert_eq!(curve.points[1].0, 40.0);
        assert!(curve.points.last().unwrap().0 < 4000.0);
        for pair in curve.points.windows(2) {
            assert!(pair[1].0 > pair[0].0);
        }
    }

    #[test]
    fn two_tap_average_response() {
        // H(f) = cos(pi*f/fs) up to linear phase for the [0.5, 0.5] filter
        let curve = evaluate_response(&[0.5, 0.5], 100, 8000.0).unwrap();
        assert!(curve.points[0].1.abs() < 1e-12);
        // at fs/4 the magnitude is 1/sqrt(2), i.e. about -3.01 dB
        let (freq, gain) = curve.points[50];
        assert_eq!(freq, 2000.0);
        assert!((gain - 20.0 * (0.5f64.sqrt()).log10()).abs() < 1e-9);
    }

    #[test]
    fn zero_magnitude_is_minus_infinity() {
        let curve = evaluate_response(&[0.0], 16, 8000.0).unwrap();
        for &(_, gain) in &curve.points {
            assert!(gain.is_infinite() && gain < 0.0);
        }
    }

    #[test]
    fn grid_too_short_for_taps() {
        let taps = vec![0.0; 100];
        assert!(matches!(
            evaluate_response(&taps, 16, 8000.0),
            Err(Error::ResponseTooCoarse { .. })
        ));
    }
}
