//! Filter specification in the Hz domain.
//!
//! This module is the bridge between the values typed into the form and the
//! normalized band description used by the exchange. A [`FilterSpec`] can
//! only be constructed with valid parameters, so the rest of the crate does
//! not need to re-check them.

use crate::{
    bands::DesignBand,
    error::{Error, Result},
    input::Field,
    remez_exchange,
    types::{ExchangeSettings, FirDesign},
};
use std::f64::consts::PI;

/// Lowpass FIR filter specification.
///
/// The frequencies are in Hz. The invariant maintained by the constructor is
/// that the band edges [0, cutoff, cutoff + transition width, Nyquist] are
/// non-decreasing, with all parameters positive and finite. A cutoff plus
/// transition width exactly equal to the Nyquist frequency is the accepted
/// boundary (a degenerate stopband).
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct FilterSpec {
    sample_rate: f64,
    cutoff: f64,
    transition_width: f64,
    num_taps: usize,
}

impl FilterSpec {
    /// Creates a new filter specification.
    ///
    /// `sample_rate` is the sampling rate in samples per second, `cutoff` the
    /// end of the passband in Hz, `transition_width` the span in Hz between
    /// the end of the passband and the start of the stopband, and `num_taps`
    /// the length of the FIR filter.
    pub fn new(
        sample_rate: f64,
        cutoff: f64,
        transition_width: f64,
        num_taps: usize,
    ) -> Result<FilterSpec> {
        for (field, value) in [
            (Field::SampleRate, sample_rate),
            (Field::Cutoff, cutoff),
            (Field::TransitionWidth, transition_width),
        ] {
            if !value.is_finite() || value <= 0.0 {
                return Err(Error::OutOfRange { field });
            }
        }
        if num_taps == 0 {
            return Err(Error::NoTaps);
        }
        let nyquist = 0.5 * sample_rate;
        if cutoff + transition_width > nyquist {
            return Err(Error::InvalidBandEdges {
                cutoff,
                transition_width,
                nyquist,
            });
        }
        Ok(FilterSpec {
            sample_rate,
            cutoff,
            transition_width,
            num_taps,
        })
    }

    /// Returns the sampling rate in samples per second.
    pub fn sample_rate(&self) -> f64 {
        self.sample_rate
    }

    /// Returns the cutoff frequency in Hz.
    pub fn cutoff(&self) -> f64 {
        self.cutoff
    }

    /// Returns the transition width in Hz.
    pub fn transition_width(&self) -> f64 {
        self.transition_width
    }

    /// Returns the number of filter taps.
    pub fn num_taps(&self) -> usize {
        self.num_taps
    }

    /// Returns the Nyquist frequency (half the sampling rate) in Hz.
    pub fn nyquist(&self) -> f64 {
        0.5 * self.sample_rate
    }

    // Passband and stopband normalized to a sample rate of 1. The division
    // cannot push the stopband edge past 0.5 because the constructor checked
    // cutoff + transition_width <= nyquist and division is monotone.
    fn design_bands(&self) -> Result<Vec<DesignBand>> {
        let passband_end = self.cutoff / self.sample_rate;
        let stopband_start = (self.cutoff + self.transition_width) / self.sample_rate;
        Ok(vec![
            DesignBand::new(0.0, passband_end, 1.0)?,
            DesignBand::new(stopband_start, 0.5, 0.0)?,
        ])
    }

    /// Estimates the minimum tap count that meets the given ripples.
    ///
    /// This uses the estimate from \[5\] (see the [crate
    /// documentation](crate#references)). `passband_ripple` and
    /// `stopband_ripple` are the tolerated deviations from the desired gain
    /// in the passband and the stopband respectively, in linear scale. The
    /// tap count of the specification itself is not used.
    pub fn suggested_num_taps(&self, passband_ripple: f64, stopband_ripple: f64) -> usize {
        let fp = self.cutoff / self.sample_rate;
        let delta_f = self.transition_width / self.sample_rate;
        let delta_p = passband_ripple;
        let delta_s = stopband_ripple;
        let nc = (1.101 * (-(2.0 * delta_p).log10()).powf(1.1) / delta_f + 1.0).ceil();
        let v = 2.325 * (-(delta_p.log10())).powf(-0.445) * delta_f.powf(-1.39);
        let g = |x: f64| 2.0 / PI * (v * (x.recip() - (0.5 - delta_f).recip())).atan();
        let n3 = (nc * (g(fp) + g(0.5 - delta_f - fp) + 1.0) / 3.0).ceil();
        let nm = 0.52 * (delta_p / delta_s).log10() / delta_f * (-(delta_p.log10())).powf(0.17);
        let h =
            |x: f64, c: f64| 2.0 / PI * (c / delta_f * (x.recip() - (0.5 - delta_f).recip())).atan();
        let dn = (nm * (h(fp, 1.1) - (h(0.5 - delta_f - fp, 0.29) - 1.0) / 2.0)).ceil();
        (n3 + dn) as usize
    }
}

/// Designs a lowpass FIR filter with the default exchange settings.
///
/// The filter approximates a gain of 1.0 on [0, cutoff] and a gain of 0.0 on
/// [cutoff + transition width, Nyquist], with unit weights, in the minimax
/// sense. The result has exactly `spec.num_taps()` taps and is symmetric
/// (linear phase).
///
/// The algorithm is deterministic: calling this function twice with the same
/// specification produces bit-identical taps.
pub fn design_lowpass(spec: &FilterSpec) -> Result<FirDesign> {
    design_lowpass_with_settings(spec, &ExchangeSettings::default())
}

/// Designs a lowpass FIR filter with custom exchange settings.
///
/// See [`design_lowpass`].
pub fn design_lowpass_with_settings(
    spec: &FilterSpec,
    settings: &ExchangeSettings,
) -> Result<FirDesign> {
    if spec.num_taps() == 1 {
        // Degenerate single-tap filter: the closest constant approximation
        // is the passband gain, and the stopband error is all of it.
        return Ok(FirDesign {
            taps: vec![1.0],
            weighted_error: 1.0,
            num_iterations: 0,
            flatness: 0.0,
        });
    }
    remez_exchange(spec.num_taps(), &spec.design_bands()?, settings)
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn band_edge_validation() {
        assert!(FilterSpec::new(8000.0, 1000.0, 200.0, 31).is_ok());
        // cutoff + transition width exactly at Nyquist is the boundary
        assert!(FilterSpec::new(8000.0, 1000.0, 3000.0, 31).is_ok());
        assert!(matches!(
            FilterSpec::new(8000.0, 1000.0, 3000.001, 31),
            Err(Error::InvalidBandEdges { .. })
        ));
        assert!(matches!(
            FilterSpec::new(8000.0, 0.0, 200.0, 31),
            Err(Error::OutOfRange {
                field: Field::Cutoff
            })
        ));
        assert!(matches!(
            FilterSpec::new(8000.0, 1000.0, 200.0, 0),
            Err(Error::NoTaps)
        ));
    }

    #[test]
    fn suggested_num_taps() {
        // reference values from [5]
        let taps = |cutoff: f64, width: f64| {
            FilterSpec::new(1000.0, cutoff, width, 1)
                .unwrap()
                .suggested_num_taps(0.01, 0.001)
        };
        assert_eq!(taps(100.0, 50.0), 54);
        assert_eq!(taps(50.0, 50.0), 55);
        assert_eq!(taps(25.0, 50.0), 57);
        assert_eq!(taps(100.0, 100.0), 28);
    }
}
