use crate::error::{Error, Result};

/// Band.
///
/// A band defines a closed subinterval of [0.0, 0.5] (in cycles/sample) in
/// which the exchange attempts to make the weighted error function as small
/// as possible.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Band {
    begin: f64,
    end: f64,
}

impl Band {
    /// Creates a new band.
    ///
    /// The band is the closed interval `[begin, end]`.
    pub fn new(begin: f64, end: f64) -> Result<Band> {
        if !begin.is_finite() || !end.is_finite() {
            return Err(Error::BandLimitsOutOfBounds);
        }
        if begin > end {
            return Err(Error::BandLimitsWrongOrder);
        }
        if begin < 0.0 || end > 0.5 {
            return Err(Error::BandLimitsOutOfBounds);
        }
        Ok(Band { begin, end })
    }

    /// Returns the beginning of the band.
    pub fn begin(&self) -> f64 {
        self.begin
    }

    /// Returns the end of the band.
    pub fn end(&self) -> f64 {
        self.end
    }

    /// Returns the length of the band.
    ///
    /// The length is defined as `end - begin`.
    pub fn len(&self) -> f64 {
        self.end - self.begin
    }

    /// Returns true if the band contains a certain frequency.
    pub fn contains(&self, freq: f64) -> bool {
        (self.begin..=self.end).contains(&freq)
    }

    /// Returns true if the two bands overlap.
    pub fn overlaps(&self, other: &Band) -> bool {
        self.end > other.begin && other.end > self.begin
    }

    /// Returns the distance between a frequency and the band.
    ///
    /// The distance is defined as zero if the band contains the frequency,
    /// and as the distance between the frequency and the closest endpoint of
    /// the band otherwise.
    pub fn distance(&self, freq: f64) -> f64 {
        if self.contains(freq) {
            0.0
        } else {
            (freq - self.begin).abs().min((freq - self.end).abs())
        }
    }

    pub(super) fn convert_to_radians(&mut self) {
        let two_pi = std::f64::consts::TAU;
        // The min() is to avoid rounding from sending the point beyond pi.
        self.begin = (self.begin * two_pi).min(std::f64::consts::PI);
        self.end = (self.end * two_pi).min(std::f64::consts::PI);
    }
}

/// Band with a constant desired gain and weight.
///
/// This is the piecewise-constant band specification used by
/// [`remez_exchange`](crate::remez_exchange): on each band the filter
/// approximates a constant gain, and the approximation error is scaled by a
/// constant weight.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct DesignBand {
    band: Band,
    gain: f64,
    weight: f64,
}

impl DesignBand {
    /// Creates a new `DesignBand` with unit weight.
    ///
    /// The `band_begin` and `band_end` parameters indicate the begin and the
    /// end of the band respectively, in cycles/sample. The `gain` parameter
    /// gives the desired gain in this band. A custom weight can be set with
    /// the constructor [`DesignBand::with_weight`] instead.
    pub fn new(band_begin: f64, band_end: f64, gain: f64) -> Result<DesignBand> {
        DesignBand::with_weight(band_begin, band_end, gain, 1.0)
    }

    /// Creates a new `DesignBand` with a custom weight.
    ///
    /// The `weight` parameter scales the error in this band relative to the
    /// other bands. The remaining parameters behave as in
    /// [`DesignBand::new`].
    pub fn with_weight(band_begin: f64, band_end: f64, gain: f64, weight: f64) -> Result<DesignBand> {
        let band = Band::new(band_begin, band_end)?;
        Ok(DesignBand { band, gain, weight })
    }

    /// Returns the [`Band`] associated to this `DesignBand`.
    pub fn band(&self) -> Band {
        self.band
    }

    /// Returns the desired gain in this band.
    pub fn gain(&self) -> f64 {
        self.gain
    }

    /// Returns the error weight of this band.
    pub fn weight(&self) -> f64 {
        self.weight
    }

    pub(super) fn set_band(&mut self, band: Band) {
        self.band = band;
    }

    pub(super) fn convert_to_radians(&mut self) {
        self.band.convert_to_radians();
    }
}

// Check that the bands are correctly defined
pub(super) fn check_bands(bands: &[DesignBand]) -> Result<()> {
    if bands.is_empty() {
        return Err(Error::BandsEmpty);
    }
    for (j, band1) in bands.iter().enumerate() {
        for band2 in bands.iter().skip(j + 1) {
            if band1.band().overlaps(&band2.band()) {
                return Err(Error::BandsOverlap);
            }
        }
    }

    Ok(())
}

// Sort bands in increasing order
pub(super) fn sort_bands(bands: &[DesignBand]) -> Vec<DesignBand> {
    let mut bands = bands.to_vec();
    bands.sort_unstable_by(|a, b| a.band().begin().partial_cmp(&b.band().begin()).unwrap());
    bands
}

// The desired response and weight are evaluated through the band closest to
// the frequency, so that evaluation slightly outside every band (which can
// happen near band edges due to rounding) still returns a sensible value.
fn closest_band(bands: &[DesignBand], freq: f64) -> &DesignBand {
    bands
        .iter()
        .min_by(|a, b| {
            a.band()
                .distance(freq)
                .partial_cmp(&b.band().distance(freq))
                .unwrap()
        })
        .unwrap()
}

pub(super) fn desired_gain(bands: &[DesignBand], freq: f64) -> f64 {
    closest_band(bands, freq).gain()
}

pub(super) fn weight(bands: &[DesignBand], freq: f64) -> f64 {
    closest_band(bands, freq).weight()
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn band_checks() {
        assert!(Band::new(0.0, 0.25).is_ok());
        assert!(matches!(
            Band::new(0.3, 0.2),
            Err(Error::BandLimitsWrongOrder)
        ));
        assert!(matches!(
            Band::new(0.0, 0.6),
            Err(Error::BandLimitsOutOfBounds)
        ));
        assert!(matches!(
            Band::new(f64::NAN, 0.5),
            Err(Error::BandLimitsOutOfBounds)
        ));
    }

    #[test]
    fn nearest_band_lookup() {
        let bands = [
            DesignBand::new(0.0, 0.2, 1.0).unwrap(),
            DesignBand::new(0.3, 0.5, 0.0).unwrap(),
        ];
        assert_eq!(desired_gain(&bands, 0.1), 1.0);
        assert_eq!(desired_gain(&bands, 0.4), 0.0);
        // slightly outside the passband still resolves to the passband
        assert_eq!(desired_gain(&bands, 0.21), 1.0);
        assert_eq!(weight(&bands, 0.21), 1.0);
    }
}
