use crate::{
    bands,
    bands::{Band, DesignBand},
    error::{Error, Result},
};

// Check that the desired response is realizable by the requested filter
// length.
//
// This function must be called before adjust_bands, because it checks the
// band configuration exactly at the Nyquist frequency. An even length
// symmetric filter always has a response zero at Nyquist (see Fig. 2 in [2]),
// so a band touching Nyquist with nonzero gain cannot be realized. Odd length
// filters have no singular points.
pub(super) fn check_response(bands: &[DesignBand], odd_length: bool) -> Result<()> {
    if odd_length {
        return Ok(());
    }
    let last = bands.last().unwrap();
    if last.band().end() == 0.5 && last.gain() != 0.0 {
        return Err(Error::EvenLengthNyquistGain);
    }
    Ok(())
}

// Adjust band edges to avoid the singularity that the adjusted response of an
// even length filter has at the Nyquist frequency.
//
// When this function is called, the band edges are still in cycles/sample.
pub(super) fn adjust_bands(bands: &mut Vec<DesignBand>, odd_length: bool) {
    if odd_length {
        // nothing to do, since there are no singularities
        return;
    }
    let eps = 1e-4;
    let last = bands.last().unwrap().band();
    if last.end() == 0.5 {
        let replacement = 0.5 - eps;
        if last.begin() > replacement {
            // remove band to avoid an empty band
            bands.pop();
        } else {
            // shrink band
            bands
                .last_mut()
                .unwrap()
                .set_band(Band::new(last.begin(), replacement).unwrap());
        }
    }
}

// Desired response at f (in rad/sample), adjusted depending on the filter
// length. See Fig. 2 in [2]. The bands are in cycles/sample.
pub(super) fn desired(bands: &[DesignBand], f: f64, odd_length: bool) -> f64 {
    let d = bands::desired_gain(bands, f / std::f64::consts::TAU);
    if odd_length { d } else { d / (0.5 * f).cos() }
}

// Weight at f (in rad/sample), adjusted depending on the filter length. See
// Fig. 2 in [2]. The bands are in cycles/sample.
pub(super) fn weight(bands: &[DesignBand], f: f64, odd_length: bool) -> f64 {
    let w = bands::weight(bands, f / std::f64::consts::TAU);
    if odd_length { w } else { w * (0.5 * f).cos() }
}

// Obtain the impulse response from the coefficients a_k of the expression
//
// H(f) = sum_k a_k cos(k*f)
//
// See equations (3) - (12) in [2]. Only the even symmetry cases survive here:
// an odd length filter is type I and an even length filter is type II.
pub(super) fn taps_from_ak(ak: &[f64], num_taps: usize, odd_length: bool) -> Vec<f64> {
    let mut h = Vec::with_capacity(num_taps);
    if odd_length {
        h.extend(ak[1..].iter().rev().map(|&a| a * 0.5));
        h.push(ak[0]);
        h.extend(ak[1..].iter().map(|&a| a * 0.5));
    } else {
        h.push(*ak.last().unwrap() * 0.25);
        h.extend(
            ak.iter()
                .skip(1)
                .zip(ak.iter().skip(2))
                .rev()
                .map(|(&b1, &b2)| 0.25 * (b1 + b2)),
        );
        h.push(ak[0] * 0.5 + ak[1] * 0.25);
        h.push(ak[0] * 0.5 + ak[1] * 0.25);
        h.extend(
            ak.iter()
                .skip(1)
                .zip(ak.iter().skip(2))
                .rev()
                .map(|(&b1, &b2)| 0.25 * (b1 + b2))
                .rev(),
        );
        h.push(*ak.last().unwrap() * 0.25);
    }
    debug_assert!(h.len() == num_taps);
    h
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn nyquist_gain_check() {
        let lowpass = [
            DesignBand::new(0.0, 0.2, 1.0).unwrap(),
            DesignBand::new(0.3, 0.5, 0.0).unwrap(),
        ];
        assert!(check_response(&lowpass, true).is_ok());
        assert!(check_response(&lowpass, false).is_ok());
        let highpass = [
            DesignBand::new(0.0, 0.2, 0.0).unwrap(),
            DesignBand::new(0.3, 0.5, 1.0).unwrap(),
        ];
        assert!(check_response(&highpass, true).is_ok());
        assert!(matches!(
            check_response(&highpass, false),
            Err(Error::EvenLengthNyquistGain)
        ));
    }

    #[test]
    fn taps_symmetry() {
        let ak = [0.25, 0.5, 0.125, -0.0625];
        for &(num_taps, odd_length) in &[(7, true), (8, false)] {
            let h = taps_from_ak(&ak, num_taps, odd_length);
            assert_eq!(h.len(), num_taps);
            for (a, b) in h.iter().zip(h.iter().rev()) {
                assert_eq!(a, b);
            }
        }
    }
}
