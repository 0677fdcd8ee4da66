//! # Parks-McClellan FIR lowpass calculator
//!
//! The `remez_fir_calc` crate designs equiripple FIR lowpass filters with the
//! Parks-McClellan Remez exchange algorithm and evaluates their magnitude
//! response for display. It is the engine behind the `remez-fir-calc` desktop
//! tool, which collects a sample rate, a cutoff frequency, a transition width
//! and a tap count, prints the resulting taps to stdout, and plots the
//! frequency response.
//!
//! The exchange implementation draws ideas from \[1\] to make the algorithm
//! robust against numerical errors. These ideas include the use of Chebyshev
//! proxy root finding to find the extrema of the weighted error function in
//! the Remez exchange step.
//!
//! ## Examples
//!
//! The usual entry point is [`design_lowpass`], which takes a [`FilterSpec`]
//! in the Hz domain and returns a [`FirDesign`] containing the filter taps:
//!
//! ```
//! use remez_fir_calc::{FilterSpec, design_lowpass};
//!
//! let spec = FilterSpec::new(8000.0, 1000.0, 200.0, 31)?;
//! let design = design_lowpass(&spec)?;
//! assert_eq!(design.taps.len(), 31);
//! # Ok::<(), remez_fir_calc::error::Error>(())
//! ```
//!
//! The exchange itself is exposed as [`remez_exchange`], which works on
//! normalized [`DesignBand`]s (frequencies in cycles/sample over [0.0, 0.5])
//! with piecewise-constant desired gain and weight:
//!
//! ```
//! use remez_fir_calc::{DesignBand, ExchangeSettings, remez_exchange};
//!
//! let bands = [
//!     DesignBand::new(0.0, 0.2, 1.0)?,
//!     DesignBand::new(0.3, 0.5, 0.0)?,
//! ];
//! let design = remez_exchange(35, &bands, &ExchangeSettings::default())?;
//! assert_eq!(design.taps.len(), 35);
//! # Ok::<(), remez_fir_calc::error::Error>(())
//! ```
//!
//! ## References
//!
//! \[1\] S.I. Filip. "A Robust and Scalable Implementation of the
//! Parks-McClellan Algorithm for Designing FIR Filters," in ACM
//! Trans. Math. Softw. 43, 1, Article 7, March 2017.
//!
//! \[2\] J. McClellan, T. Parks and L. Rabiner, "A computer program for
//! designing optimum FIR linear phase digital filters," in IEEE Transactions
//! on Audio and Electroacoustics, vol. 21, no. 6, pp. 506-526, December 1973
//!
//! \[3\] T. Parks and J. McClellan, "Chebyshev Approximation for Nonrecursive
//! Digital Filters with Linear Phase," in IEEE Transactions on Circuit
//! Theory, vol. 19, no. 2, pp. 189-194, March 1972.
//!
//! \[4\] B.N. Parlett and C. Reinsch, "Balancing a matrix for calculation of
//! eigenvalues and eigenvectors". Numer. Math. 13, 293–304 (1969).
//!
//! \[5\] K. Ichige, M. Iwaki and R. Ishii, "Accurate estimation of minimum
//! filter length for optimum FIR digital filters," in IEEE Transactions on
//! Circuits and Systems II, vol. 47, no. 10, pp. 1008-1016, Oct. 2000.

#![warn(missing_docs)]

use itertools::{Itertools, MinMaxResult};

mod bands;
pub use bands::{Band, DesignBand};
mod barycentric;
use barycentric::*;
mod chebyshev;
use chebyshev::{chebyshev_nodes, compute_cheby_coefficients};
mod eigenvalues;
pub mod error;
use error::{Error, Result};
mod extrema;
use extrema::*;
pub mod input;
pub mod report;
mod response;
pub use response::{ResponseCurve, evaluate_response};
mod spec;
pub use spec::{FilterSpec, design_lowpass, design_lowpass_with_settings};
mod taps;
mod types;
pub use types::{ExchangeSettings, FirDesign};

/// Parks-McClellan Remez exchange algorithm.
///
/// This function runs the Remez exchange algorithm to try to find the
/// even-symmetric FIR filter with `num_taps` taps that minimizes the maximum
/// weighted error over the given bands. Each [`DesignBand`] is a sub-band of
/// the interval [0.0, 0.5] (in cycles/sample) with a constant desired gain
/// and a constant error weight attached.
///
/// Both odd (type I) and even (type II) tap counts are supported. A type II
/// filter has a structural zero at the Nyquist frequency, so a band touching
/// 0.5 with nonzero gain fails with [`Error::EvenLengthNyquistGain`].
///
/// If the exchange does not reach the flatness threshold of `settings`
/// within the allowed number of iterations, the design fails with
/// [`Error::DidNotConverge`] instead of returning a half-optimized filter.
pub fn remez_exchange(
    num_taps: usize,
    bands: &[DesignBand],
    settings: &ExchangeSettings,
) -> Result<FirDesign> {
    bands::check_bands(bands)?;
    let mut bands = bands::sort_bands(bands);
    if num_taps == 0 {
        return Err(Error::NoTaps);
    }
    let odd_length = num_taps % 2 != 0;
    // Check that the desired response is realizable by the requested filter
    // length, then adjust the bands to avoid singularities.
    taps::check_response(&bands, odd_length)?;
    taps::adjust_bands(&mut bands, odd_length);

    // The desired response and weight lookups work in cycles/sample, while
    // the exchange geometry works in radians/sample, so the band list is
    // kept in both domains.
    let bands_cycles = bands.clone();
    for band in bands.iter_mut() {
        band.convert_to_radians();
    }
    let desired = |f: f64| taps::desired(&bands_cycles, f, odd_length);
    let weights = |f: f64| taps::weight(&bands_cycles, f, odd_length);

    // Number of cosine functions to use in the approximation (n in [2]).
    let num_functions = if odd_length {
        num_taps / 2 + 1
    } else {
        num_taps / 2
    };
    if num_functions < 2 {
        return Err(Error::TooFewTaps { num_taps });
    }

    // Calculate initial parameters

    let mut extremal_freqs = initial_extremal_freqs(&bands, num_functions);
    // x = cos(f), where f are the extremal freqs
    let mut x: Vec<f64> = extremal_freqs.iter().map(|f| f.cos()).collect();
    let mut wk: Vec<f64> = compute_barycentric_weights(&x).collect();
    let mut desired_x: Vec<f64> = extremal_freqs.iter().map(|&f| desired(f)).collect();
    let mut weights_x: Vec<f64> = extremal_freqs.iter().map(|&f| weights(f)).collect();
    let mut delta = compute_delta(&wk, &desired_x, &weights_x);
    let mut yk: Vec<f64> = compute_lagrange_ordinates(delta, &desired_x, &weights_x).collect();
    let mut num_iterations = 0;
    let mut flatness = 0.0;
    let max_iterations = settings.max_iterations();
    let flatness_threshold = settings.flatness_threshold();
    let cheby_nodes: Vec<f64> = chebyshev_nodes(settings.chebyshev_proxy_degree()).collect();
    for num_iter in 1..=max_iterations {
        num_iterations = num_iter;
        // Perform Remez exchange

        // Convert band edges using x = cos(f). Note that cos() is
        // decreasing, so we use rev() and swap end and begin to obtain an
        // output in increasing order.
        let bands_x: Vec<Interval> = bands
            .iter()
            .rev()
            .map(|b| Interval {
                begin: b.band().end().cos(),
                end: b.band().begin().cos(),
            })
            .collect();
        let subintervals = subdivide(&x, &bands_x);
        // Upper estimate of capacity needed for the remez_candidates vector.
        // For each subinterval, we potentially need:
        //
        // * 2 points for the subinterval endpoints
        //
        // * settings.chebyshev_proxy_degree() - 1 points for the roots of
        // the derivative of the Chebyshev proxy
        let upper_estimate_num_candidates =
            subintervals.len() * (settings.chebyshev_proxy_degree() + 1);
        let mut remez_candidates: Vec<ExtremaCandidate> =
            Vec::with_capacity(upper_estimate_num_candidates);

        // Add subinterval endpoints to the candidate list
        remez_candidates.extend(subintervals.iter().flat_map(|interval| {
            [
                compute_extrema_candidate(interval.begin, &x, &wk, &yk, &desired, &weights),
                compute_extrema_candidate(interval.end, &x, &wk, &yk, &desired, &weights),
            ]
            .into_iter()
        }));

        // Add local extrema inside each subinterval to the candidate list
        for interval in &subintervals {
            remez_candidates.extend(find_extrema_in_subinterval(
                interval,
                &cheby_nodes,
                &x,
                &wk,
                &yk,
                &desired,
                &weights,
            )?);
        }

        // Check that the upper estimate of remez_candidates capacity was
        // not too small
        debug_assert!(remez_candidates.len() <= upper_estimate_num_candidates);

        // Sort candidates
        // unwrap will fail if there are NaN's in the x values
        remez_candidates.sort_unstable_by(|a, b| a.x.partial_cmp(&b.x).unwrap());

        // Prune extrema candidates to leave only num_functions + 1 of them
        let remez_candidates = prune_extrema_candidates(&remez_candidates, num_functions + 1)?;

        // Find largest and smallest error value in the extrema candidates to
        // assess convergence
        let MinMaxResult::MinMax(min_error, max_error) =
            remez_candidates.iter().map(|a| a.error.abs()).minmax()
        else {
            panic!("remez_candidates has too few elements to obtain minmax()")
        };
        flatness = (max_error - min_error) / max_error;

        // Set new extremal frequencies from candidates
        for ((f, x0), candidate) in extremal_freqs
            .iter_mut()
            .zip(x.iter_mut())
            // rev is used because acos() is a decreasing function
            .zip(remez_candidates.iter().rev())
        {
            *x0 = candidate.x;
            *f = candidate.x.acos();
        }
        // Compute new barycentric weights
        for (dst, src) in wk.iter_mut().zip(compute_barycentric_weights(&x)) {
            *dst = src;
        }
        // Compute new desired and weights
        for (des, &f) in desired_x.iter_mut().zip(extremal_freqs.iter()) {
            *des = desired(f);
        }
        for (wei, &f) in weights_x.iter_mut().zip(extremal_freqs.iter()) {
            *wei = weights(f);
        }
        // Compute new delta
        delta = compute_delta(&wk, &desired_x, &weights_x);
        // Compute new y_k
        for (dst, src) in yk
            .iter_mut()
            .zip(compute_lagrange_ordinates(delta, &desired_x, &weights_x))
        {
            *dst = src
        }

        if flatness <= flatness_threshold {
            // Convergence reached
            break;
        }
    }

    if flatness > flatness_threshold {
        return Err(Error::DidNotConverge {
            iterations: num_iterations,
            flatness,
        });
    }

    // Obtain the time-domain coefficients.
    //
    // This can be done by evaluating H(f) at the Chebyshev nodes of the
    // second kind, f = cos(k*pi/n), where H(f) = \sum_{0 <= k <= n} a_k *
    // cos(k*f), and then computing a_k as the coefficients in the expansion
    // of H(cos(x)) in terms of Chebyshev polynomials of the first kind.
    let mut ck: Vec<f64> = {
        let scale = std::f64::consts::PI / (num_functions - 1) as f64;
        (0..num_functions)
            .map(|j| compute_freq_response((j as f64 * scale).cos(), &x, &wk, &yk))
            .collect()
    };
    let ak = compute_cheby_coefficients(&mut ck);

    Ok(FirDesign {
        taps: taps::taps_from_ak(&ak, num_taps, odd_length),
        weighted_error: delta.abs(),
        num_iterations,
        flatness,
    })
}
