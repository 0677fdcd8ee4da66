use crate::bands::DesignBand;
use crate::barycentric::{compute_error, compute_extrema_candidate};
use crate::chebyshev::compute_cheby_coefficients;
use crate::eigenvalues::eigenvalues;
use crate::error::{Error, Result};
use ndarray::Array2;

#[derive(Debug, Copy, Clone, PartialEq)]
pub(super) struct Interval {
    pub(super) begin: f64,
    pub(super) end: f64,
}

#[derive(Debug, Copy, Clone, PartialEq)]
pub(super) struct ExtremaCandidate {
    pub(super) x: f64,
    pub(super) error: f64,
    pub(super) desired: f64,
    pub(super) weight: f64,
}

// Initial guess for extremal frequencies: evenly spaced over bands
pub(super) fn initial_extremal_freqs(bands: &[DesignBand], num_functions: usize) -> Vec<f64> {
    let total_band_length: f64 = bands.iter().map(|b| b.band().len()).sum();
    let spacing = total_band_length / num_functions as f64;
    let mut consumed_length = 0.0;
    let num_bands = bands.len();
    let mut current_band = bands.iter().enumerate().peekable();
    (0..(num_functions + 1))
        .map(|j| {
            let s = j as f64 * spacing;
            debug_assert!(s >= consumed_length);
            let mut u = s - consumed_length;
            loop {
                let cband = current_band.peek().unwrap();
                let band_length = cband.1.band().len();
                // the second condition is to avoid going past the last band
                // due to numerical rounding
                if u <= band_length || cband.0 == num_bands - 1 {
                    break;
                }
                current_band.next();
                consumed_length += band_length;
                u = s - consumed_length;
            }
            let cband = current_band.peek().unwrap();
            (cband.1.band().begin() + u).min(cband.1.band().end())
        })
        .collect()
}

// Compute subintervals containing the extremal points and band edges (in the
// [-1, 1] domain).
pub(super) fn subdivide(x: &[f64], bands_x: &[Interval]) -> Vec<Interval> {
    // reserve capacity for the worst case
    let mut subintervals = Vec::with_capacity(x.len() + bands_x.len());
    let mut xs = x.iter().rev().peekable();
    for band in bands_x {
        let mut begin = band.begin;
        loop {
            match xs.peek() {
                Some(&&a) => {
                    match a.partial_cmp(&band.end).unwrap() {
                        std::cmp::Ordering::Greater => {
                            // new point to the right of the band end: end
                            // interval at the right band edge, do not consume
                            // point.
                            subintervals.push(Interval {
                                begin,
                                end: band.end,
                            });
                            break;
                        }
                        std::cmp::Ordering::Equal => {
                            // new point exactly at the band end: end interval
                            // at the right band edge, consume point.
                            subintervals.push(Interval {
                                begin,
                                end: band.end,
                            });
                            xs.next();
                            break;
                        }
                        std::cmp::Ordering::Less => {
                            // new point inside the band: end interval at this
                            // point, consume point, the point is the begin of
                            // the next interval.
                            if begin != a {
                                subintervals.push(Interval { begin, end: a });
                                begin = a;
                            }
                            xs.next();
                        }
                    }
                }
                None => {
                    // no more points: end interval at the right band edge.
                    subintervals.push(Interval {
                        begin,
                        end: band.end,
                    });
                    break;
                }
            }
        }
    }
    // check that we have consumed all the points
    debug_assert!(xs.next().is_none());
    subintervals
}

// Find local extrema of the error function in a subinterval using the
// Chebyshev proxy method
#[allow(clippy::too_many_arguments)]
pub(super) fn find_extrema_in_subinterval<'a, D, W>(
    interval: &Interval,
    cheby_nodes: &[f64],
    x: &'a [f64],
    wk: &'a [f64],
    yk: &'a [f64],
    desired: D,
    weights: W,
) -> Result<impl Iterator<Item = ExtremaCandidate>>
where
    D: Fn(f64) -> f64 + 'a,
    W: Fn(f64) -> f64 + 'a,
{
    // Compute Chebyshev proxy for the error function in the interval
    //
    // Scale Chebyshev nodes to the interval and compute the error function
    let mut cheby_nodes_errors: Vec<f64> = {
        let scale = 0.5 * (interval.end - interval.begin);
        cheby_nodes
            .iter()
            .map(|&x0| {
                let cheby_node_scaled = (x0 + 1.0) * scale + interval.begin;
                compute_error(cheby_node_scaled, x, wk, yk, &desired, &weights)
            })
            .collect()
    };
    // Compute coefficients of first-order Chebyshev polynomial expansion
    let ak = compute_cheby_coefficients(&mut cheby_nodes_errors);

    // Compute derivative of the Chebyshev proxy
    //
    // Compute coefficients of second-order Chebyshev polynomial expansion of
    // the derivative of the proxy.
    let mut ck: Vec<f64> = ak
        .iter()
        .enumerate()
        .skip(1)
        .map(|(k, &a)| k as f64 * a)
        .collect();

    // Remove high-order coefficients ck which are zero. The colleague matrix
    // definition needs the leading coefficient to be nonzero.
    while *ck.last().unwrap() == 0.0 {
        ck.pop();
        if ck.is_empty() {
            return Err(Error::ProxyDerivativeZero);
        }
    }

    // Compute the colleague matrix of ck. Its eigenvalues are the zeros of
    // the derivative of the Chebyshev proxy.
    let s = ck.len() - 1;
    let mut colleague = Array2::<f64>::zeros((s, s));
    for j in 0..s - 1 {
        colleague[(j, j + 1)] = 0.5;
    }
    for j in 2..s {
        colleague[(j, j - 1)] = 0.5;
    }
    let scale = -0.5 / *ck.last().unwrap();
    for j in 0..s {
        let c = ck[s - 1 - j] * scale;
        colleague[(j, 0)] = if j == 1 { c + 0.5 } else { c };
    }
    // Balance matrix for better numerical conditioning
    balance_matrix(&mut colleague);

    // Compute eigenvalues of the colleague matrix. These are the roots of
    // the derivative of the proxy.
    let eig = eigenvalues(colleague)?;

    // Filter only the roots that are real and inside [-1, 1]. Map them to
    // the original interval.
    let threshold = 1e-20;
    let limits = -1.0..=1.0;
    let scale = 0.5 * (interval.end - interval.begin);
    let begin = interval.begin;
    Ok(eig.into_iter().filter_map(move |z| {
        if z.im.abs() < threshold {
            let x0 = z.re;
            if limits.contains(&x0) {
                // map root to interval
                let y = (x0 + 1.0) * scale + begin;
                // evaluate error function
                Some(compute_extrema_candidate(y, x, wk, yk, &desired, &weights))
            } else {
                None
            }
        } else {
            None
        }
    }))
}

// Prune extrema candidates to leave only n of them. It assumes that the
// candidates are sorted.
pub(super) fn prune_extrema_candidates(
    candidates: &[ExtremaCandidate],
    n: usize,
) -> Result<Vec<ExtremaCandidate>> {
    assert!(!candidates.is_empty());
    let mut pruned = Vec::with_capacity(candidates.len());

    // From groups of adjacent extrema with the same sign, leave only the
    // largest
    let mut b = candidates[0];
    let mut b_sign = b.error < 0.0;
    let mut b_abs = b.error.abs();
    for &a in candidates.iter().skip(1) {
        let a_sign = a.error < 0.0;
        let a_abs = a.error.abs();
        if a_sign != b_sign {
            pruned.push(b);
        }
        if a_sign != b_sign || a_abs > b_abs {
            b = a;
            b_sign = a_sign;
            b_abs = a_abs;
        }
    }
    pruned.push(b);

    if pruned.len() == n {
        return Ok(pruned);
    }
    if pruned.len() < n {
        return Err(Error::NotEnoughExtrema);
    }

    let to_remove = pruned.len() - n;
    if to_remove % 2 == 1 {
        // An odd number of extrema need to be removed. Reduce this to the
        // case of an even number of extrema for removal by removing either
        // the first or last extrema, whichever has smaller error.
        if pruned[0].error.abs() >= pruned[pruned.len() - 1].error.abs() {
            pruned.pop();
        } else {
            pruned.remove(0);
        }
    }
    while pruned.len() > n {
        // An even number of extrema need to be removed. Find the pair of
        // elements that has smaller minimum absolute value among the two
        // elements of the pair and remove that pair.
        let idx = pruned
            .iter()
            .zip(pruned.iter().skip(1))
            .enumerate()
            .map(|(k, (a, b))| (k, a.error.abs().min(b.error.abs())))
            // unwrap will fail if there are NaN's
            .min_by(|(_, a), (_, b)| a.partial_cmp(b).unwrap())
            .unwrap()
            .0;
        pruned.drain(idx..=idx + 1);
    }
    assert!(pruned.len() == n);
    Ok(pruned)
}

// Balance a matrix for eigenvalue calculation, as indicated in [4].
fn balance_matrix(a: &mut Array2<f64>) {
    let gamma = 0.95;

    // The algorithm in [4] has a preliminary step where rows and columns
    // that isolate an eigenvalue (those that are zero except on the diagonal
    // element) are pushed to the left or bottom of the matrix respectively.
    // However, the colleague matrix does not have any such rows or columns,
    // so we don't need this step.

    let n = a.nrows();
    let mut converged = false;
    while !converged {
        converged = true;
        for j in 0..n {
            let mut row_norm = 0.0;
            let mut col_norm = 0.0;
            for k in 0..n {
                // ignore the diagonal term, because the algorithm only works
                // with the off-diagonal matrix
                if k != j {
                    row_norm += a[(j, k)].abs();
                    col_norm += a[(k, j)].abs();
                }
            }
            if row_norm == 0.0 || col_norm == 0.0 {
                continue;
            }
            // Sum of original row norm and column norm. To be used in the
            // condition below.
            let norm_sum = row_norm + col_norm;
            // Implicitly finds the integer sigma such that
            // 2^{2*sigma - 1} < row_norm / col_norm <= 2^{2*sigma + 1}
            // and sets f = 2^sigma.
            let mut f = 1.0;
            let row_norm_half = row_norm * 0.5;
            // The is_normal serves to stop iteration if we run into
            // numerical trouble instead of looping forever.
            while col_norm.is_normal() && col_norm <= row_norm_half {
                f *= 2.0;
                col_norm *= 4.0;
            }
            let row_norm_twice = row_norm * 2.0;
            while col_norm.is_normal() && col_norm > row_norm_twice {
                f /= 2.0;
                col_norm /= 4.0;
            }
            // By the end of these two loops col_norm has been replaced with
            // col_norm * f^2.

            // If we have run into trouble we just return
            if !col_norm.is_normal() {
                return;
            }

            // Check if
            // col_norm * f + row_norm / f < gamma * (col_norm + row_norm)
            // Since at this point col_norm contains col_norm * f^2, we
            // multiply both sides of the equation by f.
            if row_norm + col_norm < gamma * norm_sum * f {
                converged = false;
                let f_recip = f.recip();
                // Let D be a diagonal matrix that contains ones in all the
                // diagonal elements except the j-th, where it contains f.
                // Replace the matrix A by D^{-1}AD.
                for k in 0..n {
                    if k != j {
                        a[(j, k)] *= f_recip;
                        a[(k, j)] *= f;
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::bands::DesignBand;

    #[test]
    fn initial_guess_spans_bands() {
        let bands = [
            DesignBand::new(0.0, 0.2, 1.0).unwrap(),
            DesignBand::new(0.3, 0.5, 0.0).unwrap(),
        ];
        let freqs = initial_extremal_freqs(&bands, 8);
        assert_eq!(freqs.len(), 9);
        assert_eq!(freqs[0], 0.0);
        assert!(*freqs.last().unwrap() <= 0.5);
        for pair in freqs.windows(2) {
            assert!(pair[1] > pair[0]);
        }
        // no initial guess falls in the transition region
        for &f in &freqs {
            assert!(bands.iter().any(|b| b.band().contains(f)));
        }
    }

    #[test]
    fn subdivision_keeps_points_and_edges() {
        let bands_x = [
            Interval {
                begin: -1.0,
                end: -0.2,
            },
            Interval {
                begin: 0.2,
                end: 1.0,
            },
        ];
        // extremal points in decreasing cos() order
        let x = [0.9, 0.5, -0.5, -0.9];
        let subintervals = subdivide(&x, &bands_x);
        assert_eq!(subintervals.len(), 6);
        for pair in subintervals.windows(2) {
            assert!(pair[1].begin >= pair[0].end);
        }
    }
}
