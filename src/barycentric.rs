// Calculate barycentric weights
//
// w_k = 1 / prod_{j != k} (x_j - x_k).
//
// There are two optimizations for numerical errors in this calculation:
//
// a) Instead of multiplying (x_j - x_k), multiply (x_j - x_k) * 2. This
// helps prevent the exponent of the product from getting too small. The
// Lagrange interpolation formula is homogeneous on the barycentric weights,
// so this change is acceptable.
//
// b) Stride through the elements in the product. I don't understand why
// this helps, but other implementations do it.
pub(super) fn compute_barycentric_weights(x: &[f64]) -> impl Iterator<Item = f64> + '_ {
    let stride = (x.len() - 2) / 15 + 1;
    x.iter().enumerate().map(move |(k, xk)| {
        let mut prod = 1.0;
        for a in 0..stride {
            for j in (a..x.len()).step_by(stride) {
                if j != k {
                    prod *= (xk - x[j]) * 2.0;
                }
            }
        }
        prod.recip()
    })
}

// Calculate delta
//
// delta = sum_k w_k D(f_k) / sum_k (-1)^k w_k/W(f_k),
//
// where f_k are extremal frequencies and D and W are the desired response
// and weight.
pub(super) fn compute_delta(wk: &[f64], desired: &[f64], weights: &[f64]) -> f64 {
    let mut delta_numer = 0.0;
    let mut delta_denom = 0.0;
    for (k, ((&w, &des), &wei)) in wk
        .iter()
        .zip(desired.iter())
        .zip(weights.iter())
        .enumerate()
    {
        delta_numer += w * des;
        let z = w / wei;
        if k % 2 != 0 {
            delta_denom -= z;
        } else {
            delta_denom += z;
        }
    }
    delta_numer / delta_denom
}

// Calculate y_k, the ordinates for Lagrange interpolation
//
// y_k = D(f_k) - (-1)^k delta / W(f_k)
pub(super) fn compute_lagrange_ordinates<'a>(
    delta: f64,
    desired: &'a [f64],
    weights: &'a [f64],
) -> impl Iterator<Item = f64> + 'a {
    desired
        .iter()
        .zip(weights.iter())
        .enumerate()
        .map(move |(k, (&des, &wei))| {
            let z = delta / wei;
            if k % 2 != 0 { des + z } else { des - z }
        })
}

// Compute H(arccos(x0))
pub(super) fn compute_freq_response(x0: f64, x: &[f64], wk: &[f64], yk: &[f64]) -> f64 {
    let mut h_numer = 0.0;
    let mut h_denom = 0.0;
    for ((&xk, &w), &y) in x.iter().zip(wk.iter()).zip(yk.iter()) {
        if x0 == xk {
            // special case where we are evaluating at one of the
            // interpolation nodes
            return y;
        }
        let z = w / (x0 - xk);
        h_numer += z * y;
        h_denom += z;
    }
    h_numer / h_denom
}

fn compute_error_common<D, W>(
    x0: f64,
    x: &[f64],
    wk: &[f64],
    yk: &[f64],
    desired: D,
    weights: W,
) -> (f64, f64, f64)
where
    D: Fn(f64) -> f64,
    W: Fn(f64) -> f64,
{
    let h = compute_freq_response(x0, x, wk, yk);
    let f = x0.acos();
    let d = desired(f);
    let w = weights(f);
    let error = w * (d - h);
    (error, d, w)
}

// Compute E(f) = W(f) * (D(f) - H(f)), where cos(f) = x0
pub(super) fn compute_error<D, W>(
    x0: f64,
    x: &[f64],
    wk: &[f64],
    yk: &[f64],
    desired: D,
    weights: W,
) -> f64
where
    D: Fn(f64) -> f64,
    W: Fn(f64) -> f64,
{
    compute_error_common(x0, x, wk, yk, desired, weights).0
}

pub(super) fn compute_extrema_candidate<D, W>(
    x0: f64,
    x: &[f64],
    wk: &[f64],
    yk: &[f64],
    desired: D,
    weights: W,
) -> crate::extrema::ExtremaCandidate
where
    D: Fn(f64) -> f64,
    W: Fn(f64) -> f64,
{
    let (error, d, w) = compute_error_common(x0, x, wk, yk, desired, weights);
    crate::extrema::ExtremaCandidate {
        x: x0,
        error,
        desired: d,
        weight: w,
    }
}
