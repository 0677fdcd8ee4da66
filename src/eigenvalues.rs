//! Eigenvalue computation.
//!
//! The roots of the derivative of the Chebyshev proxy are found as the
//! eigenvalues of its colleague matrix. The computation is done with
//! [`faer`].

use crate::error::{Error, Result};
use faer::linalg::evd::EvdError;
use faer_ext::IntoFaer;
use ndarray::Array2;
use num_complex::Complex;

// Compute the eigenvalues of a real square matrix.
pub(super) fn eigenvalues(matrix: Array2<f64>) -> Result<Vec<Complex<f64>>> {
    let matrix = matrix.view().into_faer();
    matrix.eigenvalues().map_err(|err| match err {
        EvdError::NoConvergence => Error::EigenvaluesError("no convergence".to_string()),
    })
}

#[cfg(test)]
mod test {
    use super::*;
    use ndarray::array;

    #[test]
    fn eigenvalues_of_diagonal_matrix() {
        let eig = eigenvalues(array![[3.0, 0.0], [0.0, -1.0]]).unwrap();
        let mut re: Vec<f64> = eig.iter().map(|z| z.re).collect();
        re.sort_unstable_by(|a, b| a.partial_cmp(b).unwrap());
        assert!((re[0] + 1.0).abs() < 1e-12);
        assert!((re[1] - 3.0).abs() < 1e-12);
        for z in eig {
            assert!(z.im.abs() < 1e-12);
        }
    }
}
