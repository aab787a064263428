//! Seeded randomized truncated singular value decomposition.
//!
//! The range finder follows the usual randomized subspace scheme: project the
//! matrix through a seeded Gaussian test matrix, sharpen the captured
//! subspace with a few power iterations (re-orthonormalizing through
//! Householder QR at each step), then take an exact SVD of the small
//! projected matrix. With the default oversampling this is exact whenever
//! `rank + OVERSAMPLES` reaches the smaller matrix dimension.

use nalgebra::{DMatrix, DVector};
use rand::rngs::StdRng;
use rand::SeedableRng;
use rand_distr::{Distribution, StandardNormal};

use crate::error::{Error, Result};

/// Extra sketch columns beyond the requested rank.
const OVERSAMPLES: usize = 8;

/// Power iterations applied to sharpen the captured subspace.
const POWER_ITERATIONS: usize = 2;

/// Rank-k factors of `a ≈ u · diag(sigma) · vᵗ`.
pub(crate) struct TruncatedSvd {
    /// Left singular vectors, `rows × k`.
    pub u: DMatrix<f64>,
    /// Leading singular values in descending order, length k.
    pub sigma: DVector<f64>,
    /// Right singular vectors, `cols × k`.
    pub v: DMatrix<f64>,
}

/// Computes a rank-`k` truncated SVD of `a`.
///
/// Deterministic for a fixed `(a, k, seed)`: the Gaussian test matrix is
/// drawn from a seeded generator and every downstream step (QR, dense SVD)
/// is deterministic. The caller guarantees `1 <= k <= min(rows, cols)`.
pub(crate) fn truncated_svd(a: &DMatrix<f64>, k: usize, seed: u64) -> Result<TruncatedSvd> {
    let (rows, cols) = a.shape();
    debug_assert!(k >= 1 && k <= rows.min(cols), "rank validated by caller");

    let sketch = k.saturating_add(OVERSAMPLES).min(rows.min(cols));
    let mut rng = StdRng::seed_from_u64(seed);
    let omega = DMatrix::from_fn(cols, sketch, |_, _| {
        let draw: f64 = StandardNormal.sample(&mut rng);
        draw
    });

    let mut basis = orthonormal_basis(a * &omega);
    for _ in 0..POWER_ITERATIONS {
        basis = orthonormal_basis(a.transpose() * &basis);
        basis = orthonormal_basis(a * &basis);
    }

    let projected = basis.transpose() * a;
    let mut decomposition = projected.svd(true, true);
    decomposition.sort_by_singular_values();

    let u_small = decomposition
        .u
        .ok_or_else(|| Error::Decomposition("missing left singular vectors".to_string()))?;
    let v_t = decomposition
        .v_t
        .ok_or_else(|| Error::Decomposition("missing right singular vectors".to_string()))?;

    let u = &basis * u_small.columns(0, k);
    let sigma = decomposition.singular_values.rows(0, k).into_owned();
    let v = v_t.rows(0, k).transpose();

    Ok(TruncatedSvd { u, sigma, v })
}

/// Thin orthonormal basis of the column space via Householder QR.
fn orthonormal_basis(projection: DMatrix<f64>) -> DMatrix<f64> {
    projection.qr().q()
}
