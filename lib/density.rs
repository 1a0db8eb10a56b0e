//! Construction and inspection of density matrices.
//!
//! None of the propagators require their inputs to be built here; these are
//! conveniences for writing initial states and checking trajectories.

use itertools::Itertools;
use ndarray as nd;
use num_complex::Complex64 as C64;
use crate::error::DensityError;

pub type DensityResult<T> = Result<T, DensityError>;

/// Compute the trace of a matrix.
pub fn trace<S>(rho: &nd::ArrayBase<S, nd::Ix2>) -> C64
where S: nd::Data<Elem = C64>
{
    rho.diag().iter().sum()
}

/// Compute the purity `Re tr(rho^2)` of a density matrix.
pub fn purity<S>(rho: &nd::ArrayBase<S, nd::Ix2>) -> f64
where S: nd::Data<Elem = C64>
{
    // tr(rho rho) = sum_ij rho_ij rho_ji
    rho.indexed_iter()
        .map(|((i, j), rij)| *rij * rho[[j, i]])
        .sum::<C64>()
        .re
}

/// Return `true` if `A` is square and `|A_ij - conj(A_ji)| <= tol` for all
/// elements.
pub fn is_hermitian<S>(A: &nd::ArrayBase<S, nd::Ix2>, tol: f64) -> bool
where S: nd::Data<Elem = C64>
{
    let (n, m) = A.dim();
    n == m && max_anti_hermitian(A) <= tol
}

// largest |A_ij - conj(A_ji)|; assumes `A` is square
pub(crate) fn max_anti_hermitian<S>(A: &nd::ArrayBase<S, nd::Ix2>) -> f64
where S: nd::Data<Elem = C64>
{
    A.indexed_iter()
        .map(|((i, j), aij)| (*aij - A[[j, i]].conj()).norm())
        .fold(0.0, f64::max)
}

/// Return the Hermitian part `(A + A^dagger) / 2` of a square matrix.
pub fn hermitian_part<S>(A: &nd::ArrayBase<S, nd::Ix2>) -> nd::Array2<C64>
where S: nd::Data<Elem = C64>
{
    (A.to_owned() + crate::utils::adjoint(A)) / C64::from(2.0)
}

/// Compute the outer product `|a><b|` of two state vectors.
pub fn outer_prod<S, T>(
    a: &nd::ArrayBase<S, nd::Ix1>,
    b: &nd::ArrayBase<T, nd::Ix1>,
) -> nd::Array2<C64>
where
    S: nd::Data<Elem = C64>,
    T: nd::Data<Elem = C64>,
{
    let na = a.len();
    let nb = b.len();
    let elems: Vec<C64>
        = a.iter().cartesian_product(b)
        .map(|(ai, bj)| *ai * bj.conj())
        .collect();
    nd::Array2::from_shape_vec((na, nb), elems)
        .expect("outer_prod: shape is na x nb by construction")
}

/// Build the density matrix of a pure state, renormalizing the state vector
/// first.
pub fn from_pure<S>(psi: &nd::ArrayBase<S, nd::Ix1>)
    -> DensityResult<nd::Array2<C64>>
where S: nd::Data<Elem = C64>
{
    if psi.is_empty() { return Err(DensityError::Empty); }
    let norm: f64 = psi.iter().map(|a| a.norm_sqr()).sum::<f64>().sqrt();
    if norm == 0.0 || !norm.is_finite() { return Err(DensityError::ZeroNorm); }
    let psi: nd::Array1<C64> = psi.mapv(|a| a / norm);
    Ok(outer_prod(&psi, &psi))
}

/// Build a diagonal density matrix (a classical mixture of basis states) from
/// a list of populations, renormalized to sum to 1.
pub fn from_populations<S>(p: &nd::ArrayBase<S, nd::Ix1>)
    -> DensityResult<nd::Array2<C64>>
where S: nd::Data<Elem = f64>
{
    if p.is_empty() { return Err(DensityError::Empty); }
    if let Some((k, pk))
        = p.iter().enumerate().find(|(_, pk)| !pk.is_finite() || **pk < 0.0)
    {
        return Err(DensityError::BadPopulation(*pk, k));
    }
    let norm: f64 = p.sum();
    if norm == 0.0 { return Err(DensityError::ZeroNorm); }
    Ok(nd::Array2::from_diag(&p.mapv(|pk| C64::from(pk / norm))))
}
