//! The interface between propagation methods and a system Hamiltonian.
//!
//! Propagators only ever need three things from a Hamiltonian: a change of
//! basis from the site basis to the Hamiltonian's eigenbasis, its inverse, and
//! free evolution of an eigenbasis operator. [`HamiltonianSystem`] collects
//! these, and [`EigenSystem`] provides them for any time-independent Hermitian
//! matrix.

use ndarray as nd;
use ndarray_linalg::{ Eigh, UPLO };
use num_complex::Complex64 as C64;
use crate::{
    density::max_anti_hermitian,
    error::{ DimensionError, HamiltonianError },
    utils::adjoint,
};

pub type HResult<T> = Result<T, HamiltonianError>;

/// Maximum absolute deviation from Hermiticity tolerated by
/// [`EigenSystem::new`].
pub const HERMITIAN_TOL: f64 = 1e-10;

/// Basis transforms and free evolution for a system Hamiltonian.
///
/// All matrices are square with the dimension of the system's basis.
/// Implementations report their own failures (e.g. shape mismatches) through
/// [`Self::Error`]; propagators pass these to their callers unchanged.
pub trait HamiltonianSystem {
    /// Error type returned by all operations.
    type Error;

    /// Transform a matrix from the site basis to the eigenbasis.
    fn site2eig(&self, A: &nd::Array2<C64>) -> Result<nd::Array2<C64>, Self::Error>;

    /// Transform a matrix from the eigenbasis to the site basis.
    fn eig2site(&self, A: &nd::Array2<C64>) -> Result<nd::Array2<C64>, Self::Error>;

    /// Evolve an eigenbasis matrix freely for elapsed time `t`.
    ///
    /// `A` is taken as the state at elapsed time zero; the result depends only
    /// on `A` and `t`.
    fn to_interaction(&self, A: &nd::Array2<C64>, t: f64)
        -> Result<nd::Array2<C64>, Self::Error>;
}

impl<H> HamiltonianSystem for &H
where H: HamiltonianSystem + ?Sized
{
    type Error = H::Error;

    fn site2eig(&self, A: &nd::Array2<C64>) -> Result<nd::Array2<C64>, Self::Error> {
        (**self).site2eig(A)
    }

    fn eig2site(&self, A: &nd::Array2<C64>) -> Result<nd::Array2<C64>, Self::Error> {
        (**self).eig2site(A)
    }

    fn to_interaction(&self, A: &nd::Array2<C64>, t: f64)
        -> Result<nd::Array2<C64>, Self::Error>
    {
        (**self).to_interaction(A, t)
    }
}

/// A time-independent Hermitian Hamiltonian, diagonalized once on
/// construction.
///
/// Eigenvalues are sorted in ascending order, and the `k`-th column of
/// [`Self::evecs`] is the eigenvector belonging to the `k`-th eigenvalue.
#[derive(Clone, Debug)]
pub struct EigenSystem {
    H: nd::Array2<C64>,
    hbar: f64,
    E: nd::Array1<f64>,
    U: nd::Array2<C64>,
    U_adj: nd::Array2<C64>,
    omega: nd::Array2<f64>,
}

impl EigenSystem {
    /// Create a new `EigenSystem` with `hbar = 1`.
    ///
    /// Fails if `H` is not square, contains non-finite elements, is not
    /// Hermitian to within [`HERMITIAN_TOL`], or cannot be diagonalized.
    pub fn new(H: nd::Array2<C64>) -> HResult<Self> {
        Self::with_hbar(H, 1.0)
    }

    /// Create a new `EigenSystem` with a particular value of the reduced
    /// Planck constant, which converts energy differences to angular
    /// frequencies.
    pub fn with_hbar(H: nd::Array2<C64>, hbar: f64) -> HResult<Self> {
        HamiltonianError::check_hbar(hbar)?;
        let (n, m) = H.dim();
        if n != m { return Err(HamiltonianError::NotSquare(n, m)); }
        if !H.iter().all(|h| h.re.is_finite() && h.im.is_finite()) {
            return Err(HamiltonianError::NonFinite);
        }
        let dev = max_anti_hermitian(&H);
        if dev > HERMITIAN_TOL { return Err(HamiltonianError::NotHermitian(dev)); }

        let (E, U): (nd::Array1<f64>, nd::Array2<C64>) = H.eigh(UPLO::Lower)?;
        let U_adj = adjoint(&U);
        let omega: nd::Array2<f64>
            = nd::Array2::from_shape_fn((n, n), |(i, j)| (E[i] - E[j]) / hbar);
        tracing::debug!(dim = n, hbar, "diagonalized hamiltonian");
        Ok(Self { H, hbar, E, U, U_adj, omega })
    }

    /// Return the dimension of the basis.
    pub fn dim(&self) -> usize { self.E.len() }

    /// Return the reduced Planck constant.
    pub fn hbar(&self) -> f64 { self.hbar }

    /// Return the Hamiltonian matrix in the site basis.
    pub fn hamiltonian(&self) -> &nd::Array2<C64> { &self.H }

    /// Return the eigenvalues.
    pub fn evals(&self) -> &nd::Array1<f64> { &self.E }

    /// Return the eigenvectors as the columns of a unitary matrix.
    pub fn evecs(&self) -> &nd::Array2<C64> { &self.U }

    /// Return the matrix of transition frequencies `(E_i - E_j) / hbar`.
    pub fn omega_diff(&self) -> &nd::Array2<f64> { &self.omega }

    /// Undo [`HamiltonianSystem::to_interaction`], rotating an eigenbasis
    /// matrix backward by elapsed time `t`.
    pub fn from_interaction(&self, A: &nd::Array2<C64>, t: f64)
        -> HResult<nd::Array2<C64>>
    {
        self.phase_rotate(A, t)
    }

    // A_ij * exp(i w_ij t)
    fn phase_rotate(&self, A: &nd::Array2<C64>, t: f64)
        -> HResult<nd::Array2<C64>>
    {
        DimensionError::check(A, self.dim())?;
        let rotated: nd::Array2<C64>
            = nd::Zip::from(A).and(&self.omega)
            .map_collect(|a, w| *a * C64::cis(*w * t));
        Ok(rotated)
    }
}

impl HamiltonianSystem for EigenSystem {
    type Error = HamiltonianError;

    /// Compute `U^dagger A U`.
    fn site2eig(&self, A: &nd::Array2<C64>) -> HResult<nd::Array2<C64>> {
        DimensionError::check(A, self.dim())?;
        Ok(self.U_adj.dot(A).dot(&self.U))
    }

    /// Compute `U A U^dagger`.
    fn eig2site(&self, A: &nd::Array2<C64>) -> HResult<nd::Array2<C64>> {
        DimensionError::check(A, self.dim())?;
        Ok(self.U.dot(A).dot(&self.U_adj))
    }

    /// Compute `A_ij exp(-i w_ij t)`, the solution of the Liouville-von Neumann
    /// equation in the eigenbasis.
    fn to_interaction(&self, A: &nd::Array2<C64>, t: f64)
        -> HResult<nd::Array2<C64>>
    {
        self.phase_rotate(A, -t)
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use rand::{ Rng, SeedableRng, rngs::StdRng };
    use crate::density::is_hermitian;

    pub(crate) fn random_hermitian(n: usize, seed: u64) -> nd::Array2<C64> {
        let mut rng = StdRng::seed_from_u64(seed);
        let A: nd::Array2<C64>
            = nd::Array2::from_shape_fn((n, n), |_| {
                C64::new(rng.gen_range(-1.0..1.0), rng.gen_range(-1.0..1.0))
            });
        (&A + &adjoint(&A)) / C64::from(2.0)
    }

    pub(crate) fn random_density(n: usize, seed: u64) -> nd::Array2<C64> {
        let mut rng = StdRng::seed_from_u64(seed);
        let A: nd::Array2<C64>
            = nd::Array2::from_shape_fn((n, n), |_| {
                C64::new(rng.gen_range(-1.0..1.0), rng.gen_range(-1.0..1.0))
            });
        let rho = A.dot(&adjoint(&A));
        let tr: C64 = rho.diag().iter().sum();
        rho / tr
    }

    pub(crate) fn max_diff(A: &nd::Array2<C64>, B: &nd::Array2<C64>) -> f64 {
        nd::Zip::from(A).and(B)
            .fold(0.0, |acc, a, b| f64::max(acc, (*a - *b).norm()))
    }

    fn sigma_x() -> nd::Array2<C64> {
        nd::array![
            [C64::from(0.0), C64::from(1.0)],
            [C64::from(1.0), C64::from(0.0)],
        ]
    }

    #[test]
    fn pauli_x_spectrum() {
        let ham = EigenSystem::new(sigma_x()).unwrap();
        assert_eq!(ham.dim(), 2);
        assert_relative_eq!(ham.evals()[0], -1.0, epsilon = 1e-12);
        assert_relative_eq!(ham.evals()[1], 1.0, epsilon = 1e-12);
        assert_relative_eq!(ham.omega_diff()[[1, 0]], 2.0, epsilon = 1e-12);
        assert_relative_eq!(ham.omega_diff()[[0, 1]], -2.0, epsilon = 1e-12);
        assert_relative_eq!(ham.omega_diff()[[1, 1]], 0.0);
    }

    #[test]
    fn hamiltonian_is_diagonal_in_eigenbasis() {
        let H = random_hermitian(5, 1);
        let ham = EigenSystem::new(H.clone()).unwrap();
        let D = ham.site2eig(&H).unwrap();
        let expected = nd::Array2::from_diag(&ham.evals().mapv(C64::from));
        assert!(max_diff(&D, &expected) < 1e-10);
    }

    #[test]
    fn basis_round_trip() {
        let ham = EigenSystem::new(random_hermitian(6, 2)).unwrap();
        let rho = random_density(6, 3);
        let back = ham.eig2site(&ham.site2eig(&rho).unwrap()).unwrap();
        assert!(max_diff(&back, &rho) < 1e-10);
        let back = ham.site2eig(&ham.eig2site(&rho).unwrap()).unwrap();
        assert!(max_diff(&back, &rho) < 1e-10);
    }

    #[test]
    fn zero_time_evolution_is_identity() {
        let ham = EigenSystem::new(random_hermitian(4, 4)).unwrap();
        let rho = ham.site2eig(&random_density(4, 5)).unwrap();
        let evolved = ham.to_interaction(&rho, 0.0).unwrap();
        assert!(max_diff(&evolved, &rho) < 1e-15);
    }

    #[test]
    fn evolution_is_phase_rotation() {
        let ham = EigenSystem::with_hbar(sigma_x(), 2.0).unwrap();
        let rho: nd::Array2<C64> = nd::Array2::from_elem((2, 2), C64::from(0.5));
        let t = 0.3;
        let evolved = ham.to_interaction(&rho, t).unwrap();
        // w_01 = (-1 - 1) / 2 = -1
        assert_relative_eq!(evolved[[0, 1]].re, 0.5 * t.cos(), epsilon = 1e-12);
        assert_relative_eq!(evolved[[0, 1]].im, 0.5 * t.sin(), epsilon = 1e-12);
        assert_relative_eq!(evolved[[0, 0]].re, 0.5, epsilon = 1e-12);
        assert!(is_hermitian(&evolved, 1e-12));
        let back = ham.from_interaction(&evolved, t).unwrap();
        assert!(max_diff(&back, &rho) < 1e-12);
    }

    #[test]
    fn borrowed_system_delegates() {
        let ham = EigenSystem::new(sigma_x()).unwrap();
        let by_ref: &EigenSystem = &ham;
        let rho = random_density(2, 6);
        let a = HamiltonianSystem::site2eig(&by_ref, &rho).unwrap();
        let b = ham.site2eig(&rho).unwrap();
        assert!(max_diff(&a, &b) == 0.0);
    }

    #[test]
    fn rejects_bad_hamiltonians() {
        let rect: nd::Array2<C64> = nd::Array2::zeros((2, 3));
        assert!(matches!(EigenSystem::new(rect), Err(HamiltonianError::NotSquare(2, 3))));

        let mut H = sigma_x();
        H[[0, 1]] = C64::new(1.0, 1.0);
        assert!(matches!(EigenSystem::new(H), Err(HamiltonianError::NotHermitian(_))));

        let mut H = sigma_x();
        H[[0, 0]] = C64::from(f64::NAN);
        assert!(matches!(EigenSystem::new(H), Err(HamiltonianError::NonFinite)));

        assert!(matches!(
            EigenSystem::with_hbar(sigma_x(), 0.0),
            Err(HamiltonianError::BadHbar(_)),
        ));
        assert!(matches!(
            EigenSystem::with_hbar(sigma_x(), f64::INFINITY),
            Err(HamiltonianError::BadHbar(_)),
        ));
    }

    #[test]
    fn operand_dimension_mismatch() {
        let ham = EigenSystem::new(sigma_x()).unwrap();
        let rho: nd::Array2<C64> = nd::Array2::zeros((3, 3));
        assert!(matches!(
            ham.site2eig(&rho),
            Err(HamiltonianError::Dimension(DimensionError { expected: 2, got: (3, 3) })),
        ));
        assert!(matches!(ham.eig2site(&rho), Err(HamiltonianError::Dimension(_))));
        assert!(matches!(ham.to_interaction(&rho, 1.0), Err(HamiltonianError::Dimension(_))));
    }
}
