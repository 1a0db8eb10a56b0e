//! Collection of all error types.
//!
//! All errors derive [`thiserror::Error`]. Propagators define no error type of
//! their own and instead pass through the error type of the
//! [`HamiltonianSystem`][crate::hamiltonian::HamiltonianSystem] they are given.

use ndarray as nd;
use ndarray_linalg::error::LinalgError;
use thiserror::Error;

/// Returned when a matrix operand does not have the shape required by an
/// operation.
#[derive(Debug, Error)]
#[error("expected a {}x{} matrix; got {}x{}", .expected, .expected, .got.0, .got.1)]
pub struct DimensionError {
    pub expected: usize,
    pub got: (usize, usize),
}

impl DimensionError {
    pub(crate) fn check<S, A>(a: &nd::ArrayBase<S, nd::Ix2>, n: usize)
        -> Result<(), Self>
    where S: nd::Data<Elem = A>
    {
        let got = a.dim();
        (got == (n, n)).then_some(()).ok_or(Self { expected: n, got })
    }
}

/// Returned from construction and operations of
/// [`EigenSystem`][crate::hamiltonian::EigenSystem].
#[derive(Debug, Error)]
pub enum HamiltonianError {
    /// Returned when a Hamiltonian matrix is not square.
    #[error("hamiltonian must be square; got {0}x{1}")]
    NotSquare(usize, usize),

    /// Returned when a Hamiltonian matrix contains NaN or infinite elements.
    #[error("hamiltonian contains non-finite elements")]
    NonFinite,

    /// Returned when a Hamiltonian matrix is not Hermitian; holds the largest
    /// deviation `|H_ij - conj(H_ji)|`.
    #[error("hamiltonian must be hermitian; max deviation {0:e}")]
    NotHermitian(f64),

    /// Returned when a non-positive or non-finite `hbar` is encountered.
    #[error("hbar must be positive and finite; got {0}")]
    BadHbar(f64),

    /// Returned when an operand does not match the dimension of the basis.
    #[error("dimension error: {0}")]
    Dimension(#[from] DimensionError),

    /// [`LinalgError`].
    #[error("linalg error: {0}")]
    Linalg(#[from] LinalgError),
}

impl HamiltonianError {
    pub(crate) fn check_hbar(hbar: f64) -> Result<(), Self> {
        (hbar.is_finite() && hbar > 0.0).then_some(()).ok_or(Self::BadHbar(hbar))
    }
}

/// Returned from constructors in [`density`][crate::density].
#[derive(Debug, Error)]
pub enum DensityError {
    /// Returned when a state vector or population list is empty.
    #[error("cannot build a density matrix from an empty array")]
    Empty,

    /// Returned when a state vector or population list has zero total weight.
    #[error("cannot normalize a state with zero norm")]
    ZeroNorm,

    /// Returned when a population is negative or non-finite.
    #[error("populations must be finite and non-negative; got {0} at index {1}")]
    BadPopulation(f64, usize),
}

/// Returned from [`PropagationConfig`][crate::config::PropagationConfig]
/// loaders.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Returned when the configuration file could not be read.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// Returned when the configuration file is not valid TOML or is missing
    /// required fields.
    #[error("toml error: {0}")]
    Toml(#[from] toml::de::Error),
}
