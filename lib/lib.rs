#![allow(dead_code, non_snake_case)]

//! Time evolution of reduced density matrices (RDMs).
//!
//! A propagation method takes an initial RDM in the site basis of some system
//! and a window of times, and returns the trajectory of the RDM in both the
//! site basis and the eigenbasis of the system Hamiltonian. Methods implement
//! [`Propagate`][propagator::Propagate]; the only one provided here is
//! [`Unitary`][propagator::Unitary], for closed-system dynamics.
//!
//! Methods consume a system Hamiltonian only through the
//! [`HamiltonianSystem`][hamiltonian::HamiltonianSystem] trait.
//! [`EigenSystem`][hamiltonian::EigenSystem] implements it for a
//! time-independent Hermitian matrix.
//!
//! ```no_run
//! use ndarray as nd;
//! use num_complex::Complex64 as C64;
//! use rdm_unitary::{
//!     density,
//!     hamiltonian::EigenSystem,
//!     propagator::{ Propagate, Unitary },
//! };
//!
//! let H: nd::Array2<C64> = nd::array![
//!     [C64::from(0.0), C64::from(0.5)],
//!     [C64::from(0.5), C64::from(0.0)],
//! ];
//! let ham = EigenSystem::new(H).unwrap();
//! let rho0 = density::from_populations(&nd::array![1.0, 0.0]).unwrap();
//! let unitary = Unitary::new(&ham, false);
//! let traj = unitary.propagate(&rho0, 0.0, 10.0, 0.01, false).unwrap();
//! let pops = traj.populations_site();
//! ```
//!
//! Where unspecified, all energies are in units of `hbar` times angular
//! frequency, and stacked arrays carry time along their last axis.

pub mod error;
pub mod utils;
pub mod density;
pub mod hamiltonian;
pub mod propagator;
pub mod config;

pub use hamiltonian::{ EigenSystem, HamiltonianSystem };
pub use propagator::{ Propagate, Trajectory, Unitary };
pub use config::PropagationConfig;
