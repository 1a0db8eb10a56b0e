//! Propagation settings loaded from TOML.
//!
//! ```toml
//! t_init = 0.0
//! t_final = 10.0
//! dt = 0.01
//! verbose = true   # optional, default false
//! hbar = 1.0       # optional, default 1.0
//! ```
//!
//! The time window is not validated here. A degenerate window is a legal
//! request for an empty trajectory.

use std::{ fs, path::Path };
use ndarray as nd;
use num_complex::Complex64 as C64;
use serde::Deserialize;
use crate::{
    error::{ ConfigError, HamiltonianError },
    hamiltonian::EigenSystem,
};

pub type ConfigResult<T> = Result<T, ConfigError>;

fn def_hbar() -> f64 { 1.0 }

/// Time window and reporting options for a propagation run.
#[derive(Copy, Clone, Debug, PartialEq, Deserialize)]
pub struct PropagationConfig {
    pub t_init: f64,
    pub t_final: f64,
    pub dt: f64,
    #[serde(default)]
    pub verbose: bool,
    #[serde(default = "def_hbar")]
    pub hbar: f64,
}

impl PropagationConfig {
    /// Create a new, non-verbose `PropagationConfig` with `hbar = 1`.
    pub fn new(t_init: f64, t_final: f64, dt: f64) -> Self {
        Self { t_init, t_final, dt, verbose: false, hbar: def_hbar() }
    }

    /// Parse from a TOML string.
    pub fn from_toml_str(s: &str) -> ConfigResult<Self> {
        Ok(toml::from_str(s)?)
    }

    /// Read and parse a TOML file.
    pub fn load<P>(path: P) -> ConfigResult<Self>
    where P: AsRef<Path>
    {
        let path = path.as_ref();
        let contents = fs::read_to_string(path)?;
        let config = Self::from_toml_str(&contents)?;
        tracing::debug!(path = %path.display(), ?config, "loaded propagation config");
        Ok(config)
    }

    /// Diagonalize a Hamiltonian using the configured value of `hbar`.
    pub fn eigen_system(&self, H: nd::Array2<C64>)
        -> Result<EigenSystem, HamiltonianError>
    {
        EigenSystem::with_hbar(H, self.hbar)
    }
}
