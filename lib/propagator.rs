//! Propagation methods for reduced density matrices.
//!
//! Every method implements [`Propagate`], producing a [`Trajectory`] from an
//! initial RDM and a time window `[t_init, t_final)` sampled every `dt`.

use ndarray as nd;
use num_complex::Complex64 as C64;
use tracing::info;
use crate::{
    config::PropagationConfig,
    density::trace,
    hamiltonian::HamiltonianSystem,
    utils::{ arange, stack_time },
};

/// Time-ordered RDMs produced by a [`Propagate`] method.
///
/// The three sequences are parallel: the `k`-th site-basis and eigenbasis
/// matrices are both the state at `times[k]`.
#[derive(Clone, Debug, PartialEq)]
pub struct Trajectory {
    pub times: nd::Array1<f64>,
    pub rhos_site: Vec<nd::Array2<C64>>,
    pub rhos_eig: Vec<nd::Array2<C64>>,
}

impl Trajectory {
    // empty trajectory with room for every time point
    fn with_capacity(times: nd::Array1<f64>) -> Self {
        let n = times.len();
        Self {
            times,
            rhos_site: Vec::with_capacity(n),
            rhos_eig: Vec::with_capacity(n),
        }
    }

    /// Return the number of time points.
    pub fn len(&self) -> usize { self.times.len() }

    /// Return `true` if there are no time points.
    pub fn is_empty(&self) -> bool { self.times.is_empty() }

    /// Iterate over `(time, site-basis RDM, eigenbasis RDM)` triples in time
    /// order.
    pub fn iter(&self)
        -> impl Iterator<Item = (f64, &nd::Array2<C64>, &nd::Array2<C64>)> + '_
    {
        self.times.iter().copied()
            .zip(self.rhos_site.iter())
            .zip(self.rhos_eig.iter())
            .map(|((t, s), e)| (t, s, e))
    }

    /// Stack the site-basis RDMs into a 3D array with time along the last
    /// axis, or `None` if empty.
    pub fn site_array(&self) -> Option<nd::Array3<C64>> {
        stack_time(&self.rhos_site)
    }

    /// Stack the eigenbasis RDMs into a 3D array with time along the last
    /// axis, or `None` if empty.
    pub fn eig_array(&self) -> Option<nd::Array3<C64>> {
        stack_time(&self.rhos_eig)
    }

    /// Return site-basis populations as a 2D array with time along the last
    /// axis.
    pub fn populations_site(&self) -> nd::Array2<f64> {
        populations(&self.rhos_site)
    }

    /// Return eigenbasis populations as a 2D array with time along the last
    /// axis.
    pub fn populations_eig(&self) -> nd::Array2<f64> {
        populations(&self.rhos_eig)
    }

    /// Return the trace of each site-basis RDM.
    pub fn traces(&self) -> nd::Array1<C64> {
        self.rhos_site.iter().map(trace).collect()
    }
}

fn populations(rhos: &[nd::Array2<C64>]) -> nd::Array2<f64> {
    let n = rhos.first().map(|rho| rho.nrows()).unwrap_or(0);
    let mut P: nd::Array2<f64> = nd::Array2::zeros((n, rhos.len()));
    let iter = rhos.iter().zip(P.axis_iter_mut(nd::Axis(1)));
    for (rho, mut Pk) in iter {
        Pk.iter_mut().zip(rho.diag())
            .for_each(|(p, r)| { *p = r.re; });
    }
    P
}

/// Capability shared by all RDM propagation methods.
pub trait Propagate {
    /// Error type returned by [`Self::propagate`].
    type Error;

    /// Perform any precomputation required before propagating.
    ///
    /// Methods requiring none keep the provided no-op.
    fn setup(&mut self) { }

    /// Propagate `rho_0` (in the site basis) over the times
    /// [`arange`]`(t_init, t_final, dt)`.
    ///
    /// A degenerate window (`dt <= 0` or `t_final <= t_init`) gives an empty
    /// [`Trajectory`].
    fn propagate(
        &self,
        rho_0: &nd::Array2<C64>,
        t_init: f64,
        t_final: f64,
        dt: f64,
        is_verbose: bool,
    ) -> Result<Trajectory, Self::Error>;

    /// Call [`Self::propagate`] with the time window and verbosity given by a
    /// [`PropagationConfig`].
    fn propagate_with(&self, rho_0: &nd::Array2<C64>, config: &PropagationConfig)
        -> Result<Trajectory, Self::Error>
    {
        let PropagationConfig { t_init, t_final, dt, verbose, .. } = *config;
        self.propagate(rho_0, t_init, t_final, dt, verbose)
    }
}

/// Closed-system (unitary) dynamics.
///
/// The initial RDM is transformed into the eigenbasis once, and the state at
/// each time is computed from that fixed reference directly, so errors do not
/// accumulate over the trajectory.
#[derive(Clone, Debug)]
pub struct Unitary<'a, H>
where H: HamiltonianSystem
{
    ham: &'a H,
}

impl<'a, H> Unitary<'a, H>
where H: HamiltonianSystem
{
    /// Create a new `Unitary`.
    pub fn new(ham: &'a H, is_verbose: bool) -> Self {
        if is_verbose {
            info!("PERFORMING UNITARY DYNAMICS");
        }
        Self { ham }
    }

    /// Get a reference to the Hamiltonian system.
    pub fn ham(&self) -> &'a H { self.ham }
}

impl<'a, H> Propagate for Unitary<'a, H>
where H: HamiltonianSystem
{
    type Error = H::Error;

    fn propagate(
        &self,
        rho_0: &nd::Array2<C64>,
        t_init: f64,
        t_final: f64,
        dt: f64,
        is_verbose: bool,
    ) -> Result<Trajectory, Self::Error>
    {
        let times = arange(t_init, t_final, dt);
        let rho_0_eig = self.ham.site2eig(rho_0)?;
        let mut traj = Trajectory::with_capacity(times.clone());
        for &tk in times.iter() {
            tracing::trace!(t = tk, "unitary step");
            let rho_eig = self.ham.to_interaction(&rho_0_eig, tk)?;
            let rho_site = self.ham.eig2site(&rho_eig)?;
            traj.rhos_eig.push(rho_eig);
            traj.rhos_site.push(rho_site);
        }
        if is_verbose {
            info!(steps = traj.len(), "finished performing RDM dynamics");
        }
        Ok(traj)
    }
}
