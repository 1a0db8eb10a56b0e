//! Miscellaneous tools.

use ndarray as nd;
use num_complex::Complex64 as C64;

/// Generate evenly spaced values over the half-open interval `[start, stop)`
/// separated by `step`.
///
/// The number of values is `ceil((stop - start) / step)` and the `k`-th value
/// is `start + k * step`, computed directly from `start` rather than by
/// repeated addition. A trailing value that rounds onto or past `stop` is
/// dropped, so every element is strictly less than `stop`.
///
/// Returns an empty array if `step <= 0`, `stop <= start`, or any argument is
/// non-finite.
pub fn arange(start: f64, stop: f64, step: f64) -> nd::Array1<f64> {
    let finite = start.is_finite() && stop.is_finite() && step.is_finite();
    if !finite || step <= 0.0 || stop <= start {
        return nd::Array1::zeros(0);
    }
    let n = ((stop - start) / step).ceil() as usize;
    (0..n)
        .map(|k| start + (k as f64) * step)
        .take_while(|tk| *tk < stop)
        .collect()
}

/// Return the conjugate transpose of a matrix.
pub fn adjoint<S>(A: &nd::ArrayBase<S, nd::Ix2>) -> nd::Array2<C64>
where S: nd::Data<Elem = C64>
{
    A.t().mapv(|a| a.conj())
}

/// Compute the commutator `[A, B] = A B - B A`.
///
/// *Panics if the matrices are not square with equal dimension*.
pub fn commutator<S, T>(
    A: &nd::ArrayBase<S, nd::Ix2>,
    B: &nd::ArrayBase<T, nd::Ix2>,
) -> nd::Array2<C64>
where
    S: nd::Data<Elem = C64>,
    T: nd::Data<Elem = C64>,
{
    A.dot(B) - B.dot(A)
}

/// Stack a series of square matrices along a new last axis.
///
/// Returns `None` if `arrays` is empty or the matrices have unequal shapes.
pub fn stack_time(arrays: &[nd::Array2<C64>]) -> Option<nd::Array3<C64>> {
    if arrays.is_empty() { return None; }
    nd::stack(
        nd::Axis(2),
        &arrays.iter().map(|arr| arr.view()).collect::<Vec<_>>(),
    )
    .ok()
}
