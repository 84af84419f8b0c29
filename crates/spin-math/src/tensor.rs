//! Flattened 3x3 tensor utilities.
//!
//! Every tensor consumer in the engine uses the same index convention:
//! element (i, j) of atom a lives at `9*a + 3*i + j`.

use crate::vector::AXIS_TOL;

/// 1D index of element (i, j) of the per-atom tensor `atom`.
#[inline]
pub fn tensor_index(atom: usize, i: usize, j: usize) -> usize {
    9 * atom + 3 * i + j
}

/// 1D index of element (i, j) of a single flattened tensor.
#[inline]
pub fn flat_index(i: usize, j: usize) -> usize {
    3 * i + j
}

/// Accumulate the weighted outer product `w * e e^T` into a flattened tensor.
pub fn outer_accumulate(tensor: &mut [f64], e: [f64; 3], w: f64) {
    debug_assert!(tensor.len() >= 9);
    for i in 0..3 {
        for j in 0..3 {
            tensor[flat_index(i, j)] += w * e[i] * e[j];
        }
    }
}

/// Contract a flattened tensor with a vector: `(T v)_i = sum_j T_ij v_j`.
#[inline]
pub fn contract(tensor: &[f64], v: [f64; 3]) -> [f64; 3] {
    [
        tensor[0] * v[0] + tensor[1] * v[1] + tensor[2] * v[2],
        tensor[3] * v[0] + tensor[4] * v[1] + tensor[5] * v[2],
        tensor[6] * v[0] + tensor[7] * v[1] + tensor[8] * v[2],
    ]
}

/// Quadratic form `v^T T v` of a flattened tensor.
#[inline]
pub fn quadratic_form(tensor: &[f64], v: [f64; 3]) -> f64 {
    let tv = contract(tensor, v);
    v[0] * tv[0] + v[1] * tv[1] + v[2] * tv[2]
}

/// Whether a flattened tensor is symmetric to floating tolerance.
pub fn is_symmetric(tensor: &[f64]) -> bool {
    (tensor[1] - tensor[3]).abs() < AXIS_TOL
        && (tensor[2] - tensor[6]).abs() < AXIS_TOL
        && (tensor[5] - tensor[7]).abs() < AXIS_TOL
}
