//! Temperature-dependent lattice anisotropy.
//!
//! Uniaxial second-order shape with the constant taken from the
//! per-material interpolation table. The constants are refreshed once per
//! macroscopic temperature change, not once per atom.

use crate::material::MaterialAnisotropy;
use crate::terms::{AnisotropyTerm, TermContext};
use spin_math::vector::direction_cosine;

/// Recompute the per-material lattice constants for temperature `t`.
/// Materials without a table contribute zero.
pub(crate) fn refresh_constants(materials: &[MaterialAnisotropy], t: f64, out: &mut [f64]) {
    for (mat, slot) in materials.iter().zip(out.iter_mut()) {
        *slot = match &mat.lattice_table {
            Some(table) => mat.k_lattice * table.evaluate(t),
            None => 0.0,
        };
    }
}

pub struct LatticeAnisotropy;

impl AnisotropyTerm for LatticeAnisotropy {
    fn name(&self) -> &'static str {
        "lattice_anisotropy"
    }

    fn energy(&self, ctx: &TermContext, _atom: usize, mat: usize, s: [f64; 3]) -> f64 {
        let k = ctx.klattice[mat];
        if k == 0.0 {
            return 0.0;
        }
        let c = direction_cosine(s, ctx.materials[mat].ku_vector);
        k * c * c
    }

    fn field_at(&self, ctx: &TermContext, _atom: usize, mat: usize, s: [f64; 3]) -> [f64; 3] {
        let k = ctx.klattice[mat];
        if k == 0.0 {
            return [0.0; 3];
        }
        let e = ctx.materials[mat].ku_vector;
        let c = direction_cosine(s, e);
        let w = -2.0 * k * c;
        [w * e[0], w * e[1], w * e[2]]
    }
}
