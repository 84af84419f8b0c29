//! Uniaxial anisotropy, second/fourth/sixth order in the easy-axis cosine.
//!
//! E_n = k_n (S.e)^n, H_n = -n k_n (S.e)^(n-1) e. A negative constant
//! makes the axis the energy minimum (easy axis).

use super::{AnisotropyTerm, TermContext};
use spin_math::vector::direction_cosine;

/// Easy axis for the second-order term: the per-atom random axis when the
/// material requests random anisotropy, the material axis otherwise.
#[inline]
fn easy_axis(ctx: &TermContext, atom: usize, mat: usize) -> [f64; 3] {
    let m = &ctx.materials[mat];
    if m.random_anisotropy || m.random_grain_anisotropy {
        if let Some(axes) = ctx.atom_axes {
            return [axes[[atom, 0]], axes[[atom, 1]], axes[[atom, 2]]];
        }
    }
    m.ku_vector
}

pub struct UniaxialSecondOrder;

impl AnisotropyTerm for UniaxialSecondOrder {
    fn name(&self) -> &'static str {
        "uniaxial_second_order"
    }

    fn energy(&self, ctx: &TermContext, atom: usize, mat: usize, s: [f64; 3]) -> f64 {
        let k = ctx.materials[mat].ku2;
        if k == 0.0 {
            return 0.0;
        }
        let c = direction_cosine(s, easy_axis(ctx, atom, mat));
        k * c * c
    }

    fn field_at(&self, ctx: &TermContext, atom: usize, mat: usize, s: [f64; 3]) -> [f64; 3] {
        let k = ctx.materials[mat].ku2;
        if k == 0.0 {
            return [0.0; 3];
        }
        let e = easy_axis(ctx, atom, mat);
        let c = direction_cosine(s, e);
        let w = -2.0 * k * c;
        [w * e[0], w * e[1], w * e[2]]
    }
}

pub struct UniaxialFourthOrder;

impl AnisotropyTerm for UniaxialFourthOrder {
    fn name(&self) -> &'static str {
        "uniaxial_fourth_order"
    }

    fn energy(&self, ctx: &TermContext, _atom: usize, mat: usize, s: [f64; 3]) -> f64 {
        let m = &ctx.materials[mat];
        if m.ku4 == 0.0 {
            return 0.0;
        }
        let c = direction_cosine(s, m.ku_vector);
        m.ku4 * c.powi(4)
    }

    fn field_at(&self, ctx: &TermContext, _atom: usize, mat: usize, s: [f64; 3]) -> [f64; 3] {
        let m = &ctx.materials[mat];
        if m.ku4 == 0.0 {
            return [0.0; 3];
        }
        let e = m.ku_vector;
        let c = direction_cosine(s, e);
        let w = -4.0 * m.ku4 * c.powi(3);
        [w * e[0], w * e[1], w * e[2]]
    }
}

pub struct UniaxialSixthOrder;

impl AnisotropyTerm for UniaxialSixthOrder {
    fn name(&self) -> &'static str {
        "uniaxial_sixth_order"
    }

    fn energy(&self, ctx: &TermContext, _atom: usize, mat: usize, s: [f64; 3]) -> f64 {
        let m = &ctx.materials[mat];
        if m.ku6 == 0.0 {
            return 0.0;
        }
        let c = direction_cosine(s, m.ku_vector);
        m.ku6 * c.powi(6)
    }

    fn field_at(&self, ctx: &TermContext, _atom: usize, mat: usize, s: [f64; 3]) -> [f64; 3] {
        let m = &ctx.materials[mat];
        if m.ku6 == 0.0 {
            return [0.0; 3];
        }
        let e = m.ku_vector;
        let c = direction_cosine(s, e);
        let w = -6.0 * m.ku6 * c.powi(5);
        [w * e[0], w * e[1], w * e[2]]
    }
}
