//! Simplified fourth-order biaxial anisotropy over the (u1, u2) axis pair.
//!
//! Shares the fourth-order uniaxial constant:
//! E = ku4 (S.u1)^2 (S.u2)^2.

use super::{AnisotropyTerm, TermContext};
use spin_math::vector::dot;

pub struct BiaxialFourthOrderSimple;

impl AnisotropyTerm for BiaxialFourthOrderSimple {
    fn name(&self) -> &'static str {
        "biaxial_fourth_order_simple"
    }

    fn energy(&self, ctx: &TermContext, _atom: usize, mat: usize, s: [f64; 3]) -> f64 {
        let m = &ctx.materials[mat];
        if m.ku4 == 0.0 {
            return 0.0;
        }
        let p1 = dot(s, m.u1_vector);
        let p2 = dot(s, m.u2_vector);
        m.ku4 * p1 * p1 * p2 * p2
    }

    fn field_at(&self, ctx: &TermContext, _atom: usize, mat: usize, s: [f64; 3]) -> [f64; 3] {
        let m = &ctx.materials[mat];
        if m.ku4 == 0.0 {
            return [0.0; 3];
        }
        let p1 = dot(s, m.u1_vector);
        let p2 = dot(s, m.u2_vector);
        let w1 = -2.0 * m.ku4 * p1 * p2 * p2;
        let w2 = -2.0 * m.ku4 * p1 * p1 * p2;
        [
            w1 * m.u1_vector[0] + w2 * m.u2_vector[0],
            w1 * m.u1_vector[1] + w2 * m.u2_vector[1],
            w1 * m.u1_vector[2] + w2 * m.u2_vector[2],
        ]
    }
}
