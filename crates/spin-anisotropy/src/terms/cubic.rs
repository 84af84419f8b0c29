//! Cubic anisotropy.
//!
//! Fourth order: E = (k/2)(a^4 + b^4 + d^4) over the three cubic axis
//! projections; sixth order: E = k a^2 b^2 d^2. A negative kc4 puts the
//! easy directions along the cube edges. The unrotated variants read the
//! lab-frame components directly.

use super::{AnisotropyTerm, TermContext};
use spin_math::vector::dot;

pub struct CubicFourthOrder;

impl AnisotropyTerm for CubicFourthOrder {
    fn name(&self) -> &'static str {
        "cubic_fourth_order"
    }

    fn energy(&self, ctx: &TermContext, _atom: usize, mat: usize, s: [f64; 3]) -> f64 {
        let k = ctx.materials[mat].kc4;
        if k == 0.0 {
            return 0.0;
        }
        0.5 * k * (s[0].powi(4) + s[1].powi(4) + s[2].powi(4))
    }

    fn field_at(&self, ctx: &TermContext, _atom: usize, mat: usize, s: [f64; 3]) -> [f64; 3] {
        let k = ctx.materials[mat].kc4;
        if k == 0.0 {
            return [0.0; 3];
        }
        let w = -2.0 * k;
        [w * s[0].powi(3), w * s[1].powi(3), w * s[2].powi(3)]
    }
}

/// Fourth-order cubic anisotropy in a rotated (per-material) axis frame.
pub struct CubicFourthOrderRotated;

impl AnisotropyTerm for CubicFourthOrderRotated {
    fn name(&self) -> &'static str {
        "cubic_fourth_order_rotation"
    }

    fn energy(&self, ctx: &TermContext, _atom: usize, mat: usize, s: [f64; 3]) -> f64 {
        let m = &ctx.materials[mat];
        if m.kc4 == 0.0 {
            return 0.0;
        }
        let a = dot(s, m.kc_vector1);
        let b = dot(s, m.kc_vector2);
        let d = dot(s, m.kc_vector3);
        0.5 * m.kc4 * (a.powi(4) + b.powi(4) + d.powi(4))
    }

    fn field_at(&self, ctx: &TermContext, _atom: usize, mat: usize, s: [f64; 3]) -> [f64; 3] {
        let m = &ctx.materials[mat];
        if m.kc4 == 0.0 {
            return [0.0; 3];
        }
        let a = dot(s, m.kc_vector1);
        let b = dot(s, m.kc_vector2);
        let d = dot(s, m.kc_vector3);
        let (wa, wb, wd) = (
            -2.0 * m.kc4 * a.powi(3),
            -2.0 * m.kc4 * b.powi(3),
            -2.0 * m.kc4 * d.powi(3),
        );
        [
            wa * m.kc_vector1[0] + wb * m.kc_vector2[0] + wd * m.kc_vector3[0],
            wa * m.kc_vector1[1] + wb * m.kc_vector2[1] + wd * m.kc_vector3[1],
            wa * m.kc_vector1[2] + wb * m.kc_vector2[2] + wd * m.kc_vector3[2],
        ]
    }
}

pub struct CubicSixthOrder;

impl AnisotropyTerm for CubicSixthOrder {
    fn name(&self) -> &'static str {
        "cubic_sixth_order"
    }

    fn energy(&self, ctx: &TermContext, _atom: usize, mat: usize, s: [f64; 3]) -> f64 {
        let k = ctx.materials[mat].kc6;
        if k == 0.0 {
            return 0.0;
        }
        k * s[0] * s[0] * s[1] * s[1] * s[2] * s[2]
    }

    fn field_at(&self, ctx: &TermContext, _atom: usize, mat: usize, s: [f64; 3]) -> [f64; 3] {
        let k = ctx.materials[mat].kc6;
        if k == 0.0 {
            return [0.0; 3];
        }
        let (x2, y2, z2) = (s[0] * s[0], s[1] * s[1], s[2] * s[2]);
        let w = -2.0 * k;
        [w * s[0] * y2 * z2, w * s[1] * x2 * z2, w * s[2] * x2 * y2]
    }
}
