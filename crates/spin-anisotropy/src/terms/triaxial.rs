//! Triaxial anisotropy with three independent constants.
//!
//! Second order: E = kx a^2 + ky b^2 + kz d^2; fourth order uses fourth
//! powers. The fixed-basis variants project on the lab axes; the rotated
//! variants use the material basis, which is validated orthonormal at
//! initialisation.

use super::{AnisotropyTerm, TermContext};
use spin_math::vector::dot;

const LAB_BASIS: [[f64; 3]; 3] = [[1.0, 0.0, 0.0], [0.0, 1.0, 0.0], [0.0, 0.0, 1.0]];

pub struct TriaxialSecondOrder {
    pub rotated: bool,
}

impl AnisotropyTerm for TriaxialSecondOrder {
    fn name(&self) -> &'static str {
        if self.rotated {
            "triaxial_second_order_rotated"
        } else {
            "triaxial_second_order"
        }
    }

    fn energy(&self, ctx: &TermContext, _atom: usize, mat: usize, s: [f64; 3]) -> f64 {
        let m = &ctx.materials[mat];
        let k = m.kt2;
        if k == [0.0; 3] {
            return 0.0;
        }
        let basis = if self.rotated { &m.t2_basis } else { &LAB_BASIS };
        let mut e = 0.0;
        for (ka, axis) in k.iter().zip(basis.iter()) {
            let p = dot(s, *axis);
            e += ka * p * p;
        }
        e
    }

    fn field_at(&self, ctx: &TermContext, _atom: usize, mat: usize, s: [f64; 3]) -> [f64; 3] {
        let m = &ctx.materials[mat];
        let k = m.kt2;
        if k == [0.0; 3] {
            return [0.0; 3];
        }
        let basis = if self.rotated { &m.t2_basis } else { &LAB_BASIS };
        let mut h = [0.0; 3];
        for (ka, axis) in k.iter().zip(basis.iter()) {
            let w = -2.0 * ka * dot(s, *axis);
            h[0] += w * axis[0];
            h[1] += w * axis[1];
            h[2] += w * axis[2];
        }
        h
    }
}

pub struct TriaxialFourthOrder {
    pub rotated: bool,
}

impl AnisotropyTerm for TriaxialFourthOrder {
    fn name(&self) -> &'static str {
        if self.rotated {
            "triaxial_fourth_order_rotated"
        } else {
            "triaxial_fourth_order"
        }
    }

    fn energy(&self, ctx: &TermContext, _atom: usize, mat: usize, s: [f64; 3]) -> f64 {
        let m = &ctx.materials[mat];
        let k = m.kt4;
        if k == [0.0; 3] {
            return 0.0;
        }
        let basis = if self.rotated { &m.t4_basis } else { &LAB_BASIS };
        let mut e = 0.0;
        for (ka, axis) in k.iter().zip(basis.iter()) {
            let p = dot(s, *axis);
            e += ka * p.powi(4);
        }
        e
    }

    fn field_at(&self, ctx: &TermContext, _atom: usize, mat: usize, s: [f64; 3]) -> [f64; 3] {
        let m = &ctx.materials[mat];
        let k = m.kt4;
        if k == [0.0; 3] {
            return [0.0; 3];
        }
        let basis = if self.rotated { &m.t4_basis } else { &LAB_BASIS };
        let mut h = [0.0; 3];
        for (ka, axis) in k.iter().zip(basis.iter()) {
            let w = -4.0 * ka * dot(s, *axis).powi(3);
            h[0] += w * axis[0];
            h[1] += w * axis[1];
            h[2] += w * axis[2];
        }
        h
    }
}
