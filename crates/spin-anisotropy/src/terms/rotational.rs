//! Rotational (azimuthal harmonic) anisotropy.
//!
//! One family per (theta order n, phi order m, parity). With the local
//! projections c = S.ku, sr = S.kr, sl = S.kl and the harmonic polynomials
//! Cm + i Sm = (sr + i sl)^m, the energy is
//!
//!   even: E = k c^(n-m) Cm      (= k cos^(n-m)theta sin^m theta cos(m phi))
//!   odd:  E = k c^(n-m) Sm      (sin(m phi) variant)
//!
//! and the field is the exact negative polynomial gradient:
//!
//!   H = -k (n-m) c^(n-m-1) {Cm|Sm} ku
//!     - k m c^(n-m) ({C(m-1)|S(m-1)} kr -+ {S(m-1)|C(m-1)} kl)
//!
//! using dCm/dsr = m C(m-1), dCm/dsl = -m S(m-1), dSm/dsr = m S(m-1),
//! dSm/dsl = m C(m-1).

use super::{AnisotropyTerm, TermContext};
use spin_math::vector::{direction_cosine, dot};

pub struct Rotational {
    theta: u8,
    phi: u8,
    odd: bool,
}

impl Rotational {
    pub fn new(theta: u8, phi: u8, odd: bool) -> Self {
        debug_assert!(matches!(theta, 2 | 4 | 6));
        debug_assert!(phi >= 1 && phi <= theta);
        Rotational { theta, phi, odd }
    }
}

/// Cos/sin harmonic polynomials of order m and m-1 from the in-plane
/// projections: returns (C(m-1), S(m-1), Cm, Sm).
#[inline]
fn harmonics(m: u8, sr: f64, sl: f64) -> (f64, f64, f64, f64) {
    let mut c_prev = 1.0;
    let mut s_prev = 0.0;
    let mut c = 1.0;
    let mut s = 0.0;
    for _ in 0..m {
        c_prev = c;
        s_prev = s;
        c = c_prev * sr - s_prev * sl;
        s = c_prev * sl + s_prev * sr;
    }
    (c_prev, s_prev, c, s)
}

impl AnisotropyTerm for Rotational {
    fn name(&self) -> &'static str {
        match (self.theta, self.phi, self.odd) {
            (2, 1, false) => "rotational_2_1",
            (2, 1, true) => "rotational_2_1_odd",
            (2, 2, false) => "rotational_2_2",
            (2, 2, true) => "rotational_2_2_odd",
            (4, 1, false) => "rotational_4_1",
            (4, 1, true) => "rotational_4_1_odd",
            (4, 2, false) => "rotational_4_2",
            (4, 2, true) => "rotational_4_2_odd",
            (4, 3, false) => "rotational_4_3",
            (4, 3, true) => "rotational_4_3_odd",
            (4, 4, false) => "rotational_4_4",
            (4, 4, true) => "rotational_4_4_odd",
            (6, 1, false) => "rotational_6_1",
            (6, 1, true) => "rotational_6_1_odd",
            (6, 2, false) => "rotational_6_2",
            (6, 2, true) => "rotational_6_2_odd",
            (6, 3, false) => "rotational_6_3",
            (6, 3, true) => "rotational_6_3_odd",
            (6, 4, false) => "rotational_6_4",
            (6, 4, true) => "rotational_6_4_odd",
            (6, 5, false) => "rotational_6_5",
            (6, 5, true) => "rotational_6_5_odd",
            (6, 6, false) => "rotational_6_6",
            (6, 6, true) => "rotational_6_6_odd",
            _ => "rotational",
        }
    }

    fn energy(&self, ctx: &TermContext, _atom: usize, mat: usize, s: [f64; 3]) -> f64 {
        let m = &ctx.materials[mat];
        let k = m.rotational_constant(self.theta, self.phi, self.odd);
        if k == 0.0 {
            return 0.0;
        }
        let c = direction_cosine(s, m.ku_vector);
        let sr = dot(s, m.kr_vector);
        let sl = dot(s, m.kl_vector);
        let (_, _, cm, sm) = harmonics(self.phi, sr, sl);
        let harmonic = if self.odd { sm } else { cm };
        k * c.powi((self.theta - self.phi) as i32) * harmonic
    }

    fn field_at(&self, ctx: &TermContext, _atom: usize, mat: usize, s: [f64; 3]) -> [f64; 3] {
        let m = &ctx.materials[mat];
        let k = m.rotational_constant(self.theta, self.phi, self.odd);
        if k == 0.0 {
            return [0.0; 3];
        }
        let ku = m.ku_vector;
        let kr = m.kr_vector;
        let kl = m.kl_vector;
        let c = direction_cosine(s, ku);
        let sr = dot(s, kr);
        let sl = dot(s, kl);
        let (cm1, sm1, cm, sm) = harmonics(self.phi, sr, sl);

        let nm = self.theta - self.phi;
        let harmonic = if self.odd { sm } else { cm };
        let axial = if nm > 0 {
            -k * f64::from(nm) * c.powi(i32::from(nm) - 1) * harmonic
        } else {
            0.0
        };
        let planar = -k * f64::from(self.phi) * c.powi(i32::from(nm));
        // Gradient of the harmonic polynomial in the (kr, kl) plane.
        let (gr, gl) = if self.odd {
            (sm1, cm1)
        } else {
            (cm1, -sm1)
        };

        [
            axial * ku[0] + planar * (gr * kr[0] + gl * kl[0]),
            axial * ku[1] + planar * (gr * kr[1] + gl * kl[1]),
            axial * ku[2] + planar * (gr * kr[2] + gl * kl[2]),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_harmonic_recurrence() {
        let (sr, sl) = (0.3, -0.4);
        // m = 1: C1 = sr, S1 = sl
        let (c0, s0, c1, s1) = harmonics(1, sr, sl);
        assert!((c0 - 1.0).abs() < 1e-15);
        assert!(s0.abs() < 1e-15);
        assert!((c1 - sr).abs() < 1e-15);
        assert!((s1 - sl).abs() < 1e-15);
        // m = 2: C2 = sr^2 - sl^2, S2 = 2 sr sl
        let (_, _, c2, s2) = harmonics(2, sr, sl);
        assert!((c2 - (sr * sr - sl * sl)).abs() < 1e-15);
        assert!((s2 - 2.0 * sr * sl).abs() < 1e-15);
        // m = 3: C3 = sr^3 - 3 sr sl^2, S3 = 3 sr^2 sl - sl^3
        let (c2b, s2b, c3, s3) = harmonics(3, sr, sl);
        assert!((c2b - c2).abs() < 1e-15);
        assert!((s2b - s2).abs() < 1e-15);
        assert!((c3 - (sr.powi(3) - 3.0 * sr * sl * sl)).abs() < 1e-15);
        assert!((s3 - (3.0 * sr * sr * sl - sl.powi(3))).abs() < 1e-15);
    }

    #[test]
    fn test_harmonic_matches_angle_form() {
        // On the unit circle, Cm = cos(m phi) and Sm = sin(m phi).
        let phi = 0.73_f64;
        let (sr, sl) = (phi.cos(), phi.sin());
        for m in 1..=6u8 {
            let (_, _, cm, sm) = harmonics(m, sr, sl);
            assert!(
                (cm - (f64::from(m) * phi).cos()).abs() < 1e-12,
                "C{m} mismatch"
            );
            assert!(
                (sm - (f64::from(m) * phi).sin()).abs() < 1e-12,
                "S{m} mismatch"
            );
        }
    }
}
