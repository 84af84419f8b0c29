//! Term registry: every anisotropy family implements one `{energy, field}`
//! capability pair, and the enabled set is resolved once at initialisation.
//! Terms write additively and never read each other's output, so the
//! evaluation order among terms is irrelevant.

pub mod biaxial;
pub mod cubic;
pub mod rotational;
pub mod triaxial;
pub mod uniaxial;

use crate::material::MaterialAnisotropy;
use crate::neel::NeelAnisotropy;
use crate::lattice::LatticeAnisotropy;
use ndarray::Array2;
use spin_types::config::TermFlags;

use biaxial::BiaxialFourthOrderSimple;
use cubic::{CubicFourthOrder, CubicFourthOrderRotated, CubicSixthOrder};
use rotational::Rotational;
use triaxial::{TriaxialFourthOrder, TriaxialSecondOrder};
use uniaxial::{UniaxialFourthOrder, UniaxialSecondOrder, UniaxialSixthOrder};

/// Read-only per-atom spin components.
#[derive(Clone, Copy)]
pub struct SpinSlices<'a> {
    pub x: &'a [f64],
    pub y: &'a [f64],
    pub z: &'a [f64],
}

/// Output field components covering one atom range; index = atom - start.
pub struct FieldSlices<'a> {
    pub x: &'a mut [f64],
    pub y: &'a mut [f64],
    pub z: &'a mut [f64],
}

/// Shared evaluation context handed to every term.
pub struct TermContext<'a> {
    pub materials: &'a [MaterialAnisotropy],
    /// 1D collapsed per-atom Neel tensors, element (i, j) of atom a at
    /// `9*a + 3*i + j`.
    pub neel_tensor: Option<&'a [f64]>,
    /// Per-material lattice anisotropy constants at the current temperature.
    pub klattice: &'a [f64],
    /// Per-atom easy axes when random anisotropy is active, shape
    /// (num_atoms, 3).
    pub atom_axes: Option<&'a Array2<f64>>,
}

/// One anisotropy term family: energy for a single atom and the matching
/// analytic field (the negative energy gradient with respect to the spin).
pub trait AnisotropyTerm: Send + Sync {
    fn name(&self) -> &'static str;

    fn energy(&self, ctx: &TermContext, atom: usize, mat: usize, s: [f64; 3]) -> f64;

    fn field_at(&self, ctx: &TermContext, atom: usize, mat: usize, s: [f64; 3]) -> [f64; 3];

    /// Add this term's field for atoms in `start..end` into `out`, whose
    /// slices cover exactly that range.
    fn field(
        &self,
        ctx: &TermContext,
        start: usize,
        end: usize,
        spins: &SpinSlices,
        mats: &[u32],
        out: &mut FieldSlices,
    ) {
        for atom in start..end {
            let s = [spins.x[atom], spins.y[atom], spins.z[atom]];
            let h = self.field_at(ctx, atom, mats[atom] as usize, s);
            let k = atom - start;
            out.x[k] += h[0];
            out.y[k] += h[1];
            out.z[k] += h[2];
        }
    }
}

/// Instantiate the enabled term set.
pub fn build_registry(flags: &TermFlags) -> Vec<Box<dyn AnisotropyTerm>> {
    let mut terms: Vec<Box<dyn AnisotropyTerm>> = Vec::new();

    if flags.uniaxial_second_order {
        terms.push(Box::new(UniaxialSecondOrder));
    }
    if flags.uniaxial_fourth_order {
        terms.push(Box::new(UniaxialFourthOrder));
    }
    if flags.uniaxial_sixth_order {
        terms.push(Box::new(UniaxialSixthOrder));
    }

    let rotational: [(bool, u8, u8, bool); 24] = [
        (flags.rotational_2_1, 2, 1, false),
        (flags.rotational_2_1_odd, 2, 1, true),
        (flags.rotational_2_2, 2, 2, false),
        (flags.rotational_2_2_odd, 2, 2, true),
        (flags.rotational_4_1, 4, 1, false),
        (flags.rotational_4_1_odd, 4, 1, true),
        (flags.rotational_4_2, 4, 2, false),
        (flags.rotational_4_2_odd, 4, 2, true),
        (flags.rotational_4_3, 4, 3, false),
        (flags.rotational_4_3_odd, 4, 3, true),
        (flags.rotational_4_4, 4, 4, false),
        (flags.rotational_4_4_odd, 4, 4, true),
        (flags.rotational_6_1, 6, 1, false),
        (flags.rotational_6_1_odd, 6, 1, true),
        (flags.rotational_6_2, 6, 2, false),
        (flags.rotational_6_2_odd, 6, 2, true),
        (flags.rotational_6_3, 6, 3, false),
        (flags.rotational_6_3_odd, 6, 3, true),
        (flags.rotational_6_4, 6, 4, false),
        (flags.rotational_6_4_odd, 6, 4, true),
        (flags.rotational_6_5, 6, 5, false),
        (flags.rotational_6_5_odd, 6, 5, true),
        (flags.rotational_6_6, 6, 6, false),
        (flags.rotational_6_6_odd, 6, 6, true),
    ];
    for &(enabled, theta, phi, odd) in &rotational {
        if enabled {
            terms.push(Box::new(Rotational::new(theta, phi, odd)));
        }
    }

    if flags.biaxial_fourth_order_simple {
        terms.push(Box::new(BiaxialFourthOrderSimple));
    }
    if flags.cubic_fourth_order {
        terms.push(Box::new(CubicFourthOrder));
    }
    if flags.cubic_fourth_order_rotation {
        terms.push(Box::new(CubicFourthOrderRotated));
    }
    if flags.cubic_sixth_order {
        terms.push(Box::new(CubicSixthOrder));
    }
    if flags.triaxial_second_order {
        terms.push(Box::new(TriaxialSecondOrder { rotated: false }));
    }
    if flags.triaxial_second_order_rotated {
        terms.push(Box::new(TriaxialSecondOrder { rotated: true }));
    }
    if flags.triaxial_fourth_order {
        terms.push(Box::new(TriaxialFourthOrder { rotated: false }));
    }
    if flags.triaxial_fourth_order_rotated {
        terms.push(Box::new(TriaxialFourthOrder { rotated: true }));
    }
    if flags.neel_anisotropy {
        terms.push(Box::new(NeelAnisotropy));
    }
    if flags.lattice_anisotropy {
        terms.push(Box::new(LatticeAnisotropy));
    }

    terms
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_flags_empty_registry() {
        let terms = build_registry(&TermFlags::default());
        assert!(terms.is_empty());
    }

    #[test]
    fn test_registry_counts() {
        let flags = TermFlags {
            uniaxial_second_order: true,
            rotational_4_3_odd: true,
            cubic_fourth_order: true,
            neel_anisotropy: true,
            lattice_anisotropy: true,
            ..TermFlags::default()
        };
        let terms = build_registry(&flags);
        assert_eq!(terms.len(), 5);
        let names: Vec<_> = terms.iter().map(|t| t.name()).collect();
        assert!(names.contains(&"uniaxial_second_order"));
        assert!(names.contains(&"rotational_4_3_odd"));
        assert!(names.contains(&"neel_anisotropy"));
    }
}
