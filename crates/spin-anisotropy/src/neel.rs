// ─────────────────────────────────────────────────────────────────────
// SCPN Spin Dynamics — Neel Surface Anisotropy
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
//! Pairwise Neel (surface) anisotropy.
//!
//! The per-atom rank-2 tensor is built once from the static neighbour
//! topology: atoms whose nearest-neighbour coordination falls below the
//! threshold are surface atoms and accumulate an outer product of each
//! bond direction, weighted by the material-pair constant. Bulk atoms get
//! a zero tensor. Evaluation is a tensor contraction:
//! H = T S, E = -1/2 S.T.S.

use crate::material::MaterialAnisotropy;
use crate::terms::{AnisotropyTerm, TermContext};
use spin_math::tensor::{contract, outer_accumulate, quadratic_form, tensor_index};
use spin_types::config::NeelConfig;
use spin_types::error::{SpinError, SpinResult};
use spin_types::topology::BondTopology;

/// Resolved Neel settings, consistency-checked against the material set.
#[derive(Debug, Clone)]
pub struct NeelSettings {
    pub per_material_threshold: bool,
    pub threshold: u32,
    pub nearest_neighbour_distance: f64,
    pub range_dependent: bool,
    pub exponential_range: f64,
    pub exponential_factor: f64,
}

impl NeelSettings {
    pub fn from_config(
        config: &NeelConfig,
        materials: &[MaterialAnisotropy],
    ) -> SpinResult<Self> {
        let nn_distance = config.nearest_neighbour_distance.unwrap_or(f64::INFINITY);
        if !(nn_distance > 0.0) {
            return Err(SpinError::Config(format!(
                "Neel nearest-neighbour distance must be positive, got {nn_distance}"
            )));
        }
        if config.per_material_threshold {
            if materials.iter().all(|m| m.neel_threshold == 0) {
                return Err(SpinError::Config(
                    "per-material Neel thresholds selected but every material threshold is 0"
                        .to_string(),
                ));
            }
        } else if config.threshold == 0 {
            return Err(SpinError::Config(
                "Neel anisotropy enabled but the global coordination threshold is 0".to_string(),
            ));
        }
        if config.range_dependent && !(config.exponential_range > 0.0) {
            return Err(SpinError::Config(format!(
                "Neel exponential range r0 must be positive, got {}",
                config.exponential_range
            )));
        }
        Ok(NeelSettings {
            per_material_threshold: config.per_material_threshold,
            threshold: config.threshold,
            nearest_neighbour_distance: nn_distance,
            range_dependent: config.range_dependent,
            exponential_range: config.exponential_range,
            exponential_factor: config.exponential_factor,
        })
    }
}

/// Construction statistics returned instead of log output.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NeelBuildSummary {
    pub atoms: usize,
    pub surface_atoms: usize,
    pub bonds_used: usize,
}

/// Build the 1D collapsed per-atom Neel tensor table; element (i, j) of
/// atom a lives at `tensor_index(a, i, j)`.
pub fn build_neel_tensor(
    topology: &dyn BondTopology,
    atom_materials: &[u32],
    materials: &[MaterialAnisotropy],
    settings: &NeelSettings,
) -> SpinResult<(Vec<f64>, NeelBuildSummary)> {
    let num_atoms = topology.num_atoms();
    if atom_materials.len() != num_atoms {
        return Err(SpinError::LengthMismatch {
            name: "atom_materials",
            expected: num_atoms,
            got: atom_materials.len(),
        });
    }

    let mut tensor = vec![0.0; 9 * num_atoms];
    let mut surface_atoms = 0;
    let mut bonds_used = 0;

    for atom in 0..num_atoms {
        let mat = atom_materials[atom] as usize;
        if mat >= materials.len() {
            return Err(SpinError::MaterialOutOfRange {
                index: mat,
                count: materials.len(),
            });
        }
        let material = &materials[mat];

        let bonds = topology.bonds(atom);
        let nn: Vec<_> = bonds
            .iter()
            .filter(|b| b.length() <= settings.nearest_neighbour_distance)
            .collect();

        let threshold = if settings.per_material_threshold {
            material.neel_threshold
        } else {
            settings.threshold
        };
        if nn.len() as u32 >= threshold {
            continue; // bulk atom, tensor stays zero
        }
        surface_atoms += 1;

        let base = tensor_index(atom, 0, 0);
        let t = &mut tensor[base..base + 9];
        for bond in &nn {
            let r = bond.length();
            if r == 0.0 {
                return Err(SpinError::Config(format!(
                    "zero-length bond between atoms {atom} and {}",
                    bond.neighbour
                )));
            }
            let mat_j = atom_materials[bond.neighbour] as usize;
            if mat_j >= material.kij.len() {
                return Err(SpinError::MaterialOutOfRange {
                    index: mat_j,
                    count: material.kij.len(),
                });
            }
            let kij = material.kij[mat_j];
            if kij == 0.0 {
                continue;
            }
            let weight = if settings.range_dependent {
                let r0 = settings.exponential_range;
                (-settings.exponential_factor * (r - r0) / r0).exp()
            } else {
                1.0
            };
            let e = [bond.dx / r, bond.dy / r, bond.dz / r];
            outer_accumulate(t, e, weight * kij);
            bonds_used += 1;
        }
    }

    Ok((
        tensor,
        NeelBuildSummary {
            atoms: num_atoms,
            surface_atoms,
            bonds_used,
        },
    ))
}

pub struct NeelAnisotropy;

impl NeelAnisotropy {
    #[inline]
    fn atom_tensor<'a>(ctx: &TermContext<'a>, atom: usize) -> Option<&'a [f64]> {
        let table = ctx.neel_tensor?;
        let base = tensor_index(atom, 0, 0);
        Some(&table[base..base + 9])
    }
}

impl AnisotropyTerm for NeelAnisotropy {
    fn name(&self) -> &'static str {
        "neel_anisotropy"
    }

    fn energy(&self, ctx: &TermContext, atom: usize, _mat: usize, s: [f64; 3]) -> f64 {
        match Self::atom_tensor(ctx, atom) {
            Some(t) => -0.5 * quadratic_form(t, s),
            None => 0.0,
        }
    }

    fn field_at(&self, ctx: &TermContext, atom: usize, _mat: usize, s: [f64; 3]) -> [f64; 3] {
        match Self::atom_tensor(ctx, atom) {
            Some(t) => contract(t, s),
            None => [0.0; 3],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use spin_types::config::MaterialConfig;
    use spin_types::topology::{Bond, NeighbourList};

    fn material(pair_constants: Vec<f64>) -> MaterialAnisotropy {
        let mut cfg = MaterialConfig::named("m");
        cfg.mu_s = 1.0;
        cfg.neel_pair_constants = pair_constants;
        MaterialAnisotropy::from_config(&cfg, 4).unwrap()
    }

    fn chain_topology() -> NeighbourList {
        // Three atoms in a line: ends have one bond, middle has two.
        let bond = |neighbour, dx: f64| Bond {
            neighbour,
            interaction: 0,
            dx,
            dy: 0.0,
            dz: 0.0,
        };
        NeighbourList::from_adjacency(vec![
            vec![bond(1, 1.0)],
            vec![bond(0, -1.0), bond(2, 1.0)],
            vec![bond(1, -1.0)],
        ])
        .unwrap()
    }

    fn settings(threshold: u32) -> NeelSettings {
        NeelSettings {
            per_material_threshold: false,
            threshold,
            nearest_neighbour_distance: f64::INFINITY,
            range_dependent: false,
            exponential_range: 2.5,
            exponential_factor: 1.0,
        }
    }

    #[test]
    fn test_surface_vs_bulk_classification() {
        let mats = vec![material(vec![2.0])];
        let atom_mats = vec![0u32; 3];
        let topo = chain_topology();
        // Threshold 2: end atoms (coordination 1) are surface, the middle
        // atom (coordination 2) is bulk.
        let (tensor, summary) =
            build_neel_tensor(&topo, &atom_mats, &mats, &settings(2)).unwrap();
        assert_eq!(summary.surface_atoms, 2);
        assert_eq!(summary.bonds_used, 2);
        // End atom tensor: k * e e^T with e = +-x, so T[0][0] = 2.
        assert!((tensor[tensor_index(0, 0, 0)] - 2.0).abs() < 1e-14);
        assert!((tensor[tensor_index(2, 0, 0)] - 2.0).abs() < 1e-14);
        // Bulk atom: all zero.
        for i in 0..3 {
            for j in 0..3 {
                assert_eq!(tensor[tensor_index(1, i, j)], 0.0);
            }
        }
    }

    #[test]
    fn test_zero_pair_constant_zero_tensor() {
        let mats = vec![material(vec![0.0])];
        let atom_mats = vec![0u32; 3];
        let (tensor, summary) =
            build_neel_tensor(&chain_topology(), &atom_mats, &mats, &settings(2)).unwrap();
        assert_eq!(summary.bonds_used, 0);
        assert!(tensor.iter().all(|&v| v == 0.0));
    }

    #[test]
    fn test_range_weight_shrinks_contribution() {
        let mats = vec![material(vec![1.0])];
        let atom_mats = vec![0u32; 3];
        let mut s = settings(2);
        let (plain, _) =
            build_neel_tensor(&chain_topology(), &atom_mats, &mats, &s).unwrap();
        s.range_dependent = true;
        s.exponential_range = 0.5; // bond length 1.0 > r0, weight < 1
        let (weighted, _) =
            build_neel_tensor(&chain_topology(), &atom_mats, &mats, &s).unwrap();
        let idx = tensor_index(0, 0, 0);
        assert!(weighted[idx] < plain[idx]);
        assert!(weighted[idx] > 0.0);
        let expected = (-1.0f64 * (1.0 - 0.5) / 0.5).exp();
        assert!((weighted[idx] - expected).abs() < 1e-12);
    }

    #[test]
    fn test_field_is_tensor_contraction() {
        let mats = vec![material(vec![3.0])];
        let atom_mats = vec![0u32; 3];
        let (tensor, _) =
            build_neel_tensor(&chain_topology(), &atom_mats, &mats, &settings(2)).unwrap();
        let ctx = TermContext {
            materials: &mats,
            neel_tensor: Some(&tensor),
            klattice: &[0.0],
            atom_axes: None,
        };
        let term = NeelAnisotropy;
        let s = [1.0, 0.0, 0.0];
        // End atom: T = 3 * x x^T, so H = (3, 0, 0), E = -1.5.
        let h = term.field_at(&ctx, 0, 0, s);
        assert!((h[0] - 3.0).abs() < 1e-14);
        assert_eq!(h[1], 0.0);
        assert!((term.energy(&ctx, 0, 0, s) + 1.5).abs() < 1e-14);
        // Bulk atom: no contribution.
        assert_eq!(term.field_at(&ctx, 1, 0, s), [0.0; 3]);
        assert_eq!(term.energy(&ctx, 1, 0, s), 0.0);
    }

    #[test]
    fn test_threshold_consistency_checked() {
        let mats = vec![material(vec![1.0])];
        let bad = NeelConfig {
            threshold: 0,
            ..NeelConfig::default()
        };
        assert!(NeelSettings::from_config(&bad, &mats).is_err());

        let per_material_all_zero = NeelConfig {
            per_material_threshold: true,
            ..NeelConfig::default()
        };
        assert!(NeelSettings::from_config(&per_material_all_zero, &mats).is_err());
    }
}
