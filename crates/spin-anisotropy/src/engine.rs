// ─────────────────────────────────────────────────────────────────────
// SCPN Spin Dynamics — Anisotropy Engine
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
//! The anisotropy engine.
//!
//! Configuration is the *uninitialised* state; a constructed engine is the
//! *ready* state. `initialise` validates the configuration, builds the
//! material store, the enabled term registry, the Neel tensor table and
//! the lattice interpolation caches, and fails with a configuration error
//! rather than silently correcting anything. There is no teardown: the
//! engine is scoped to one simulation run.

use crate::lattice;
use crate::material::MaterialAnisotropy;
use crate::neel::{build_neel_tensor, NeelBuildSummary, NeelSettings};
use crate::parallel::decompose_atoms;
use crate::terms::{build_registry, AnisotropyTerm, FieldSlices, SpinSlices, TermContext};
use ndarray::Array2;
use rand::Rng;
use rand_distr::StandardNormal;
use rayon::prelude::*;
use spin_types::config::AnisotropyConfig;
use spin_types::error::{SpinError, SpinResult};
use spin_types::topology::BondTopology;
use std::collections::HashMap;

pub struct AnisotropyEngine {
    materials: Vec<MaterialAnisotropy>,
    terms: Vec<Box<dyn AnisotropyTerm>>,
    neel_tensor: Option<Vec<f64>>,
    neel_summary: Option<NeelBuildSummary>,
    atom_axes: Option<Array2<f64>>,
    klattice: Vec<f64>,
    temperature: f64,
    num_atoms: usize,
}

impl AnisotropyEngine {
    /// Initialise from configuration, per-atom material ids and (when Neel
    /// anisotropy is enabled) the neighbour topology.
    pub fn initialise(
        config: &AnisotropyConfig,
        atom_materials: &[u32],
        topology: Option<&dyn BondTopology>,
    ) -> SpinResult<Self> {
        Self::initialise_seeded(config, atom_materials, topology, None, &mut rand::thread_rng())
    }

    /// As [`initialise`](Self::initialise), with a caller-supplied RNG for
    /// reproducible random-anisotropy axes and optional per-atom grain ids.
    pub fn initialise_seeded<R: Rng>(
        config: &AnisotropyConfig,
        atom_materials: &[u32],
        topology: Option<&dyn BondTopology>,
        grains: Option<&[u32]>,
        rng: &mut R,
    ) -> SpinResult<Self> {
        if config.materials.is_empty() {
            return Err(SpinError::Config("no materials configured".to_string()));
        }
        if config.materials.len() > config.max_materials {
            return Err(SpinError::Config(format!(
                "{} materials configured but max_materials is {}",
                config.materials.len(),
                config.max_materials
            )));
        }
        let materials = config
            .materials
            .iter()
            .map(|m| MaterialAnisotropy::from_config(m, config.max_materials))
            .collect::<SpinResult<Vec<_>>>()?;

        let num_atoms = atom_materials.len();
        if num_atoms == 0 {
            return Err(SpinError::Config("system has no atoms".to_string()));
        }
        for &mat in atom_materials {
            if mat as usize >= materials.len() {
                return Err(SpinError::MaterialOutOfRange {
                    index: mat as usize,
                    count: materials.len(),
                });
            }
        }

        let terms = build_registry(&config.terms);

        let (neel_tensor, neel_summary) = if config.terms.neel_anisotropy {
            let topo = topology.ok_or_else(|| {
                SpinError::Config(
                    "Neel anisotropy enabled but no neighbour topology supplied".to_string(),
                )
            })?;
            if topo.num_atoms() != num_atoms {
                return Err(SpinError::LengthMismatch {
                    name: "topology",
                    expected: num_atoms,
                    got: topo.num_atoms(),
                });
            }
            let settings = NeelSettings::from_config(&config.neel, &materials)?;
            let (tensor, summary) =
                build_neel_tensor(topo, atom_materials, &materials, &settings)?;
            (Some(tensor), Some(summary))
        } else {
            (None, None)
        };

        if config.terms.lattice_anisotropy
            && !materials.iter().any(|m| m.lattice_table.is_some())
        {
            return Err(SpinError::Config(
                "lattice anisotropy enabled but no material provides a temperature table"
                    .to_string(),
            ));
        }
        let mut klattice = vec![0.0; materials.len()];
        lattice::refresh_constants(&materials, 0.0, &mut klattice);

        let atom_axes = if config.terms.random_anisotropy {
            Self::build_random_axes(&materials, atom_materials, grains, rng)?
        } else {
            None
        };

        Ok(AnisotropyEngine {
            materials,
            terms,
            neel_tensor,
            neel_summary,
            atom_axes,
            klattice,
            temperature: 0.0,
            num_atoms,
        })
    }

    fn build_random_axes<R: Rng>(
        materials: &[MaterialAnisotropy],
        atom_materials: &[u32],
        grains: Option<&[u32]>,
        rng: &mut R,
    ) -> SpinResult<Option<Array2<f64>>> {
        let any_random = materials
            .iter()
            .any(|m| m.random_anisotropy || m.random_grain_anisotropy);
        if !any_random {
            return Ok(None);
        }
        let needs_grains = materials.iter().any(|m| m.random_grain_anisotropy);
        if needs_grains {
            match grains {
                Some(g) if g.len() == atom_materials.len() => {}
                Some(g) => {
                    return Err(SpinError::LengthMismatch {
                        name: "grains",
                        expected: atom_materials.len(),
                        got: g.len(),
                    })
                }
                None => {
                    return Err(SpinError::Config(
                        "random grain anisotropy requires per-atom grain ids".to_string(),
                    ))
                }
            }
        }

        let num_atoms = atom_materials.len();
        let mut axes = Array2::zeros((num_atoms, 3));
        let mut grain_axes: HashMap<u32, [f64; 3]> = HashMap::new();
        for atom in 0..num_atoms {
            let material = &materials[atom_materials[atom] as usize];
            let axis = if material.random_anisotropy {
                random_unit_vector(rng)
            } else if material.random_grain_anisotropy {
                match grains {
                    Some(g) => *grain_axes
                        .entry(g[atom])
                        .or_insert_with(|| random_unit_vector(rng)),
                    None => material.ku_vector,
                }
            } else {
                material.ku_vector
            };
            axes[[atom, 0]] = axis[0];
            axes[[atom, 1]] = axis[1];
            axes[[atom, 2]] = axis[2];
        }
        Ok(Some(axes))
    }

    fn context(&self) -> TermContext {
        TermContext {
            materials: &self.materials,
            neel_tensor: self.neel_tensor.as_deref(),
            klattice: &self.klattice,
            atom_axes: self.atom_axes.as_ref(),
        }
    }

    pub fn num_atoms(&self) -> usize {
        self.num_atoms
    }

    pub fn num_materials(&self) -> usize {
        self.materials.len()
    }

    pub fn material(&self, mat: usize) -> SpinResult<&MaterialAnisotropy> {
        self.materials.get(mat).ok_or(SpinError::MaterialOutOfRange {
            index: mat,
            count: self.materials.len(),
        })
    }

    pub fn neel_summary(&self) -> Option<NeelBuildSummary> {
        self.neel_summary
    }

    pub fn enabled_terms(&self) -> Vec<&'static str> {
        self.terms.iter().map(|t| t.name()).collect()
    }

    pub fn temperature(&self) -> f64 {
        self.temperature
    }

    /// Refresh the per-material lattice anisotropy constants. Call once per
    /// macroscopic temperature change.
    pub fn set_temperature(&mut self, t: f64) -> SpinResult<()> {
        if !t.is_finite() || t < 0.0 {
            return Err(SpinError::Config(format!(
                "temperature must be finite and non-negative, got {t}"
            )));
        }
        self.temperature = t;
        lattice::refresh_constants(&self.materials, t, &mut self.klattice);
        Ok(())
    }

    fn check_len(&self, name: &'static str, len: usize) -> SpinResult<()> {
        if len != self.num_atoms {
            return Err(SpinError::LengthMismatch {
                name,
                expected: self.num_atoms,
                got: len,
            });
        }
        Ok(())
    }

    fn check_inputs(
        &self,
        start: usize,
        end: usize,
        sx: &[f64],
        sy: &[f64],
        sz: &[f64],
        mats: &[u32],
        hx: &[f64],
        hy: &[f64],
        hz: &[f64],
    ) -> SpinResult<()> {
        if start > end || end > self.num_atoms {
            return Err(SpinError::BadAtomRange {
                start,
                end,
                count: self.num_atoms,
            });
        }
        self.check_len("sx", sx.len())?;
        self.check_len("sy", sy.len())?;
        self.check_len("sz", sz.len())?;
        self.check_len("materials", mats.len())?;
        self.check_len("hx", hx.len())?;
        self.check_len("hy", hy.len())?;
        self.check_len("hz", hz.len())?;
        for atom in start..end {
            if mats[atom] as usize >= self.materials.len() {
                return Err(SpinError::MaterialOutOfRange {
                    index: mats[atom] as usize,
                    count: self.materials.len(),
                });
            }
        }
        Ok(())
    }

    /// Add the anisotropy field of every enabled term for atoms in
    /// `start..end` into the caller-owned field arrays (absolute indexing).
    #[allow(clippy::too_many_arguments)]
    pub fn fields(
        &self,
        start: usize,
        end: usize,
        sx: &[f64],
        sy: &[f64],
        sz: &[f64],
        mats: &[u32],
        hx: &mut [f64],
        hy: &mut [f64],
        hz: &mut [f64],
    ) -> SpinResult<()> {
        self.check_inputs(start, end, sx, sy, sz, mats, hx, hy, hz)?;
        let spins = SpinSlices {
            x: sx,
            y: sy,
            z: sz,
        };
        let mut out = FieldSlices {
            x: &mut hx[start..end],
            y: &mut hy[start..end],
            z: &mut hz[start..end],
        };
        let ctx = self.context();
        for term in &self.terms {
            term.field(&ctx, start, end, &spins, mats, &mut out);
        }
        Ok(())
    }

    /// As [`fields`](Self::fields) over the whole system, evaluated in
    /// parallel over `num_chunks` disjoint atom ranges.
    #[allow(clippy::too_many_arguments)]
    pub fn fields_parallel(
        &self,
        sx: &[f64],
        sy: &[f64],
        sz: &[f64],
        mats: &[u32],
        hx: &mut [f64],
        hy: &mut [f64],
        hz: &mut [f64],
        num_chunks: usize,
    ) -> SpinResult<()> {
        self.check_inputs(0, self.num_atoms, sx, sy, sz, mats, hx, hy, hz)?;
        let ranges = decompose_atoms(self.num_atoms, num_chunks)?;

        let mut parts = Vec::with_capacity(ranges.len());
        let (mut rest_x, mut rest_y, mut rest_z) = (hx, hy, hz);
        for range in &ranges {
            let (cx, tx) = rest_x.split_at_mut(range.len());
            let (cy, ty) = rest_y.split_at_mut(range.len());
            let (cz, tz) = rest_z.split_at_mut(range.len());
            rest_x = tx;
            rest_y = ty;
            rest_z = tz;
            parts.push((*range, cx, cy, cz));
        }

        let spins = SpinSlices {
            x: sx,
            y: sy,
            z: sz,
        };
        parts.into_par_iter().for_each(|(range, cx, cy, cz)| {
            let mut out = FieldSlices {
                x: cx,
                y: cy,
                z: cz,
            };
            let ctx = self.context();
            for term in &self.terms {
                term.field(&ctx, range.start, range.end, &spins, mats, &mut out);
            }
        });
        Ok(())
    }

    /// Total anisotropy energy of one atom for the given spin direction,
    /// summed over the enabled terms. No side effects.
    pub fn energy(
        &self,
        atom: usize,
        mat: u32,
        sx: f64,
        sy: f64,
        sz: f64,
    ) -> SpinResult<f64> {
        if atom >= self.num_atoms {
            return Err(SpinError::AtomOutOfRange {
                index: atom,
                count: self.num_atoms,
            });
        }
        let mat = mat as usize;
        if mat >= self.materials.len() {
            return Err(SpinError::MaterialOutOfRange {
                index: mat,
                count: self.materials.len(),
            });
        }
        let ctx = self.context();
        let s = [sx, sy, sz];
        Ok(self
            .terms
            .iter()
            .map(|term| term.energy(&ctx, atom, mat, s))
            .sum())
    }
}

fn random_unit_vector<R: Rng>(rng: &mut R) -> [f64; 3] {
    loop {
        let v = [
            rng.sample::<f64, _>(StandardNormal),
            rng.sample::<f64, _>(StandardNormal),
            rng.sample::<f64, _>(StandardNormal),
        ];
        let n = (v[0] * v[0] + v[1] * v[1] + v[2] * v[2]).sqrt();
        if n > 1e-6 {
            return [v[0] / n, v[1] / n, v[2] / n];
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use spin_types::config::{AnisotropyConfig, MaterialConfig, NeelConfig, TermFlags};
    use spin_types::topology::{Bond, NeighbourList};

    fn single_material_config(edit: impl FnOnce(&mut MaterialConfig)) -> AnisotropyConfig {
        let mut mat = MaterialConfig::named("test");
        mat.mu_s = 1.0;
        edit(&mut mat);
        AnisotropyConfig {
            max_materials: 4,
            materials: vec![mat],
            terms: TermFlags::default(),
            neel: NeelConfig::default(),
        }
    }

    #[test]
    fn test_null_scenario_all_disabled() {
        let cfg = single_material_config(|m| m.ku2 = -1.0);
        let engine = AnisotropyEngine::initialise(&cfg, &[0, 0], None).unwrap();
        assert!(engine.enabled_terms().is_empty());

        let (sx, sy, sz) = (vec![1.0, 0.0], vec![0.0, 1.0], vec![0.0, 0.0]);
        let mats = vec![0u32, 0];
        let (mut hx, mut hy, mut hz) = (vec![0.0; 2], vec![0.0; 2], vec![0.0; 2]);
        engine
            .fields(0, 2, &sx, &sy, &sz, &mats, &mut hx, &mut hy, &mut hz)
            .unwrap();
        assert!(hx.iter().chain(&hy).chain(&hz).all(|&v| v == 0.0));
        assert_eq!(engine.energy(0, 0, 1.0, 0.0, 0.0).unwrap(), 0.0);
    }

    #[test]
    fn test_null_scenario_zero_constants() {
        let mut cfg = single_material_config(|_| {});
        cfg.terms.uniaxial_second_order = true;
        cfg.terms.cubic_fourth_order = true;
        let engine = AnisotropyEngine::initialise(&cfg, &[0], None).unwrap();
        let e = engine.energy(0, 0, 0.3, -0.5, 0.8).unwrap();
        assert_eq!(e, 0.0);
        let (mut hx, mut hy, mut hz) = (vec![0.0], vec![0.0], vec![0.0]);
        engine
            .fields(0, 1, &[0.3], &[-0.5], &[0.8], &[0], &mut hx, &mut hy, &mut hz)
            .unwrap();
        assert_eq!((hx[0], hy[0], hz[0]), (0.0, 0.0, 0.0));
    }

    #[test]
    fn test_uniaxial_extremum() {
        // Negative constant, axis z: spin along z is the energy minimum,
        // spin in the plane the maximum.
        let mut cfg = single_material_config(|m| m.ku2 = -2.0);
        cfg.terms.uniaxial_second_order = true;
        let engine = AnisotropyEngine::initialise(&cfg, &[0], None).unwrap();

        let e_axis = engine.energy(0, 0, 0.0, 0.0, 1.0).unwrap();
        let e_plane = engine.energy(0, 0, 1.0, 0.0, 0.0).unwrap();
        assert!((e_axis - (-2.0)).abs() < 1e-14);
        assert!(e_plane.abs() < 1e-14);
        assert!(e_axis < e_plane);

        // A few oblique spins all sit between the extrema.
        for &(x, z) in &[(0.6, 0.8), (0.8, 0.6), (0.3, (1.0f64 - 0.09).sqrt())] {
            let e = engine.energy(0, 0, x, 0.0, z).unwrap();
            assert!(e >= e_axis - 1e-12 && e <= e_plane + 1e-12);
        }

        // The field pulls the spin towards the axis.
        let (mut hx, mut hy, mut hz) = (vec![0.0], vec![0.0], vec![0.0]);
        engine
            .fields(0, 1, &[0.6], &[0.0], &[0.8], &[0], &mut hx, &mut hy, &mut hz)
            .unwrap();
        assert!(hz[0] > 0.0);
        assert_eq!(hx[0], 0.0);
    }

    #[test]
    fn test_additivity_of_terms() {
        let s = [0.36, -0.48, 0.8];
        let mats = vec![0u32];

        let mut cfg_a = single_material_config(|m| m.ku2 = -1.5);
        cfg_a.terms.uniaxial_second_order = true;
        let engine_a = AnisotropyEngine::initialise(&cfg_a, &[0], None).unwrap();

        let mut cfg_b = single_material_config(|m| m.kc4 = 0.7);
        cfg_b.terms.cubic_fourth_order = true;
        let engine_b = AnisotropyEngine::initialise(&cfg_b, &[0], None).unwrap();

        let mut cfg_ab = single_material_config(|m| {
            m.ku2 = -1.5;
            m.kc4 = 0.7;
        });
        cfg_ab.terms.uniaxial_second_order = true;
        cfg_ab.terms.cubic_fourth_order = true;
        let engine_ab = AnisotropyEngine::initialise(&cfg_ab, &[0], None).unwrap();

        let e_a = engine_a.energy(0, 0, s[0], s[1], s[2]).unwrap();
        let e_b = engine_b.energy(0, 0, s[0], s[1], s[2]).unwrap();
        let e_ab = engine_ab.energy(0, 0, s[0], s[1], s[2]).unwrap();
        assert!((e_ab - (e_a + e_b)).abs() < 1e-13);

        let run = |engine: &AnisotropyEngine| {
            let (mut hx, mut hy, mut hz) = (vec![0.0], vec![0.0], vec![0.0]);
            engine
                .fields(0, 1, &[s[0]], &[s[1]], &[s[2]], &mats, &mut hx, &mut hy, &mut hz)
                .unwrap();
            [hx[0], hy[0], hz[0]]
        };
        let (ha, hb, hab) = (run(&engine_a), run(&engine_b), run(&engine_ab));
        for i in 0..3 {
            assert!((hab[i] - (ha[i] + hb[i])).abs() < 1e-13);
        }
    }

    #[test]
    fn test_fields_additive_into_existing() {
        let mut cfg = single_material_config(|m| m.ku2 = -1.0);
        cfg.terms.uniaxial_second_order = true;
        let engine = AnisotropyEngine::initialise(&cfg, &[0], None).unwrap();
        let (mut hx, mut hy, mut hz) = (vec![10.0], vec![20.0], vec![30.0]);
        engine
            .fields(0, 1, &[0.0], &[0.0], &[1.0], &[0], &mut hx, &mut hy, &mut hz)
            .unwrap();
        // H = -2k c e = (0, 0, 2) added on top of the existing values.
        assert!((hx[0] - 10.0).abs() < 1e-14);
        assert!((hy[0] - 20.0).abs() < 1e-14);
        assert!((hz[0] - 32.0).abs() < 1e-14);
    }

    #[test]
    fn test_range_and_length_validation() {
        let mut cfg = single_material_config(|m| m.ku2 = -1.0);
        cfg.terms.uniaxial_second_order = true;
        let engine = AnisotropyEngine::initialise(&cfg, &[0, 0, 0], None).unwrap();

        let s = vec![0.0; 3];
        let mats = vec![0u32; 3];
        let mut h = vec![0.0; 3];
        let mut h2 = vec![0.0; 3];
        let mut h3 = vec![0.0; 3];

        let bad_range =
            engine.fields(1, 5, &s, &s, &s, &mats, &mut h, &mut h2, &mut h3);
        assert!(matches!(bad_range, Err(SpinError::BadAtomRange { .. })));

        let short = vec![0.0; 2];
        let bad_len =
            engine.fields(0, 3, &short, &s, &s, &mats, &mut h, &mut h2, &mut h3);
        assert!(matches!(bad_len, Err(SpinError::LengthMismatch { .. })));

        let bad_mats = vec![7u32; 3];
        let bad_mat =
            engine.fields(0, 3, &s, &s, &s, &bad_mats, &mut h, &mut h2, &mut h3);
        assert!(matches!(bad_mat, Err(SpinError::MaterialOutOfRange { .. })));

        assert!(matches!(
            engine.energy(5, 0, 0.0, 0.0, 1.0),
            Err(SpinError::AtomOutOfRange { .. })
        ));
        assert!(matches!(
            engine.energy(0, 9, 0.0, 0.0, 1.0),
            Err(SpinError::MaterialOutOfRange { .. })
        ));
    }

    #[test]
    fn test_parallel_matches_serial() {
        let mut cfg = single_material_config(|m| {
            m.ku2 = -1.3;
            m.kc4 = 0.4;
            m.k2r2 = 0.2;
        });
        cfg.terms.uniaxial_second_order = true;
        cfg.terms.cubic_fourth_order = true;
        cfg.terms.rotational_2_2 = true;

        let n = 37;
        let atom_mats = vec![0u32; n];
        let engine = AnisotropyEngine::initialise(&cfg, &atom_mats, None).unwrap();

        // Deterministic unit spins spread over the sphere.
        let mut sx = vec![0.0; n];
        let mut sy = vec![0.0; n];
        let mut sz = vec![0.0; n];
        for i in 0..n {
            let theta = 0.1 + 3.0 * (i as f64) / (n as f64);
            let phi = 0.7 * i as f64;
            sx[i] = theta.sin() * phi.cos();
            sy[i] = theta.sin() * phi.sin();
            sz[i] = theta.cos();
        }

        let (mut hx, mut hy, mut hz) = (vec![0.0; n], vec![0.0; n], vec![0.0; n]);
        engine
            .fields(0, n, &sx, &sy, &sz, &atom_mats, &mut hx, &mut hy, &mut hz)
            .unwrap();

        let (mut px, mut py, mut pz) = (vec![0.0; n], vec![0.0; n], vec![0.0; n]);
        engine
            .fields_parallel(&sx, &sy, &sz, &atom_mats, &mut px, &mut py, &mut pz, 5)
            .unwrap();

        for i in 0..n {
            assert!((hx[i] - px[i]).abs() < 1e-15, "hx mismatch at {i}");
            assert!((hy[i] - py[i]).abs() < 1e-15, "hy mismatch at {i}");
            assert!((hz[i] - pz[i]).abs() < 1e-15, "hz mismatch at {i}");
        }
    }

    #[test]
    fn test_lattice_temperature_dependence() {
        let mut cfg = single_material_config(|m| {
            m.k_lattice = -1.0;
            m.lattice_table = vec![[0.0, 1.0], [100.0, 0.5], [200.0, 0.2]];
        });
        cfg.terms.lattice_anisotropy = true;
        let mut engine = AnisotropyEngine::initialise(&cfg, &[0], None).unwrap();

        // Temperature 0: k_lat = -1.0, spin along axis: E = -1.0.
        let e0 = engine.energy(0, 0, 0.0, 0.0, 1.0).unwrap();
        assert!((e0 - (-1.0)).abs() < 1e-14);

        engine.set_temperature(50.0).unwrap();
        let e50 = engine.energy(0, 0, 0.0, 0.0, 1.0).unwrap();
        assert!((e50 - (-0.75)).abs() < 1e-14);

        engine.set_temperature(300.0).unwrap();
        let e300 = engine.energy(0, 0, 0.0, 0.0, 1.0).unwrap();
        assert!((e300 - (-0.2)).abs() < 1e-14);

        assert!(engine.set_temperature(-1.0).is_err());
        assert!(engine.set_temperature(f64::NAN).is_err());
    }

    #[test]
    fn test_lattice_without_table_rejected() {
        let mut cfg = single_material_config(|m| m.k_lattice = 1.0);
        cfg.terms.lattice_anisotropy = true;
        assert!(AnisotropyEngine::initialise(&cfg, &[0], None).is_err());
    }

    #[test]
    fn test_neel_requires_topology() {
        let mut cfg = single_material_config(|m| m.neel_pair_constants = vec![1.0]);
        cfg.terms.neel_anisotropy = true;
        cfg.neel.threshold = 2;
        assert!(AnisotropyEngine::initialise(&cfg, &[0, 0], None).is_err());

        let bond = |neighbour, dx: f64| Bond {
            neighbour,
            interaction: 0,
            dx,
            dy: 0.0,
            dz: 0.0,
        };
        let topo = NeighbourList::from_adjacency(vec![
            vec![bond(1, 1.0)],
            vec![bond(0, -1.0)],
        ])
        .unwrap();
        let engine = AnisotropyEngine::initialise(&cfg, &[0, 0], Some(&topo)).unwrap();
        let summary = engine.neel_summary().unwrap();
        assert_eq!(summary.atoms, 2);
        assert_eq!(summary.surface_atoms, 2);
    }

    #[test]
    fn test_initialise_from_json_config() {
        let json = r#"{
            "max_materials": 4,
            "materials": [
                { "name": "FePt", "mu_s": 1.0, "ku2": -1.0 }
            ],
            "terms": { "uniaxial_second_order": true }
        }"#;
        let cfg: AnisotropyConfig = serde_json::from_str(json).unwrap();
        let engine = AnisotropyEngine::initialise(&cfg, &[0], None).unwrap();
        assert_eq!(engine.enabled_terms(), vec!["uniaxial_second_order"]);
        let e = engine.energy(0, 0, 0.0, 0.0, 1.0).unwrap();
        assert!((e - (-1.0)).abs() < 1e-14);
    }

    #[test]
    fn test_material_count_capacity() {
        let mut cfg = single_material_config(|_| {});
        cfg.max_materials = 1;
        cfg.materials.push(MaterialConfig::named("extra"));
        assert!(AnisotropyEngine::initialise(&cfg, &[0], None).is_err());
    }

    #[test]
    fn test_bad_atom_material_rejected() {
        let cfg = single_material_config(|_| {});
        let result = AnisotropyEngine::initialise(&cfg, &[0, 3], None);
        assert!(matches!(
            result,
            Err(SpinError::MaterialOutOfRange { index: 3, count: 1 })
        ));
    }

    #[test]
    fn test_random_anisotropy_axes() {
        use rand::rngs::StdRng;
        use rand::SeedableRng;

        let mut cfg = single_material_config(|m| {
            m.ku2 = -1.0;
            m.random_anisotropy = true;
        });
        cfg.terms.uniaxial_second_order = true;
        cfg.terms.random_anisotropy = true;

        let atom_mats = vec![0u32; 8];
        let mut rng = StdRng::seed_from_u64(7);
        let engine =
            AnisotropyEngine::initialise_seeded(&cfg, &atom_mats, None, None, &mut rng)
                .unwrap();

        // Axes are unit vectors and (with overwhelming probability) differ
        // between atoms.
        let e0 = engine.energy(0, 0, 0.0, 0.0, 1.0).unwrap();
        let e1 = engine.energy(1, 0, 0.0, 0.0, 1.0).unwrap();
        assert!(e0 <= 0.0 && e0 >= -1.0);
        assert!((e0 - e1).abs() > 1e-12);

        // Same seed reproduces the same axes.
        let mut rng2 = StdRng::seed_from_u64(7);
        let engine2 =
            AnisotropyEngine::initialise_seeded(&cfg, &atom_mats, None, None, &mut rng2)
                .unwrap();
        let e0b = engine2.energy(0, 0, 0.0, 0.0, 1.0).unwrap();
        assert!((e0 - e0b).abs() < 1e-15);
    }

    #[test]
    fn test_random_grain_anisotropy_shares_axis() {
        use rand::rngs::StdRng;
        use rand::SeedableRng;

        let mut cfg = single_material_config(|m| {
            m.ku2 = -1.0;
            m.random_grain_anisotropy = true;
        });
        cfg.terms.uniaxial_second_order = true;
        cfg.terms.random_anisotropy = true;

        let atom_mats = vec![0u32; 4];
        let grains = vec![0u32, 0, 1, 1];
        let mut rng = StdRng::seed_from_u64(11);
        let engine = AnisotropyEngine::initialise_seeded(
            &cfg,
            &atom_mats,
            None,
            Some(&grains),
            &mut rng,
        )
        .unwrap();

        let e = |atom| engine.energy(atom, 0, 0.0, 0.0, 1.0).unwrap();
        assert!((e(0) - e(1)).abs() < 1e-15, "same grain, same axis");
        assert!((e(2) - e(3)).abs() < 1e-15, "same grain, same axis");
        assert!((e(0) - e(2)).abs() > 1e-12, "different grains differ");

        // Missing grain ids is a configuration error.
        let mut rng3 = StdRng::seed_from_u64(1);
        assert!(AnisotropyEngine::initialise_seeded(
            &cfg,
            &atom_mats,
            None,
            None,
            &mut rng3
        )
        .is_err());
    }
}
