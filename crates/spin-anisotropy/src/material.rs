// ─────────────────────────────────────────────────────────────────────
// SCPN Spin Dynamics — Material Parameters
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
//! Per-material anisotropy parameter store.
//!
//! Constants arrive from configuration in Joules per atom and are reduced
//! to field units (Tesla) by the atomic moment here, so every field formula
//! downstream is the exact negative gradient of its energy formula.

use spin_math::tensor::outer_accumulate;
use spin_math::vector::{is_orthogonal, validate_triad, validate_unit};
use spin_types::config::MaterialConfig;
use spin_types::error::{SpinError, SpinResult};
use spin_math::tabulated::{TabulatedBuilder, TabulatedFunction};

/// Immutable per-material record of reduced constants, axes and derived
/// tensors. Built once during engine initialisation.
#[derive(Debug, Clone)]
pub struct MaterialAnisotropy {
    pub name: String,
    /// Atomic spin moment (J/T) used for the reduction.
    pub mu_s: f64,

    // Reduced uniaxial constants (Tesla).
    pub ku2: f64,
    pub ku4: f64,
    pub ku6: f64,

    /// Reduced rotational constants, indexed `[theta/2 - 1][phi - 1]`.
    pub k_rot: [[f64; 6]; 3],
    pub k_rot_odd: [[f64; 6]; 3],

    // Reduced cubic constants.
    pub kc4: f64,
    pub kc6: f64,

    /// Reduced scale of the tabulated lattice anisotropy curve.
    pub k_lattice: f64,

    // Orthonormal rotational triad.
    pub ku_vector: [f64; 3],
    pub kr_vector: [f64; 3],
    pub kl_vector: [f64; 3],

    // Biaxial axis pair.
    pub u1_vector: [f64; 3],
    pub u2_vector: [f64; 3],

    // Orthonormal cubic axes.
    pub kc_vector1: [f64; 3],
    pub kc_vector2: [f64; 3],
    pub kc_vector3: [f64; 3],

    // Reduced triaxial constants and orthonormal bases.
    pub kt2: [f64; 3],
    pub kt4: [f64; 3],
    pub t2_basis: [[f64; 3]; 3],
    pub t4_basis: [[f64; 3]; 3],

    /// Reduced Neel pair constants, length = max_materials.
    pub kij: Vec<f64>,
    pub neel_threshold: u32,

    /// Derived second-order uniaxial tensor, `ku2 * ku ku^T`, flattened.
    pub ku_tensor: [f64; 9],
    /// Derived cubic tensor, `kc4 * sum_a kc_a kc_a^T`, flattened.
    pub kc_tensor: [f64; 9],

    pub lattice_table: Option<TabulatedFunction>,

    pub random_anisotropy: bool,
    pub random_grain_anisotropy: bool,
}

impl MaterialAnisotropy {
    pub fn from_config(cfg: &MaterialConfig, max_materials: usize) -> SpinResult<Self> {
        if !(cfg.mu_s.is_finite() && cfg.mu_s > 0.0) {
            return Err(SpinError::Config(format!(
                "material {}: atomic moment mu_s must be positive, got {}",
                cfg.name, cfg.mu_s
            )));
        }
        validate_triad(
            &format!("{}.ku/kr/kl", cfg.name),
            cfg.ku_vector,
            cfg.kr_vector,
            cfg.kl_vector,
        )?;
        validate_triad(
            &format!("{}.kc", cfg.name),
            cfg.kc_vector1,
            cfg.kc_vector2,
            cfg.kc_vector3,
        )?;
        validate_unit(&format!("{}.u1", cfg.name), cfg.u1_vector)?;
        validate_unit(&format!("{}.u2", cfg.name), cfg.u2_vector)?;
        if !is_orthogonal(cfg.u1_vector, cfg.u2_vector) {
            return Err(SpinError::Config(format!(
                "material {}: biaxial axes u1 and u2 are not orthogonal",
                cfg.name
            )));
        }
        validate_triad(
            &format!("{}.t2_basis", cfg.name),
            cfg.t2_basis[0],
            cfg.t2_basis[1],
            cfg.t2_basis[2],
        )?;
        validate_triad(
            &format!("{}.t4_basis", cfg.name),
            cfg.t4_basis[0],
            cfg.t4_basis[1],
            cfg.t4_basis[2],
        )?;
        if cfg.neel_pair_constants.len() > max_materials {
            return Err(SpinError::Config(format!(
                "material {}: {} Neel pair constants exceed the material capacity {}",
                cfg.name,
                cfg.neel_pair_constants.len(),
                max_materials
            )));
        }
        if cfg.random_anisotropy && cfg.random_grain_anisotropy {
            return Err(SpinError::Config(format!(
                "material {}: random_anisotropy and random_grain_anisotropy are mutually exclusive",
                cfg.name
            )));
        }

        let inv = 1.0 / cfg.mu_s;

        let mut k_rot = [[0.0; 6]; 3];
        let mut k_rot_odd = [[0.0; 6]; 3];
        k_rot[0][0] = cfg.k2r1 * inv;
        k_rot[0][1] = cfg.k2r2 * inv;
        k_rot_odd[0][0] = cfg.k2r1_odd * inv;
        k_rot_odd[0][1] = cfg.k2r2_odd * inv;
        k_rot[1][0] = cfg.k4r1 * inv;
        k_rot[1][1] = cfg.k4r2 * inv;
        k_rot[1][2] = cfg.k4r3 * inv;
        k_rot[1][3] = cfg.k4r4 * inv;
        k_rot_odd[1][0] = cfg.k4r1_odd * inv;
        k_rot_odd[1][1] = cfg.k4r2_odd * inv;
        k_rot_odd[1][2] = cfg.k4r3_odd * inv;
        k_rot_odd[1][3] = cfg.k4r4_odd * inv;
        k_rot[2][0] = cfg.k6r1 * inv;
        k_rot[2][1] = cfg.k6r2 * inv;
        k_rot[2][2] = cfg.k6r3 * inv;
        k_rot[2][3] = cfg.k6r4 * inv;
        k_rot[2][4] = cfg.k6r5 * inv;
        k_rot[2][5] = cfg.k6r6 * inv;
        k_rot_odd[2][0] = cfg.k6r1_odd * inv;
        k_rot_odd[2][1] = cfg.k6r2_odd * inv;
        k_rot_odd[2][2] = cfg.k6r3_odd * inv;
        k_rot_odd[2][3] = cfg.k6r4_odd * inv;
        k_rot_odd[2][4] = cfg.k6r5_odd * inv;
        k_rot_odd[2][5] = cfg.k6r6_odd * inv;

        let ku2 = cfg.ku2 * inv;
        let kc4 = cfg.kc4 * inv;

        let mut kij = vec![0.0; max_materials];
        for (j, &k) in cfg.neel_pair_constants.iter().enumerate() {
            kij[j] = k * inv;
        }

        let mut ku_tensor = [0.0; 9];
        outer_accumulate(&mut ku_tensor, cfg.ku_vector, ku2);
        let mut kc_tensor = [0.0; 9];
        outer_accumulate(&mut kc_tensor, cfg.kc_vector1, kc4);
        outer_accumulate(&mut kc_tensor, cfg.kc_vector2, kc4);
        outer_accumulate(&mut kc_tensor, cfg.kc_vector3, kc4);

        let lattice_table = if cfg.lattice_table.is_empty() {
            None
        } else {
            let mut builder = TabulatedBuilder::new();
            for point in &cfg.lattice_table {
                builder.add_point(point[0], point[1]);
            }
            Some(builder.build().map_err(|e| {
                SpinError::Config(format!("material {}: {}", cfg.name, e))
            })?)
        };

        Ok(MaterialAnisotropy {
            name: cfg.name.clone(),
            mu_s: cfg.mu_s,
            ku2,
            ku4: cfg.ku4 * inv,
            ku6: cfg.ku6 * inv,
            k_rot,
            k_rot_odd,
            kc4,
            kc6: cfg.kc6 * inv,
            k_lattice: cfg.k_lattice * inv,
            ku_vector: cfg.ku_vector,
            kr_vector: cfg.kr_vector,
            kl_vector: cfg.kl_vector,
            u1_vector: cfg.u1_vector,
            u2_vector: cfg.u2_vector,
            kc_vector1: cfg.kc_vector1,
            kc_vector2: cfg.kc_vector2,
            kc_vector3: cfg.kc_vector3,
            kt2: [cfg.kt2[0] * inv, cfg.kt2[1] * inv, cfg.kt2[2] * inv],
            kt4: [cfg.kt4[0] * inv, cfg.kt4[1] * inv, cfg.kt4[2] * inv],
            t2_basis: cfg.t2_basis,
            t4_basis: cfg.t4_basis,
            kij,
            neel_threshold: cfg.neel_threshold,
            ku_tensor,
            kc_tensor,
            lattice_table,
            random_anisotropy: cfg.random_anisotropy,
            random_grain_anisotropy: cfg.random_grain_anisotropy,
        })
    }

    /// Reduced rotational constant for theta order `n` (2, 4 or 6) and
    /// phi order `m` (1..=n).
    #[inline]
    pub fn rotational_constant(&self, theta: u8, phi: u8, odd: bool) -> f64 {
        let row = (theta / 2 - 1) as usize;
        let col = (phi - 1) as usize;
        if odd {
            self.k_rot_odd[row][col]
        } else {
            self.k_rot[row][col]
        }
    }
}
