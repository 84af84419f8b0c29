// ─────────────────────────────────────────────────────────────────────
// SCPN Spin Dynamics — Config
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
use serde::{Deserialize, Serialize};

/// Top-level anisotropy configuration.
///
/// Scalar constants are given in Joules per atom; axis vectors must be
/// unit-norm (they are validated, never renormalized, at initialisation).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnisotropyConfig {
    /// Capacity of the material-pair constant tables. Materials beyond this
    /// count are a configuration error.
    #[serde(default = "default_max_materials")]
    pub max_materials: usize,
    pub materials: Vec<MaterialConfig>,
    #[serde(default)]
    pub terms: TermFlags,
    #[serde(default)]
    pub neel: NeelConfig,
}

impl AnisotropyConfig {
    /// Load from a JSON file.
    pub fn from_file(path: &str) -> crate::error::SpinResult<Self> {
        let contents = std::fs::read_to_string(path)?;
        let config: Self = serde_json::from_str(&contents)?;
        Ok(config)
    }
}

fn default_max_materials() -> usize {
    16
}

/// Per-material anisotropy parameters.
///
/// Rotational constants follow the k{n}r{m} naming: theta order n,
/// phi order m, with `_odd` marking the sin(m*phi) variant.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MaterialConfig {
    pub name: String,

    /// Atomic spin moment (J/T). All constants are reduced to field units
    /// by this moment during initialisation.
    #[serde(default = "default_mu_s")]
    pub mu_s: f64,

    // Uniaxial constants
    #[serde(default)]
    pub ku2: f64,
    #[serde(default)]
    pub ku4: f64,
    #[serde(default)]
    pub ku6: f64,

    // Rotational (azimuthal harmonic) constants
    #[serde(default)]
    pub k2r1: f64,
    #[serde(default)]
    pub k2r1_odd: f64,
    #[serde(default)]
    pub k2r2: f64,
    #[serde(default)]
    pub k2r2_odd: f64,
    #[serde(default)]
    pub k4r1: f64,
    #[serde(default)]
    pub k4r1_odd: f64,
    #[serde(default)]
    pub k4r2: f64,
    #[serde(default)]
    pub k4r2_odd: f64,
    #[serde(default)]
    pub k4r3: f64,
    #[serde(default)]
    pub k4r3_odd: f64,
    #[serde(default)]
    pub k4r4: f64,
    #[serde(default)]
    pub k4r4_odd: f64,
    #[serde(default)]
    pub k6r1: f64,
    #[serde(default)]
    pub k6r1_odd: f64,
    #[serde(default)]
    pub k6r2: f64,
    #[serde(default)]
    pub k6r2_odd: f64,
    #[serde(default)]
    pub k6r3: f64,
    #[serde(default)]
    pub k6r3_odd: f64,
    #[serde(default)]
    pub k6r4: f64,
    #[serde(default)]
    pub k6r4_odd: f64,
    #[serde(default)]
    pub k6r5: f64,
    #[serde(default)]
    pub k6r5_odd: f64,
    #[serde(default)]
    pub k6r6: f64,
    #[serde(default)]
    pub k6r6_odd: f64,

    // Cubic constants
    #[serde(default)]
    pub kc4: f64,
    #[serde(default)]
    pub kc6: f64,

    /// Scale factor for the tabulated lattice anisotropy curve.
    #[serde(default)]
    pub k_lattice: f64,

    // Axis system: (ku, kr, kl) must form an orthonormal triad.
    #[serde(default = "default_ku_vector")]
    pub ku_vector: [f64; 3],
    #[serde(default = "default_kr_vector")]
    pub kr_vector: [f64; 3],
    #[serde(default = "default_kl_vector")]
    pub kl_vector: [f64; 3],

    // Biaxial axis pair, 45 degrees from the cubic axes by default.
    #[serde(default = "default_u1_vector")]
    pub u1_vector: [f64; 3],
    #[serde(default = "default_u2_vector")]
    pub u2_vector: [f64; 3],

    // Cubic axes: must form an orthonormal triad.
    #[serde(default = "default_kc_vector1")]
    pub kc_vector1: [f64; 3],
    #[serde(default = "default_kc_vector2")]
    pub kc_vector2: [f64; 3],
    #[serde(default = "default_kc_vector3")]
    pub kc_vector3: [f64; 3],

    // Triaxial constants (x, y, z components) and bases.
    #[serde(default)]
    pub kt2: [f64; 3],
    #[serde(default)]
    pub kt4: [f64; 3],
    #[serde(default = "default_triaxial_basis")]
    pub t2_basis: [[f64; 3]; 3],
    #[serde(default = "default_triaxial_basis")]
    pub t4_basis: [[f64; 3]; 3],

    /// Neel pair constants indexed by neighbour material; padded with zeros
    /// up to `max_materials`.
    #[serde(default)]
    pub neel_pair_constants: Vec<f64>,

    /// Coordination threshold for this material when the per-material
    /// threshold mode is active.
    #[serde(default)]
    pub neel_threshold: u32,

    /// Tabulated (temperature, constant) samples for lattice anisotropy.
    /// Temperatures must be strictly increasing.
    #[serde(default)]
    pub lattice_table: Vec<[f64; 2]>,

    /// Assign every atom of this material an independent random easy axis.
    #[serde(default)]
    pub random_anisotropy: bool,
    /// Assign one shared random easy axis per grain.
    #[serde(default)]
    pub random_grain_anisotropy: bool,
}

fn default_mu_s() -> f64 {
    crate::constants::DEFAULT_MU_S
}
fn default_ku_vector() -> [f64; 3] {
    [0.0, 0.0, 1.0]
}
fn default_kr_vector() -> [f64; 3] {
    [1.0, 0.0, 0.0]
}
fn default_kl_vector() -> [f64; 3] {
    [0.0, 1.0, 0.0]
}
fn default_u1_vector() -> [f64; 3] {
    let s = std::f64::consts::FRAC_1_SQRT_2;
    [s, s, 0.0]
}
fn default_u2_vector() -> [f64; 3] {
    let s = std::f64::consts::FRAC_1_SQRT_2;
    [s, -s, 0.0]
}
fn default_kc_vector1() -> [f64; 3] {
    [1.0, 0.0, 0.0]
}
fn default_kc_vector2() -> [f64; 3] {
    [0.0, 1.0, 0.0]
}
fn default_kc_vector3() -> [f64; 3] {
    [0.0, 0.0, 1.0]
}
fn default_triaxial_basis() -> [[f64; 3]; 3] {
    [[1.0, 0.0, 0.0], [0.0, 1.0, 0.0], [0.0, 0.0, 1.0]]
}

impl MaterialConfig {
    /// A material with the given name and all constants zero.
    pub fn named(name: &str) -> Self {
        MaterialConfig {
            name: name.to_string(),
            mu_s: default_mu_s(),
            ku2: 0.0,
            ku4: 0.0,
            ku6: 0.0,
            k2r1: 0.0,
            k2r1_odd: 0.0,
            k2r2: 0.0,
            k2r2_odd: 0.0,
            k4r1: 0.0,
            k4r1_odd: 0.0,
            k4r2: 0.0,
            k4r2_odd: 0.0,
            k4r3: 0.0,
            k4r3_odd: 0.0,
            k4r4: 0.0,
            k4r4_odd: 0.0,
            k6r1: 0.0,
            k6r1_odd: 0.0,
            k6r2: 0.0,
            k6r2_odd: 0.0,
            k6r3: 0.0,
            k6r3_odd: 0.0,
            k6r4: 0.0,
            k6r4_odd: 0.0,
            k6r5: 0.0,
            k6r5_odd: 0.0,
            k6r6: 0.0,
            k6r6_odd: 0.0,
            kc4: 0.0,
            kc6: 0.0,
            k_lattice: 0.0,
            ku_vector: default_ku_vector(),
            kr_vector: default_kr_vector(),
            kl_vector: default_kl_vector(),
            u1_vector: default_u1_vector(),
            u2_vector: default_u2_vector(),
            kc_vector1: default_kc_vector1(),
            kc_vector2: default_kc_vector2(),
            kc_vector3: default_kc_vector3(),
            kt2: [0.0; 3],
            kt4: [0.0; 3],
            t2_basis: default_triaxial_basis(),
            t4_basis: default_triaxial_basis(),
            neel_pair_constants: Vec::new(),
            neel_threshold: 0,
            lattice_table: Vec::new(),
            random_anisotropy: false,
            random_grain_anisotropy: false,
        }
    }
}

/// Enable flags, one per term family. All off by default.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct TermFlags {
    pub uniaxial_second_order: bool,
    pub rotational_2_1: bool,
    pub rotational_2_1_odd: bool,
    pub rotational_2_2: bool,
    pub rotational_2_2_odd: bool,
    pub uniaxial_fourth_order: bool,
    pub rotational_4_1: bool,
    pub rotational_4_1_odd: bool,
    pub rotational_4_2: bool,
    pub rotational_4_2_odd: bool,
    pub rotational_4_3: bool,
    pub rotational_4_3_odd: bool,
    pub rotational_4_4: bool,
    pub rotational_4_4_odd: bool,
    pub uniaxial_sixth_order: bool,
    pub rotational_6_1: bool,
    pub rotational_6_1_odd: bool,
    pub rotational_6_2: bool,
    pub rotational_6_2_odd: bool,
    pub rotational_6_3: bool,
    pub rotational_6_3_odd: bool,
    pub rotational_6_4: bool,
    pub rotational_6_4_odd: bool,
    pub rotational_6_5: bool,
    pub rotational_6_5_odd: bool,
    pub rotational_6_6: bool,
    pub rotational_6_6_odd: bool,
    pub biaxial_fourth_order_simple: bool,
    pub cubic_fourth_order: bool,
    pub cubic_fourth_order_rotation: bool,
    pub cubic_sixth_order: bool,
    pub triaxial_second_order: bool,
    pub triaxial_second_order_rotated: bool,
    pub triaxial_fourth_order: bool,
    pub triaxial_fourth_order_rotated: bool,
    pub neel_anisotropy: bool,
    pub lattice_anisotropy: bool,
    pub random_anisotropy: bool,
}

/// Neel (surface) anisotropy settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct NeelConfig {
    /// Use each material's own coordination threshold instead of the
    /// global one.
    pub per_material_threshold: bool,
    /// Global coordination threshold: atoms with fewer nearest-neighbour
    /// bonds are classified as surface atoms.
    pub threshold: u32,
    /// Bonds no longer than this count as nearest-neighbour bonds.
    /// `None` means every bond counts.
    pub nearest_neighbour_distance: Option<f64>,
    /// Scale each bond by exp(-F*(r - r0)/r0).
    pub range_dependent: bool,
    /// r0 of the exponential range dependence.
    pub exponential_range: f64,
    /// F of the exponential range dependence.
    pub exponential_factor: f64,
}

impl Default for NeelConfig {
    fn default() -> Self {
        NeelConfig {
            per_material_threshold: false,
            threshold: 0,
            nearest_neighbour_distance: None,
            range_dependent: false,
            exponential_range: 2.5,
            exponential_factor: 1.0,
        }
    }
}
