// ─────────────────────────────────────────────────────────────────────
// SCPN Spin Dynamics — Constants
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
/// Bohr magneton (J/T)
pub const MU_B: f64 = 9.2740100783e-24;

/// Boltzmann constant (J/K)
pub const K_BOLTZMANN: f64 = 1.380649e-23;

/// Electron gyromagnetic ratio (rad s^-1 T^-1)
pub const GAMMA_E: f64 = 1.76085963023e11;

/// Vacuum permeability (H/m)
pub const MU0_SI: f64 = 1.2566370614e-6;

/// Default atomic spin moment (J/T) - 1.72 mu_B, generic transition metal.
pub const DEFAULT_MU_S: f64 = 1.72 * MU_B;
