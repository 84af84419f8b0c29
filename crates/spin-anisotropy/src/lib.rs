// ─────────────────────────────────────────────────────────────────────
// SCPN Spin Dynamics — Anisotropy Engine
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
//! Magnetic anisotropy field and energy engine.
//!
//! Given per-atom unit spin directions and material ids, the engine adds
//! the anisotropy contribution to caller-owned effective-field arrays and
//! evaluates per-atom anisotropy energies. Term families are selected once
//! at initialisation from configuration; Neel tensors and lattice
//! interpolation tables are precomputed at the same time.

pub mod engine;
pub mod lattice;
pub mod material;
pub mod neel;
pub mod parallel;
pub mod terms;

pub use engine::AnisotropyEngine;
pub use material::MaterialAnisotropy;
pub use neel::NeelBuildSummary;
