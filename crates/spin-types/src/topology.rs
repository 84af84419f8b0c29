// ─────────────────────────────────────────────────────────────────────
// SCPN Spin Dynamics — Topology
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
//! Neighbour topology consumed (not built) by the anisotropy core.
//!
//! The Neel tensor builder depends only on the [`BondTopology`] contract:
//! for each atom, a slice of bonds carrying the neighbour id, the
//! interaction-type id and the bond vector.

use crate::error::{SpinError, SpinResult};

/// One directed bond from an atom to a neighbour.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bond {
    pub neighbour: usize,
    /// Interaction-type id from the unit-cell template; resolves
    /// exchange-like bond classes upstream.
    pub interaction: usize,
    pub dx: f64,
    pub dy: f64,
    pub dz: f64,
}

impl Bond {
    pub fn length(&self) -> f64 {
        (self.dx * self.dx + self.dy * self.dy + self.dz * self.dz).sqrt()
    }
}

/// Bond-iteration contract: atom index to its bonded neighbours.
pub trait BondTopology {
    fn num_atoms(&self) -> usize;
    fn bonds(&self, atom: usize) -> &[Bond];
}

/// CSR neighbour list: per-atom contiguous ranges into a flat bond array.
#[derive(Debug, Clone)]
pub struct NeighbourList {
    offsets: Vec<usize>,
    bonds: Vec<Bond>,
}

impl NeighbourList {
    /// Build from per-atom adjacency. Neighbour indices are validated
    /// against the atom count.
    pub fn from_adjacency(adjacency: Vec<Vec<Bond>>) -> SpinResult<Self> {
        let num_atoms = adjacency.len();
        let mut offsets = Vec::with_capacity(num_atoms + 1);
        let mut bonds = Vec::new();
        offsets.push(0);
        for atom_bonds in &adjacency {
            for bond in atom_bonds {
                if bond.neighbour >= num_atoms {
                    return Err(SpinError::AtomOutOfRange {
                        index: bond.neighbour,
                        count: num_atoms,
                    });
                }
                bonds.push(*bond);
            }
            offsets.push(bonds.len());
        }
        Ok(NeighbourList { offsets, bonds })
    }

    /// An empty topology with the given atom count (no bonds).
    pub fn empty(num_atoms: usize) -> Self {
        NeighbourList {
            offsets: vec![0; num_atoms + 1],
            bonds: Vec::new(),
        }
    }

    pub fn num_bonds(&self) -> usize {
        self.bonds.len()
    }
}

impl BondTopology for NeighbourList {
    fn num_atoms(&self) -> usize {
        self.offsets.len() - 1
    }

    fn bonds(&self, atom: usize) -> &[Bond] {
        &self.bonds[self.offsets[atom]..self.offsets[atom + 1]]
    }
}
