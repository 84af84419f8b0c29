//! Deterministic atom-range decomposition for data-parallel evaluation.
//!
//! Field accumulation is embarrassingly parallel across atoms: each atom's
//! contribution reads only its own spin and writes only its own output
//! slot, so contiguous ranges can be handed to independent workers.

use spin_types::error::{SpinError, SpinResult};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AtomRange {
    pub start: usize,
    pub end: usize,
}

impl AtomRange {
    pub fn len(&self) -> usize {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }
}

/// Split `num_atoms` into `num_chunks` contiguous ranges covering every
/// atom exactly once, the first `num_atoms % num_chunks` ranges one atom
/// longer.
pub fn decompose_atoms(num_atoms: usize, num_chunks: usize) -> SpinResult<Vec<AtomRange>> {
    if num_atoms == 0 {
        return Err(SpinError::Config(
            "atom decomposition requires at least one atom".to_string(),
        ));
    }
    if num_chunks == 0 {
        return Err(SpinError::Config(
            "atom decomposition requires at least one chunk".to_string(),
        ));
    }
    if num_chunks > num_atoms {
        return Err(SpinError::Config(format!(
            "cannot split {num_atoms} atoms across {num_chunks} chunks"
        )));
    }

    let base = num_atoms / num_chunks;
    let rem = num_atoms % num_chunks;
    let mut out = Vec::with_capacity(num_chunks);
    let mut cursor = 0usize;
    for chunk in 0..num_chunks {
        let len = base + usize::from(chunk < rem);
        out.push(AtomRange {
            start: cursor,
            end: cursor + len,
        });
        cursor += len;
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exact_cover() {
        let ranges = decompose_atoms(10, 3).unwrap();
        assert_eq!(ranges.len(), 3);
        assert_eq!(ranges[0], AtomRange { start: 0, end: 4 });
        assert_eq!(ranges[1], AtomRange { start: 4, end: 7 });
        assert_eq!(ranges[2], AtomRange { start: 7, end: 10 });
        let total: usize = ranges.iter().map(|r| r.len()).sum();
        assert_eq!(total, 10);
    }

    #[test]
    fn test_even_split() {
        let ranges = decompose_atoms(8, 4).unwrap();
        assert!(ranges.iter().all(|r| r.len() == 2));
    }

    #[test]
    fn test_invalid_inputs() {
        assert!(decompose_atoms(0, 1).is_err());
        assert!(decompose_atoms(4, 0).is_err());
        assert!(decompose_atoms(3, 4).is_err());
    }
}
