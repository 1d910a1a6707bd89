//! State-transition tables for reversible oracle synthesis.

use rustc_hash::{FxHashMap, FxHashSet};
use tracing::debug;

use crate::error::{SynthError, SynthResult};

/// A partial permutation over fixed-width basis patterns.
///
/// Maps input basis patterns to output basis patterns. The table is the
/// ground truth from which oracle circuits are derived, so it enforces its
/// own well-formedness at insertion time: every pattern must fit the
/// declared width, and no input or output may repeat. Entries keep their
/// insertion order, which makes synthesized circuits deterministic.
#[derive(Debug, Clone)]
pub struct TransitionTable {
    /// Register width in bits.
    width: u32,
    /// Entries in insertion order.
    entries: Vec<(u64, u64)>,
    /// Input pattern → index into `entries`.
    by_input: FxHashMap<u64, usize>,
    /// Output patterns seen so far.
    outputs: FxHashSet<u64>,
}

impl TransitionTable {
    /// Create an empty table over patterns of the given bit width.
    pub fn new(width: u32) -> Self {
        Self {
            width,
            entries: vec![],
            by_input: FxHashMap::default(),
            outputs: FxHashSet::default(),
        }
    }

    /// Insert an input → output transition.
    ///
    /// Fails fast if either pattern exceeds the register width, or if the
    /// insertion would make the table non-injective on its domain.
    pub fn insert(&mut self, input: u64, output: u64) -> SynthResult<()> {
        for value in [input, output] {
            if self.width < 64 && value >> self.width != 0 {
                return Err(SynthError::PatternTooWide {
                    value,
                    width: self.width,
                });
            }
        }
        if self.by_input.contains_key(&input) {
            return Err(SynthError::DuplicateInput(input));
        }
        if !self.outputs.insert(output) {
            return Err(SynthError::DuplicateOutput(output));
        }

        self.by_input.insert(input, self.entries.len());
        self.entries.push((input, output));
        Ok(())
    }

    /// Build the permutation `x → a·x mod N` over the orbit of 1.
    ///
    /// The orbit `1, a, a² mod N, …` is exactly the set of work-register
    /// states phase estimation reaches from the initial basis state 1, so
    /// the table stays small even for wide registers. Construction fails if
    /// the residues do not fit the width, if the base is degenerate, or if
    /// the orbit does not close back on 1 (base not coprime with the
    /// modulus), which surfaces as a duplicate-pattern error.
    pub fn modular_multiplication(base: u64, modulus: u64, width: u32) -> SynthResult<Self> {
        if modulus < 2 || (width < 64 && (modulus - 1) >> width != 0) {
            return Err(SynthError::WidthTooSmall { modulus, width });
        }
        let a = base % modulus;
        if a == 0 || a == 1 {
            return Err(SynthError::InvalidBase {
                base,
                modulus,
                reason: "multiplication orbit of 1 is trivial".into(),
            });
        }

        let mut table = Self::new(width);
        let mut x = 1u64;
        // The orbit of a unit has at most N-1 elements; anything longer
        // means the orbit never returns to 1 and insert() has already
        // rejected a repeated pattern by then.
        for _ in 0..modulus {
            let y = (x as u128 * a as u128 % modulus as u128) as u64;
            table.insert(x, y)?;
            x = y;
            if x == 1 {
                break;
            }
        }

        debug!(
            base,
            modulus,
            period = table.len(),
            "built modular multiplication table"
        );
        Ok(table)
    }

    /// Compose this table with itself.
    ///
    /// For a permutation table of `x → a·x mod N` this yields
    /// `x → a²·x mod N` on the same domain. Fails if some output has no
    /// image, i.e. the table is not closed under composition.
    pub fn squared(&self) -> SynthResult<Self> {
        let mut table = Self::new(self.width);
        for &(input, output) in &self.entries {
            let twice = self
                .lookup(output)
                .ok_or(SynthError::OutsideDomain(output))?;
            table.insert(input, twice)?;
        }
        Ok(table)
    }

    /// Compose this table with itself `k` times (repeated squaring).
    ///
    /// The result maps `x → a^(2^k)·x mod N` for a base multiplication
    /// table. For a period-2 permutation every squaring collapses to the
    /// identity.
    pub fn pow(&self, k: u32) -> SynthResult<Self> {
        let mut table = self.clone();
        for _ in 0..k {
            table = table.squared()?;
        }
        Ok(table)
    }

    /// Get the image of a pattern, if it is in the domain.
    pub fn lookup(&self, input: u64) -> Option<u64> {
        self.by_input.get(&input).map(|&idx| self.entries[idx].1)
    }

    /// Get the register width in bits.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Get the number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if the table has no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Check if every entry maps a pattern to itself.
    pub fn is_identity(&self) -> bool {
        self.entries.iter().all(|&(input, output)| input == output)
    }

    /// Iterate over (input, output) pairs in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (u64, u64)> + '_ {
        self.entries.iter().copied()
    }

    /// Every pattern appearing in the table, inputs and outputs alike,
    /// deduplicated in first-appearance order.
    pub fn domain(&self) -> Vec<u64> {
        let mut seen = FxHashSet::default();
        let mut patterns = vec![];
        for &(input, output) in &self.entries {
            for pattern in [input, output] {
                if seen.insert(pattern) {
                    patterns.push(pattern);
                }
            }
        }
        patterns
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insert_and_lookup() {
        let mut table = TransitionTable::new(7);
        table.insert(0b0000001, 0b0101011).unwrap();
        table.insert(0b0101011, 0b0000001).unwrap();

        assert_eq!(table.len(), 2);
        assert_eq!(table.lookup(1), Some(43));
        assert_eq!(table.lookup(43), Some(1));
        assert_eq!(table.lookup(2), None);
    }

    #[test]
    fn test_pattern_too_wide() {
        let mut table = TransitionTable::new(3);
        let err = table.insert(0b10000, 0b001).unwrap_err();
        assert!(matches!(err, SynthError::PatternTooWide { value: 0b10000, width: 3 }));
    }

    #[test]
    fn test_duplicate_input_rejected() {
        let mut table = TransitionTable::new(4);
        table.insert(1, 2).unwrap();
        let err = table.insert(1, 3).unwrap_err();
        assert!(matches!(err, SynthError::DuplicateInput(1)));
    }

    #[test]
    fn test_duplicate_output_rejected() {
        let mut table = TransitionTable::new(4);
        table.insert(1, 2).unwrap();
        let err = table.insert(3, 2).unwrap_err();
        assert!(matches!(err, SynthError::DuplicateOutput(2)));
    }

    #[test]
    fn test_modular_multiplication_period2() {
        // 43² ≡ 1 (mod 77): a two-state cycle.
        let table = TransitionTable::modular_multiplication(43, 77, 7).unwrap();
        assert_eq!(table.len(), 2);
        assert_eq!(table.lookup(1), Some(43));
        assert_eq!(table.lookup(43), Some(1));
    }

    #[test]
    fn test_modular_multiplication_longer_orbit() {
        // ord_15(7) = 4: 1 → 7 → 4 → 13 → 1.
        let table = TransitionTable::modular_multiplication(7, 15, 4).unwrap();
        assert_eq!(table.len(), 4);
        assert_eq!(table.lookup(1), Some(7));
        assert_eq!(table.lookup(7), Some(4));
        assert_eq!(table.lookup(4), Some(13));
        assert_eq!(table.lookup(13), Some(1));
    }

    #[test]
    fn test_modular_multiplication_width_too_small() {
        let err = TransitionTable::modular_multiplication(43, 77, 6).unwrap_err();
        assert!(matches!(err, SynthError::WidthTooSmall { modulus: 77, width: 6 }));
    }

    #[test]
    fn test_modular_multiplication_rejects_noncoprime_base() {
        // gcd(6, 15) = 3: the orbit of 1 never returns, so the walk must
        // collide instead of silently producing a non-permutation.
        assert!(TransitionTable::modular_multiplication(6, 15, 4).is_err());
    }

    #[test]
    fn test_squared_period2_is_identity() {
        let table = TransitionTable::modular_multiplication(43, 77, 7).unwrap();
        let squared = table.squared().unwrap();
        assert!(squared.is_identity());
        assert_eq!(squared.len(), 2);
    }

    #[test]
    fn test_pow_matches_repeated_modmul() {
        let table = TransitionTable::modular_multiplication(7, 15, 4).unwrap();
        // 7^2 = 49 ≡ 4 (mod 15); squaring once should map x → 4x mod 15.
        let squared = table.pow(1).unwrap();
        assert_eq!(squared.lookup(1), Some(4));
        assert_eq!(squared.lookup(7), Some(13));
        // 7^4 ≡ 1 (mod 15): two squarings give the identity.
        assert!(table.pow(2).unwrap().is_identity());
    }
}
