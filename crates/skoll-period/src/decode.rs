//! Measurement decoding: counts → phases → period → factor guesses.

use serde::{Deserialize, Serialize};
use tracing::debug;

use skoll_hal::Counts;

use crate::error::{DecodeError, DecodeResult};
use crate::fraction::{Fraction, gcd, mod_pow};

/// What one measured phase says about the period.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum PeriodVerdict {
    /// Phase 0 carries no period information.
    NoPeriod,
    /// The recovered period is odd, so `a^(r/2)` does not exist and no
    /// factor guesses can be formed.
    OddPeriod {
        /// The odd period candidate.
        period: u64,
    },
    /// An even period candidate, with the two gcd guesses it yields.
    EvenPeriod {
        /// The even period candidate.
        period: u64,
        /// `gcd(a^(r/2) - 1, N)` and `gcd(a^(r/2) + 1, N)`, unfiltered.
        guesses: [u64; 2],
        /// The guesses that are nontrivial factors of the modulus.
        factors: Vec<u64>,
    },
}

impl PeriodVerdict {
    /// Nontrivial factors this verdict produced, if any.
    pub fn factors(&self) -> &[u64] {
        match self {
            PeriodVerdict::EvenPeriod { factors, .. } => factors,
            _ => &[],
        }
    }
}

/// One decoded measurement outcome.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Candidate {
    /// The measured bitstring, most significant counting bit first.
    pub bitstring: String,
    /// How many shots observed this outcome.
    pub count: u64,
    /// Fraction of all observed shots.
    pub probability: f64,
    /// The bitstring read as a binary integer.
    pub decimal: u64,
    /// The measured phase `decimal / 2^P`.
    pub phase: f64,
    /// Best rational approximation of the phase with denominator at most
    /// the modulus.
    pub fraction: Fraction,
    /// What this phase says about the period.
    pub verdict: PeriodVerdict,
}

/// The full decode of one execution's counts.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DecodeReport {
    /// Candidates in rank order: probability descending, ties broken by
    /// the order the backend first reported each bitstring.
    pub candidates: Vec<Candidate>,
}

impl DecodeReport {
    /// The highest-ranked candidate that produced nontrivial factors.
    pub fn first_success(&self) -> Option<&Candidate> {
        self.candidates
            .iter()
            .find(|c| !c.verdict.factors().is_empty())
    }

    /// All distinct nontrivial factors across candidates, in rank order.
    pub fn factors(&self) -> Vec<u64> {
        let mut factors = Vec::new();
        for candidate in &self.candidates {
            for &f in candidate.verdict.factors() {
                if !factors.contains(&f) {
                    factors.push(f);
                }
            }
        }
        factors
    }
}

/// Decode phase-estimation counts into period and factor candidates.
///
/// Ranks outcomes by probability (descending; ties keep the backend's
/// reporting order), keeps the top `top_k`, and for each recovers the
/// phase `decimal / 2^counting_bits`, its best bounded-denominator
/// approximation, and the factor guesses `gcd(base^(r/2) ± 1, modulus)`
/// when the period candidate `r` is even. A candidate that yields no
/// factors never aborts the scan; every ranked outcome gets a verdict.
pub fn decode(
    counts: &Counts,
    base: u64,
    modulus: u64,
    counting_bits: u32,
    top_k: usize,
) -> DecodeResult<DecodeReport> {
    if counting_bits == 0 || counting_bits > 63 {
        return Err(DecodeError::InvalidWidth(counting_bits));
    }
    if modulus < 2 {
        return Err(DecodeError::InvalidModulus(modulus));
    }

    let mut ranked: Vec<(String, u64)> = counts.iter().map(|(b, c)| (b.to_string(), c)).collect();
    // Stable sort: equal counts keep insertion order.
    ranked.sort_by(|(_, a), (_, b)| b.cmp(a));
    ranked.truncate(top_k);

    let total = counts.total().max(1) as f64;
    let denominator = 1u64 << counting_bits;

    let mut candidates = Vec::with_capacity(ranked.len());
    for (bitstring, count) in ranked {
        let decimal = parse_bitstring(&bitstring, counting_bits)?;
        let phase = decimal as f64 / denominator as f64;
        let fraction = Fraction::from_ratio(decimal, denominator).limit_denominator(modulus);
        let verdict = judge(base, modulus, fraction);

        debug!(
            bitstring,
            count,
            phase,
            %fraction,
            ?verdict,
            "decoded candidate"
        );

        candidates.push(Candidate {
            bitstring,
            count,
            probability: count as f64 / total,
            decimal,
            phase,
            fraction,
            verdict,
        });
    }

    Ok(DecodeReport { candidates })
}

/// Parse a bitstring of exactly `width` binary digits.
fn parse_bitstring(bitstring: &str, width: u32) -> DecodeResult<u64> {
    let malformed = || DecodeError::MalformedBitstring {
        bitstring: bitstring.to_string(),
        width,
    };
    if bitstring.len() != width as usize {
        return Err(malformed());
    }
    u64::from_str_radix(bitstring, 2).map_err(|_| malformed())
}

/// Turn a phase fraction into a period verdict.
fn judge(base: u64, modulus: u64, fraction: Fraction) -> PeriodVerdict {
    if fraction.is_zero() {
        return PeriodVerdict::NoPeriod;
    }

    let period = fraction.denominator;
    if period % 2 != 0 {
        return PeriodVerdict::OddPeriod { period };
    }

    let half_power = mod_pow(base, period / 2, modulus);
    // Offsets taken mod N keep this total even for a base sharing a
    // factor with the modulus (where half_power can be 0).
    let minus_one = if half_power == 0 {
        modulus - 1
    } else {
        half_power - 1
    };
    let guesses = [gcd(minus_one, modulus), gcd((half_power + 1) % modulus, modulus)];
    let mut factors: Vec<u64> = guesses
        .iter()
        .copied()
        .filter(|&g| g != 1 && g != modulus)
        .collect();
    factors.dedup();

    PeriodVerdict::EvenPeriod {
        period,
        guesses,
        factors,
    }
}
