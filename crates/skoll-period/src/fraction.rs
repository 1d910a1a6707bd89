//! Exact rational arithmetic for phase decoding.
//!
//! The decoder turns a measured phase `decimal / 2^P` into the nearest
//! fraction with a bounded denominator. That nearest-fraction search is
//! done in exact integer arithmetic; floating point only appears in
//! display helpers.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Greatest common divisor by Euclid's algorithm. `gcd(0, n) == n`.
pub fn gcd(mut a: u64, mut b: u64) -> u64 {
    while b != 0 {
        let r = a % b;
        a = b;
        b = r;
    }
    a
}

/// `base ^ exponent mod modulus` by repeated squaring.
///
/// Intermediate products are taken in `u128`, so any `u64` modulus is
/// safe from overflow.
pub fn mod_pow(base: u64, mut exponent: u64, modulus: u64) -> u64 {
    if modulus == 1 {
        return 0;
    }
    let modulus = modulus as u128;
    let mut result = 1u128;
    let mut base = base as u128 % modulus;
    while exponent > 0 {
        if exponent & 1 == 1 {
            result = result * base % modulus;
        }
        base = base * base % modulus;
        exponent >>= 1;
    }
    result as u64
}

/// A non-negative rational number in lowest terms.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Fraction {
    /// Numerator.
    pub numerator: u64,
    /// Denominator, always positive.
    pub denominator: u64,
}

impl Fraction {
    /// Build `numerator / denominator` reduced to lowest terms.
    ///
    /// A zero numerator normalizes to `0/1`. A zero denominator also
    /// normalizes to `0/1`; callers are expected to never pass one.
    pub fn from_ratio(numerator: u64, denominator: u64) -> Self {
        if denominator == 0 {
            return Self {
                numerator: 0,
                denominator: 1,
            };
        }
        let g = gcd(numerator, denominator).max(1);
        Self {
            numerator: numerator / g,
            denominator: denominator / g,
        }
    }

    /// The closest fraction to `self` whose denominator is at most
    /// `max_denominator` (clamped to at least 1).
    ///
    /// Walks the continued-fraction expansion of `self` to the last
    /// convergent within the bound, then compares it against the closing
    /// semiconvergent; ties go to the convergent. This is the standard
    /// bounded-denominator best approximation.
    pub fn limit_denominator(&self, max_denominator: u64) -> Fraction {
        let max_denominator = max_denominator.max(1);
        if self.denominator <= max_denominator {
            return *self;
        }

        let (mut p0, mut q0, mut p1, mut q1) = (0u64, 1u64, 1u64, 0u64);
        let (mut n, mut d) = (self.numerator, self.denominator);
        loop {
            let a = n / d;
            let q2 = q0 + a * q1;
            if q2 > max_denominator {
                break;
            }
            let p2 = p0 + a * p1;
            p0 = p1;
            q0 = q1;
            p1 = p2;
            q1 = q2;
            let r = n - a * d;
            n = d;
            d = r;
        }

        // Closing semiconvergent with the largest in-bound denominator.
        let k = (max_denominator - q0) / q1;
        let semiconvergent = Fraction {
            numerator: p0 + k * p1,
            denominator: q0 + k * q1,
        };
        let convergent = Fraction {
            numerator: p1,
            denominator: q1,
        };

        if self.distance_cmp(convergent, semiconvergent) == std::cmp::Ordering::Greater {
            semiconvergent
        } else {
            convergent
        }
    }

    /// Compare `|a - self|` with `|b - self|` in exact arithmetic.
    fn distance_cmp(&self, a: Fraction, b: Fraction) -> std::cmp::Ordering {
        let delta = |f: Fraction| -> u128 {
            let lhs = u128::from(f.numerator) * u128::from(self.denominator);
            let rhs = u128::from(self.numerator) * u128::from(f.denominator);
            lhs.abs_diff(rhs)
        };
        // |a - self| = delta(a) / (a.den * self.den); cross-multiply.
        (delta(a) * u128::from(b.denominator)).cmp(&(delta(b) * u128::from(a.denominator)))
    }

    /// Floating-point value, for display and logging.
    pub fn as_f64(&self) -> f64 {
        self.numerator as f64 / self.denominator as f64
    }

    /// Whether this is exactly zero.
    pub fn is_zero(&self) -> bool {
        self.numerator == 0
    }
}

impl fmt::Display for Fraction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.numerator, self.denominator)
    }
}
