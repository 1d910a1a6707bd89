//! End-to-end decoding scenarios for factoring 77 with base 43.

use skoll_hal::Counts;
use skoll_period::{Fraction, PeriodVerdict, decode};

fn counts(entries: &[(&str, u64)]) -> Counts {
    entries
        .iter()
        .map(|(b, c)| (b.to_string(), *c))
        .collect()
}

#[test]
fn ideal_distribution_recovers_both_factors() {
    let counts = counts(&[("0000", 2048), ("1000", 2048)]);
    let report = decode(&counts, 43, 77, 4, 10).unwrap();

    let success = report.first_success().unwrap();
    assert_eq!(success.bitstring, "1000");
    assert_eq!(success.decimal, 8);
    assert!((success.phase - 0.5).abs() < 1e-12);
    assert_eq!(success.fraction, Fraction::from_ratio(1, 2));

    match &success.verdict {
        PeriodVerdict::EvenPeriod {
            period,
            guesses,
            factors,
        } => {
            assert_eq!(*period, 2);
            assert_eq!(*guesses, [7, 11]);
            assert_eq!(factors, &vec![7, 11]);
        }
        other => panic!("expected even period, got {other:?}"),
    }

    assert_eq!(report.factors(), vec![7, 11]);
}

#[test]
fn all_zero_outcomes_yield_no_period_without_failing() {
    let counts = counts(&[("0000", 4096)]);
    let report = decode(&counts, 43, 77, 4, 10).unwrap();

    assert_eq!(report.candidates.len(), 1);
    assert_eq!(report.candidates[0].verdict, PeriodVerdict::NoPeriod);
    assert!(report.first_success().is_none());
    assert!(report.factors().is_empty());
}

#[test]
fn odd_period_candidates_are_reported_and_skipped() {
    // 0011 reads as phase 3/16, which snaps to 1/5 under the bound 7.
    let counts = counts(&[("0011", 3000), ("1000", 1000), ("0000", 96)]);
    let report = decode(&counts, 3, 7, 4, 10).unwrap();

    assert_eq!(
        report.candidates[0].verdict,
        PeriodVerdict::OddPeriod { period: 5 }
    );
    // The scan keeps going after an odd candidate.
    assert_eq!(report.candidates.len(), 3);
    assert_eq!(report.candidates[2].verdict, PeriodVerdict::NoPeriod);
}

#[test]
fn noisy_counts_rank_by_probability() {
    // A realistic noisy histogram: the period-revealing outcome dominates
    // but stray outcomes appear. Ranking keeps the signal on top.
    let counts = counts(&[
        ("0010", 41),
        ("1000", 1900),
        ("0000", 2000),
        ("0111", 80),
        ("1100", 75),
    ]);
    let report = decode(&counts, 43, 77, 4, 3).unwrap();

    assert_eq!(report.candidates.len(), 3);
    assert_eq!(report.candidates[0].bitstring, "0000");
    assert_eq!(report.candidates[1].bitstring, "1000");
    assert_eq!(report.candidates[2].bitstring, "0111");
    assert_eq!(report.factors(), vec![7, 11]);
}

#[test]
fn dropped_shots_are_tolerated() {
    // Counts summing below the requested shot count still decode;
    // probabilities are normalized by the observed total.
    let counts = counts(&[("1000", 1000), ("0000", 1000)]);
    let report = decode(&counts, 43, 77, 4, 10).unwrap();

    let total: f64 = report.candidates.iter().map(|c| c.probability).sum();
    assert!((total - 1.0).abs() < 1e-12);
    assert_eq!(report.factors(), vec![7, 11]);
}

#[test]
fn decode_is_deterministic() {
    let counts = counts(&[("0100", 1024), ("1100", 1024), ("1000", 1024), ("0000", 1024)]);

    let a = decode(&counts, 43, 77, 4, 10).unwrap();
    let b = decode(&counts, 43, 77, 4, 10).unwrap();

    let order_a: Vec<_> = a.candidates.iter().map(|c| c.bitstring.clone()).collect();
    let order_b: Vec<_> = b.candidates.iter().map(|c| c.bitstring.clone()).collect();
    assert_eq!(order_a, order_b);
    assert_eq!(order_a, vec!["0100", "1100", "1000", "0000"]);
}
