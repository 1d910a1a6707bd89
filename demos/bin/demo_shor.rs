//! Shor Period-Finding Demo
//!
//! Synthesizes a phase-estimation circuit for modular multiplication,
//! executes it against a replay backend loaded with the noiseless
//! outcome distribution, and decodes the counts into factors.

use anyhow::Context;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use skoll_adapter_replay::ReplayBackend;
use skoll_demos::{print_header, print_info, print_result, print_section, print_success};
use skoll_hal::Backend;
use skoll_period::{PeriodVerdict, decode};
use skoll_synth::PhaseEstimation;

#[derive(Parser, Debug)]
#[command(name = "demo-shor")]
#[command(about = "Demonstrate Shor's period-finding pipeline")]
struct Args {
    /// Base of the modular exponentiation (must be coprime to the modulus)
    #[arg(short, long, default_value = "43")]
    base: u64,

    /// Number to factor
    #[arg(short, long, default_value = "77")]
    modulus: u64,

    /// Number of counting qubits (phase readout precision)
    #[arg(short = 'n', long, default_value = "4")]
    counting_bits: u32,

    /// Number of shots
    #[arg(short, long, default_value = "4096")]
    shots: u32,

    /// Seed for the replay backend's sampling
    #[arg(long, default_value = "7")]
    seed: u64,

    /// How many ranked outcomes to decode
    #[arg(long, default_value = "10")]
    top_k: usize,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let args = Args::parse();

    print_header("Shor Period-Finding Demo");

    print_section("Problem Setup");
    print_result("Modulus N", args.modulus);
    print_result("Base a", args.base);
    print_result("Counting qubits", args.counting_bits);
    print_result("Shots", args.shots);

    print_section("Circuit Synthesis");
    let estimation = PhaseEstimation::new(args.base, args.modulus, args.counting_bits);
    let circuit = estimation
        .build()
        .context("failed to synthesize the phase-estimation circuit")?;
    print_result("Circuit", circuit.name());
    print_result("Qubits", circuit.num_qubits());
    print_result("Classical bits", circuit.num_clbits());
    print_result("Operations", circuit.num_ops());

    print_section("Execution");
    let backend = ReplayBackend::ideal_period_two(
        args.counting_bits,
        circuit.num_qubits() as u32,
        args.seed,
    );
    print_result("Backend", backend.name());

    let job_id = backend
        .submit(&circuit, args.shots)
        .await
        .context("submission failed")?;
    let result = backend.wait(&job_id).await.context("execution failed")?;
    print_result("Job", &job_id);
    print_result("Distinct outcomes", result.counts.len());

    print_section("Decoding");
    let report = decode(
        &result.counts,
        args.base,
        args.modulus,
        args.counting_bits,
        args.top_k,
    )?;

    println!(
        "  {:<6} {:>10} {:>8} {:>8} {:>10}  {}",
        "Rank", "Bitstring", "Count", "Phase", "Fraction", "Verdict"
    );
    for (rank, candidate) in report.candidates.iter().enumerate() {
        println!(
            "  {:<6} {:>10} {:>8} {:>8.4} {:>10}  {}",
            rank + 1,
            candidate.bitstring,
            candidate.count,
            candidate.phase,
            candidate.fraction.to_string(),
            describe(&candidate.verdict),
        );
    }

    println!();
    match report.first_success() {
        Some(candidate) => {
            let factors = candidate.verdict.factors();
            print_success(&format!(
                "Recovered factors of {}: {}",
                args.modulus,
                factors
                    .iter()
                    .map(u64::to_string)
                    .collect::<Vec<_>>()
                    .join(" × ")
            ));
        }
        None => {
            print_info("No candidate yielded a nontrivial factor; rerun with more shots");
        }
    }

    Ok(())
}

fn describe(verdict: &PeriodVerdict) -> String {
    match verdict {
        PeriodVerdict::NoPeriod => "no period information".to_string(),
        PeriodVerdict::OddPeriod { period } => format!("period {period} is odd, skipped"),
        PeriodVerdict::EvenPeriod {
            period, factors, ..
        } => {
            if factors.is_empty() {
                format!("period {period}: guesses trivial")
            } else {
                format!(
                    "period {period}: factors {}",
                    factors
                        .iter()
                        .map(u64::to_string)
                        .collect::<Vec<_>>()
                        .join(", ")
                )
            }
        }
    }
}
