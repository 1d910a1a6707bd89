//! Backend capability descriptions.

use serde::{Deserialize, Serialize};

/// The set of gate names a backend accepts.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GateSet {
    /// Accepted gate names (as reported by `Instruction::name`).
    pub gates: Vec<String>,
}

impl GateSet {
    /// A gate set accepting everything the IR can express.
    pub fn universal() -> Self {
        Self {
            gates: ["id", "x", "h", "p", "cx", "mcx", "cp", "swap"]
                .into_iter()
                .map(String::from)
                .collect(),
        }
    }

    /// Check if a gate name is accepted.
    pub fn contains(&self, gate: &str) -> bool {
        self.gates.iter().any(|g| g == gate)
    }
}

/// Static description of what a backend can execute.
///
/// Capabilities are cached at backend construction and returned by
/// reference; querying them never performs I/O.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Capabilities {
    /// Maximum number of qubits.
    pub num_qubits: u32,
    /// Maximum number of shots per job.
    pub max_shots: u32,
    /// Whether this backend is a simulator/replay device rather than
    /// hardware.
    pub is_simulator: bool,
    /// Gates the backend accepts.
    pub gate_set: GateSet,
}

impl Capabilities {
    /// Capabilities of a local replay/simulation backend.
    pub fn replay(num_qubits: u32) -> Self {
        Self {
            num_qubits,
            max_shots: 1 << 20,
            is_simulator: true,
            gate_set: GateSet::universal(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_universal_gate_set() {
        let gates = GateSet::universal();
        assert!(gates.contains("cx"));
        assert!(gates.contains("mcx"));
        assert!(!gates.contains("rzz"));
    }

    #[test]
    fn test_replay_capabilities() {
        let caps = Capabilities::replay(24);
        assert!(caps.is_simulator);
        assert_eq!(caps.num_qubits, 24);
    }
}
