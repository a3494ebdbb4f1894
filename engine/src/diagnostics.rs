//! Classification of rejected simulations
//!
//! The submitter hands back the simulation logs; this maps them onto the
//! few failure kinds a caller can act on. Unmatched text is kept verbatim.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RejectionKind {
    /// A derived or supplied account is not the one the program expects
    AddressMismatch,
    /// Pool fee parameters disagree with the program
    FeeMismatch,
    InsufficientFunds,
    /// Output fell below the instruction's minimum
    SlippageExceeded,
    /// Raw diagnostic text for operators
    Unknown(String),
}

/// Simulation or preflight refused the batch
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("simulation rejected ({kind:?})")]
pub struct SimulationRejected {
    pub kind: RejectionKind,
    pub diagnostics: Vec<String>,
}

impl SimulationRejected {
    pub fn from_logs(diagnostics: Vec<String>) -> Self {
        Self {
            kind: classify(&diagnostics),
            diagnostics,
        }
    }
}

// Lowercase fragments; first table entry to match a line wins
const PATTERNS: &[(&str, Kind)] = &[
    ("exceeds desired slippage limit", Kind::Slippage),
    ("exceededslippage", Kind::Slippage),
    // AMM program error 30
    ("custom program error: 0x1e", Kind::Slippage),
    ("insufficient funds", Kind::Funds),
    ("insufficient lamports", Kind::Funds),
    ("no record of a prior credit", Kind::Funds),
    ("invalidfee", Kind::Fee),
    ("invalid fee", Kind::Fee),
    ("provided seeds do not result in a valid address", Kind::Address),
    ("invalid program address", Kind::Address),
    ("invalidseeds", Kind::Address),
    ("incorrect program id", Kind::Address),
    ("invalidprogramaddress", Kind::Address),
];

#[derive(Debug, Clone, Copy)]
enum Kind {
    Slippage,
    Funds,
    Fee,
    Address,
}

/// Classify simulation logs, newest line first
pub fn classify<S: AsRef<str>>(diagnostics: &[S]) -> RejectionKind {
    for line in diagnostics.iter().rev() {
        let line = line.as_ref().to_ascii_lowercase();
        if let Some((_, kind)) = PATTERNS.iter().find(|(needle, _)| line.contains(needle)) {
            return match kind {
                Kind::Slippage => RejectionKind::SlippageExceeded,
                Kind::Funds => RejectionKind::InsufficientFunds,
                Kind::Fee => RejectionKind::FeeMismatch,
                Kind::Address => RejectionKind::AddressMismatch,
            };
        }
    }

    let raw = diagnostics
        .iter()
        .map(|l| l.as_ref())
        .collect::<Vec<_>>()
        .join("\n");
    log::debug!("unclassified simulation failure: {}", raw);
    RejectionKind::Unknown(raw)
}
