// crates/sigil-match/src/lib.rs
//
// sigil-match: Wallet-to-wallet similarity. Compares two gathered subjects
// across set-overlap and score-closeness dimensions and renders the result
// as a scored report with human-readable evidence lines.

pub mod engine;
pub mod explain;
pub mod similarity;

pub use engine::{
    match_subjects, GraphSets, MatchBreakdown, MatchEvidence, MatchReport, MatchSubject,
    MatchWeights,
};
pub use explain::explain_match;
pub use similarity::{closeness, cosine, jaccard};
