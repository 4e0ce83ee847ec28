// crates/sigil-core/src/lib.rs
//
// sigil-core: Core types, error type, and collaborator traits for the
// Sigil wallet legitimacy/influence scoring engine.
//
// This is the leaf crate the rest of the workspace depends on. It defines
// the canonical data model (identities, on-chain signals, the ScoringInputs
// envelope, the breakdown output) and the trait contracts for the external
// data sources the engine consumes.

pub mod breakdown;
pub mod error;
pub mod identity;
pub mod inputs;
pub mod traits;

// Re-export key types for ergonomic access from downstream crates.
// Usage: `use sigil_core::ScoringInputs;`

// Identity types
pub use identity::{Identity, MintRecord, Profile, SocialStats, SourceRecord};

// Input types
pub use inputs::{
    ActivityKind, ActivitySignal, Claim, EnsData, EnsStatus, FollowerQuality, OnchainData,
    ScoringInputs, WalletActivity,
};

// Breakdown types
pub use breakdown::{BreakdownMeta, DimensionBreakdown, DimensionScore, ScoreBreakdown};

// Error type
pub use error::SigilError;

// Traits
pub use traits::{
    ActivitySource, EnsMetadataSource, GraphSource, ProfileSource, ReverseEnsSource,
    RewardsSource, WalletActivitySource, WalletAgeSource,
};
