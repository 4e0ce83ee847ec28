// crates/sigil-gather/src/lib.rs
//
// sigil-gather: The async gathering layer. Wraps the collaborator traits
// with caching, retry/rotation, and JSON adapters; assembles ScoringInputs
// envelopes; and drives the feed ranker and matching engine.

pub mod adapters;
pub mod cache;
pub mod ens;
pub mod feed;
pub mod inputs;
pub mod matchrun;
pub mod retry;
pub mod sources;

pub use cache::TtlCache;
pub use ens::{EnsResolver, ReverseLookup};
pub use feed::{FeedOptions, FeedRanker, FeedSubject, ScoredSubject};
pub use inputs::{is_address, Collaborators, InputGatherer};
pub use matchrun::{ExplainedMatch, MatchRunner};
pub use retry::{is_transient, retry_with_rotation, EndpointPool, RetryPolicy};
