//! Query evaluation against index snapshots.

pub mod explanation;
pub mod result;
pub mod scorer;
pub mod searcher;
