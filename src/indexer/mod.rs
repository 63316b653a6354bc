/// GraphQL indexer access
///
/// The gallery never talks to the chain; everything comes from one
/// teztok-compatible GraphQL endpoint.

pub mod client;
pub mod query;
