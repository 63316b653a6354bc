/// State management module
///
/// This module handles all gallery state, including:
/// - Records as returned by the indexer (data.rs)
/// - The per-view fetch/shuffle/page state machine (gallery.rs)
/// - Shuffling fetched records (shuffle.rs)

pub mod data;
pub mod gallery;
pub mod shuffle;
