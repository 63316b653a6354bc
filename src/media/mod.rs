/// Media handling module
///
/// This module handles:
/// - Rewriting IPFS locators to gateway URLs
/// - Choosing a rendering strategy from a record's MIME type
/// - Downloading and shrinking preview images for tiles

pub mod kind;
pub mod preview;
pub mod uri;
