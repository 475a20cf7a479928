/// Widget construction for the two pages
///
/// Views only read state and emit `Message`s; all decisions live in
/// `crate::state`.

pub mod admin;
pub mod card;
pub mod catalog;
pub mod header;
