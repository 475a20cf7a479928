/// State management module
///
/// This module handles all application state, including:
/// - Normalized catalog records (data.rs)
/// - Manifest fetching and parsing (manifest.rs)
/// - Search, filters, sorting and pagination (query.rs)
/// - The admin entry builder and copy feedback (builder.rs)

pub mod builder;
pub mod data;
pub mod manifest;
pub mod query;
