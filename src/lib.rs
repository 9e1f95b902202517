//! typecard crate
//!
//! Builds a profile card (an SVG document) that shows at which time of day a GitHub user
//! usually commits. The crate is organized around a fixed card pipeline:
//!
//! 1. [`card::Card::normalize`] turns a raw [`card::CardRequest`] into validated props.
//! 2. [`card::Card::fetch`] gathers remote data, fanning out over the user's repositories.
//! 3. [`card::Card::render`] produces the final SVG text.
//!
//! [`card::run`] is the only routine that drives these phases.

/// Result type alias using `ohno::AppError` as the default error type.
pub type Result<T, E = ohno::AppError> = core::result::Result<T, E>;

pub mod activity;
pub mod card;
pub mod config;
pub mod github;
pub mod render;
pub mod theme;
