//! Type definitions for the Stability API.
//!
//! Request and response types for account lookups, engine listing and
//! image generation.

pub mod engines;
pub mod generation;
pub mod user;
