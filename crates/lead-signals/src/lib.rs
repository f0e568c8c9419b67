//! Buying-intent lead scoring.
//!
//! Companies are scored by searching the web for weighted keyword groups
//! (hiring activity, pain points, tech stack, strategy) and summing the weights
//! of the groups with matching evidence.

pub mod config;
pub mod error;
pub mod gateway;
pub mod leads;
pub mod monitor;
pub mod presets;
pub mod signals;
pub mod telemetry;
