//! ELD Trip Planner - HOS-compliant trip planning and daily log generation.
//!
//! Plans a single truck trip (current → pickup → dropoff) under the FMCSA
//! Hours-of-Service rules for property-carrying drivers and renders the
//! matching ELD daily log sheets. The HTTP layer, geocoder, and router are
//! thin adapters around the deterministic planner in [`services::hos`].

pub mod cli;
pub mod config;
pub mod handlers;
pub mod services;
pub mod types;
