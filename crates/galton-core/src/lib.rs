//! Galton Core Types and Definitions
//!
//! This crate provides the foundational types for the Galton circuit
//! diagram tool. It includes:
//!
//! - **Units**: The probabilistic-circuit node model ([`unit`] module)
//! - **Styles**: The draw.io visual vocabulary each unit kind produces
//!   ([`style`] module)

pub mod style;
pub mod unit;
