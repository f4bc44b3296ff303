//! Signal conditioning for the analyser
//!
//! Band-pass filtering and buffer preparation run ahead of pitch
//! estimation and LPC analysis.

pub mod biquad;
pub mod buffer;

pub use biquad::Biquad;
