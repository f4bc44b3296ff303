//! # LPC-Core: LPC-10 Speech Codec for the TMS5220
//!
//! An offline speech codec targeting the Texas Instruments TMS5220
//! synthesizer bitstream. The analyser reduces a PCM buffer to 8 kHz
//! mono, estimates pitch by windowed autocorrelation, derives ten
//! reflection coefficients per 25 ms segment through the Leroux-Gueguen
//! recursion, and quantises everything against the chip's fixed tables.
//! The resulting frames pack into the variable-length TMS5220 byte
//! stream, and the synthesiser reverses the whole path through a
//! ten-stage lattice filter driven by chirp or noise excitation.
//!
//! ## Pipeline
//!
//! - **Encode**: PCM -> resample/downmix -> band-pass -> segment ->
//!   pitch + reflection analysis -> quantised frames -> byte stream
//! - **Decode**: byte stream -> frames -> interpolated lattice
//!   synthesis -> PCM
//!
//! ## Usage
//!
//! ```rust
//! use lpc_core::{EncoderSettings, Lpc10Codec, SampleBuffer};
//!
//! let samples: Vec<f32> = (0..1600)
//!     .map(|i| (std::f32::consts::TAU * 200.0 * i as f32 / 8000.0).sin())
//!     .collect();
//! let buffer = SampleBuffer::mono(samples);
//!
//! let codec = Lpc10Codec::new(EncoderSettings::default())?;
//! let bytes = codec.encode(&buffer)?;
//! let speech = codec.decode(&bytes)?;
//!
//! assert_eq!(speech.sample_rate, 8000);
//! assert_eq!(speech.channels, 1);
//! # Ok::<(), lpc_core::LpcError>(())
//! ```
//!
//! The stages are also exposed individually: [`encode`] produces the
//! frame stream, [`bitstream::pack`]/[`bitstream::unpack`] convert
//! between frames and bytes, and [`decode`] synthesises PCM from
//! frames.
//!
//! ## Error Handling
//!
//! Every fallible operation returns a [`Result`] carrying an
//! [`LpcError`]; malformed input (more than two channels, a sample rate
//! below 8 kHz, an empty buffer) is rejected up front. A truncated byte
//! stream is not an error: the unpacker keeps the partial trailing
//! frame and the synthesiser stops at the stop frame or the end of
//! input, whichever comes first.

#![deny(missing_docs)]
#![warn(clippy::all)]
#![allow(clippy::module_name_repetitions)]

pub mod analysis;
pub mod bitstream;
pub mod codec;
pub mod dsp;
pub mod error;
pub mod synthesis;
pub mod tables;
pub mod types;

// Re-export commonly used types and operations
pub use analysis::encode;
pub use bitstream::{pack, unpack};
pub use codec::Lpc10Codec;
pub use error::{LpcError, Result};
pub use synthesis::decode;
pub use types::{
    CodecInfo, EncoderSettings, Frame, SampleBuffer, ENERGY_STOP, ENERGY_ZERO, FRAME_SAMPLES,
    SAMPLE_RATE,
};

/// Version information for the codec library
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Initialize the codec library
///
/// Installs a default tracing subscriber if none is set. Safe to call
/// multiple times.
pub fn init() {
    let _ = tracing_subscriber::fmt::try_init();
    tracing::info!("LPC-Core v{} initialized", VERSION);
}
