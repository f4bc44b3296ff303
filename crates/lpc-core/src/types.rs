//! Core types for the codec library
//!
//! This module defines the sample buffer, the quantised frame record and
//! the encoder configuration that form the foundation of the library's API.

use crate::error::{LpcError, Result};

/// Sample rate of every buffer inside the codec, in Hz
pub const SAMPLE_RATE: u32 = 8000;

/// Number of PCM samples synthesised per frame
pub const FRAME_SAMPLES: usize = 200;

/// Energy code marking a silent frame
pub const ENERGY_ZERO: u8 = 0x0;

/// Energy code marking the terminal stop frame
pub const ENERGY_STOP: u8 = 0xF;

/// Bit mask for the 4-bit energy field
pub const ENERGY_MASK: u8 = 0x0F;
/// Bit mask for the 6-bit pitch field
pub const PITCH_MASK: u8 = 0x3F;
/// Bit mask for the 5-bit K1/K2 fields
pub const K1_K2_MASK: u8 = 0x1F;
/// Bit mask for the 4-bit K3..K7 fields
pub const K3_K7_MASK: u8 = 0x0F;
/// Bit mask for the 3-bit K8..K10 fields
pub const K8_K10_MASK: u8 = 0x07;

/// An audio buffer of interleaved 32-bit float samples
///
/// Input buffers may carry one or two channels at any rate of at least
/// 8 kHz; every buffer produced by the codec is 8 kHz mono.
#[derive(Debug, Clone, PartialEq)]
pub struct SampleBuffer {
    /// Sample rate in Hz
    pub sample_rate: u32,
    /// Number of interleaved channels
    pub channels: u32,
    /// Interleaved samples
    pub samples: Vec<f32>,
}

impl SampleBuffer {
    /// Create a new buffer from interleaved samples
    pub fn new(sample_rate: u32, channels: u32, samples: Vec<f32>) -> Self {
        Self {
            sample_rate,
            channels,
            samples,
        }
    }

    /// Create an 8 kHz mono buffer
    pub fn mono(samples: Vec<f32>) -> Self {
        Self::new(SAMPLE_RATE, 1, samples)
    }

    /// Number of frames (samples per channel)
    pub fn frame_count(&self) -> usize {
        if self.channels == 0 {
            return 0;
        }
        self.samples.len() / self.channels as usize
    }

    /// Validate the buffer as analyser input
    pub fn validate(&self) -> Result<()> {
        if self.channels == 0 || self.channels > 2 {
            return Err(LpcError::InvalidChannelCount {
                channels: self.channels,
                supported: vec![1, 2],
            });
        }

        if self.sample_rate < SAMPLE_RATE {
            return Err(LpcError::InvalidSampleRate {
                rate: self.sample_rate,
                min: SAMPLE_RATE,
            });
        }

        if self.samples.is_empty() {
            return Err(LpcError::invalid_format("sample buffer is empty"));
        }

        if self.samples.len() % self.channels as usize != 0 {
            return Err(LpcError::invalid_format(
                "sample count must be divisible by channel count",
            ));
        }

        Ok(())
    }
}

/// One quantised speech frame
///
/// Field widths follow the TMS5220 frame layout: 4-bit energy, 1-bit
/// repeat, 6-bit pitch, and ten reflection-coefficient indices of
/// 5/5/4/4/4/4/4/3/3/3 bits. Two energy values are reserved:
/// [`ENERGY_ZERO`] marks a silent frame and [`ENERGY_STOP`] terminates
/// the stream.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Frame {
    /// Energy table index (4 bits)
    pub energy: u8,
    /// Repeat flag: reuse the previous frame's K parameters
    pub repeat: bool,
    /// Pitch table index (6 bits); 0 selects noise excitation
    pub pitch: u8,
    /// Reflection-coefficient table indices K1..K10
    pub k: [u8; 10],
}

impl Frame {
    /// A silent frame
    pub fn silence() -> Self {
        Self::default()
    }

    /// The terminal stop frame
    pub fn stop() -> Self {
        Self {
            energy: ENERGY_STOP,
            ..Self::default()
        }
    }

    /// Whether this frame terminates the stream
    pub fn is_stop(&self) -> bool {
        self.energy == ENERGY_STOP
    }

    /// Whether this frame is silent
    pub fn is_silence(&self) -> bool {
        self.energy == ENERGY_ZERO
    }

    /// Re-mask every field to its bit width and zero the fields made
    /// meaningless by the energy/repeat/pitch values
    ///
    /// Silent and stop frames keep only their energy; repeat frames keep
    /// energy, repeat and pitch; unvoiced frames (pitch 0) keep K1..K4
    /// and zero K5..K10. Idempotent.
    pub fn clamp(&self) -> Frame {
        let mut out = Frame::default();
        out.energy = self.energy & ENERGY_MASK;

        if out.energy == ENERGY_ZERO || out.energy == ENERGY_STOP {
            return out;
        }

        out.repeat = self.repeat;
        out.pitch = self.pitch & PITCH_MASK;

        if out.repeat {
            return out;
        }

        out.k[0] = self.k[0] & K1_K2_MASK;
        out.k[1] = self.k[1] & K1_K2_MASK;
        out.k[2] = self.k[2] & K3_K7_MASK;
        out.k[3] = self.k[3] & K3_K7_MASK;

        if out.pitch == 0 {
            return out;
        }

        out.k[4] = self.k[4] & K3_K7_MASK;
        out.k[5] = self.k[5] & K3_K7_MASK;
        out.k[6] = self.k[6] & K3_K7_MASK;
        out.k[7] = self.k[7] & K8_K10_MASK;
        out.k[8] = self.k[8] & K8_K10_MASK;
        out.k[9] = self.k[9] & K8_K10_MASK;

        out
    }
}

/// Codec information
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CodecInfo {
    /// Codec name
    pub name: &'static str,
    /// Output sample rate in Hz
    pub sample_rate: u32,
    /// Output channel count
    pub channels: u32,
    /// Maximum bitrate in bits per second (full 50-bit frames)
    pub bitrate: u32,
    /// Synthesised samples per frame
    pub frame_size: usize,
}

/// Encoder configuration
///
/// All tuning of the analyser goes through this struct; there is no
/// adaptive behaviour. [`EncoderSettings::default`] reproduces the
/// reference tuning.
#[derive(Debug, Clone, PartialEq)]
pub struct EncoderSettings {
    /// Lower cutoff of the pitch-estimation band-pass, in Hz
    pub pitch_low_cut: f32,
    /// Upper cutoff of the pitch-estimation band-pass, in Hz
    pub pitch_high_cut: f32,
    /// Q factor of the pitch band-pass (amplified variant)
    pub pitch_q_factor: f32,

    /// Lower cutoff of the LPC-analysis band-pass, in Hz
    pub processing_low_cut: f32,
    /// Upper cutoff of the LPC-analysis band-pass, in Hz
    pub processing_high_cut: f32,
    /// Q factor of the LPC-analysis band-pass (non-amplified variant)
    pub processing_q_factor: f32,

    /// K1 threshold above which a frame is classified unvoiced
    pub unvoiced_thresh: f32,
    /// Scale applied to the RMS of unvoiced frames
    pub unvoiced_rms_multiply: f32,

    /// Whether to apply pre-emphasis before LPC analysis
    pub do_pre_emphasis: bool,
    /// Use the historical pre-emphasis recurrence instead of the
    /// conventional first-difference filter
    pub legacy_pre_emphasis: bool,
    /// Pre-emphasis coefficient
    pub pre_emphasis_alpha: f32,

    /// Segment length in milliseconds
    pub frame_size_ms: u32,
    /// Pitch-estimation horizon, in segments
    pub window_size_in_segments: u32,
}

impl Default for EncoderSettings {
    fn default() -> Self {
        Self {
            pitch_low_cut: 50.0,
            pitch_high_cut: 500.0,
            pitch_q_factor: 4.0,
            processing_low_cut: 50.0,
            processing_high_cut: 4000.0,
            processing_q_factor: 1.0,
            unvoiced_thresh: -0.1,
            unvoiced_rms_multiply: 2.0,
            do_pre_emphasis: true,
            legacy_pre_emphasis: true,
            pre_emphasis_alpha: -0.9373,
            frame_size_ms: 25,
            window_size_in_segments: 2,
        }
    }
}

impl EncoderSettings {
    /// Create the default settings
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the pitch band-pass bounds in Hz
    pub fn with_pitch_band(mut self, low_cut: f32, high_cut: f32) -> Self {
        self.pitch_low_cut = low_cut;
        self.pitch_high_cut = high_cut;
        self
    }

    /// Set the pitch band-pass Q factor
    pub fn with_pitch_q_factor(mut self, q_factor: f32) -> Self {
        self.pitch_q_factor = q_factor;
        self
    }

    /// Set the LPC-analysis band-pass bounds in Hz
    pub fn with_processing_band(mut self, low_cut: f32, high_cut: f32) -> Self {
        self.processing_low_cut = low_cut;
        self.processing_high_cut = high_cut;
        self
    }

    /// Set the LPC-analysis band-pass Q factor
    pub fn with_processing_q_factor(mut self, q_factor: f32) -> Self {
        self.processing_q_factor = q_factor;
        self
    }

    /// Set the unvoiced classification threshold on K1
    pub fn with_unvoiced_thresh(mut self, thresh: f32) -> Self {
        self.unvoiced_thresh = thresh;
        self
    }

    /// Set the RMS multiplier for unvoiced frames
    pub fn with_unvoiced_rms_multiply(mut self, multiply: f32) -> Self {
        self.unvoiced_rms_multiply = multiply;
        self
    }

    /// Enable or disable pre-emphasis
    pub fn with_pre_emphasis(mut self, enabled: bool) -> Self {
        self.do_pre_emphasis = enabled;
        self
    }

    /// Select between the historical and the conventional pre-emphasis
    /// recurrence
    pub fn with_legacy_pre_emphasis(mut self, legacy: bool) -> Self {
        self.legacy_pre_emphasis = legacy;
        self
    }

    /// Set the pre-emphasis coefficient
    pub fn with_pre_emphasis_alpha(mut self, alpha: f32) -> Self {
        self.pre_emphasis_alpha = alpha;
        self
    }

    /// Set the segment length in milliseconds
    pub fn with_frame_size_ms(mut self, frame_size_ms: u32) -> Self {
        self.frame_size_ms = frame_size_ms;
        self
    }

    /// Set the pitch-estimation horizon in segments
    pub fn with_window_size(mut self, segments: u32) -> Self {
        self.window_size_in_segments = segments;
        self
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        if self.frame_size_ms == 0 {
            return Err(LpcError::invalid_config("frame_size_ms must be positive"));
        }

        if self.window_size_in_segments == 0 {
            return Err(LpcError::invalid_config(
                "window_size_in_segments must be at least 1",
            ));
        }

        let nyquist = SAMPLE_RATE as f32 / 2.0;

        if self.pitch_low_cut <= 0.0 || self.pitch_low_cut >= self.pitch_high_cut {
            return Err(LpcError::invalid_config(
                "pitch band bounds must satisfy 0 < low < high",
            ));
        }

        if self.pitch_high_cut > nyquist {
            return Err(LpcError::invalid_config(format!(
                "pitch_high_cut {}Hz exceeds the Nyquist limit {}Hz",
                self.pitch_high_cut, nyquist
            )));
        }

        if self.processing_low_cut <= 0.0 || self.processing_low_cut >= self.processing_high_cut {
            return Err(LpcError::invalid_config(
                "processing band bounds must satisfy 0 < low < high",
            ));
        }

        if self.processing_high_cut > nyquist {
            return Err(LpcError::invalid_config(format!(
                "processing_high_cut {}Hz exceeds the Nyquist limit {}Hz",
                self.processing_high_cut, nyquist
            )));
        }

        if self.pitch_q_factor <= 0.0 || self.processing_q_factor <= 0.0 {
            return Err(LpcError::invalid_config("Q factors must be positive"));
        }

        Ok(())
    }
}
