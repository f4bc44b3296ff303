//! High-level codec wrapper
//!
//! Couples the analyser, the bitstream codec and the synthesiser behind
//! one object so callers can go straight from a PCM buffer to TMS5220
//! bytes and back.

use tracing::debug;

use crate::bitstream;
use crate::error::Result;
use crate::types::{CodecInfo, EncoderSettings, SampleBuffer, FRAME_SAMPLES, SAMPLE_RATE};
use crate::{analysis, synthesis};

/// LPC-10 codec targeting the TMS5220 bitstream format
#[derive(Debug, Clone)]
pub struct Lpc10Codec {
    settings: EncoderSettings,
}

impl Lpc10Codec {
    /// Create a codec with the given encoder settings
    pub fn new(settings: EncoderSettings) -> Result<Self> {
        settings.validate()?;
        Ok(Self { settings })
    }

    /// The encoder settings in use
    pub fn settings(&self) -> &EncoderSettings {
        &self.settings
    }

    /// Encode a PCM buffer into a TMS5220 byte stream
    pub fn encode(&self, buffer: &SampleBuffer) -> Result<Vec<u8>> {
        let frames = analysis::encode(buffer, &self.settings)?;
        let bytes = bitstream::pack(&frames);

        debug!(
            "encoded {} input frames into {} bytes",
            buffer.frame_count(),
            bytes.len()
        );

        Ok(bytes)
    }

    /// Decode a TMS5220 byte stream into an 8 kHz mono PCM buffer
    pub fn decode(&self, data: &[u8]) -> Result<SampleBuffer> {
        let frames = bitstream::unpack(data);
        synthesis::decode(&frames)
    }

    /// Get codec information
    pub fn info(&self) -> CodecInfo {
        CodecInfo {
            name: "LPC10",
            sample_rate: SAMPLE_RATE,
            channels: 1,
            // Full 50-bit frames at the default 25 ms cadence.
            bitrate: 50 * 1000 / self.settings.frame_size_ms,
            frame_size: FRAME_SAMPLES,
        }
    }
}

impl Default for Lpc10Codec {
    fn default() -> Self {
        Self {
            settings: EncoderSettings::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::TAU;

    #[test]
    fn test_codec_info() {
        let codec = Lpc10Codec::default();
        let info = codec.info();
        assert_eq!(info.name, "LPC10");
        assert_eq!(info.sample_rate, 8000);
        assert_eq!(info.channels, 1);
        assert_eq!(info.bitrate, 2000);
        assert_eq!(info.frame_size, 200);
    }

    #[test]
    fn test_codec_rejects_bad_settings() {
        let settings = EncoderSettings::default().with_window_size(0);
        assert!(Lpc10Codec::new(settings).is_err());
    }

    #[test]
    fn test_encode_decode_shape() {
        let samples: Vec<f32> = (0..1600)
            .map(|i| (TAU * 200.0 * i as f32 / 8000.0).sin())
            .collect();

        let codec = Lpc10Codec::default();
        let bytes = codec.encode(&SampleBuffer::mono(samples)).unwrap();
        assert!(!bytes.is_empty());

        let output = codec.decode(&bytes).unwrap();
        assert_eq!(output.sample_rate, 8000);
        assert_eq!(output.channels, 1);
        assert!(output.frame_count() > 0);
        assert_eq!(output.frame_count() % FRAME_SAMPLES, 0);
    }
}
