//! Speech analysis
//!
//! The offline analyser: prepare the input down to 8 kHz mono, segment
//! it, band-pass two working copies (one tuned for pitch estimation, one
//! for LPC analysis), then derive and quantise energy, pitch and the ten
//! reflection coefficients for every segment.

mod pitch;
mod reflection;
mod segment;

use tracing::debug;

use crate::dsp::buffer;
use crate::error::Result;
use crate::types::{EncoderSettings, Frame, SampleBuffer, SAMPLE_RATE};

/// Analyse a PCM buffer into quantised frames
///
/// The input may be mono or stereo at any rate of at least 8 kHz; it is
/// mixed down and resampled first. One frame is produced per segment of
/// `settings.frame_size_ms` milliseconds, followed by the terminal stop
/// frame. Every emitted frame is clamped to its legal field widths.
pub fn encode(input: &SampleBuffer, settings: &EncoderSettings) -> Result<Vec<Frame>> {
    settings.validate()?;

    let mut processing = buffer::prepare(input)?;
    let mut pitch_buffer = processing.clone();

    let segment_len = (SAMPLE_RATE / 1000 * settings.frame_size_ms) as usize;
    let mut segments = segment::split(&processing, segment_len);

    if settings.do_pre_emphasis {
        buffer::pre_emphasis(
            &mut processing,
            settings.pre_emphasis_alpha,
            settings.legacy_pre_emphasis,
        );
    }

    buffer::band_pass(
        &mut processing,
        settings.processing_low_cut,
        settings.processing_high_cut,
        settings.processing_q_factor,
        false,
    );
    buffer::band_pass(
        &mut pitch_buffer,
        settings.pitch_low_cut,
        settings.pitch_high_cut,
        settings.pitch_q_factor,
        true,
    );

    pitch::estimate(
        &pitch_buffer,
        &mut segments,
        settings.window_size_in_segments,
        settings.pitch_low_cut,
        settings.pitch_high_cut,
    );

    reflection::analyze(&processing, &mut segments, settings, segment_len);

    let mut frames = Vec::with_capacity(segments.len() + 1);
    for segment in &segments {
        let mut k = [0u8; 10];
        for (slot, &index) in k.iter_mut().zip(segment.k_index.iter()) {
            *slot = index as u8;
        }

        frames.push(
            Frame {
                energy: segment.energy_index as u8,
                repeat: false,
                pitch: segment.pitch_index as u8,
                k,
            }
            .clamp(),
        );
    }
    frames.push(Frame::stop().clamp());

    debug!(
        "analysed {} samples into {} frames ({} ms segments)",
        processing.frame_count(),
        frames.len(),
        settings.frame_size_ms
    );

    Ok(frames)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::ENERGY_STOP;
    use std::f32::consts::TAU;

    #[test]
    fn test_encode_ends_with_single_stop() {
        let samples = (0..1600)
            .map(|i| (TAU * 200.0 * i as f32 / 8000.0).sin())
            .collect();
        let frames = encode(&SampleBuffer::mono(samples), &EncoderSettings::default()).unwrap();

        assert_eq!(frames.last().unwrap().energy, ENERGY_STOP);
        let stops = frames.iter().filter(|f| f.is_stop()).count();
        assert_eq!(stops, 1);
    }

    #[test]
    fn test_encode_silence_yields_silent_frames() {
        let frames = encode(
            &SampleBuffer::mono(vec![0.0; 1600]),
            &EncoderSettings::default(),
        )
        .unwrap();

        assert_eq!(frames.len(), 9);
        for frame in &frames[..8] {
            assert!(frame.is_silence());
        }
        assert!(frames[8].is_stop());
    }

    #[test]
    fn test_encode_never_emits_repeat() {
        let samples = (0..4000)
            .map(|i| (TAU * 180.0 * i as f32 / 8000.0).sin() * 0.7)
            .collect();
        let frames = encode(&SampleBuffer::mono(samples), &EncoderSettings::default()).unwrap();

        for frame in &frames {
            assert!(!frame.repeat);
        }
    }

    #[test]
    fn test_encode_rejects_invalid_input() {
        let settings = EncoderSettings::default();
        assert!(encode(&SampleBuffer::new(4000, 1, vec![0.0; 100]), &settings).is_err());
        assert!(encode(&SampleBuffer::new(8000, 3, vec![0.0; 300]), &settings).is_err());
        assert!(encode(&SampleBuffer::mono(Vec::new()), &settings).is_err());
    }

    #[test]
    fn test_encode_rejects_invalid_settings() {
        let buffer = SampleBuffer::mono(vec![0.0; 400]);
        let settings = EncoderSettings::default().with_frame_size_ms(0);
        assert!(encode(&buffer, &settings).is_err());
    }

    #[test]
    fn test_encode_resamples_input() {
        // 100 ms at 44.1 kHz reduces to 100 ms at 8 kHz: four 25 ms
        // segments plus the stop frame.
        let samples = (0..4410)
            .map(|i| (TAU * 200.0 * i as f32 / 44100.0).sin())
            .collect();
        let frames = encode(
            &SampleBuffer::new(44100, 1, samples),
            &EncoderSettings::default(),
        )
        .unwrap();

        assert_eq!(frames.len(), 5);
    }
}
