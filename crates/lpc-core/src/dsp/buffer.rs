//! Sample-buffer preparation
//!
//! Every analyser input is first reduced to an owned 8 kHz mono copy;
//! the band-pass, normalisation and pre-emphasis passes then run over
//! that copy in place.

use tracing::trace;

use crate::dsp::Biquad;
use crate::error::Result;
use crate::types::{SampleBuffer, SAMPLE_RATE};

/// Produce an 8 kHz mono copy of `buffer`
///
/// Nearest-index resampling: target frame `i` reads source frame
/// `round(i * src_rate / 8000)`, averaging the channel slice for stereo
/// input. Reads past the end of the source yield zero. Input must carry
/// one or two channels at a rate of at least 8 kHz.
pub fn prepare(buffer: &SampleBuffer) -> Result<SampleBuffer> {
    buffer.validate()?;

    let src_frames = buffer.frame_count();
    let channels = buffer.channels as usize;
    let ratio = buffer.sample_rate as f32 / SAMPLE_RATE as f32;

    let frame_count = (src_frames as f32 / ratio).round() as usize;
    let mut samples = Vec::with_capacity(frame_count);

    for i in 0..frame_count {
        let j = (i as f32 * ratio).round() as usize;

        if j >= src_frames {
            samples.push(0.0);
            continue;
        }

        if channels == 1 {
            samples.push(buffer.samples[j]);
        } else {
            let mut sum = 0.0;
            for k in 0..channels {
                let index = j * channels + k;
                if index >= buffer.samples.len() {
                    break;
                }
                sum += buffer.samples[index];
            }
            samples.push(sum / channels as f32);
        }
    }

    trace!(
        "prepared {} frames at {}Hz into {} frames at {}Hz",
        src_frames,
        buffer.sample_rate,
        frame_count,
        SAMPLE_RATE
    );

    Ok(SampleBuffer::mono(samples))
}

/// Rescale the buffer linearly onto [0, 1]
pub fn normalize(buffer: &mut SampleBuffer) {
    let mut max = f32::MIN_POSITIVE;
    let mut min = f32::MAX;

    for &sample in &buffer.samples {
        if sample < min {
            min = sample;
        }
        if sample > max {
            max = sample;
        }
    }

    for sample in &mut buffer.samples {
        *sample = (*sample - min) / (max - min);
    }
}

/// Band-pass the buffer in place
pub fn band_pass(buffer: &mut SampleBuffer, low_cut: f32, high_cut: f32, q_factor: f32, amplify: bool) {
    let mut filter = Biquad::bandpass(buffer.sample_rate, low_cut, high_cut, q_factor, amplify);
    filter.run(&mut buffer.samples);
}

/// Mean-square energy of the buffer, normalised by `frame_count - 1`
pub(crate) fn mean_square_energy(buffer: &SampleBuffer) -> f32 {
    let mut energy = 0.0;
    for &sample in &buffer.samples {
        energy += sample * sample;
    }
    energy / (buffer.frame_count() as f32 - 1.0)
}

/// Apply pre-emphasis in place, preserving mean-square energy
///
/// The buffer is walked in reverse so each step reads the original
/// predecessor. `legacy` selects the historical recurrence
/// `s[i] = 1 - alpha * s[i-1]`; otherwise the conventional
/// first-difference `s[i] = s[i] - alpha * s[i-1]` is used. Both
/// variants are rescaled afterwards so the mean-square energy matches
/// the pre-filter value.
pub fn pre_emphasis(buffer: &mut SampleBuffer, alpha: f32, legacy: bool) {
    let pre_energy = mean_square_energy(buffer);

    let samples = &mut buffer.samples;
    if legacy {
        for i in (1..samples.len()).rev() {
            samples[i] = 1.0 - samples[i - 1] * alpha;
        }
    } else {
        for i in (1..samples.len()).rev() {
            samples[i] -= alpha * samples[i - 1];
        }
    }

    let post_energy = mean_square_energy(buffer);
    let scale = (pre_energy / post_energy).sqrt();

    for sample in &mut buffer.samples {
        *sample *= scale;
    }
}
