//! Lattice synthesis
//!
//! Frames drive a ten-stage reflection-coefficient lattice filter fed by
//! either the chirp table (voiced) or a shift-register noise source
//! (unvoiced). Parameters are dequantised per frame and interpolated
//! sample-by-sample from the previous frame's values.

use tracing::debug;

use crate::error::Result;
use crate::tables::{k_table, CHIRP_TABLE, ENERGY_TABLE, PITCH_TABLE};
use crate::types::{Frame, SampleBuffer, ENERGY_STOP, ENERGY_ZERO, FRAME_SAMPLES};

/// Feedback taps of the 16-bit noise shift register
const NOISE_TAPS: u16 = 0xBD00;

/// Dequantised frame parameters
#[derive(Debug, Clone, Copy, Default)]
struct Params {
    energy: f32,
    pitch: u32,
    k: [f32; 10],
}

fn lerp(a: f32, b: f32, t: f32) -> f32 {
    (1.0 - t) * a + b * t
}

fn lfsr_step(noise: u16) -> u16 {
    (noise >> 1) ^ if noise & 1 == 1 { NOISE_TAPS } else { 0 }
}

/// Synthesise PCM from a frame stream
///
/// Emits [`FRAME_SAMPLES`] samples per frame until the stop frame (or
/// the end of the slice) and rescales the result by the inverse of its
/// peak-to-peak range. The output is always 8 kHz mono.
pub fn decode(frames: &[Frame]) -> Result<SampleBuffer> {
    let mut previous = Params::default();
    let mut current = Params::default();
    let mut target = Params::default();

    let mut forward = [0.0f32; 10];
    let mut backward = [0.0f32; 10];
    let mut phase_counter: u32 = 0;
    let mut noise: u16 = 1;

    let mut samples = Vec::with_capacity(frames.len() * FRAME_SAMPLES);

    for code in frames {
        let code = code.clamp();

        if code.energy == ENERGY_STOP {
            break;
        } else if code.energy == ENERGY_ZERO {
            target.energy = 0.0;
        } else {
            target.energy = ENERGY_TABLE[code.energy as usize];
            target.pitch = PITCH_TABLE[code.pitch as usize];

            if !code.repeat {
                for j in 0..4 {
                    target.k[j] = k_table(j)[code.k[j] as usize];
                }

                if target.pitch != 0 {
                    for j in 4..10 {
                        target.k[j] = k_table(j)[code.k[j] as usize];
                    }
                } else {
                    for j in 4..10 {
                        target.k[j] = 0.0;
                    }
                }
            }
        }

        previous = current;

        for i in 0..FRAME_SAMPLES {
            let t = i as f32 / (FRAME_SAMPLES - 1) as f32;

            current.energy = lerp(previous.energy, target.energy, t);
            current.pitch = lerp(previous.pitch as f32, target.pitch as f32, t) as u32;
            for j in 0..10 {
                current.k[j] = lerp(previous.k[j], target.k[j], t);
            }

            let excitation = if current.energy == 0.0 {
                0.0
            } else if current.pitch > 0 {
                if phase_counter < current.pitch {
                    phase_counter += 1;
                } else {
                    phase_counter = 0;
                }

                if (phase_counter as usize) < CHIRP_TABLE.len() {
                    CHIRP_TABLE[phase_counter as usize] * current.energy
                } else {
                    0.0
                }
            } else {
                noise = lfsr_step(noise);
                if noise & 1 == 1 {
                    current.energy
                } else {
                    -current.energy
                }
            };

            forward[9] = excitation - current.k[9] * backward[9];
            for s in (0..9).rev() {
                forward[s] = forward[s + 1] - current.k[s] * backward[s];
            }

            for s in (1..10).rev() {
                backward[s] = backward[s - 1] + current.k[s - 1] * forward[s - 1];
            }
            backward[0] = forward[0];

            samples.push(forward[0]);
        }
    }

    let mut max = f32::MIN_POSITIVE;
    let mut min = f32::MAX;
    for &sample in &samples {
        if sample > max {
            max = sample;
        }
        if sample < min {
            min = sample;
        }
    }

    for sample in &mut samples {
        *sample /= max - min;
    }

    debug!(
        "synthesised {} samples from {} frames",
        samples.len(),
        frames.len()
    );

    Ok(SampleBuffer::mono(samples))
}
