//! Reflection-coefficient analysis
//!
//! Per segment: eleven autocorrelation terms, the Leroux-Gueguen
//! recursion to reach K1..K10 without solving the Toeplitz system, the
//! voicing decision on K1, the residual RMS, and nearest-neighbour
//! quantisation of everything against the fixed tables.

use tracing::trace;

use crate::analysis::segment::Segment;
use crate::tables::{k_table, nearest_index, ENERGY_TABLE};
use crate::types::{EncoderSettings, SampleBuffer};

/// LPC order: ten reflection coefficients
const ORDER: usize = 10;

/// RMS scale matching the energy-table units
const RMS_SCALE: f32 = (1u32 << 18) as f32;

/// Analyse every segment and fill in its quantised indices
///
/// `segment_len` is the nominal segment length; the autocorrelation of
/// the final short segment is guarded against running past the buffer.
pub(crate) fn analyze(
    buffer: &SampleBuffer,
    segments: &mut [Segment],
    settings: &EncoderSettings,
    segment_len: usize,
) {
    let samples = &buffer.samples;
    let total = samples.len();

    for (i, segment) in segments.iter_mut().enumerate() {
        let mut corr = [0.0f32; ORDER + 1];
        for (j, term) in corr.iter_mut().enumerate() {
            let mut sum = 0.0;
            for k in 0..segment_len.saturating_sub(j) {
                let l = k + i * segment_len;
                if l + j >= total {
                    continue;
                }
                sum += samples[l] * samples[l + j];
            }
            *term = sum;
        }

        let (k_params, residual) = leroux_gueguen(&corr);

        if k_params[1] > settings.unvoiced_thresh {
            segment.pitch_index = 0;
        }

        let mut rms = (residual / segment_len as f32).sqrt() * RMS_SCALE;
        if segment.pitch_index == 0 {
            rms *= settings.unvoiced_rms_multiply;
        }

        // Entry 15 is the stop sentinel; the quantiser stays below it.
        segment.energy_index = nearest_index(&ENERGY_TABLE[..15], rms);

        for j in 0..ORDER {
            segment.k_index[j] = nearest_index(k_table(j), k_params[j + 1]);
        }

        trace!(
            "segment {}: k1 {:.4}, rms {:.1} -> energy index {}",
            i,
            k_params[1],
            rms,
            segment.energy_index
        );
    }
}

/// Leroux-Gueguen recursion
///
/// Derives the reflection coefficients from the autocorrelation terms;
/// returns them in `k[1..=10]` together with the final prediction-error
/// energy.
fn leroux_gueguen(corr: &[f32; ORDER + 1]) -> ([f32; ORDER + 1], f32) {
    let mut k = [0.0f32; ORDER + 1];
    let mut b = [0.0f32; ORDER + 1];
    let mut d = [0.0f32; ORDER + 2];

    k[1] = -corr[1] / corr[0];
    d[1] = corr[1];
    d[2] = corr[0] + k[1] * corr[1];

    for j in 2..=ORDER {
        let mut y = corr[j];
        b[1] = y;

        for i in 1..j {
            b[i + 1] = d[i] + k[i] * y;
            y += k[i] * d[i];
            d[i] = b[i];
        }

        k[j] = -y / d[j];
        d[j + 1] = d[j] + k[j] * y;
        d[j] = b[j];
    }

    (k, d[ORDER + 1])
}
