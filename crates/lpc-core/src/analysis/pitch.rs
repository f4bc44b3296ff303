//! Pitch estimation
//!
//! Windowed autocorrelation over a multi-segment horizon. Each segment
//! is concatenated with its successors into a work buffer, weighted by a
//! Hamming window, and scanned for the lag with the strongest
//! autocorrelation inside the configured period bounds. The winning lag
//! is quantised onto the pitch table.

use tracing::trace;

use crate::analysis::segment::Segment;
use crate::tables::PITCH_TABLE;
use crate::types::SampleBuffer;

/// Estimate a pitch-table index for every segment
///
/// `low_freq` and `high_freq` bound the candidate period range
/// `[rate/high_freq, rate/low_freq)`; `window_segments` sets how many
/// consecutive segments feed each estimate.
pub(crate) fn estimate(
    buffer: &SampleBuffer,
    segments: &mut [Segment],
    window_segments: u32,
    low_freq: f32,
    high_freq: f32,
) {
    debug_assert!(!segments.is_empty());

    let min_period = (buffer.sample_rate as f32 / high_freq) as usize;
    let max_period = (buffer.sample_rate as f32 / low_freq) as usize;
    let period_count = (max_period - min_period).max(1);

    // Segments are uniform apart from the tail, so the first one sets
    // the nominal size.
    let segment_size = segments[0].count;
    let work_size = window_segments as usize * segment_size;

    let window: Vec<f32> = apodize::hamming_iter(work_size).map(|w| w as f32).collect();

    let mut work = vec![0.0f32; work_size];
    let mut periods = vec![0.0f32; period_count];

    for i in 0..segments.len() {
        work.fill(0.0);
        let mut offset = 0;

        for j in 0..window_segments as usize {
            if i + j >= segments.len() {
                break;
            }
            let segment = &segments[i + j];
            let source = &buffer.samples[segment.offset..segment.offset + segment.count];
            work[offset..offset + segment.count].copy_from_slice(source);
            offset += segment.count;
        }

        for (sample, &weight) in work.iter_mut().zip(window.iter()) {
            *sample *= weight;
        }

        for (j, period) in periods.iter_mut().enumerate() {
            let mut sum = 0.0;
            for k in 0..segment_size {
                let lagged = k + min_period + j;
                if lagged >= work.len() {
                    break;
                }
                sum += work[lagged] * work[k];
            }
            *period = sum;
        }

        let mut best_index = 0;
        let mut best_value = periods[0];
        for (j, &value) in periods.iter().enumerate().skip(1) {
            if value > best_value {
                best_index = j;
                best_value = value.abs();
            }
        }

        let best_period = min_period + best_index;

        // The top table entry is reserved headroom and never selected.
        let mut min_dist = max_period as f32;
        let mut min_index = 0;
        for (k, &entry) in PITCH_TABLE[..PITCH_TABLE.len() - 1].iter().enumerate() {
            let dist = (entry as f32 - best_period as f32).abs();
            if dist < min_dist {
                min_dist = dist;
                min_index = k;
            }
        }

        segments[i].pitch_index = min_index;
        trace!(
            "segment {}: period {} samples -> pitch index {}",
            i,
            best_period,
            min_index
        );
    }
}
