//! Frame segmentation
//!
//! The analyser partitions the prepared buffer into fixed-length
//! segments; the last segment may be short. Quantised parameter indices
//! accumulate on the segment descriptors until frame assembly.

use crate::types::SampleBuffer;

/// Per-segment descriptor carrying the quantised parameter indices
#[derive(Debug, Clone, Default)]
pub(crate) struct Segment {
    /// Number of samples in this segment
    pub count: usize,
    /// Offset of the segment start in the parent buffer
    pub offset: usize,

    /// Quantised energy-table index
    pub energy_index: usize,
    /// Quantised pitch-table index
    pub pitch_index: usize,
    /// Quantised reflection-coefficient indices K1..K10
    pub k_index: [usize; 10],
}

/// Partition `buffer` into segments of `segment_len` samples
///
/// Produces `ceil(frame_count / segment_len)` segments; every segment
/// except possibly the last covers exactly `segment_len` samples, and
/// the segments jointly cover the buffer with no overlap.
pub(crate) fn split(buffer: &SampleBuffer, segment_len: usize) -> Vec<Segment> {
    let total = buffer.frame_count();
    let num_segments = total.div_ceil(segment_len);

    debug_assert!(total <= num_segments * segment_len);

    let mut segments = Vec::with_capacity(num_segments);
    for i in 0..num_segments {
        segments.push(Segment {
            count: (total - i * segment_len).min(segment_len),
            offset: i * segment_len,
            ..Segment::default()
        });
    }

    segments
}
