//! TMS5220 bitstream packing
//!
//! Each frame serialises into at most 50 bits, scanned from bit 49 down
//! to a stop position that depends on the frame kind: silent and stop
//! frames carry only their 4 energy bits, unvoiced frames stop after K4,
//! repeat frames stop after the pitch field. The accumulated bits are
//! squashed into bytes LSB-first; tail bits that do not complete a byte
//! are dropped. The unpacker mirrors the same walk and tolerates
//! truncated input.

use tracing::debug;

use crate::types::{
    Frame, ENERGY_MASK, ENERGY_STOP, ENERGY_ZERO, K1_K2_MASK, K3_K7_MASK, K8_K10_MASK, PITCH_MASK,
};

/// Highest bit position of the 50-bit frame word
const START_BIT: i64 = 49;
/// Last bit emitted for an unvoiced frame (the K4 boundary)
const UNVOICED_STOP_BIT: i64 = 21;
/// Last bit emitted for a repeat frame
const REPEAT_STOP_BIT: i64 = 38;

const ENERGY_OFFSET: u64 = 46;
const REPEAT_OFFSET: u64 = 45;
const PITCH_OFFSET: u64 = 39;
const K1_OFFSET: u64 = 34;
const K2_OFFSET: u64 = 29;
const K3_OFFSET: u64 = 25;
const K4_OFFSET: u64 = 21;
const K5_OFFSET: u64 = 17;
const K6_OFFSET: u64 = 13;
const K7_OFFSET: u64 = 9;
const K8_OFFSET: u64 = 6;
const K9_OFFSET: u64 = 3;
const K10_OFFSET: u64 = 0;

const K_OFFSETS: [u64; 10] = [
    K1_OFFSET, K2_OFFSET, K3_OFFSET, K4_OFFSET, K5_OFFSET, K6_OFFSET, K7_OFFSET, K8_OFFSET,
    K9_OFFSET, K10_OFFSET,
];

const K_MASKS: [u8; 10] = [
    K1_K2_MASK, K1_K2_MASK, K3_K7_MASK, K3_K7_MASK, K3_K7_MASK, K3_K7_MASK, K3_K7_MASK,
    K8_K10_MASK, K8_K10_MASK, K8_K10_MASK,
];

/// Outcome of decoding one frame's worth of bits
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FrameBitInfo {
    /// The partially or fully assembled 50-bit frame word
    pub code: u64,
    /// Number of bits consumed from the input
    pub bits_read: usize,
    /// Set when the input ran out before the frame completed
    pub not_enough_bits: bool,
}

/// Assemble the 50-bit frame word
fn to_bitcode(frame: &Frame) -> u64 {
    let mut code = 0u64;

    code |= (u64::from(frame.energy) & u64::from(ENERGY_MASK)) << ENERGY_OFFSET;
    code |= u64::from(frame.repeat) << REPEAT_OFFSET;
    code |= (u64::from(frame.pitch) & u64::from(PITCH_MASK)) << PITCH_OFFSET;

    for j in 0..10 {
        code |= (u64::from(frame.k[j]) & u64::from(K_MASKS[j])) << K_OFFSETS[j];
    }

    code
}

/// Split a frame word back into fields, honouring the early frame ends
fn from_bitcode(code: u64) -> Frame {
    let mut frame = Frame::default();

    frame.energy = ((code >> ENERGY_OFFSET) as u8) & ENERGY_MASK;
    if frame.energy == ENERGY_ZERO || frame.energy == ENERGY_STOP {
        return frame;
    }

    frame.repeat = (code >> REPEAT_OFFSET) & 1 == 1;
    frame.pitch = ((code >> PITCH_OFFSET) as u8) & PITCH_MASK;
    if frame.repeat {
        return frame;
    }

    for j in 0..4 {
        frame.k[j] = ((code >> K_OFFSETS[j]) as u8) & K_MASKS[j];
    }
    if frame.pitch == 0 {
        return frame;
    }

    for j in 4..10 {
        frame.k[j] = ((code >> K_OFFSETS[j]) as u8) & K_MASKS[j];
    }

    frame
}

/// Append one frame's bits, most significant first
fn push_frame_bits(bits: &mut Vec<u8>, code: u64) {
    let energy = ((code >> ENERGY_OFFSET) as u8) & ENERGY_MASK;
    let pitch = ((code >> PITCH_OFFSET) as u8) & PITCH_MASK;

    let stop_at = if energy == ENERGY_ZERO || energy == ENERGY_STOP {
        ENERGY_OFFSET as i64
    } else if pitch == 0 {
        UNVOICED_STOP_BIT
    } else if code & (1 << REPEAT_OFFSET) != 0 {
        REPEAT_STOP_BIT
    } else {
        0
    };

    let mut i = START_BIT;
    while i >= stop_at {
        bits.push(((code >> i) & 1) as u8);
        i -= 1;
    }
}

/// Decode one frame's worth of bits
///
/// Consumes bits from position 49 downward, ending early after the
/// energy field for silent/stop frames and at the K4 boundary for
/// unvoiced frames. When the input runs out mid-frame the result keeps
/// the bits accumulated so far and flags `not_enough_bits`.
pub fn read_frame_bits(bits: &[u8]) -> FrameBitInfo {
    let mut info = FrameBitInfo::default();
    let mut i = START_BIT;

    loop {
        if info.bits_read >= bits.len() {
            info.not_enough_bits = true;
            break;
        }

        info.code |= u64::from(bits[info.bits_read]) << i;
        info.bits_read += 1;

        if i == 0 {
            break;
        }

        if i == ENERGY_OFFSET as i64 {
            let energy = ((info.code >> ENERGY_OFFSET) as u8) & ENERGY_MASK;
            if energy == ENERGY_ZERO || energy == ENERGY_STOP {
                break;
            }
        }

        if i <= PITCH_OFFSET as i64 {
            let pitch = ((info.code >> PITCH_OFFSET) as u8) & PITCH_MASK;
            if pitch == 0 && i == K4_OFFSET as i64 {
                break;
            }
        }

        i -= 1;
    }

    info
}

/// Squash a bit list into bytes, bit `i` landing in bit `i % 8` of byte
/// `i / 8`; trailing bits that do not complete a byte are dropped
fn squash_bits(bits: &[u8]) -> Vec<u8> {
    let byte_count = bits.len() / 8;
    let mut bytes = vec![0u8; byte_count];

    for (i, &bit) in bits[..byte_count * 8].iter().enumerate() {
        bytes[i / 8] |= bit << (i % 8);
    }

    bytes
}

/// Expand bytes into one bit per element, LSB-first within each byte
pub fn expand_bits(bytes: &[u8]) -> Vec<u8> {
    let mut bits = Vec::with_capacity(bytes.len() * 8);
    for &byte in bytes {
        for j in 0..8 {
            bits.push((byte >> j) & 1);
        }
    }
    bits
}

/// Pack frames into a TMS5220 byte stream
///
/// Every frame is clamped before serialisation. The final partial byte,
/// if any, is dropped.
pub fn pack(frames: &[Frame]) -> Vec<u8> {
    let mut bits = Vec::with_capacity(frames.len() * 50);

    for frame in frames {
        push_frame_bits(&mut bits, to_bitcode(&frame.clamp()));
    }

    let bytes = squash_bits(&bits);
    debug!("packed {} frames into {} bytes", frames.len(), bytes.len());
    bytes
}

/// Unpack a TMS5220 byte stream into frames
///
/// Consumes frames until the bits run out. A final truncated frame is
/// retained with whatever fields were recovered; the terminal stop frame
/// may be absent from a truncated stream.
pub fn unpack(bytes: &[u8]) -> Vec<Frame> {
    let bits = expand_bits(bytes);
    let mut frames = Vec::with_capacity(bytes.len() * 8 / 50 + 1);

    let mut consumed = 0;
    while consumed < bits.len() {
        let info = read_frame_bits(&bits[consumed..]);
        frames.push(from_bitcode(info.code));
        consumed += info.bits_read;
    }

    debug!("unpacked {} bytes into {} frames", bytes.len(), frames.len());
    frames
}
