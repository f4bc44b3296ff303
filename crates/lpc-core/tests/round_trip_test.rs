//! Round-trip tests across the frame and byte layers

use lpc_core::{
    decode, encode, pack, unpack, EncoderSettings, Frame, SampleBuffer, FRAME_SAMPLES,
};

/// Generate a sine test signal
fn generate_test_signal(length: usize, sample_rate: u32, frequency: f32, amplitude: f32) -> Vec<f32> {
    (0..length)
        .map(|i| {
            let t = i as f32 / sample_rate as f32;
            (std::f32::consts::TAU * frequency * t).sin() * amplitude
        })
        .collect()
}

#[test]
fn frame_stream_survives_byte_round_trip() {
    // Six voiced frames plus the stop marker come to 304 bits, an exact
    // multiple of eight, so nothing is lost to the byte squash.
    let samples = generate_test_signal(1200, 8000, 200.0, 0.8);
    let frames = encode(&SampleBuffer::mono(samples), &EncoderSettings::default()).unwrap();

    let bytes = pack(&frames);
    assert_eq!(bytes.len(), 38);
    let recovered = unpack(&bytes);

    // Every full frame before the stop marker must come back intact.
    let stop_at = recovered.iter().position(Frame::is_stop);
    assert!(stop_at.is_some(), "stop frame lost in the byte stream");
    let stop_at = stop_at.unwrap();

    assert_eq!(stop_at, frames.len() - 1);
    for (original, round_tripped) in frames[..stop_at].iter().zip(recovered.iter()) {
        assert_eq!(original, round_tripped);
    }
}

#[test]
fn decoded_output_is_normalised_mono() {
    let samples = generate_test_signal(3200, 8000, 150.0, 0.9);
    let frames = encode(&SampleBuffer::mono(samples), &EncoderSettings::default()).unwrap();
    let output = decode(&frames).unwrap();

    assert_eq!(output.sample_rate, 8000);
    assert_eq!(output.channels, 1);
    assert_eq!(output.frame_count(), (frames.len() - 1) * FRAME_SAMPLES);
}

#[test]
fn stereo_input_round_trips() {
    let mono = generate_test_signal(1600, 8000, 180.0, 0.7);
    let mut stereo = Vec::with_capacity(mono.len() * 2);
    for sample in mono {
        stereo.push(sample);
        stereo.push(sample * 0.5);
    }

    let frames = encode(
        &SampleBuffer::new(8000, 2, stereo),
        &EncoderSettings::default(),
    )
    .unwrap();
    let output = decode(&frames).unwrap();

    assert_eq!(output.channels, 1);
    assert!(output.frame_count() > 0);
}

#[test]
fn silent_and_stop_frames_pack_into_one_byte() {
    let bytes = pack(&[Frame::silence(), Frame::stop()]);

    assert_eq!(bytes.len(), 1);
    assert_eq!(bytes[0] & 0x0F, 0x0);
    assert_eq!(bytes[0] >> 4, 0xF);
}

#[test]
fn voiced_fixture_round_trips_through_bytes() {
    let frame = Frame {
        energy: 8,
        repeat: false,
        pitch: 30,
        k: [16, 16, 8, 8, 8, 8, 8, 4, 4, 4],
    };
    assert_eq!(frame.clamp(), frame);

    let bytes = pack(&[frame]);
    assert_eq!(bytes.len(), 6);

    let recovered = unpack(&bytes);
    assert_eq!(recovered.len(), 1);
    assert_eq!(recovered[0], frame);
}

#[test]
fn unvoiced_fixture_keeps_low_coefficients_only() {
    let frame = Frame {
        energy: 5,
        repeat: false,
        pitch: 0,
        k: [10, 10, 5, 5, 0, 0, 0, 0, 0, 0],
    };

    // Pad with stop frames so the unvoiced frame's 29 bits land on a
    // byte boundary together with the padding.
    let bytes = pack(&[frame, Frame::stop(), Frame::stop(), Frame::stop()]);
    let recovered = unpack(&bytes);

    assert_eq!(recovered[0].energy, 5);
    assert_eq!(recovered[0].pitch, 0);
    assert_eq!(recovered[0].k[..4], [10, 10, 5, 5]);
    assert_eq!(recovered[0].k[4..], [0, 0, 0, 0, 0, 0]);
}

#[test]
fn random_voiced_frames_round_trip_exactly() {
    use rand::{rngs::StdRng, Rng, SeedableRng};

    let mut rng = StdRng::seed_from_u64(0x5220);

    // Six voiced frames plus the stop marker land exactly on a byte
    // boundary, so the comparison is bit-exact.
    for _ in 0..50 {
        let frames: Vec<Frame> = (0..6)
            .map(|_| {
                let mut k = [0u8; 10];
                for (j, slot) in k.iter_mut().enumerate() {
                    *slot = match j {
                        0 | 1 => rng.gen_range(0..32),
                        2..=6 => rng.gen_range(0..16),
                        _ => rng.gen_range(0..8),
                    };
                }
                Frame {
                    energy: rng.gen_range(1..=14),
                    repeat: false,
                    pitch: rng.gen_range(1..=63),
                    k,
                }
            })
            .collect();

        let mut stream = frames.clone();
        stream.push(Frame::stop());

        let recovered = unpack(&pack(&stream));
        assert_eq!(recovered.len(), stream.len());
        assert_eq!(&recovered[..6], &frames[..]);
        assert!(recovered[6].is_stop());
    }
}

#[test]
fn full_pipeline_shapes_hold() {
    let samples = generate_test_signal(4410, 44100, 220.0, 0.8);
    let frames = encode(
        &SampleBuffer::new(44100, 1, samples),
        &EncoderSettings::default(),
    )
    .unwrap();

    let bytes = pack(&frames);
    let output = decode(&unpack(&bytes)).unwrap();

    assert_eq!(output.sample_rate, 8000);
    assert_eq!(output.channels, 1);
    assert!(output.frame_count() % FRAME_SAMPLES == 0);
}
