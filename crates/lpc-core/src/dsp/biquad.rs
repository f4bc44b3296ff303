//! Band-pass biquad filter
//!
//! A constant-skirt band-pass section designed from the band edges and a
//! Q factor. `b1` is zero and `b2 = -b0` by construction, so the DC gain
//! is exactly zero.

use std::f32::consts::TAU;

/// Second-order band-pass filter with two-sample input/output history
#[derive(Debug, Clone)]
pub struct Biquad {
    b0: f32,
    b1: f32,
    b2: f32,
    a1: f32,
    a2: f32,

    x1: f32,
    x2: f32,
    y1: f32,
    y2: f32,
}

impl Biquad {
    /// Design a band-pass filter centred between `low_cut` and `high_cut`
    ///
    /// With `amplify` set, the pass-band gain scales with the Q factor
    /// (`b0 = alpha * q`); otherwise the skirt gain is constant
    /// (`b0 = alpha`). Coefficients are normalised by `a0`.
    pub fn bandpass(sample_rate: u32, low_cut: f32, high_cut: f32, q_factor: f32, amplify: bool) -> Self {
        let center = (low_cut + high_cut) / 2.0;
        let w = TAU * (center / sample_rate as f32);

        let w_cos = w.cos();
        let w_sin = w.sin();
        let alpha = w_sin / (2.0 * q_factor);

        let (b0, b1, b2) = if amplify {
            (alpha * q_factor, 0.0, -alpha * q_factor)
        } else {
            (alpha, 0.0, -alpha)
        };

        let a0 = 1.0 + alpha;
        let a1 = -2.0 * w_cos;
        let a2 = 1.0 - alpha;

        Self {
            b0: b0 / a0,
            b1: b1 / a0,
            b2: b2 / a0,
            a1: a1 / a0,
            a2: a2 / a0,
            x1: 0.0,
            x2: 0.0,
            y1: 0.0,
            y2: 0.0,
        }
    }

    /// Filter a single sample
    pub fn process(&mut self, input: f32) -> f32 {
        let output = self.b0 * input + self.b1 * self.x1 + self.b2 * self.x2
            - self.a1 * self.y1
            - self.a2 * self.y2;

        self.x2 = self.x1;
        self.y2 = self.y1;
        self.x1 = input;
        self.y1 = output;

        output
    }

    /// Filter a buffer in place
    pub fn run(&mut self, samples: &mut [f32]) {
        for sample in samples {
            *sample = self.process(*sample);
        }
    }
}
