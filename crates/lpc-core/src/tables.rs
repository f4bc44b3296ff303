//! Fixed TMS5220 coding tables
//!
//! Quantisation and synthesis both index these tables, so the values
//! must match the chip reference bit-for-bit. Energy entry 15 is the
//! stop sentinel and is never produced by the quantiser; pitch entry 0
//! selects noise excitation.

/// Number of entries in the chirp excitation table
pub const CHIRP_TABLE_SIZE: usize = 52;

/// Chirp excitation waveform for voiced frames
pub const CHIRP_TABLE: [f32; CHIRP_TABLE_SIZE] = [
    0.0, 3.0, 15.0, 40.0, 76.0, 108.0, 113.0, 80.0, //
    37.0, 38.0, 76.0, 68.0, 26.0, 50.0, 59.0, 19.0, //
    55.0, 26.0, 37.0, 31.0, 29.0, 0.0, 0.0, 0.0, //
    0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, //
    0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, //
    0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, //
    0.0, 0.0, 0.0, 0.0,
];

/// Frame energy levels
pub const ENERGY_TABLE: [f32; 16] = [
    0.0, 52.0, 87.0, 123.0, //
    174.0, 246.0, 348.0, 491.0, //
    694.0, 981.0, 1385.0, 1957.0, //
    2764.0, 3904.0, 5514.0, 7789.0,
];

/// Pitch periods in 8 kHz sample units
pub const PITCH_TABLE: [u32; 64] = [
    0, 15, 16, 17, 18, 19, 20, 21, 22, 23, 24, 25, 26, 27, 28, 29, //
    30, 31, 32, 33, 34, 35, 36, 37, 38, 39, 40, 41, 42, 44, 46, 48, //
    50, 52, 53, 56, 58, 60, 62, 65, 68, 70, 72, 76, 78, 80, 84, 86, //
    91, 94, 98, 101, 105, 109, 114, 118, 122, 127, 132, 137, 142, 148, 153, 159,
];

/// K1 reflection-coefficient levels
pub const K1_TABLE: [f32; 32] = [
    -0.97850, -0.97270, -0.97070, -0.96680, //
    -0.96290, -0.95900, -0.95310, -0.94140, //
    -0.93360, -0.92580, -0.91600, -0.90620, //
    -0.89650, -0.88280, -0.86910, -0.85350, //
    -0.80420, -0.74058, -0.66019, -0.56116, //
    -0.44296, -0.30706, -0.15735, -0.00005, //
    0.15725, 0.30696, 0.44288, 0.56109, //
    0.66013, 0.75054, 0.80416, 0.85350,
];

/// K2 reflection-coefficient levels
pub const K2_TABLE: [f32; 32] = [
    -0.64000, -0.58999, -0.53500, -0.47507, //
    -0.41039, -0.34129, -0.26830, -0.19209, //
    -0.11350, -0.03345, 0.04702, 0.12690, //
    0.20515, 0.28087, 0.35325, 0.42163, //
    0.48553, 0.54464, 0.59878, 0.64796, //
    0.69227, 0.73190, 0.76714, 0.79828, //
    0.82567, 0.84965, 0.87057, 0.88875, //
    0.90451, 0.91813, 0.92988, 0.98830,
];

/// K3 reflection-coefficient levels
pub const K3_TABLE: [f32; 16] = [
    -0.86000, -0.75467, -0.64933, -0.54400, //
    -0.43867, -0.33333, -0.22800, -0.12267, //
    -0.01733, 0.08800, 0.19333, 0.29867, //
    0.40400, 0.50933, 0.61467, 0.72000,
];

/// K4 reflection-coefficient levels
pub const K4_TABLE: [f32; 16] = [
    -0.64000, -0.53145, -0.42289, -0.31434, //
    -0.20579, -0.09723, 0.01132, 0.11987, //
    0.22843, 0.33698, 0.44553, 0.55409, //
    0.66264, 0.77119, 0.87975, 0.98830,
];

/// K5 reflection-coefficient levels
pub const K5_TABLE: [f32; 16] = [
    -0.64000, -0.54933, -0.45867, -0.36800, //
    -0.27733, -0.18667, -0.09600, -0.00533, //
    0.08533, 0.17600, 0.26667, 0.35733, //
    0.44800, 0.53867, 0.62933, 0.72000,
];

/// K6 reflection-coefficient levels
pub const K6_TABLE: [f32; 16] = [
    -0.50000, -0.41333, -0.32667, -0.24000, //
    -0.15333, -0.06667, 0.02000, 0.10667, //
    0.19333, 0.28000, 0.36667, 0.45333, //
    0.54000, 0.62667, 0.71333, 0.80000,
];

/// K7 reflection-coefficient levels
pub const K7_TABLE: [f32; 16] = [
    -0.60000, -0.50667, -0.41333, -0.32000, //
    -0.22667, -0.13333, -0.04000, 0.05333, //
    0.14667, 0.24000, 0.33333, 0.42667, //
    0.52000, 0.61333, 0.70667, 0.80000,
];

/// K8 reflection-coefficient levels
pub const K8_TABLE: [f32; 8] = [
    -0.50000, -0.31429, -0.12857, 0.05714, //
    0.24286, 0.42857, 0.61429, 0.80000,
];

/// K9 reflection-coefficient levels
pub const K9_TABLE: [f32; 8] = [
    -0.50000, -0.34286, -0.18571, -0.02857, //
    0.12857, 0.28571, 0.44286, 0.60000,
];

/// K10 reflection-coefficient levels
pub const K10_TABLE: [f32; 8] = [
    -0.40000, -0.25714, -0.11429, 0.02857, //
    0.17143, 0.31429, 0.45714, 0.60000,
];

/// Quantisation table for the reflection coefficient with the given
/// zero-based index
pub fn k_table(index: usize) -> &'static [f32] {
    match index {
        0 => &K1_TABLE,
        1 => &K2_TABLE,
        2 => &K3_TABLE,
        3 => &K4_TABLE,
        4 => &K5_TABLE,
        5 => &K6_TABLE,
        6 => &K7_TABLE,
        7 => &K8_TABLE,
        8 => &K9_TABLE,
        9 => &K10_TABLE,
        _ => unreachable!("reflection coefficient index out of range"),
    }
}

/// Index of the table entry nearest to `value`
///
/// Ties break to the lowest index.
pub fn nearest_index(table: &[f32], value: f32) -> usize {
    let mut min_dist = (table[0] - value).abs();
    let mut min_index = 0;

    for (index, &entry) in table.iter().enumerate().skip(1) {
        let dist = (entry - value).abs();
        if dist < min_dist {
            min_dist = dist;
            min_index = index;
        }
    }

    min_index
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_table_sizes() {
        assert_eq!(ENERGY_TABLE.len(), 16);
        assert_eq!(PITCH_TABLE.len(), 64);
        assert_eq!(K1_TABLE.len(), 32);
        assert_eq!(K2_TABLE.len(), 32);
        assert_eq!(K3_TABLE.len(), 16);
        assert_eq!(K7_TABLE.len(), 16);
        assert_eq!(K8_TABLE.len(), 8);
        assert_eq!(K10_TABLE.len(), 8);
        assert_eq!(CHIRP_TABLE.len(), CHIRP_TABLE_SIZE);
    }

    #[test]
    fn test_reference_values() {
        assert_eq!(ENERGY_TABLE[0], 0.0);
        assert_eq!(ENERGY_TABLE[15], 7789.0);
        assert_eq!(PITCH_TABLE[0], 0);
        assert_eq!(PITCH_TABLE[1], 15);
        assert_eq!(PITCH_TABLE[63], 159);
        assert_eq!(CHIRP_TABLE[6], 113.0);
        assert!((K1_TABLE[0] + 0.9785).abs() < 1e-6);
        assert!((K10_TABLE[7] - 0.6).abs() < 1e-6);
    }

    #[test]
    fn test_chirp_tail_is_zero() {
        for &value in &CHIRP_TABLE[21..] {
            assert_eq!(value, 0.0);
        }
    }

    #[test]
    fn test_k_tables_monotonic() {
        for index in 0..10 {
            let table = k_table(index);
            for pair in table.windows(2) {
                assert!(pair[0] < pair[1], "table {} not increasing", index + 1);
            }
        }
    }

    #[test]
    fn test_nearest_index() {
        assert_eq!(nearest_index(&ENERGY_TABLE, 0.0), 0);
        assert_eq!(nearest_index(&ENERGY_TABLE, 7789.0), 15);
        assert_eq!(nearest_index(&ENERGY_TABLE, 100.0), 2);
        assert_eq!(nearest_index(&K8_TABLE, 0.0), 3);
    }

    #[test]
    fn test_nearest_index_ties_break_low() {
        let table = [0.0, 2.0];
        assert_eq!(nearest_index(&table, 1.0), 0);
    }
}
