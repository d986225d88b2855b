//! Release correction over the 480-minute shift cycle.
//!
//! An older alternative to the power-law model. Nothing in the estimation
//! pipeline calls it.

/// Length of one shift cycle in minutes.
pub const CYCLE_MINUTES: i64 = 480;
/// Offset aligning minute-epoch 0 with the cycle start.
pub const CYCLE_OFFSET: i64 = 420;

// (upper bound of minutes since cycle start, value)
const TIERS: [(i64, f64); 6] = [
    (60, 0.764),
    (120, -1.416),
    (180, 0.317),
    (240, -0.403),
    (300, -0.103),
    (360, 0.129),
];

/// Correction value for a row at `row_epoch` minutes since the Unix epoch.
pub fn start_release_value(row_epoch: i64) -> f64 {
    let time_from_start = (row_epoch + CYCLE_OFFSET).rem_euclid(CYCLE_MINUTES);
    if time_from_start == 0 {
        return 1.124;
    }
    TIERS
        .iter()
        .find(|(upper, _)| time_from_start <= *upper)
        .map(|(_, value)| *value)
        .unwrap_or(-0.403)
}
