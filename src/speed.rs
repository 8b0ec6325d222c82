/// Fastest allowed interval, as a fraction of the base: 3/5.
const FLOOR_NUMERATOR: u64 = 3;
const FLOOR_DENOMINATOR: u64 = 5;

/// Each body cell shaves 1/50 (2%) of the base interval.
const SPEEDUP_DIVISOR: u64 = 50;

/// Simulation tick interval for a snake of `length` cells.
///
/// `floor(max(base * 0.6, base - base * length * 0.02))`, evaluated in
/// integer arithmetic so scenario values like `(200, 10) -> 160` are exact.
#[must_use]
pub fn tick_interval_ms(base_speed_ms: u64, length: usize) -> u64 {
    let length = u64::try_from(length).unwrap_or(u64::MAX);
    let reduction = base_speed_ms.saturating_mul(length).div_ceil(SPEEDUP_DIVISOR);
    let scaled = base_speed_ms.saturating_sub(reduction);
    let floor = base_speed_ms.saturating_mul(FLOOR_NUMERATOR) / FLOOR_DENOMINATOR;

    scaled.max(floor)
}
