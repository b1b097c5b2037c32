//! Fixed display rules for card values.

/// Degrees swept by a full ring.
const FULL_SWEEP_DEGREES: f64 = 360.0;

/// Latency at or above this many milliseconds is shown without decimals.
const WHOLE_MS_THRESHOLD: f64 = 100.0;

/// Clamp a percentage into `[0, 100]`. Non-finite input becomes `0`.
///
/// Out-of-range values are clamped individually, never renormalized
/// against the other cards.
pub fn clamp_pct(pct: f64) -> f64 {
    if !pct.is_finite() {
        return 0.0;
    }
    pct.clamp(0.0, 100.0)
}

/// Clamped percentage rounded to a whole number, e.g. `"80%"`.
pub fn format_pct(pct: f64) -> String {
    format!("{}%", to_fixed(clamp_pct(pct), 0))
}

/// Average latency label.
///
/// `>= 100` rounds to whole milliseconds (`"142 ms"`), anything below keeps
/// one decimal (`"42.4 ms"`). Non-finite input renders as `"0 ms"`.
pub fn format_latency(latency_ms: f64) -> String {
    if !latency_ms.is_finite() {
        return "0 ms".to_string();
    }
    let digits = if latency_ms >= WHOLE_MS_THRESHOLD { 0 } else { 1 };
    format!("{} ms", to_fixed(latency_ms, digits))
}

/// Call count as shown under a card title: integral counts without a
/// fraction, anything else as-is.
pub fn format_calls(calls: f64) -> String {
    if calls.fract() == 0.0 && calls.abs() < 1e15 {
        format!("{}", calls as i64)
    } else {
        format!("{calls}")
    }
}

/// Accessible label for the hit-ratio ring, e.g. `"LLM hit percent 12.5%"`.
pub fn ring_label(title: &str, pct: f64) -> String {
    format!("{title} hit percent {}%", to_fixed(clamp_pct(pct), 1))
}

/// Arc swept by the hit-ratio ring, in degrees.
pub fn ring_sweep_degrees(pct: f64) -> f64 {
    clamp_pct(pct) / 100.0 * FULL_SWEEP_DEGREES
}

/// Number of filled cells when the ring is drawn as a `width`-cell gauge.
pub fn ring_filled_cells(pct: f64, width: usize) -> usize {
    let filled = (clamp_pct(pct) / 100.0 * width as f64).round() as usize;
    filled.min(width)
}

/// Fixed-point rendering with `digits` decimals.
///
/// Rounds the exact binary value, so `12.85` (stored just below the half)
/// prints `"12.8"`. Exact ties round away from zero: `0.25` prints `"0.3"`
/// where `{:.1}` alone would give `"0.2"`. `-0.0` prints unsigned.
fn to_fixed(v: f64, digits: u32) -> String {
    let sign = if v < 0.0 { "-" } else { "" };
    let magnitude = v.abs();
    let precision = digits as usize;
    // exact ties are odd multiples of 2^-(digits + 1)
    let halves = magnitude * f64::from(2u32.pow(digits + 1));
    if halves.fract() == 0.0 && halves % 2.0 == 1.0 {
        let scale = f64::from(10u32.pow(digits));
        let rounded = ((magnitude * scale).floor() + 1.0) / scale;
        format!("{sign}{rounded:.precision$}")
    } else {
        format!("{sign}{magnitude:.precision$}")
    }
}
