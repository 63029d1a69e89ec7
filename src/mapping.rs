/// Linearly maps `value` from `[in_min, in_max]` onto `[out_min, out_max]`.
///
/// The arithmetic is signed and truncates toward zero, so a descending output
/// range (`out_min > out_max`) works. Nothing is clamped: inputs outside the
/// input range extrapolate and the result is truncated into a `u8`.
///
/// # Panics
///
/// Panics if `in_min == in_max`.
pub fn map_value(value: u16, in_min: u16, in_max: u16, out_min: u8, out_max: u8) -> u8 {
    assert!(in_max != in_min, "map_value: empty input range");

    let span_in = i32::from(in_max) - i32::from(in_min);
    let span_out = i32::from(out_max) - i32::from(out_min);
    let scaled = (i32::from(value) - i32::from(in_min)) * span_out / span_in;

    (scaled + i32::from(out_min)) as u8
}
