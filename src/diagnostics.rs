//! # Diagnostics Module
//!
//! One text line per loop iteration with the raw joystick reading, built
//! on the stack so it can go out over USB serial without allocating.

use numtoa::NumToA;

use crate::joystick::Sample;

/// Longest line: `X: 4095, Y: 4095\r\n`
pub const LINE_CAPACITY: usize = 32;

fn push(buf: &mut [u8], len: &mut usize, part: &[u8]) {
    buf[*len..*len + part.len()].copy_from_slice(part);
    *len += part.len();
}

/// Formats `X: <x>, Y: <y>\r\n` into `buf` and returns the used part
pub fn format_sample_line(sample: Sample, buf: &mut [u8; LINE_CAPACITY]) -> &[u8] {
    let mut digits = [0u8; 8];
    let mut len = 0;

    push(buf, &mut len, b"X: ");
    push(buf, &mut len, sample.x.numtoa(10, &mut digits));
    push(buf, &mut len, b", Y: ");
    push(buf, &mut len, sample.y.numtoa(10, &mut digits));
    push(buf, &mut len, b"\r\n");

    &buf[..len]
}
