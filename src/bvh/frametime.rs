//! Frame interval extraction from the BVH header.
//!
//! The motion block declares its interval as a decimal fraction of a
//! second, e.g. `Frame Time: 0.008333`. Historically that literal has been
//! read with a fixed-point transform: at most six fractional digits are
//! kept, short fractions are zero-padded to six, and the reassembled digit
//! string is taken directly as a whole number of microseconds. The
//! transform conflates units for literals with a non-zero integer part and
//! is preserved byte-for-byte anyway, because deployed consumers were paced
//! by exactly these values.

use super::{FRAME_TIME_MARKER, find_marker};
use crate::error::{PlaybackError, Result};

/// Upper bound on digits collected by the fixed-point parse. Keeps the
/// reassembled digit string inside `u64` range.
const MAX_DIGITS: usize = 19;

/// Fractional digits the transform always produces.
const FRACTIONAL_DIGITS: usize = 6;

/// Extract the declared frame interval as microseconds.
///
/// Scans for the `Frame Time` literal, then for the first decimal digit
/// after it, then applies the fixed-point transform to the literal starting
/// there. A buffer without the marker fails differently from one where the
/// marker is never followed by a digit.
pub fn extract_frame_time(data: &[u8]) -> Result<u64> {
    let marker = find_marker(data).ok_or_else(|| {
        PlaybackError::parse_error("frame time extraction", "\"Frame Time\" marker not found")
    })?;

    let tail = &data[marker + FRAME_TIME_MARKER.len()..];
    let digit = tail.iter().position(u8::is_ascii_digit).ok_or_else(|| {
        PlaybackError::parse_error("frame time extraction", "no digits after \"Frame Time\"")
    })?;

    Ok(fixed_point_micros(&tail[digit..]))
}

/// The historical float-literal-to-microseconds transform.
///
/// Consumes digits and at most one decimal point, stopping at the first
/// other byte, after six fractional digits, or after [`MAX_DIGITS`] scanned
/// positions. Fewer than six fractional digits are padded with zeros; the
/// digit string is then parsed as one integer.
fn fixed_point_micros(literal: &[u8]) -> u64 {
    let mut digits = String::new();
    let mut fractional = 0usize;
    let mut seen_point = false;

    for &byte in literal.iter().take(MAX_DIGITS) {
        if fractional >= FRACTIONAL_DIGITS {
            break;
        }
        match byte {
            b'.' => seen_point = true,
            b'0'..=b'9' => {
                digits.push(char::from(byte));
                if seen_point {
                    fractional += 1;
                }
            }
            _ => break,
        }
    }

    while digits.len() < MAX_DIGITS && fractional < FRACTIONAL_DIGITS {
        digits.push('0');
        fractional += 1;
    }

    // At most 19 digits, so this always fits in u64.
    digits.parse().unwrap_or(0)
}
