//! Buffer-to-decimal conversion with round-half-to-even on the 96-bit mantissa

use rust_decimal::Decimal;

use super::buffer::NumberBuffer;

/// Maximum number of significant decimal digits
pub(crate) const DECIMAL_PRECISION: i32 = 29;
/// Largest scale a decimal can carry
const MAX_SCALE: i32 = 28;
/// Largest 64-bit low part that can still take one more digit when the
/// high part is at its limit
const LOW64_LIMIT: u64 = 0x9999_9999_9999_9999;

/// Convert a tokenized number to a [`Decimal`].
///
/// Digits beyond the 96-bit mantissa are rounded half-to-even, with any
/// dropped non-zero digit counting as "above half". Returns `None` when
/// the integral part does not fit.
pub(crate) fn number_to_decimal(number: &NumberBuffer) -> Option<Decimal> {
    let digits = number.digits();
    let at = |index: usize| digits.get(index).copied().unwrap_or(0);
    let negative = number.is_negative();
    let mut exponent = number.scale();
    let mut index = 0usize;
    let mut current = at(index);

    if current == 0 {
        // Zero keeps its scale so "0.00" stays distinct from "0"
        let scale = (-exponent).clamp(0, MAX_SCALE) as u32;
        return Some(Decimal::from_parts(0, 0, 0, negative, scale));
    }
    if exponent > DECIMAL_PRECISION {
        return None;
    }

    let mut low64 = 0u64;
    while exponent > -MAX_SCALE {
        exponent -= 1;
        low64 = low64 * 10 + (current - b'0') as u64;
        index += 1;
        current = at(index);
        if low64 >= u64::MAX / 10 {
            break;
        }
        if current == 0 {
            while exponent > 0 {
                exponent -= 1;
                low64 *= 10;
                if low64 >= u64::MAX / 10 {
                    break;
                }
            }
            break;
        }
    }

    let mut high = 0u32;
    loop {
        let more = exponent > 0 || (current != 0 && exponent > -MAX_SCALE);
        let fits = high < u32::MAX / 10
            || (high == u32::MAX / 10
                && (low64 < LOW64_LIMIT || (low64 == LOW64_LIMIT && current <= b'5')));
        if !(more && fits) {
            break;
        }

        // (high:low64) *= 10
        let low_times_ten = (low64 as u32) as u64 * 10;
        let high_times_ten = (low64 >> 32) * 10 + (low_times_ten >> 32);
        low64 = (low_times_ten as u32) as u64 + (high_times_ten << 32);
        high = ((high_times_ten >> 32) as u32).wrapping_add(high.wrapping_mul(10));

        if current != 0 {
            let digit = (current - b'0') as u64;
            low64 = low64.wrapping_add(digit);
            if low64 < digit {
                high = high.wrapping_add(1);
            }
            index += 1;
            current = at(index);
        }
        exponent -= 1;
    }

    if current >= b'5' {
        let mut round_up = true;
        if current == b'5' && low64 & 1 == 0 {
            index += 1;
            current = at(index);
            let mut zero_tail = !number.has_non_zero_tail();
            while current != 0 && zero_tail {
                zero_tail &= current == b'0';
                index += 1;
                current = at(index);
            }
            // Exactly half with an even mantissa stays put
            if zero_tail {
                round_up = false;
            }
        }

        if round_up {
            low64 = low64.wrapping_add(1);
            if low64 == 0 {
                high = high.wrapping_add(1);
                if high == 0 {
                    // Mantissa wrapped: divide by ten and bump the exponent
                    low64 = 0x9999_9999_9999_999A;
                    high = u32::MAX / 10;
                    exponent += 1;
                }
            }
        }
    }

    if exponent > 0 {
        return None;
    }
    if exponent <= -DECIMAL_PRECISION {
        // Every digit fell below the smallest representable scale
        return Some(Decimal::from_parts(0, 0, 0, negative, MAX_SCALE as u32));
    }
    Some(Decimal::from_parts(
        low64 as u32,
        (low64 >> 32) as u32,
        high,
        negative,
        (-exponent) as u32,
    ))
}
