use crate::flags::Flags;
use crate::width::Width;

/// SHLD/SHRD selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DoubleShift {
    /// SHLD: destination moves left, the top bits of source fill in from the right.
    Left,
    /// SHRD: destination moves right, the low bits of source fill in from the left.
    Right,
}

impl DoubleShift {
    pub const fn is_right(self) -> bool {
        matches!(self, DoubleShift::Right)
    }
}

impl From<bool> for DoubleShift {
    fn from(shift_right: bool) -> Self {
        if shift_right {
            DoubleShift::Right
        } else {
            DoubleShift::Left
        }
    }
}

/// Evaluates SHLD or SHRD. `source` is only read.
///
/// Counts are masked exactly like single-operand shifts and a masked count of
/// zero leaves both the destination and `flags` alone. CF is the last bit to
/// leave the destination, OF the sign change (defined for a count of one) and
/// ZF, SF and PF follow the result.
///
/// 8- and 16-bit operands can receive a masked count larger than the operand.
/// Hardware leaves that result undefined; here the destination keeps shifting
/// through a repeating `destination:source:destination...` pattern, so the
/// outcome only depends on the count modulo twice the width.
pub fn evaluate_double(
    width: Width,
    destination: u64,
    source: u64,
    count: u64,
    direction: DoubleShift,
    flags: &mut Flags,
) -> u64 {
    let destination = width.truncate(destination);
    let source = width.truncate(source);
    let count = (count & width.count_mask()) as u32;

    if count == 0 {
        return destination;
    }

    let (result, cf) = match direction {
        DoubleShift::Left => shld(width, destination, source, count),
        DoubleShift::Right => shrd(width, destination, source, count),
    };
    let of = width.msb(destination) != width.msb(result);

    flags.set_carry_overflow(cf, of);
    flags.set_result(width, result);
    result
}

/// Alternating `destination:source:...:destination` words, most significant
/// first, long enough to cover `count + bits` for any masked count. Returns the
/// pattern and its length in bits. Only built for 8- and 16-bit operands, where
/// it spans 40 and 48 bits.
fn overlong_pattern(width: Width, destination: u64, source: u64) -> (u128, u32) {
    let bits = width.bits();
    let words = (width.count_mask() as u32 + 1 + bits).div_ceil(bits);
    let pattern = (0..words).fold(0u128, |pattern, word| {
        let next = if word % 2 == 0 { destination } else { source };
        (pattern << bits) | next as u128
    });
    (pattern, words * bits)
}

fn shld(width: Width, destination: u64, source: u64, count: u32) -> (u64, bool) {
    let bits = width.bits();
    if count <= bits {
        let combined = ((destination as u128) << bits) | source as u128;
        let result = width.truncate(((combined << count) >> bits) as u64);
        let cf = (destination >> (bits - count)) & 1 != 0;
        (result, cf)
    } else {
        let (pattern, length) = overlong_pattern(width, destination, source);
        let result = width.truncate(((pattern << count) >> (length - bits)) as u64);
        let cf = (pattern >> (length - count)) & 1 != 0;
        (result, cf)
    }
}

fn shrd(width: Width, destination: u64, source: u64, count: u32) -> (u64, bool) {
    let bits = width.bits();
    if count <= bits {
        let combined = ((source as u128) << bits) | destination as u128;
        let result = width.truncate((combined >> count) as u64);
        let cf = (destination >> (count - 1)) & 1 != 0;
        (result, cf)
    } else {
        let (pattern, _) = overlong_pattern(width, destination, source);
        let result = width.truncate((pattern >> count) as u64);
        let cf = (pattern >> (count - 1)) & 1 != 0;
        (result, cf)
    }
}
