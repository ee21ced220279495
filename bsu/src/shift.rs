use crate::flags::Flags;
use crate::operation::Operation;
use crate::width::Width;

/// Evaluates a single-operand shift or rotate.
///
/// `count` may be any value; it is reduced with [`Width::count_mask`] before
/// use. A masked count of zero returns `value` and leaves `flags` exactly as
/// it was. Otherwise CF and OF are written by every operation and shifts also
/// recompute ZF, SF and PF. AF is never touched.
///
/// OF is only architecturally defined for a masked count of one. For larger
/// counts the same formula is applied, which gives a deterministic but
/// meaningless value.
pub fn evaluate(width: Width, op: Operation, value: u64, count: u64, flags: &mut Flags) -> u64 {
    let value = width.truncate(value);
    let count = (count & width.count_mask()) as u32;

    if count == 0 {
        return value;
    }

    let (result, cf, of) = match op {
        Operation::Shl | Operation::Sal => shl(width, value, count),
        Operation::Shr => shr(width, value, count),
        Operation::Sar => sar(width, value, count),
        Operation::Rol => rol(width, value, count),
        Operation::Ror => ror(width, value, count),
        Operation::Rcl => rcl(width, value, count, flags.cf()),
        Operation::Rcr => rcr(width, value, count, flags.cf()),
    };

    flags.set_carry_overflow(cf, of);
    if op.defines_result_flags() {
        flags.set_result(width, result);
    }

    result
}

// Each helper takes a masked value and a count in 1..=count_mask and returns
// (result, CF, OF).

fn shl(width: Width, value: u64, count: u32) -> (u64, bool, bool) {
    let bits = width.bits();
    let result = width.truncate(value << count);
    // Past the operand the shifted-in zeros are what falls out.
    let cf = count <= bits && (value >> (bits - count)) & 1 != 0;
    let of = width.msb(result) != cf;
    (result, cf, of)
}

fn shr(width: Width, value: u64, count: u32) -> (u64, bool, bool) {
    let bits = width.bits();
    let result = value >> count;
    let cf = count <= bits && (value >> (count - 1)) & 1 != 0;
    let of = width.msb(value);
    (result, cf, of)
}

fn sar(width: Width, value: u64, count: u32) -> (u64, bool, bool) {
    let signed = width.sign_extend(value);
    // count <= 63, so the i64 shifts saturate to the sign naturally.
    let result = width.truncate((signed >> count) as u64);
    let cf = (signed >> (count - 1)) & 1 != 0;
    (result, cf, false)
}

fn rol(width: Width, value: u64, count: u32) -> (u64, bool, bool) {
    let bits = width.bits();
    let rotate = count % bits;
    let result = if rotate == 0 {
        value
    } else {
        width.truncate((value << rotate) | (value >> (bits - rotate)))
    };
    // The bit that wrapped around lands in the LSB.
    let cf = result & 1 != 0;
    let of = width.msb(result) != cf;
    (result, cf, of)
}

fn ror(width: Width, value: u64, count: u32) -> (u64, bool, bool) {
    let bits = width.bits();
    let rotate = count % bits;
    let result = if rotate == 0 {
        value
    } else {
        width.truncate((value >> rotate) | (value << (bits - rotate)))
    };
    let cf = width.msb(result);
    // Sign change, as the hardware computes it. MSB(result) ^ CF is always 0.
    let of = cf != width.msb(result << 1);
    (result, cf, of)
}

/// Ring of `bits + 1` positions: the value in bits 0..bits, CF on top.
fn carry_ring(width: Width, value: u64, cf: bool) -> (u128, u32, u128) {
    let ring_bits = width.bits() + 1;
    let ring = (value as u128) | ((cf as u128) << width.bits());
    let ring_mask = (1u128 << ring_bits) - 1;
    (ring, ring_bits, ring_mask)
}

fn split_ring(width: Width, ring: u128) -> (u64, bool) {
    let result = width.truncate(ring as u64);
    let cf = (ring >> width.bits()) & 1 != 0;
    (result, cf)
}

fn rcl(width: Width, value: u64, count: u32, cf: bool) -> (u64, bool, bool) {
    let (ring, ring_bits, ring_mask) = carry_ring(width, value, cf);
    let rotate = count % ring_bits;
    let rotated = if rotate == 0 {
        ring
    } else {
        ((ring << rotate) | (ring >> (ring_bits - rotate))) & ring_mask
    };
    let (result, cf) = split_ring(width, rotated);
    let of = width.msb(result) != cf;
    (result, cf, of)
}

fn rcr(width: Width, value: u64, count: u32, cf: bool) -> (u64, bool, bool) {
    let (ring, ring_bits, ring_mask) = carry_ring(width, value, cf);
    let rotate = count % ring_bits;
    let rotated = if rotate == 0 {
        ring
    } else {
        ((ring >> rotate) | (ring << (ring_bits - rotate))) & ring_mask
    };
    let (result, cf) = split_ring(width, rotated);
    let of = width.msb(value) != width.msb(result);
    (result, cf, of)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shr_byte_boundary() {
        let mut flags = Flags::empty();
        let result = evaluate(Width::Byte, Operation::Shr, 0x01, 1, &mut flags);
        assert_eq!(result, 0x00);
        assert_eq!(flags, Flags::CF | Flags::ZF | Flags::PF);
    }

    #[test]
    fn test_rcr_byte_boundary() {
        let mut flags = Flags::empty();
        let result = evaluate(Width::Byte, Operation::Rcr, 0x01, 1, &mut flags);
        assert_eq!(result, 0x00);
        assert!(flags.cf());

        // The incoming carry is what lands in the MSB.
        let mut flags = Flags::CF;
        let result = evaluate(Width::Byte, Operation::Rcr, 0x01, 1, &mut flags);
        assert_eq!(result, 0x80);
        assert!(flags.cf());
    }

    #[test]
    fn test_zero_count_is_identity() {
        let before = Flags::STATUS | Flags::IF;
        for op in Operation::ALL {
            let mut flags = before;
            assert_eq!(evaluate(Width::Dword, op, 0xDEAD_BEEF, 0x20, &mut flags), 0xDEAD_BEEF);
            assert_eq!(flags, before, "{:?} changed flags with a masked count of 0", op);
        }
    }

    #[test]
    fn test_sal_matches_shl() {
        for count in 0..40 {
            let mut shl_flags = Flags::empty();
            let mut sal_flags = Flags::empty();
            let a = evaluate(Width::Word, Operation::Shl, 0x8421, count, &mut shl_flags);
            let b = evaluate(Width::Word, Operation::Sal, 0x8421, count, &mut sal_flags);
            assert_eq!(a, b);
            assert_eq!(shl_flags, sal_flags);
        }
    }

    #[test]
    fn test_input_above_mask_is_ignored() {
        let mut flags = Flags::empty();
        let result = evaluate(Width::Byte, Operation::Shl, 0xFF01, 1, &mut flags);
        assert_eq!(result, 0x02);
        assert!(!flags.cf());
    }
}
