#![allow(dead_code)]

use bsu::{Operation, Width};

/// Operands and counts that sit on the edges of every width.
pub const NUMBERS: &[u64] = &[
    0,
    1,
    2,
    3,
    7,
    8,
    9,
    15,
    16,
    17,
    31,
    32,
    33,
    63,
    64,
    65,
    0x7F,
    0x80,
    0x81,
    0xFF,
    0x100,
    0x5555,
    0x7FFF,
    0x8000,
    0xAAAA,
    0xFFFF,
    0x7FFF_FFFF,
    0x8000_0000,
    0xDEAD_BEEF,
    0xFFFF_FFFF,
    0x1_0000_0000,
    0x5555_5555_5555_5555,
    0x7FFF_FFFF_FFFF_FFFF,
    0x8000_0000_0000_0000,
    0xAAAA_AAAA_AAAA_AAAA,
    0xFFFF_FFFF_FFFF_FFFF,
];

/// One bit per step, the way the microcode loop on early x86 parts did it.
/// Returns (result, CF after the last step).
pub fn serial_shift(width: Width, op: Operation, value: u64, count: u32, cf: bool) -> (u64, bool) {
    let mask = width.value_mask();
    let top = width.bits() - 1;
    let mut value = value & mask;
    let mut cf = cf;

    for _ in 0..count {
        let msb = (value >> top) & 1;
        let lsb = value & 1;
        match op {
            Operation::Shl | Operation::Sal => {
                cf = msb != 0;
                value = (value << 1) & mask;
            }
            Operation::Shr => {
                cf = lsb != 0;
                value >>= 1;
            }
            Operation::Sar => {
                cf = lsb != 0;
                value = (value >> 1) | (msb << top);
            }
            Operation::Rol => {
                cf = msb != 0;
                value = ((value << 1) | msb) & mask;
            }
            Operation::Ror => {
                cf = lsb != 0;
                value = (value >> 1) | (lsb << top);
            }
            Operation::Rcl => {
                value = ((value << 1) | cf as u64) & mask;
                cf = msb != 0;
            }
            Operation::Rcr => {
                value = (value >> 1) | ((cf as u64) << top);
                cf = lsb != 0;
            }
        }
    }

    (value, cf)
}

/// Bit-serial SHLD/SHRD for counts up to the operand width.
pub fn serial_double_shift(
    width: Width,
    destination: u64,
    source: u64,
    count: u32,
    shift_right: bool,
) -> (u64, bool) {
    let mask = width.value_mask();
    let top = width.bits() - 1;
    let mut destination = destination & mask;
    let mut source = source & mask;
    let mut cf = false;

    for _ in 0..count {
        if shift_right {
            cf = destination & 1 != 0;
            destination = (destination >> 1) | ((source & 1) << top);
            source >>= 1;
        } else {
            cf = (destination >> top) & 1 != 0;
            destination = ((destination << 1) & mask) | ((source >> top) & 1);
            source = (source << 1) & mask;
        }
    }

    (destination, cf)
}
