//! Executes the real instruction on the host CPU.
//!
//! Only the six arithmetic status flags are loaded from the caller's word;
//! everything else in RFLAGS (TF, IF, DF, ...) stays as the host had it and is
//! reported back alongside the status flags.

use bsu::{DoubleShift, Flags, Operation, Width};
use std::arch::asm;

const KEEP: u64 = !Flags::STATUS.bits();

macro_rules! native_shift_fn {
    ($name:ident, $insn:literal) => {
        fn $name(width: Width, value: u64, count: u8, flags: u64) -> (u64, u64) {
            let mut value = value;
            let mut flags = flags & Flags::STATUS.bits();
            // SAFETY: the block only touches the two operand registers, CL and
            // the stack slot it pushes and pops itself.
            unsafe {
                match width {
                    Width::Byte => asm!(
                        "pushfq",
                        "and qword ptr [rsp], {keep}",
                        "or qword ptr [rsp], {flags}",
                        "popfq",
                        concat!($insn, " {value:l}, cl"),
                        "pushfq",
                        "pop {flags}",
                        value = inout(reg) value,
                        flags = inout(reg) flags,
                        keep = in(reg) KEEP,
                        in("cl") count,
                    ),
                    Width::Word => asm!(
                        "pushfq",
                        "and qword ptr [rsp], {keep}",
                        "or qword ptr [rsp], {flags}",
                        "popfq",
                        concat!($insn, " {value:x}, cl"),
                        "pushfq",
                        "pop {flags}",
                        value = inout(reg) value,
                        flags = inout(reg) flags,
                        keep = in(reg) KEEP,
                        in("cl") count,
                    ),
                    Width::Dword => asm!(
                        "pushfq",
                        "and qword ptr [rsp], {keep}",
                        "or qword ptr [rsp], {flags}",
                        "popfq",
                        concat!($insn, " {value:e}, cl"),
                        "pushfq",
                        "pop {flags}",
                        value = inout(reg) value,
                        flags = inout(reg) flags,
                        keep = in(reg) KEEP,
                        in("cl") count,
                    ),
                    Width::Qword => asm!(
                        "pushfq",
                        "and qword ptr [rsp], {keep}",
                        "or qword ptr [rsp], {flags}",
                        "popfq",
                        concat!($insn, " {value:r}, cl"),
                        "pushfq",
                        "pop {flags}",
                        value = inout(reg) value,
                        flags = inout(reg) flags,
                        keep = in(reg) KEEP,
                        in("cl") count,
                    ),
                }
            }
            (value & width.value_mask(), flags)
        }
    };
}

macro_rules! native_double_fn {
    ($name:ident, $insn:literal) => {
        fn $name(width: Width, destination: u64, source: u64, count: u8, flags: u64) -> Option<(u64, u64)> {
            let mut destination = destination;
            let mut flags = flags & Flags::STATUS.bits();
            // SAFETY: as for the single-operand shifts.
            unsafe {
                match width {
                    Width::Byte => return None,
                    Width::Word => asm!(
                        "pushfq",
                        "and qword ptr [rsp], {keep}",
                        "or qword ptr [rsp], {flags}",
                        "popfq",
                        concat!($insn, " {dst:x}, {src:x}, cl"),
                        "pushfq",
                        "pop {flags}",
                        dst = inout(reg) destination,
                        src = in(reg) source,
                        flags = inout(reg) flags,
                        keep = in(reg) KEEP,
                        in("cl") count,
                    ),
                    Width::Dword => asm!(
                        "pushfq",
                        "and qword ptr [rsp], {keep}",
                        "or qword ptr [rsp], {flags}",
                        "popfq",
                        concat!($insn, " {dst:e}, {src:e}, cl"),
                        "pushfq",
                        "pop {flags}",
                        dst = inout(reg) destination,
                        src = in(reg) source,
                        flags = inout(reg) flags,
                        keep = in(reg) KEEP,
                        in("cl") count,
                    ),
                    Width::Qword => asm!(
                        "pushfq",
                        "and qword ptr [rsp], {keep}",
                        "or qword ptr [rsp], {flags}",
                        "popfq",
                        concat!($insn, " {dst:r}, {src:r}, cl"),
                        "pushfq",
                        "pop {flags}",
                        dst = inout(reg) destination,
                        src = in(reg) source,
                        flags = inout(reg) flags,
                        keep = in(reg) KEEP,
                        in("cl") count,
                    ),
                }
            }
            Some((destination & width.value_mask(), flags))
        }
    };
}

native_shift_fn!(native_rol, "rol");
native_shift_fn!(native_ror, "ror");
native_shift_fn!(native_rcl, "rcl");
native_shift_fn!(native_rcr, "rcr");
native_shift_fn!(native_shl, "shl");
native_shift_fn!(native_shr, "shr");
native_shift_fn!(native_sal, "sal");
native_shift_fn!(native_sar, "sar");
native_double_fn!(native_shld, "shld");
native_double_fn!(native_shrd, "shrd");

/// Runs `op` natively with `count` in CL. The CPU applies its own count mask,
/// so any raw count can be passed through.
pub fn native_shift(width: Width, op: Operation, value: u64, count: u64, flags: Flags) -> (u64, Flags) {
    let value = width.truncate(value);
    // Both count masks divide 256, so truncating to CL keeps the masked count.
    let count = count as u8;
    let native = match op {
        Operation::Rol => native_rol,
        Operation::Ror => native_ror,
        Operation::Rcl => native_rcl,
        Operation::Rcr => native_rcr,
        Operation::Shl => native_shl,
        Operation::Shr => native_shr,
        Operation::Sal => native_sal,
        Operation::Sar => native_sar,
    };
    let (result, bits) = native(width, value, count, flags.bits());
    (result, Flags::from_bits_retain(bits))
}

/// Runs SHLD/SHRD natively. There is no 8-bit encoding, so [`Width::Byte`]
/// yields `None`.
pub fn native_double_shift(
    width: Width,
    destination: u64,
    source: u64,
    count: u64,
    direction: DoubleShift,
    flags: Flags,
) -> Option<(u64, Flags)> {
    let destination = width.truncate(destination);
    let source = width.truncate(source);
    let count = count as u8;
    let native = match direction {
        DoubleShift::Left => native_shld,
        DoubleShift::Right => native_shrd,
    };
    native(width, destination, source, count, flags.bits())
        .map(|(result, bits)| (result, Flags::from_bits_retain(bits)))
}
