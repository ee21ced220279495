/// Operand and count values biased towards the places shift semantics change:
/// small counts around every operand width, each width's sign boundary, all
/// ones, alternating bit patterns and 64-bit extremes.
pub const BOUNDARY_NUMBERS: &[u64] = &[
    0x0000_0000_0000_0000,
    0x0000_0000_0000_0001,
    0x0000_0000_0000_0002,
    0x0000_0000_0000_0003,
    0x0000_0000_0000_0004,
    0x0000_0000_0000_0007,
    0x0000_0000_0000_0008,
    0x0000_0000_0000_0009,
    0x0000_0000_0000_000F,
    0x0000_0000_0000_0010,
    0x0000_0000_0000_0011,
    0x0000_0000_0000_001F,
    0x0000_0000_0000_0020,
    0x0000_0000_0000_0021,
    0x0000_0000_0000_003F,
    0x0000_0000_0000_0040,
    0x0000_0000_0000_0041,
    0x0000_0000_0000_007F,
    0x0000_0000_0000_0080,
    0x0000_0000_0000_0081,
    0x0000_0000_0000_00FE,
    0x0000_0000_0000_00FF,
    0x0000_0000_0000_0100,
    0x0000_0000_0000_5555,
    0x0000_0000_0000_7FFF,
    0x0000_0000_0000_8000,
    0x0000_0000_0000_8001,
    0x0000_0000_0000_AAAA,
    0x0000_0000_0000_FFFF,
    0x0000_0000_0001_0000,
    0x0000_0000_7FFF_FFFF,
    0x0000_0000_8000_0000,
    0x0000_0000_8000_0001,
    0x0000_0000_DEAD_BEEF,
    0x0000_0000_FFFF_FFFF,
    0x0000_0001_0000_0000,
    0x0123_4567_89AB_CDEF,
    0x5555_5555_5555_5555,
    0x7FFF_FFFF_FFFF_FFFF,
    0x8000_0000_0000_0000,
    0x8000_0000_0000_0001,
    0xAAAA_AAAA_AAAA_AAAA,
    0xFFFF_FFFF_FFFF_FFFE,
    0xFFFF_FFFF_FFFF_FFFF,
];
