use crate::error::{BsuError, Result};
use std::fmt;

/// Operand width of a shift/rotate destination.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Width {
    Byte,
    Word,
    Dword,
    Qword,
}

impl Width {
    pub const ALL: [Width; 4] = [Width::Byte, Width::Word, Width::Dword, Width::Qword];

    pub const fn bits(self) -> u32 {
        match self {
            Width::Byte => 8,
            Width::Word => 16,
            Width::Dword => 32,
            Width::Qword => 64,
        }
    }

    /// Operand size in bytes, as reported by decoders.
    pub const fn size(self) -> usize {
        (self.bits() / 8) as usize
    }

    pub const fn value_mask(self) -> u64 {
        match self {
            Width::Byte => 0xFF,
            Width::Word => 0xFFFF,
            Width::Dword => 0xFFFF_FFFF,
            Width::Qword => 0xFFFF_FFFF_FFFF_FFFF,
        }
    }

    pub const fn sign_bit(self) -> u64 {
        1u64 << (self.bits() - 1)
    }

    /// Modulus x86 applies to every shift/rotate count. Only 64-bit operands
    /// get six count bits; everything narrower is masked to 0..=31.
    pub const fn count_mask(self) -> u64 {
        match self {
            Width::Qword => 0x3F,
            Width::Byte | Width::Word | Width::Dword => 0x1F,
        }
    }

    pub fn from_size(size: usize) -> Result<Self> {
        match size {
            1 => Ok(Width::Byte),
            2 => Ok(Width::Word),
            4 => Ok(Width::Dword),
            8 => Ok(Width::Qword),
            _ => Err(BsuError::InvalidOperandSize(size)),
        }
    }

    #[inline]
    pub const fn truncate(self, value: u64) -> u64 {
        value & self.value_mask()
    }

    #[inline]
    pub const fn msb(self, value: u64) -> bool {
        value & self.sign_bit() != 0
    }

    /// Sign-extends a width-sized value to 64 bits.
    #[inline]
    pub const fn sign_extend(self, value: u64) -> i64 {
        let unused = 64 - self.bits();
        ((value << unused) as i64) >> unused
    }
}

impl TryFrom<u32> for Width {
    type Error = BsuError;

    fn try_from(bits: u32) -> Result<Self> {
        match bits {
            8 => Ok(Width::Byte),
            16 => Ok(Width::Word),
            32 => Ok(Width::Dword),
            64 => Ok(Width::Qword),
            _ => Err(BsuError::InvalidWidth(bits)),
        }
    }
}

impl fmt::Display for Width {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-bit", self.bits())
    }
}
