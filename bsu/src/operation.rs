use crate::error::{BsuError, Result};

/// Single-operand members of the shift/rotate family.
///
/// Discriminants are the x86 group-2 selector (the `/r` field of opcodes
/// C0, C1 and D0-D3).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum Operation {
    Rol = 0,
    Ror = 1,
    Rcl = 2,
    Rcr = 3,
    Shl = 4,
    Shr = 5,
    /// Encoded separately but identical to [`Operation::Shl`].
    Sal = 6,
    Sar = 7,
}

/// Which way bits move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Left,
    Right,
}

impl Operation {
    pub const ALL: [Operation; 8] = [
        Operation::Rol,
        Operation::Ror,
        Operation::Rcl,
        Operation::Rcr,
        Operation::Shl,
        Operation::Shr,
        Operation::Sal,
        Operation::Sar,
    ];

    pub const fn selector(self) -> u8 {
        self as u8
    }

    pub const fn direction(self) -> Direction {
        match self {
            Operation::Rol | Operation::Rcl | Operation::Shl | Operation::Sal => Direction::Left,
            Operation::Ror | Operation::Rcr | Operation::Shr | Operation::Sar => Direction::Right,
        }
    }

    pub const fn is_carry_chained(self) -> bool {
        matches!(self, Operation::Rcl | Operation::Rcr)
    }

    pub const fn is_arithmetic(self) -> bool {
        matches!(self, Operation::Sar)
    }

    /// Shifts also recompute ZF, SF and PF; rotates only ever touch CF and OF.
    pub const fn defines_result_flags(self) -> bool {
        matches!(
            self,
            Operation::Shl | Operation::Sal | Operation::Shr | Operation::Sar
        )
    }
}

impl TryFrom<u8> for Operation {
    type Error = BsuError;

    /// Decoders must strip any auxiliary opcode bits first; only a clean
    /// 3-bit selector is accepted.
    fn try_from(selector: u8) -> Result<Self> {
        match selector {
            0 => Ok(Operation::Rol),
            1 => Ok(Operation::Ror),
            2 => Ok(Operation::Rcl),
            3 => Ok(Operation::Rcr),
            4 => Ok(Operation::Shl),
            5 => Ok(Operation::Shr),
            6 => Ok(Operation::Sal),
            7 => Ok(Operation::Sar),
            _ => Err(BsuError::InvalidSelector(selector)),
        }
    }
}
