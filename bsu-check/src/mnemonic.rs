//! Mnemonic tables for the shift/rotate family.
//!
//! These belong to the decoder side of the emulator; the `bsu` crate itself
//! only ever sees [`Operation`] and [`DoubleShift`] values.

use crate::error::{CheckError, Result};
use bsu::{DoubleShift, Operation};
use iced_x86::Mnemonic;
use std::fmt;
use std::str::FromStr;

/// Any instruction the BSU can evaluate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ShiftKind {
    Single(Operation),
    Double(DoubleShift),
}

impl ShiftKind {
    pub const ALL: [ShiftKind; 10] = [
        ShiftKind::Single(Operation::Rol),
        ShiftKind::Single(Operation::Ror),
        ShiftKind::Single(Operation::Rcl),
        ShiftKind::Single(Operation::Rcr),
        ShiftKind::Single(Operation::Shl),
        ShiftKind::Single(Operation::Shr),
        ShiftKind::Single(Operation::Sal),
        ShiftKind::Single(Operation::Sar),
        ShiftKind::Double(DoubleShift::Left),
        ShiftKind::Double(DoubleShift::Right),
    ];

    pub const fn name(self) -> &'static str {
        match self {
            ShiftKind::Single(op) => operation_name(op),
            ShiftKind::Double(DoubleShift::Left) => "shld",
            ShiftKind::Double(DoubleShift::Right) => "shrd",
        }
    }

    /// Maps a decoded iced-x86 mnemonic onto the BSU.
    pub fn from_mnemonic(mnemonic: Mnemonic) -> Option<Self> {
        let kind = match mnemonic {
            Mnemonic::Rol => ShiftKind::Single(Operation::Rol),
            Mnemonic::Ror => ShiftKind::Single(Operation::Ror),
            Mnemonic::Rcl => ShiftKind::Single(Operation::Rcl),
            Mnemonic::Rcr => ShiftKind::Single(Operation::Rcr),
            Mnemonic::Shl => ShiftKind::Single(Operation::Shl),
            Mnemonic::Sal => ShiftKind::Single(Operation::Sal),
            Mnemonic::Shr => ShiftKind::Single(Operation::Shr),
            Mnemonic::Sar => ShiftKind::Single(Operation::Sar),
            Mnemonic::Shld => ShiftKind::Double(DoubleShift::Left),
            Mnemonic::Shrd => ShiftKind::Double(DoubleShift::Right),
            _ => return None,
        };
        Some(kind)
    }
}

pub const fn operation_name(op: Operation) -> &'static str {
    match op {
        Operation::Rol => "rol",
        Operation::Ror => "ror",
        Operation::Rcl => "rcl",
        Operation::Rcr => "rcr",
        Operation::Shl => "shl",
        Operation::Shr => "shr",
        Operation::Sal => "sal",
        Operation::Sar => "sar",
    }
}

impl fmt::Display for ShiftKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ShiftKind {
    type Err = CheckError;

    fn from_str(s: &str) -> Result<Self> {
        let lower = s.trim().to_ascii_lowercase();
        ShiftKind::ALL
            .into_iter()
            .find(|kind| kind.name() == lower)
            .ok_or_else(|| CheckError::UnknownMnemonic(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_names() {
        assert_eq!(
            "rol".parse::<ShiftKind>().unwrap(),
            ShiftKind::Single(Operation::Rol)
        );
        assert_eq!(
            "SAR".parse::<ShiftKind>().unwrap(),
            ShiftKind::Single(Operation::Sar)
        );
        assert_eq!(
            "shrd".parse::<ShiftKind>().unwrap(),
            ShiftKind::Double(DoubleShift::Right)
        );
        assert!("add".parse::<ShiftKind>().is_err());
    }

    #[test]
    fn test_names_round_trip() {
        for kind in ShiftKind::ALL {
            assert_eq!(kind.to_string().parse::<ShiftKind>().unwrap(), kind);
        }
    }

    #[test]
    fn test_from_mnemonic() {
        assert_eq!(
            ShiftKind::from_mnemonic(Mnemonic::Rcr),
            Some(ShiftKind::Single(Operation::Rcr))
        );
        assert_eq!(
            ShiftKind::from_mnemonic(Mnemonic::Shld),
            Some(ShiftKind::Double(DoubleShift::Left))
        );
        assert_eq!(ShiftKind::from_mnemonic(Mnemonic::Add), None);
    }
}
