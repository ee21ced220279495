use crate::width::Width;
use bitflags::bitflags;

bitflags! {
    /// RFLAGS image. The BSU only ever writes CF, PF, ZF, SF and OF; every
    /// other bit passes through untouched so the word can be the emulator's
    /// own flags register.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct Flags: u64 {
        const CF = 1 << 0;     // Carry Flag
        const PF = 1 << 2;     // Parity Flag
        const AF = 1 << 4;     // Auxiliary Carry Flag
        const ZF = 1 << 6;     // Zero Flag
        const SF = 1 << 7;     // Sign Flag
        const TF = 1 << 8;     // Trap Flag
        const IF = 1 << 9;     // Interrupt Enable Flag
        const DF = 1 << 10;    // Direction Flag
        const OF = 1 << 11;    // Overflow Flag
        const IOPL = 3 << 12;  // I/O Privilege Level
        const NT = 1 << 14;    // Nested Task
        const RF = 1 << 16;    // Resume Flag
        const VM = 1 << 17;    // Virtual-8086 Mode
        const AC = 1 << 18;    // Alignment Check
        const VIF = 1 << 19;   // Virtual Interrupt Flag
        const VIP = 1 << 20;   // Virtual Interrupt Pending
        const ID = 1 << 21;    // ID Flag

        /// The six arithmetic status flags.
        const STATUS = Self::CF.bits()
            | Self::PF.bits()
            | Self::AF.bits()
            | Self::ZF.bits()
            | Self::SF.bits()
            | Self::OF.bits();

        /// Flags recomputed from the result by shifts and double shifts.
        const RESULT = Self::PF.bits() | Self::ZF.bits() | Self::SF.bits();
    }
}

impl Flags {
    #[inline]
    pub fn cf(self) -> bool {
        self.contains(Flags::CF)
    }

    #[inline]
    pub fn of(self) -> bool {
        self.contains(Flags::OF)
    }

    /// Sets ZF, SF and PF from a result the same way arithmetic instructions
    /// do. CF, OF and AF are left alone.
    pub fn set_result(&mut self, width: Width, result: u64) {
        let result = width.truncate(result);
        self.set(Flags::ZF, result == 0);
        self.set(Flags::SF, width.msb(result));
        self.set(Flags::PF, parity(result as u8));
    }

    /// Applies the CF/OF pair every member of the family produces.
    #[inline]
    pub fn set_carry_overflow(&mut self, cf: bool, of: bool) {
        self.set(Flags::CF, cf);
        self.set(Flags::OF, of);
    }
}

/// x86 PF: set when the low byte holds an even number of one bits.
#[inline]
pub fn parity(byte: u8) -> bool {
    byte.count_ones().is_multiple_of(2)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_layout_matches_rflags() {
        assert_eq!(Flags::CF.bits(), 0x001);
        assert_eq!(Flags::PF.bits(), 0x004);
        assert_eq!(Flags::AF.bits(), 0x010);
        assert_eq!(Flags::ZF.bits(), 0x040);
        assert_eq!(Flags::SF.bits(), 0x080);
        assert_eq!(Flags::OF.bits(), 0x800);
        assert_eq!(Flags::STATUS.bits(), 0x8D5);
    }

    #[test]
    fn test_parity() {
        assert!(parity(0x00));
        assert!(!parity(0x01));
        assert!(parity(0x03));
        assert!(parity(0xFF));
        assert!(!parity(0x80));
    }

    #[test]
    fn test_set_result_only_touches_result_flags() {
        let mut flags = Flags::CF | Flags::AF | Flags::OF | Flags::IF;
        flags.set_result(Width::Byte, 0x100);
        assert_eq!(flags, Flags::CF | Flags::AF | Flags::OF | Flags::IF | Flags::ZF | Flags::PF);

        let mut flags = Flags::ZF;
        flags.set_result(Width::Word, 0x8001);
        assert_eq!(flags, Flags::SF);
    }
}
