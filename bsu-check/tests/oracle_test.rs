#![cfg(target_arch = "x86_64")]

use bsu::{DoubleShift, Flags, Operation, Width, evaluate, evaluate_double};
use bsu_check::Config;
use bsu_check::harness::{check_double, check_single, double_shift_defined};
use bsu_check::numbers::BOUNDARY_NUMBERS;
use bsu_check::oracle::{native_double_shift, native_shift};

#[test]
fn test_full_sweep_matches_hardware() {
    let report = bsu_check::sweep(&Config::default()).unwrap();
    assert!(report.cases > 0);
    assert!(
        report.passed(),
        "first mismatches: {:#?}",
        &report.mismatches[..report.mismatches.len().min(4)]
    );
}

#[test]
fn test_carry_always_matches_hardware() {
    for width in Width::ALL {
        for op in Operation::ALL {
            for &value in BOUNDARY_NUMBERS {
                for &count in BOUNDARY_NUMBERS {
                    for flags_in in [Flags::empty(), Flags::CF] {
                        let mut flags = flags_in;
                        let result = evaluate(width, op, value, count, &mut flags);
                        let (native, native_flags) = native_shift(width, op, value, count, flags_in);
                        assert_eq!(
                            result, native,
                            "{:?} {} {:#x}, {} result",
                            op, width, value, count
                        );
                        assert_eq!(
                            flags.cf(),
                            native_flags.cf(),
                            "{:?} {} {:#x}, {} CF",
                            op,
                            width,
                            value,
                            count
                        );
                    }
                }
            }
        }
    }
}

#[test]
fn test_overflow_matches_hardware_for_counts_zero_and_one() {
    for width in Width::ALL {
        for op in Operation::ALL {
            for &value in BOUNDARY_NUMBERS {
                for count in [0, 1, width.count_mask() + 1, width.count_mask() + 2] {
                    for flags_in in [Flags::empty(), Flags::CF | Flags::OF] {
                        let mut flags = flags_in;
                        evaluate(width, op, value, count, &mut flags);
                        let (_, native_flags) = native_shift(width, op, value, count, flags_in);
                        assert_eq!(
                            flags.of(),
                            native_flags.of(),
                            "{:?} {} {:#x}, {} OF",
                            op,
                            width,
                            value,
                            count
                        );
                    }
                }
            }
        }
    }
}

#[test]
fn test_double_shifts_match_hardware() {
    for width in [Width::Word, Width::Dword, Width::Qword] {
        for direction in [DoubleShift::Left, DoubleShift::Right] {
            for &destination in BOUNDARY_NUMBERS {
                for &source in BOUNDARY_NUMBERS {
                    for &count in BOUNDARY_NUMBERS {
                        if !double_shift_defined(width, count) {
                            continue;
                        }
                        let native = native_double_shift(
                            width,
                            destination,
                            source,
                            count,
                            direction,
                            Flags::empty(),
                        )
                        .unwrap();
                        let mismatch = check_double(
                            width,
                            direction,
                            destination,
                            source,
                            count,
                            Flags::empty(),
                            native,
                        );
                        assert_eq!(mismatch, None);
                    }
                }
            }
        }
    }
}

#[test]
fn test_rcr_byte_boundary_on_hardware() {
    let native = native_shift(Width::Byte, Operation::Rcr, 0x01, 1, Flags::empty());
    assert_eq!(native.0, 0x00);
    assert!(native.1.cf());
    assert_eq!(
        check_single(Width::Byte, Operation::Rcr, 0x01, 1, Flags::empty(), native),
        None
    );

    let native = native_shift(Width::Byte, Operation::Rcr, 0x01, 1, Flags::CF);
    assert_eq!(native.0, 0x80);
    assert!(native.1.cf());
    assert_eq!(
        check_single(Width::Byte, Operation::Rcr, 0x01, 1, Flags::CF, native),
        None
    );
}

#[test]
fn test_shld_dword_boundary_on_hardware() {
    let mut flags = Flags::empty();
    let result = evaluate_double(
        Width::Dword,
        0x0000_0001,
        0xFFFF_FFFF,
        1,
        DoubleShift::Left,
        &mut flags,
    );
    let (native, native_flags) = native_double_shift(
        Width::Dword,
        0x0000_0001,
        0xFFFF_FFFF,
        1,
        DoubleShift::Left,
        Flags::empty(),
    )
    .unwrap();
    assert_eq!(result, native);
    assert_eq!(flags.cf(), native_flags.cf());
    assert_eq!(flags.of(), native_flags.of());
}
