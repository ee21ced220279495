use crate::config::Config;
use crate::error::Result;
use crate::mnemonic::ShiftKind;
use bsu::{DoubleShift, Flags, Operation, Width, evaluate, evaluate_double};
use std::fmt;
use tracing::warn;

/// One input where the engine and the hardware disagree on a defined output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Mismatch {
    pub kind: ShiftKind,
    pub width: Width,
    pub value: u64,
    /// Second operand for SHLD/SHRD.
    pub source: Option<u64>,
    pub count: u64,
    pub flags_in: Flags,
    pub compared: Flags,
    pub engine: (u64, Flags),
    pub native: (u64, Flags),
}

impl fmt::Display for Mismatch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {:#x}", self.kind, self.width, self.value)?;
        if let Some(source) = self.source {
            write!(f, ", {:#x}", source)?;
        }
        write!(
            f,
            ", {} (flags in {:#x}): engine {:#x}/{:#x}, native {:#x}/{:#x}",
            self.count,
            self.flags_in.bits(),
            self.engine.0,
            self.engine.1.intersection(self.compared).bits(),
            self.native.0,
            self.native.1.intersection(self.compared).bits(),
        )
    }
}

#[derive(Debug, Clone, Default)]
pub struct SweepReport {
    pub cases: u64,
    /// Inputs whose outputs are architecturally undefined.
    pub skipped: u64,
    pub mismatches: Vec<Mismatch>,
    /// Set once `max_mismatches` were collected and the sweep stopped early.
    pub truncated: bool,
}

impl SweepReport {
    pub fn passed(&self) -> bool {
        self.mismatches.is_empty()
    }
}

/// Flags whose values are architecturally defined for this input and must
/// therefore equal the hardware's.
///
/// A masked count of zero defines every status flag (nothing may change).
/// Otherwise CF, ZF, SF and PF are compared (rotates must leave the last three
/// alone on both sides) and OF only for a masked count of one. AF is undefined
/// after any nonzero shift.
pub fn compared_flags(width: Width, count: u64) -> Flags {
    match count & width.count_mask() {
        0 => Flags::STATUS,
        1 => Flags::CF | Flags::RESULT | Flags::OF,
        _ => Flags::CF | Flags::RESULT,
    }
}

/// SHLD/SHRD results are undefined when the masked count exceeds the operand.
pub fn double_shift_defined(width: Width, count: u64) -> bool {
    (count & width.count_mask()) <= width.bits() as u64
}

/// Runs one single-operand case through the engine and compares it with an
/// already computed native outcome.
pub fn check_single(
    width: Width,
    op: Operation,
    value: u64,
    count: u64,
    flags_in: Flags,
    native: (u64, Flags),
) -> Option<Mismatch> {
    let mut flags = flags_in;
    let result = evaluate(width, op, value, count, &mut flags);
    let compared = compared_flags(width, count);
    if result == native.0 && flags.intersection(compared) == native.1.intersection(compared) {
        return None;
    }
    Some(Mismatch {
        kind: ShiftKind::Single(op),
        width,
        value: width.truncate(value),
        source: None,
        count,
        flags_in,
        compared,
        engine: (result, flags),
        native,
    })
}

pub fn check_double(
    width: Width,
    direction: DoubleShift,
    destination: u64,
    source: u64,
    count: u64,
    flags_in: Flags,
    native: (u64, Flags),
) -> Option<Mismatch> {
    let mut flags = flags_in;
    let result = evaluate_double(width, destination, source, count, direction, &mut flags);
    let compared = compared_flags(width, count);
    if result == native.0 && flags.intersection(compared) == native.1.intersection(compared) {
        return None;
    }
    Some(Mismatch {
        kind: ShiftKind::Double(direction),
        width,
        value: width.truncate(destination),
        source: Some(width.truncate(source)),
        count,
        flags_in,
        compared,
        engine: (result, flags),
        native,
    })
}

/// Cross-checks the engine against the host CPU over every configured width,
/// operation, operand, count and incoming carry.
#[cfg(target_arch = "x86_64")]
pub fn sweep(config: &Config) -> Result<SweepReport> {
    use crate::oracle::{native_double_shift, native_shift};
    use tracing::{debug, info};

    let widths = config.widths()?;
    let kinds = config.kinds()?;
    let numbers = config.numbers();
    let mut report = SweepReport::default();

    info!(
        "Sweeping {} widths x {} operations x {} numbers",
        widths.len(),
        kinds.len(),
        numbers.len()
    );

    'outer: for &width in &widths {
        for &kind in &kinds {
            let before = report.cases;
            match kind {
                ShiftKind::Single(op) => {
                    for &value in &numbers {
                        for &count in &numbers {
                            for &cf in &config.carry_in {
                                let flags_in = if cf { Flags::CF } else { Flags::empty() };
                                let native = native_shift(width, op, value, count, flags_in);
                                report.cases += 1;
                                if let Some(mismatch) =
                                    check_single(width, op, value, count, flags_in, native)
                                {
                                    if record(&mut report, mismatch, config.max_mismatches) {
                                        break 'outer;
                                    }
                                }
                            }
                        }
                    }
                }
                ShiftKind::Double(direction) => {
                    for &destination in &numbers {
                        for &source in &numbers {
                            for &count in &numbers {
                                if !double_shift_defined(width, count) {
                                    report.skipped += 1;
                                    continue;
                                }
                                let Some(native) = native_double_shift(
                                    width,
                                    destination,
                                    source,
                                    count,
                                    direction,
                                    Flags::empty(),
                                ) else {
                                    report.skipped += 1;
                                    continue;
                                };
                                report.cases += 1;
                                if let Some(mismatch) = check_double(
                                    width,
                                    direction,
                                    destination,
                                    source,
                                    count,
                                    Flags::empty(),
                                    native,
                                ) {
                                    if record(&mut report, mismatch, config.max_mismatches) {
                                        break 'outer;
                                    }
                                }
                            }
                        }
                    }
                }
            }
            debug!("{} {}: {} cases", kind, width, report.cases - before);
        }
    }

    info!(
        "Sweep finished: {} cases, {} skipped, {} mismatches",
        report.cases,
        report.skipped,
        report.mismatches.len()
    );
    Ok(report)
}

#[cfg(not(target_arch = "x86_64"))]
pub fn sweep(_config: &Config) -> Result<SweepReport> {
    Err(crate::error::CheckError::OracleUnavailable)
}

/// Returns true once the sweep should stop collecting.
#[cfg_attr(not(target_arch = "x86_64"), allow(dead_code))]
fn record(report: &mut SweepReport, mismatch: Mismatch, limit: usize) -> bool {
    warn!("Mismatch: {}", mismatch);
    report.mismatches.push(mismatch);
    if report.mismatches.len() >= limit {
        report.truncated = true;
        return true;
    }
    false
}
