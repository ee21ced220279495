use crate::error::{CheckError, Result};
use crate::mnemonic::ShiftKind;
use bsu::{Flags, Width, evaluate, evaluate_double};
use iced_x86::{Decoder, DecoderOptions, Formatter, Instruction, NasmFormatter, OpKind, Register};
use tracing::debug;

/// Where the count of a decoded shift comes from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CountSource {
    /// Immediate byte, including the implicit 1 of the D0/D1 forms.
    Immediate(u8),
    /// The CL register.
    Cl,
}

/// A decoded shift/rotate reduced to what the BSU needs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodedShift {
    pub kind: ShiftKind,
    pub width: Width,
    pub count: CountSource,
    /// NASM rendering of the instruction.
    pub text: String,
}

impl DecodedShift {
    /// Evaluates the instruction. `cl` is only read for [`CountSource::Cl`]
    /// and `source` only for SHLD/SHRD.
    pub fn execute(&self, value: u64, source: u64, cl: u8, flags: &mut Flags) -> u64 {
        let count = match self.count {
            CountSource::Immediate(imm) => imm as u64,
            CountSource::Cl => cl as u64,
        };
        match self.kind {
            ShiftKind::Single(op) => evaluate(self.width, op, value, count, flags),
            ShiftKind::Double(direction) => {
                evaluate_double(self.width, value, source, count, direction, flags)
            }
        }
    }
}

/// Decodes one instruction in 64-bit mode and maps it onto the BSU.
pub fn decode_shift(bytes: &[u8]) -> Result<DecodedShift> {
    let mut decoder = Decoder::with_ip(64, bytes, 0, DecoderOptions::NONE);
    let inst = decoder.decode();

    match decoder.last_error() {
        iced_x86::DecoderError::None => {}
        err => {
            return Err(CheckError::Decode {
                bytes: hex_bytes(bytes),
                reason: format!("{err:?}"),
            });
        }
    }

    let mut text = String::new();
    NasmFormatter::new().format(&inst, &mut text);

    let kind =
        ShiftKind::from_mnemonic(inst.mnemonic()).ok_or_else(|| CheckError::NotAShift(text.clone()))?;
    let width = destination_width(&inst, &text)?;
    let count_operand = match kind {
        ShiftKind::Single(_) => 1,
        ShiftKind::Double(_) => 2,
    };
    let count = count_source(&inst, count_operand, &text)?;

    debug!("Decoded {:?} as {} {} ({:?})", text, kind, width, count);

    Ok(DecodedShift {
        kind,
        width,
        count,
        text,
    })
}

fn destination_width(inst: &Instruction, text: &str) -> Result<Width> {
    let size = match inst.op_kind(0) {
        OpKind::Register => inst.op_register(0).size(),
        OpKind::Memory => inst.memory_size().size(),
        other => {
            return Err(CheckError::UnsupportedOperand {
                instruction: text.to_string(),
                reason: format!("destination kind {other:?}"),
            });
        }
    };
    Ok(Width::from_size(size)?)
}

fn count_source(inst: &Instruction, operand: u32, text: &str) -> Result<CountSource> {
    match inst.op_kind(operand) {
        OpKind::Immediate8 => Ok(CountSource::Immediate(inst.immediate8())),
        OpKind::Register if inst.op_register(operand) == Register::CL => Ok(CountSource::Cl),
        other => Err(CheckError::UnsupportedOperand {
            instruction: text.to_string(),
            reason: format!("count operand {other:?}"),
        }),
    }
}

/// Parses "d1 e0", "d1e0" or "0xd1,0xe0" style byte strings.
pub fn parse_bytes(s: &str) -> Result<Vec<u8>> {
    let cleaned: String = s
        .split(|c: char| c.is_whitespace() || c == ',')
        .map(|part| part.trim_start_matches("0x").trim_start_matches("0X"))
        .collect();
    if cleaned.is_empty() || cleaned.len() % 2 != 0 {
        return Err(CheckError::Decode {
            bytes: s.to_string(),
            reason: "expected an even number of hex digits".to_string(),
        });
    }
    if !cleaned.is_ascii() {
        return Err(CheckError::Decode {
            bytes: s.to_string(),
            reason: "expected hex digits".to_string(),
        });
    }
    cleaned
        .as_bytes()
        .chunks(2)
        .map(|pair| {
            // ASCII was checked above, so every pair is valid UTF-8.
            let digits = std::str::from_utf8(pair).unwrap_or_default();
            u8::from_str_radix(digits, 16).map_err(|source| CheckError::InvalidHex {
                value: s.to_string(),
                source,
            })
        })
        .collect()
}

fn hex_bytes(bytes: &[u8]) -> String {
    bytes
        .iter()
        .map(|b| format!("{b:02x}"))
        .collect::<Vec<_>>()
        .join(" ")
}
