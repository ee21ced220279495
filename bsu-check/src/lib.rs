pub mod config;
pub mod decode;
pub mod error;
pub mod harness;
pub mod mnemonic;
pub mod numbers;
#[cfg(target_arch = "x86_64")]
pub mod oracle;

pub use config::Config;
pub use decode::{CountSource, DecodedShift, decode_shift};
pub use error::{CheckError, Result};
pub use harness::{Mismatch, SweepReport, sweep};
pub use mnemonic::ShiftKind;
