use thiserror::Error;

#[derive(Error, Debug)]
pub enum CheckError {
    #[error("Failed to decode instruction bytes {bytes}: {reason}")]
    Decode { bytes: String, reason: String },

    #[error("Not a shift or rotate instruction: {0}")]
    NotAShift(String),

    #[error("Unsupported operand in {instruction}: {reason}")]
    UnsupportedOperand { instruction: String, reason: String },

    #[error("Unknown mnemonic: {0}")]
    UnknownMnemonic(String),

    #[error("Invalid hex string '{value}': {source}")]
    InvalidHex {
        value: String,
        source: std::num::ParseIntError,
    },

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("The hardware oracle needs an x86-64 host")]
    OracleUnavailable,

    #[error(transparent)]
    Bsu(#[from] bsu::BsuError),
}

pub type Result<T> = std::result::Result<T, CheckError>;
