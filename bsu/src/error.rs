use thiserror::Error;

/// Rejections raised when raw decoder values are turned into BSU types.
///
/// Evaluation itself never fails: once a [`Width`](crate::Width) and an
/// [`Operation`](crate::Operation) exist, every operand and count is valid.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum BsuError {
    #[error("Invalid operand width: {0} bits")]
    InvalidWidth(u32),

    #[error("Invalid operand size: {0} bytes")]
    InvalidOperandSize(usize),

    #[error("Invalid shift/rotate selector: {0:#x}")]
    InvalidSelector(u8),
}

pub type Result<T> = std::result::Result<T, BsuError>;
