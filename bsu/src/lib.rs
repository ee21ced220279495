pub mod double_shift;
pub mod error;
pub mod flags;
pub mod operation;
pub mod shift;
pub mod width;

pub use double_shift::{DoubleShift, evaluate_double};
pub use error::{BsuError, Result};
pub use flags::Flags;
pub use operation::{Direction, Operation};
pub use shift::evaluate;
pub use width::Width;
