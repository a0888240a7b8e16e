pub mod calc;
pub mod format;
