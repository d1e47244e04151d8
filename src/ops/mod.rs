//! Table algebra and row arithmetic

mod algebra;
mod arith;

pub use arith::ArithOp;
