//! Concrete and extended values
//!
//! A [`CW`] is a fully evaluated value paired with its [`Kind`](crate::Kind).
//! An [`ExtCW`] extends numeric values with infinities, infinitesimals and
//! intervals, which is how solvers report optimization bounds.

mod alg_real;
mod cw;
mod ext;


pub use alg_real::AlgReal;
pub use cw::{CwValue, CW};
pub use ext::ExtCW;
