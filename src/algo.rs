//! The collection of implemented strategies.

pub mod broyden;
pub mod newton;
pub mod secant;

pub use broyden::{Broyden, BroydenOptions, JacobianSeed};
pub use newton::Newton;
pub use secant::Secant;
