pub mod error;
pub mod weapons;

pub use error::*;
pub use weapons::*;
