mod body;
mod contact;
mod matrix;
mod shape;
mod simplex;

pub use body::*;
pub use contact::*;
pub use matrix::*;
pub use shape::*;
pub use simplex::*;
