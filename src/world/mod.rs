mod body_set;
mod scenes;
mod world;

pub use body_set::*;
pub use scenes::*;
pub use world::*;

#[cfg(test)]
mod scenes_tests;
