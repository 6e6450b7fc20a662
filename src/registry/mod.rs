mod collision_manager;

pub use collision_manager::*;

#[cfg(test)]
mod collision_manager_tests;
