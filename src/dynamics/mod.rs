mod collision_solver;
mod forces;
mod rigid_body;

pub use collision_solver::*;
pub use forces::*;
pub use rigid_body::*;

#[cfg(test)]
mod rigid_body_tests;
#[cfg(test)]
mod collision_solver_tests;
