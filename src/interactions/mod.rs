mod dispatch;
mod gjk_collision_3d;
mod primitive_collisions_3d;
mod sat_collision_3d;

pub use dispatch::*;
pub use gjk_collision_3d::*;
pub use primitive_collisions_3d::*;
pub use sat_collision_3d::*;
