// demos/ballpit.rs

use log::info;
use rs_rigidbody::errors::PhysicsError;
use rs_rigidbody::utils::DEFAULT_PHYSICS_CONSTANTS;
use rs_rigidbody::world::Scene;

fn main() -> Result<(), PhysicsError> {
    env_logger::init();

    let scene = std::env::args()
        .nth(1)
        .and_then(|name| Scene::ALL.into_iter().find(|s| s.name().eq_ignore_ascii_case(&name)))
        .unwrap_or(Scene::Ballpit);

    let mut world = scene.build(DEFAULT_PHYSICS_CONSTANTS)?;
    let dt = 1.0 / 60.0;

    println!("Simulating {} for 5 seconds", scene.name());
    for frame in 0..300 {
        let resolved = world.step(dt);
        if resolved > 0 {
            info!("frame {}: resolved {} contacts", frame, resolved);
        }

        if frame % 60 == 0 {
            let energy: f64 = world
                .bodies()
                .iter()
                .filter_map(|(_, entry)| entry.rigid_body())
                .filter(|rb| !rb.is_kinematic())
                .map(|rb| rb.kinetic_energy())
                .sum();
            println!("t = {:.2}s  kinetic energy = {:.3} J", frame as f64 * dt, energy);
        }
    }

    println!("\nFinal positions:");
    for (handle, entry) in world.bodies().iter() {
        if let Some(rb) = entry.rigid_body().filter(|rb| !rb.is_kinematic()) {
            let p = rb.position();
            println!("{:?}: ({:.3}, {:.3}, {:.3})", handle, p.0, p.1, p.2);
        }
    }

    Ok(())
}
