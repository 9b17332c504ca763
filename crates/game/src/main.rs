//! landingsite - lunar landing-site scene: procedural lander, launch flight and exhaust particles.
//!
//! Runs headless: the scene is simulated with a fixed timestep and every frame's
//! draw data (uniform blocks, packed vertices, sorted particle instances) is built
//! exactly as a graphics backend would consume it.

mod config;
mod flight;
mod scene;

use anyhow::Result;
use config::SceneConfig;
use engine_core::Time;
use renderer::MoveInput;
use scene::{FrameInput, Scene};
use std::time::Duration;

/// Input a player would give on frame `frame` of the scripted run: launch after
/// half a second, look around a little, drift the camera, reset near the end.
fn scripted_input(frame: u32, total: u32) -> FrameInput {
    let mut input = FrameInput::default();
    if frame == 30 {
        input.toggle_launch = true;
    }
    if (60..120).contains(&frame) {
        input.mouse_look = true;
        input.mouse_delta = (4.0, -1.0);
    }
    if (120..180).contains(&frame) {
        input.movement = MoveInput {
            forward: 1.0,
            slow: true,
            ..Default::default()
        };
    }
    if total > 90 && frame == total - 60 {
        input.reset_vehicle = true;
    }
    input
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    println!("╔══════════════════════════════════════════════════════════════════╗");
    println!("║                          landingsite                             ║");
    println!("╠══════════════════════════════════════════════════════════════════╣");
    println!("║  CONTROLS (windowed frontends):                                  ║");
    println!("║    WASD       - Fly            │  Right Click - Toggle mouse look║");
    println!("║    Q / E      - Down / Up      │  Shift / Ctrl - Fast / Slow     ║");
    println!("║    F          - Launch / pause │  R           - Reset vehicle    ║");
    println!("║    T          - Top-down view  │  V           - Split screen     ║");
    println!("╚══════════════════════════════════════════════════════════════════╝");

    let config = SceneConfig::load();
    log::info!(
        "Starting landingsite: {}x{}, {} frames at {:.4}s",
        config.window_width,
        config.window_height,
        config.frames,
        config.timestep
    );

    let mut scene = Scene::build(&config)?;
    let uploaded: usize = scene
        .objects
        .iter()
        .map(|o| std::mem::size_of_val(o.vertices.as_slice()))
        .sum();
    log::info!(
        "{} objects, {} KiB of vertex data ({} vehicle vertices)",
        scene.objects.len(),
        uploaded / 1024,
        scene.vehicle().vertices.len()
    );

    let mut time = Time::new();
    let step = Duration::from_secs_f32(config.timestep);
    time.set_fixed_timestep(step);
    let mut peak_particles = 0;
    let mut particle_bytes = 0;

    for frame in 0..config.frames {
        time.advance(step);
        let input = scripted_input(frame, config.frames);
        // Edge-triggered input applies to the first update of the frame only.
        let mut pending = Some(input);
        while time.should_fixed_update() {
            let frame_input = pending.take().unwrap_or(FrameInput {
                movement: input.movement,
                mouse_look: input.mouse_look,
                mouse_delta: input.mouse_delta,
                ..Default::default()
            });
            scene.update(time.fixed_timestep_seconds(), &frame_input);
        }

        let views = scene.render();
        let alive = scene.exhaust.alive_count();
        peak_particles = peak_particles.max(alive);
        particle_bytes += views
            .iter()
            .map(|v| std::mem::size_of_val(v.particle_instances.as_slice()))
            .sum::<usize>();

        if time.frame_count() % 60 == 0 {
            let p = scene.flight.position();
            log::info!(
                "t={:5.2}s flight={:.2}s burning={} vehicle=({:.2}, {:.2}, {:.2}) pitch={:.1}° particles={} split={}",
                time.elapsed_seconds(),
                scene.flight.time(),
                scene.flight.is_burning(),
                p.x,
                p.y,
                p.z,
                scene.flight.theta().to_degrees(),
                alive,
                scene.is_split_screen()
            );
        }
    }

    log::info!(
        "Done: {} frames, {:.2}s simulated, peak {} of {} particles, {} KiB of particle instances",
        time.frame_count(),
        time.elapsed_seconds(),
        peak_particles,
        scene.exhaust.capacity(),
        particle_bytes / 1024
    );
    Ok(())
}
