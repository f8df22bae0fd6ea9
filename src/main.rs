//! Headless solar system demo.
//!
//! Runs a fixed number of 60 Hz frames as fast as possible, then logs where everything ended up. Pass a frame count
//! as the first argument to override the default.

use bevy::app::ScheduleRunnerPlugin;
use bevy::log::LogPlugin;
use bevy::prelude::*;
use bevy::time::TimeUpdateStrategy;
use orrery_client::prelude::*;
use std::time::Duration;

const DEFAULT_FRAMES: u32 = 600;
const FRAME_TIME: Duration = Duration::from_nanos(16_666_667);

/// Distance of Mercury from the sun, and the gap between successive bodies.
const INNER_ORBIT: f32 = 12.0;
const ORBIT_SPACING: f32 = 9.0;

/// Earth's moon, which isn't in the body table.
const MOON: PhysicalParams = PhysicalParams::prograde(27.3, 655.7, 6.7);

#[derive(Debug, Resource)]
struct FramesLeft(u32);

fn main() -> AppExit {
    let frames = match std::env::args().nth(1).map(|arg| arg.parse::<u32>()) {
        None => DEFAULT_FRAMES,
        Some(Ok(n)) => n.max(1),
        Some(Err(err)) => {
            eprintln!("invalid frame count: {err}");
            return AppExit::error();
        }
    };
    App::new()
        .add_plugins((
            MinimalPlugins.set(ScheduleRunnerPlugin::run_loop(Duration::ZERO)),
            LogPlugin::default(),
            TransformPlugin,
            OrreryPlugin,
        ))
        .insert_resource(TimeUpdateStrategy::ManualDuration(FRAME_TIME))
        .insert_resource(FramesLeft(frames))
        .add_systems(Startup, spawn_system)
        .add_systems(Last, finish)
        .run()
}

fn spawn_system(mut commands: Commands) {
    commands.spawn((
        Name::new("Camera"),
        LabelCamera,
        Transform::from_xyz(0.0, 60.0, 140.0).looking_at(Vec3::ZERO, Vec3::Y),
    ));
    commands.spawn((Name::new("Sun"), Transform::default()));

    let mut earth = None;
    for (i, body) in Body::ALL.into_iter().enumerate() {
        let distance = (i as f32).mul_add(ORBIT_SPACING, INNER_ORBIT);
        // spread the starting phases out so the bodies aren't all in a line
        let start = Quat::from_rotation_y(i as f32 * 0.7) * Vec3::X * distance;
        let inclination = if body == Body::Pluto { 17.2 } else { 0.0 };
        let id = commands
            .spawn((
                Name::new(body.name()),
                OrbitAndSpin::new(body)
                    .with_eccentricity(if body == Body::Pluto { 0.25 } else { 0.03 })
                    .with_plane(inclination, 0.0),
                OrbitPath::default(),
                Transform::from_translation(start),
            ))
            .with_child((ScreenSizeLabel::default(), Transform::from_xyz(0.0, 1.5, 0.0)))
            .id();
        if body == Body::Earth {
            earth = Some((id, start));
        }
    }

    if let Some((earth, at)) = earth {
        commands.spawn((
            Name::new("Moon"),
            OrbitAndSpin {
                params: MOON,
                eccentricity: 0.05,
                ..default()
            },
            OrbitFocus(earth),
            Transform::from_translation(at + Vec3::X * 2.5),
        ));
    }
}

fn finish(
    mut left: ResMut<FramesLeft>,
    bodies: Query<(&Name, &Orbit, Option<&OrbitPath>)>,
    mut exit: EventWriter<AppExit>,
) {
    left.0 = left.0.saturating_sub(1);
    if left.0 > 0 {
        return;
    }
    for (name, orbit, path) in &bodies {
        info!(
            "{name}: at {:.2}, {:.1}% through its orbit, spun {:.1}°, {} path points",
            orbit.position(),
            orbit.progress() * 100.0,
            orbit.spin_angle_deg(),
            path.map_or(0, |p| p.points().len()),
        );
    }
    exit.write(AppExit::Success);
}
