//! Bevy integration for the orrery.
//!
//! Add [`OrreryPlugin`] to an app, then spawn entities with [`OrbitAndSpin`] to make them revolve and spin, or with
//! [`ScreenSizeLabel`] to keep them readable from a [`LabelCamera`].

use bevy::prelude::*;
use bevy::transform::TransformSystem;

pub mod label;
pub mod orbit;

pub use label::{LabelCamera, ScreenSizeLabel, scale_labels};
pub use orbit::{
    Orbit, OrbitAndSpin, OrbitFocus, OrbitPath, OrbitTimeScale, advance_orbits, bake_orbit_paths,
    init_orbits,
};

pub mod prelude {
    pub use crate::label::{LabelCamera, ScreenSizeLabel};
    pub use crate::orbit::{Orbit, OrbitAndSpin, OrbitFocus, OrbitPath, OrbitTimeScale};
    pub use crate::{OrrerySet, OrreryPlugin};
    pub use orrery_label::{Keyframe, LabelScaleCurve};
    pub use orrery_orbit::{Body, OrbitPlane, PhysicalParams, TimeScale};
}

/// Ordering of the orbit systems within [`Update`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, SystemSet)]
pub enum OrrerySet {
    /// Derive orbits for newly added bodies.
    Init,
    /// Step every orbit forward.
    Advance,
    /// Refresh baked paths.
    Bake,
}

/// Drives orbits in [`Update`] and labels in [`PostUpdate`].
///
/// Focus positions and the label camera are read from [`GlobalTransform`], so [`TransformPlugin`] should be added
/// as well.
#[derive(Debug, Default, Clone, Copy)]
pub struct OrreryPlugin;
impl Plugin for OrreryPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<OrbitTimeScale>()
            .configure_sets(
                Update,
                (OrrerySet::Init, OrrerySet::Advance, OrrerySet::Bake).chain(),
            )
            .add_systems(
                Update,
                (
                    init_orbits.in_set(OrrerySet::Init),
                    advance_orbits.in_set(OrrerySet::Advance),
                    bake_orbit_paths.in_set(OrrerySet::Bake),
                ),
            )
            .add_systems(
                PostUpdate,
                scale_labels.after(TransformSystem::TransformPropagate),
            );
    }
}

#[cfg(test)]
pub(crate) mod test_util {
    use super::*;

    /// A headless app with the plugin and a manually driven clock.
    pub fn app() -> App {
        let mut app = App::new();
        app.add_plugins((TransformPlugin, OrreryPlugin))
            .init_resource::<Time>();
        app
    }

    pub fn tick(app: &mut App, secs: f32) {
        app.world_mut()
            .resource_mut::<Time>()
            .advance_by(std::time::Duration::from_secs_f32(secs));
        app.update();
    }
}
