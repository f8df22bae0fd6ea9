//! Components and systems for orbiting bodies.

use bevy::log::{debug, warn};
use bevy::math::Affine3A;
use bevy::prelude::*;
use orrery_orbit::{Body, OrbitInit, OrbitPlane, OrbitingBody, PhysicalParams, TimeScale};

/// Bounds on the number of points in a baked [`OrbitPath`].
pub const PATH_SEGMENTS: std::ops::RangeInclusive<usize> = 16..=1024;

/// Time scale used when deriving new orbits.
///
/// Changing this only affects bodies initialized afterwards.
#[derive(Debug, Default, Clone, Copy, Resource, Deref, DerefMut)]
pub struct OrbitTimeScale(pub TimeScale);

/// Authoring data for a body that revolves around a focus and spins.
///
/// The body's [`Transform`] at the time this is first seen determines the orbit's size and starting phase. An
/// [`Orbit`] gets inserted once that's happened.
#[derive(Debug, Clone, Component)]
#[require(Transform)]
pub struct OrbitAndSpin {
    pub params: PhysicalParams,
    /// Clamped to `0.0..=0.9`.
    pub eccentricity: f32,
    pub plane: OrbitPlane,
    /// Points in the baked path, if the entity has an [`OrbitPath`].
    pub path_segments: usize,
}
impl OrbitAndSpin {
    pub fn new(body: Body) -> Self {
        Self {
            params: body.params(),
            ..default()
        }
    }
    pub fn with_eccentricity(mut self, eccentricity: f32) -> Self {
        self.eccentricity = eccentricity;
        self
    }
    pub fn with_plane(mut self, inclination_deg: f32, longitude_of_periapsis_deg: f32) -> Self {
        self.plane = OrbitPlane {
            inclination_deg,
            longitude_of_periapsis_deg,
        };
        self
    }
    pub fn segments(&self) -> usize {
        self.path_segments
            .clamp(*PATH_SEGMENTS.start(), *PATH_SEGMENTS.end())
    }
}
impl Default for OrbitAndSpin {
    fn default() -> Self {
        Self {
            params: PhysicalParams::EARTH,
            eccentricity: 0.03,
            plane: OrbitPlane::REFERENCE,
            path_segments: 256,
        }
    }
}

/// The entity an orbit revolves around. Without one, orbits are centered on the origin.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Component)]
pub struct OrbitFocus(pub Entity);

/// Runtime orbit state, inserted by [`init_orbits`].
#[derive(Debug, Clone, Component, Deref, DerefMut)]
pub struct Orbit(pub OrbitingBody);

/// World-space polyline of an orbit, filled in by [`bake_orbit_paths`].
///
/// The path is rebaked whenever the orbit is re-derived, its [`OrbitAndSpin`] changes, or its focus moves.
#[derive(Debug, Default, Clone, Component)]
pub struct OrbitPath {
    points: Vec<Vec3>,
    baked_focus: Option<Vec3>,
}
impl OrbitPath {
    #[inline(always)]
    pub fn points(&self) -> &[Vec3] {
        &self.points
    }
}

fn focus_position(
    entity: Entity,
    focus: Option<&OrbitFocus>,
    transforms: &Query<&GlobalTransform>,
) -> Result<Option<Vec3>, Entity> {
    match focus {
        Some(&OrbitFocus(target)) => transforms
            .get(target)
            .map(|t| Some(t.translation()))
            .map_err(|_| target),
        None => {
            debug!("{entity}: no focus set; orbiting the origin");
            Ok(None)
        }
    }
}

/// World-from-local affine of an entity's parent, if it has one.
fn parent_affine(
    child_of: Option<&ChildOf>,
    transforms: &Query<&GlobalTransform>,
) -> Option<Affine3A> {
    child_of
        .and_then(|c| transforms.get(c.parent()).ok())
        .map(GlobalTransform::affine)
}

/// Derive an [`Orbit`] for every body that doesn't have one yet.
///
/// Orbits are computed in world space, so a body parented to something else starts from its world position and
/// gets written back relative to its parent. The body is snapped onto its orbit and its axial tilt is applied to
/// its rotation, once.
pub fn init_orbits(
    mut commands: Commands,
    scale: Res<OrbitTimeScale>,
    mut bodies: Query<
        (
            Entity,
            NameOrEntity,
            &OrbitAndSpin,
            &mut Transform,
            Option<&OrbitFocus>,
            Option<&ChildOf>,
        ),
        Without<Orbit>,
    >,
    transforms: Query<&GlobalTransform>,
) {
    for (entity, name, config, mut transform, focus, child_of) in &mut bodies {
        let focus = focus_position(entity, focus, &transforms).unwrap_or_else(|target| {
            warn!("{name}: focus entity {target} has no transform; using world origin");
            None
        });
        let parent = parent_affine(child_of, &transforms);
        let start = parent.map_or(transform.translation, |p| {
            p.transform_point3(transform.translation)
        });
        let body = OrbitingBody::new(OrbitInit {
            focus,
            start,
            eccentricity: config.eccentricity,
            plane: config.plane,
            params: config.params,
            time_scale: scale.0,
        });
        debug!(
            "{name}: a = {}, b = {}, period = {}s, spin = {}°/s",
            body.semi_major_axis(),
            body.semi_minor_axis(),
            body.period_seconds(),
            body.spin_degrees_per_second()
        );
        transform.rotation = body.tilt_rotation() * transform.rotation;
        transform.translation = to_local(parent, body.position());
        commands.entity(entity).insert(Orbit(body));
    }
}

fn to_local(parent: Option<Affine3A>, world: Vec3) -> Vec3 {
    parent.map_or(world, |p| p.inverse().transform_point3(world))
}

/// Step every orbit forward by the frame time, spinning the body about its local up axis.
pub fn advance_orbits(
    time: Res<Time>,
    mut bodies: Query<(
        Entity,
        &mut Orbit,
        &mut Transform,
        Option<&OrbitFocus>,
        Option<&ChildOf>,
    )>,
    transforms: Query<&GlobalTransform>,
) {
    let dt = time.delta_secs();
    for (entity, mut orbit, mut transform, focus, child_of) in &mut bodies {
        if focus.is_some() {
            orbit.set_focus(focus_position(entity, focus, &transforms).unwrap_or(None));
        }
        let step = orbit.advance(dt);
        if step.spin_delta_deg != 0.0 {
            transform.rotation *= step.spin();
        }
        transform.translation = to_local(parent_affine(child_of, &transforms), step.position);
    }
}

/// Rebake paths for new or re-derived orbits, changed authoring data, or a focus that moved since the last bake.
pub fn bake_orbit_paths(mut paths: Query<(Ref<Orbit>, Ref<OrbitAndSpin>, &mut OrbitPath)>) {
    for (orbit, config, mut path) in &mut paths {
        let focus = orbit.focus();
        if !orbit.is_added() && !config.is_changed() && path.baked_focus == Some(focus) {
            continue;
        }
        let path = &mut *path;
        orbit.bake_path_into(config.segments(), &mut path.points);
        path.baked_focus = Some(focus);
    }
}
