//! Labels that keep a constant on-screen size.

use bevy::prelude::*;
use orrery_label::{LabelScaleCurve, billboard_rotation, local_rotation_for, local_scale_for};

/// Marker for the camera that labels scale against and turn towards.
///
/// If there isn't exactly one of these, labels are left alone.
#[derive(Debug, Default, Clone, Copy, Component)]
pub struct LabelCamera;

/// A label that's scaled by its distance from the [`LabelCamera`].
#[derive(Debug, Clone, Component)]
#[require(Transform)]
pub struct ScreenSizeLabel {
    pub curve: LabelScaleCurve,
    /// Turn the label's `+Z` towards the camera.
    pub face_camera: bool,
    /// Turn an extra half-turn about `Y`, for meshes whose front faces `-Z`.
    pub flip: bool,
}
impl Default for ScreenSizeLabel {
    fn default() -> Self {
        Self {
            curve: LabelScaleCurve::default(),
            face_camera: true,
            flip: false,
        }
    }
}

/// Apply the distance scale and billboard rotation to every label, cancelling out any parent transform.
///
/// This runs after transform propagation so it sees where bodies ended up this frame, and writes the label's
/// [`GlobalTransform`] itself. Children of a label only catch up on the next propagation.
pub fn scale_labels(
    camera: Query<&GlobalTransform, With<LabelCamera>>,
    mut labels: Query<
        (
            &ScreenSizeLabel,
            &mut GlobalTransform,
            &mut Transform,
            Option<&ChildOf>,
        ),
        Without<LabelCamera>,
    >,
    parents: Query<&GlobalTransform, (Without<ScreenSizeLabel>, Without<LabelCamera>)>,
) {
    let Ok(camera) = camera.single() else {
        return;
    };
    let eye = camera.translation();
    for (label, mut global, mut transform, child_of) in &mut labels {
        let position = global.translation();
        let parent = child_of.and_then(|c| parents.get(c.parent()).ok());
        let parent_srt = parent.map(GlobalTransform::to_scale_rotation_translation);

        let scale = label.curve.evaluate(position.distance(eye));
        transform.scale = local_scale_for(scale, parent_srt.map(|(s, _, _)| s));

        if label.face_camera {
            let world = billboard_rotation(position, eye, *camera.forward(), label.flip);
            transform.rotation = local_rotation_for(world, parent_srt.map(|(_, r, _)| r));
        }
        *global = match parent {
            Some(parent) => parent.mul_transform(*transform),
            None => GlobalTransform::from(*transform),
        };
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::orbit::OrbitAndSpin;
    use crate::test_util::{app, tick};
    use approx::assert_abs_diff_eq;

    #[test]
    fn scales_with_distance() {
        let mut app = app();
        app.world_mut()
            .spawn((LabelCamera, Transform::from_xyz(0.0, 0.0, 50.0)));
        let label = app.world_mut().spawn(ScreenSizeLabel::default()).id();
        tick(&mut app, 0.0);

        let transform = *app.world().get::<Transform>(label).unwrap();
        assert_abs_diff_eq!(transform.scale, Vec3::splat(4.5), epsilon = 1e-5);
        assert_abs_diff_eq!(transform.rotation * Vec3::Z, Vec3::Z, epsilon = 1e-5);
    }

    #[test]
    fn cancels_parent() {
        let mut app = app();
        app.world_mut()
            .spawn((LabelCamera, Transform::from_xyz(50.0, 0.0, 0.0)));
        let parent = app
            .world_mut()
            .spawn(Transform::from_scale(Vec3::splat(2.0)).with_rotation(Quat::from_rotation_y(1.0)))
            .id();
        let label = app
            .world_mut()
            .spawn((
                ScreenSizeLabel {
                    flip: true,
                    ..default()
                },
                ChildOf(parent),
            ))
            .id();
        tick(&mut app, 0.0);

        let transform = *app.world().get::<Transform>(label).unwrap();
        assert_abs_diff_eq!(transform.scale, Vec3::splat(2.25), epsilon = 1e-5);
        let world = Quat::from_rotation_y(1.0) * transform.rotation;
        assert_abs_diff_eq!(world * Vec3::Z, Vec3::NEG_X, epsilon = 1e-5);
    }

    #[test]
    fn tracks_parent_moved_this_frame() {
        let mut app = app();
        app.world_mut()
            .spawn((LabelCamera, Transform::from_xyz(0.0, 0.0, 50.0)));
        let planet = app
            .world_mut()
            .spawn((
                OrbitAndSpin::default().with_eccentricity(0.0),
                Transform::from_xyz(20.0, 0.0, 0.0),
            ))
            .id();
        let label = app
            .world_mut()
            .spawn((ScreenSizeLabel::default(), ChildOf(planet)))
            .id();
        tick(&mut app, 0.0);
        // a quarter of an Earth year moves the planet from +X to +Z
        tick(&mut app, 30.0);

        let global = *app.world().get::<GlobalTransform>(label).unwrap();
        assert_abs_diff_eq!(global.translation(), Vec3::new(0.0, 0.0, 20.0), epsilon = 1e-3);
        // 30 units from the camera: 3 + 5/50 * 3
        let transform = *app.world().get::<Transform>(label).unwrap();
        assert_abs_diff_eq!(transform.scale, Vec3::splat(3.3), epsilon = 1e-4);
        assert_abs_diff_eq!(global.compute_transform().scale, Vec3::splat(3.3), epsilon = 1e-4);
        assert_abs_diff_eq!(global.forward().as_vec3(), Vec3::NEG_Z, epsilon = 1e-4);
    }

    #[test]
    fn no_camera() {
        let mut app = app();
        let label = app
            .world_mut()
            .spawn((ScreenSizeLabel::default(), Transform::from_xyz(1.0, 2.0, 3.0)))
            .id();
        tick(&mut app, 0.0);
        assert_eq!(
            *app.world().get::<Transform>(label).unwrap(),
            Transform::from_xyz(1.0, 2.0, 3.0)
        );
    }
}
