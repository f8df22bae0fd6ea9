use bevy_math::{Mat3, Quat, Vec3};
use std::f32::consts::PI;

/// Parent scales closer to zero than this are treated as missing.
const MIN_PARENT_SCALE: f32 = 1e-6;

/// Local scale that gives a uniform `world_scale` under a parent with the given world scale.
///
/// Axes where the parent is (nearly) flattened keep `world_scale` as-is rather than blowing up.
pub fn local_scale_for(world_scale: f32, parent_scale: Option<Vec3>) -> Vec3 {
    let Some(parent) = parent_scale else {
        return Vec3::splat(world_scale);
    };
    Vec3::from_array(parent.to_array().map(|p| {
        if p.abs() < MIN_PARENT_SCALE {
            world_scale
        } else {
            world_scale / p
        }
    }))
}

/// World rotation that points a label's local `+Z` at the camera, keeping `+Y` as close to world up as possible.
///
/// If the label and camera coincide, the label faces back along `camera_forward` instead.
pub fn facing_rotation(label: Vec3, camera: Vec3, camera_forward: Vec3) -> Quat {
    let mut forward = camera - label;
    if forward.length_squared() < 1e-6 {
        forward = -camera_forward;
    }
    let forward = forward.try_normalize().unwrap_or(Vec3::Z);
    let right = Vec3::Y
        .cross(forward)
        .try_normalize()
        .unwrap_or_else(|| forward.any_orthonormal_vector());
    let up = forward.cross(right);
    Quat::from_mat3(&Mat3::from_cols(right, up, forward))
}

/// Like [`facing_rotation`], but optionally turned an extra half-turn about `Y` for meshes whose front faces `-Z`.
///
/// A flipped label whose camera sits right on top of it still ends up with `+Z` along `-camera_forward`.
pub fn billboard_rotation(label: Vec3, camera: Vec3, camera_forward: Vec3, flip: bool) -> Quat {
    if flip {
        facing_rotation(label, camera, -camera_forward) * Quat::from_rotation_y(PI)
    } else {
        facing_rotation(label, camera, camera_forward)
    }
}

/// Local rotation that results in `world` under a parent with the given world rotation.
pub fn local_rotation_for(world: Quat, parent_rotation: Option<Quat>) -> Quat {
    match parent_rotation {
        Some(parent) => parent.inverse() * world,
        None => world,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn scale_cancels_parent() {
        assert_eq!(local_scale_for(6.0, None), Vec3::splat(6.0));
        assert_eq!(
            local_scale_for(6.0, Some(Vec3::new(2.0, 3.0, 0.0))),
            Vec3::new(3.0, 2.0, 6.0)
        );
    }

    #[test]
    fn faces_camera() {
        let label = Vec3::new(1.0, 2.0, 3.0);
        for camera in [
            Vec3::new(10.0, 2.0, 3.0),
            Vec3::new(-4.0, 7.0, 1.0),
            Vec3::new(1.0, 50.0, 3.0),
        ] {
            let rot = facing_rotation(label, camera, Vec3::NEG_Z);
            assert_abs_diff_eq!(
                rot * Vec3::Z,
                (camera - label).normalize(),
                epsilon = 1e-5
            );
            assert!(rot.is_normalized());
        }
        let level = facing_rotation(Vec3::ZERO, Vec3::new(0.0, 0.0, 5.0), Vec3::NEG_Z);
        assert_abs_diff_eq!(level * Vec3::Y, Vec3::Y, epsilon = 1e-5);
    }

    #[test]
    fn coincident_camera() {
        let rot = facing_rotation(Vec3::ONE, Vec3::ONE, Vec3::X);
        assert_abs_diff_eq!(rot * Vec3::Z, Vec3::NEG_X, epsilon = 1e-5);
    }

    #[test]
    fn flipped_billboard() {
        let label = Vec3::new(1.0, 2.0, 3.0);
        let camera = Vec3::new(-4.0, 7.0, 1.0);
        let rot = billboard_rotation(label, camera, Vec3::NEG_Z, true);
        assert_abs_diff_eq!(rot * Vec3::Z, (label - camera).normalize(), epsilon = 1e-5);
        assert_abs_diff_eq!(
            billboard_rotation(label, camera, Vec3::NEG_Z, false),
            facing_rotation(label, camera, Vec3::NEG_Z),
            epsilon = 1e-6
        );

        for flip in [false, true] {
            let rot = billboard_rotation(Vec3::ONE, Vec3::ONE, Vec3::X, flip);
            assert_abs_diff_eq!(rot * Vec3::Z, Vec3::NEG_X, epsilon = 1e-5);
        }
    }

    #[test]
    fn rotation_cancels_parent() {
        let world = Quat::from_rotation_y(1.0);
        let parent = Quat::from_rotation_x(0.5);
        let local = local_rotation_for(world, Some(parent));
        assert_abs_diff_eq!(parent * local, world, epsilon = 1e-6);
        assert_eq!(local_rotation_for(world, None), world);
    }
}
