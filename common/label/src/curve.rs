use std::cmp::Ordering;

/// A single point on a [`LabelScaleCurve`].
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Keyframe {
    pub distance: f32,
    pub scale: f32,
}
impl Keyframe {
    pub const fn new(distance: f32, scale: f32) -> Self {
        Self { distance, scale }
    }
}

/// Piecewise-linear mapping from camera distance to world scale.
///
/// Distances before the first keyframe or after the last one hold that keyframe's scale. The result is always
/// clamped to `min_scale..=max_scale`.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LabelScaleCurve {
    keys: Vec<Keyframe>,
    pub min_scale: f32,
    pub max_scale: f32,
}
impl LabelScaleCurve {
    /// Build a curve from keyframes in any order. Keyframes with non-finite values are dropped.
    pub fn new(keys: impl IntoIterator<Item = Keyframe>, min_scale: f32, max_scale: f32) -> Self {
        let mut keys = keys
            .into_iter()
            .filter(|k| k.distance.is_finite() && k.scale.is_finite())
            .collect::<Vec<_>>();
        keys.sort_by(|a, b| a.distance.total_cmp(&b.distance));
        Self {
            keys,
            min_scale,
            max_scale,
        }
    }
    #[inline(always)]
    pub fn keys(&self) -> &[Keyframe] {
        &self.keys
    }

    /// Unclamped scale at a distance. An empty curve is zero everywhere.
    pub fn sample(&self, distance: f32) -> f32 {
        let (Some(first), Some(last)) = (self.keys.first(), self.keys.last()) else {
            return 0.0;
        };
        if distance.partial_cmp(&first.distance) != Some(Ordering::Greater) {
            return first.scale;
        }
        if distance >= last.distance {
            return last.scale;
        }
        let i = self.keys.partition_point(|k| k.distance <= distance);
        let (a, b) = (self.keys[i - 1], self.keys[i]);
        let t = (distance - a.distance) / (b.distance - a.distance);
        t.mul_add(b.scale - a.scale, a.scale)
    }
    /// Scale at a distance, clamped to the curve's bounds.
    pub fn evaluate(&self, distance: f32) -> f32 {
        self.sample(distance).max(self.min_scale).min(self.max_scale)
    }
}
impl Default for LabelScaleCurve {
    fn default() -> Self {
        Self::new(
            [
                Keyframe::new(0.0, 3.0),
                Keyframe::new(25.0, 3.0),
                Keyframe::new(75.0, 6.0),
                Keyframe::new(440.0, 30.0),
                Keyframe::new(3000.0, 200.0),
                Keyframe::new(10000.0, 300.0),
            ],
            1.0,
            300.0,
        )
    }
}
