use crate::math::Vec2;

/// Axis-aligned 2D affine transform: `p' = p * scale + translate`.
///
/// Used for both the device-to-screen map and the pannable view map. The
/// scale components are never zero, so every transform has an inverse.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform2D {
    scale: Vec2,
    translate: Vec2,
}

impl Default for Transform2D {
    fn default() -> Self {
        Self::identity()
    }
}

impl Transform2D {
    pub fn identity() -> Self {
        Self {
            scale: Vec2::new(1.0, 1.0),
            translate: Vec2::ZERO,
        }
    }

    pub fn load_identity(&mut self) {
        *self = Self::identity();
    }

    pub fn scale_x(&self) -> f32 {
        self.scale.x
    }

    pub fn scale_y(&self) -> f32 {
        self.scale.y
    }

    pub fn translate_x(&self) -> f32 {
        self.translate.x
    }

    pub fn translate_y(&self) -> f32 {
        self.translate.y
    }

    pub fn transform_x(&self, x: f32) -> f32 {
        x * self.scale.x + self.translate.x
    }

    pub fn transform_y(&self, y: f32) -> f32 {
        y * self.scale.y + self.translate.y
    }

    pub fn invert_transform_x(&self, x: f32) -> f32 {
        (x - self.translate.x) / self.scale.x
    }

    pub fn invert_transform_y(&self, y: f32) -> f32 {
        (y - self.translate.y) / self.scale.y
    }

    pub fn transform_point(&self, p: Vec2) -> Vec2 {
        Vec2::new(self.transform_x(p.x), self.transform_y(p.y))
    }

    /// Scales the whole transform, translate included, so the scaling pivots
    /// around the origin of the already transformed space.
    pub fn scale_relative(&mut self, x: f32, y: f32) {
        debug_assert!(x != 0.0 && y != 0.0, "zero scale makes the transform singular");
        self.scale.x *= x;
        self.scale.y *= y;
        self.translate.x *= x;
        self.translate.y *= y;
    }

    /// Translates in pre-scale units.
    pub fn translate_relative(&mut self, x: f32, y: f32) {
        self.translate.x += x * self.scale.x;
        self.translate.y += y * self.scale.y;
    }

    pub fn set_scale(&mut self, x: f32, y: f32) {
        debug_assert!(x != 0.0 && y != 0.0, "zero scale makes the transform singular");
        self.scale = Vec2::new(x, y);
    }

    pub fn set_translate(&mut self, x: f32, y: f32) {
        self.translate = Vec2::new(x, y);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f32 = 1e-4;

    #[test]
    fn test_identity_is_noop() {
        let t = Transform2D::identity();
        assert_eq!(t.transform_x(12.5), 12.5);
        assert_eq!(t.invert_transform_y(-3.0), -3.0);
    }

    #[test]
    fn test_invert_round_trip() {
        let mut t = Transform2D::identity();
        t.scale_relative(0.0025, -0.0025);
        t.translate_relative(-400.0, -300.0);

        for v in [-1000.0_f32, -1.5, 0.0, 0.25, 799.0, 12345.0] {
            assert!((t.invert_transform_x(t.transform_x(v)) - v).abs() < EPS * v.abs().max(1.0));
            assert!((t.invert_transform_y(t.transform_y(v)) - v).abs() < EPS * v.abs().max(1.0));
        }
    }

    #[test]
    fn test_translate_relative_uses_current_scale() {
        let mut t = Transform2D::identity();
        t.scale_relative(2.0, -3.0);
        t.translate_relative(1.0, 1.0);

        assert_eq!(t.translate_x(), 2.0);
        assert_eq!(t.translate_y(), -3.0);
        assert_eq!(t.transform_x(0.0), 2.0);
    }

    #[test]
    fn test_scale_relative_scales_translate() {
        let mut t = Transform2D::identity();
        t.translate_relative(4.0, -2.0);
        t.scale_relative(0.5, 2.0);

        assert_eq!(t.translate_x(), 2.0);
        assert_eq!(t.translate_y(), -4.0);
        assert_eq!(t.transform_x(2.0), 3.0);
    }

    #[test]
    fn test_load_identity_resets() {
        let mut t = Transform2D::identity();
        t.scale_relative(3.0, 3.0);
        t.translate_relative(5.0, 5.0);
        t.load_identity();

        assert_eq!(t, Transform2D::identity());
    }
}
