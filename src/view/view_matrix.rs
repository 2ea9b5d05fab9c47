use crate::math::{Mat4, Transform2D, Vec2};

/// Axis-aligned rectangle in logical view units, Y increasing upward.
#[derive(Debug, Default, Clone, Copy, PartialEq)]
pub struct Rect {
    pub left: f32,
    pub right: f32,
    pub bottom: f32,
    pub top: f32,
}

impl Rect {
    pub fn new(left: f32, right: f32, bottom: f32, top: f32) -> Self {
        Self {
            left,
            right,
            bottom,
            top,
        }
    }

    pub fn width(&self) -> f32 {
        (self.right - self.left).abs()
    }

    pub fn height(&self) -> f32 {
        (self.top - self.bottom).abs()
    }

    pub fn center(&self) -> Vec2 {
        Vec2::new((self.left + self.right) * 0.5, (self.bottom + self.top) * 0.5)
    }

    pub fn contains_rect(&self, other: &Rect) -> bool {
        self.left <= other.left
            && self.right >= other.right
            && self.bottom <= other.bottom
            && self.top >= other.top
    }
}

/// Pan/zoom map from logical view space onto the screen, with zoom clamps
/// and a maximum pannable rectangle.
#[derive(Debug, Clone, PartialEq)]
pub struct ViewMatrix {
    transform: Transform2D,
    screen: Rect,
    max_screen: Rect,
    min_scale: f32,
    max_scale: f32,
}

impl Default for ViewMatrix {
    fn default() -> Self {
        Self::new()
    }
}

impl ViewMatrix {
    pub fn new() -> Self {
        Self {
            transform: Transform2D::identity(),
            screen: Rect::default(),
            max_screen: Rect::default(),
            min_scale: 1.0,
            max_scale: 1.0,
        }
    }

    pub fn transform(&self) -> &Transform2D {
        &self.transform
    }

    pub fn screen_rect(&self) -> Rect {
        self.screen
    }

    pub fn min_scale(&self) -> f32 {
        self.min_scale
    }

    pub fn max_scale(&self) -> f32 {
        self.max_scale
    }

    pub fn set_min_scale(&mut self, scale: f32) {
        self.min_scale = scale;
    }

    pub fn set_max_scale(&mut self, scale: f32) {
        self.max_scale = scale;
    }

    /// Re-derives the transform from the visible logical rectangle.
    ///
    /// The rectangle already carries the window aspect ratio, so the scale
    /// stays at 1 and the translate moves the rectangle's center onto the
    /// screen origin. The stored screen rect is the recentred one, which is
    /// the frame `adjust_translate` compares the transformed max rect in.
    pub fn set_screen_rect(&mut self, rect: Rect) {
        let center = rect.center();
        self.screen = Rect::new(
            rect.left - center.x,
            rect.right - center.x,
            rect.bottom - center.y,
            rect.top - center.y,
        );
        self.transform.load_identity();
        self.transform.set_translate(-center.x, -center.y);
    }

    pub fn set_max_screen_rect(&mut self, rect: Rect) {
        self.max_screen = rect;
    }

    /// Zoom-then-clamp: multiplies the scale, then clamps each axis into
    /// `[min_scale, max_scale]`. The translate keeps whatever the relative
    /// scale produced. Inverted bounds resolve to `max_scale`.
    pub fn scale(&mut self, x: f32, y: f32) {
        self.transform.scale_relative(x, y);
        let sx = self.clamp_scale(self.transform.scale_x());
        let sy = self.clamp_scale(self.transform.scale_y());
        self.transform.set_scale(sx, sy);
    }

    fn clamp_scale(&self, scale: f32) -> f32 {
        scale.max(self.min_scale).min(self.max_scale)
    }

    /// Pans by `(x, y)` screen units, shortened so the maximum rectangle
    /// keeps covering the visible screen rectangle.
    pub fn adjust_translate(&mut self, x: f32, y: f32) {
        let (sx, sy) = (self.transform.scale_x(), self.transform.scale_y());
        let (tx, ty) = (self.transform.translate_x(), self.transform.translate_y());
        let (mut x, mut y) = (x, y);

        if sx * self.max_screen.left + (tx + x) > self.screen.left {
            x = self.screen.left - sx * self.max_screen.left - tx;
        }
        if sx * self.max_screen.right + (tx + x) < self.screen.right {
            x = self.screen.right - sx * self.max_screen.right - tx;
        }
        if sy * self.max_screen.top + (ty + y) < self.screen.top {
            y = self.screen.top - sy * self.max_screen.top - ty;
        }
        if sy * self.max_screen.bottom + (ty + y) > self.screen.bottom {
            y = self.screen.bottom - sy * self.max_screen.bottom - ty;
        }

        self.transform.set_translate(tx + x, ty + y);
    }

    /// Zooms by `factor` around the screen-space pivot `(cx, cy)`. The factor
    /// is reduced so the resulting scale lands inside the clamps.
    pub fn adjust_scale(&mut self, cx: f32, cy: f32, factor: f32) {
        let sx = self.transform.scale_x();
        let target = factor * sx;
        let mut factor = factor;

        if target < self.min_scale {
            if sx > 0.0 {
                factor = self.min_scale / sx;
            }
        } else if target > self.max_scale && sx > 0.0 {
            factor = self.max_scale / sx;
        }

        let (tx, ty) = (self.transform.translate_x(), self.transform.translate_y());
        self.transform
            .set_scale(sx * factor, self.transform.scale_y() * factor);
        self.transform
            .set_translate(cx + factor * (tx - cx), cy + factor * (ty - cy));
    }

    pub fn is_max_scale(&self) -> bool {
        self.transform.scale_x() >= self.max_scale
    }

    pub fn is_min_scale(&self) -> bool {
        self.transform.scale_x() <= self.min_scale
    }

    pub fn transform_x(&self, x: f32) -> f32 {
        self.transform.transform_x(x)
    }

    pub fn transform_y(&self, y: f32) -> f32 {
        self.transform.transform_y(y)
    }

    pub fn invert_transform_x(&self, x: f32) -> f32 {
        self.transform.invert_transform_x(x)
    }

    pub fn invert_transform_y(&self, y: f32) -> f32 {
        self.transform.invert_transform_y(y)
    }

    pub fn to_mat4(&self) -> Mat4 {
        Mat4::from(&self.transform)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f32 = 1e-4;

    fn clamped(min: f32, max: f32) -> ViewMatrix {
        let mut view = ViewMatrix::new();
        view.set_screen_rect(Rect::new(-1.0, 1.0, -1.0, 1.0));
        view.set_max_screen_rect(Rect::new(-2.0, 2.0, -2.0, 2.0));
        view.set_min_scale(min);
        view.set_max_scale(max);
        view
    }

    #[test]
    fn test_scale_never_exceeds_max() {
        let mut view = clamped(0.5, 2.0);
        for _ in 0..10 {
            view.scale(10.0, 10.0);
            assert!(view.transform().scale_x() <= 2.0);
            assert!(view.transform().scale_y() <= 2.0);
        }
        assert_eq!(view.transform().scale_x(), 2.0);
        assert!(view.is_max_scale());
    }

    #[test]
    fn test_scale_never_drops_below_min() {
        let mut view = clamped(0.5, 2.0);
        for _ in 0..10 {
            view.scale(0.1, 0.1);
            assert!(view.transform().scale_x() >= 0.5);
            assert!(view.transform().scale_y() >= 0.5);
        }
        assert!(view.is_min_scale());
    }

    #[test]
    fn test_inverted_clamps_do_not_panic() {
        let mut view = clamped(3.0, 2.0);
        view.scale(1.0, 1.0);
        assert_eq!(view.transform().scale_x(), 2.0);

        view.scale(10.0, 0.1);
        assert_eq!(view.transform().scale_x(), 2.0);
        assert_eq!(view.transform().scale_y(), 2.0);
    }

    #[test]
    fn test_screen_rect_centers_origin() {
        let mut view = ViewMatrix::new();
        view.set_screen_rect(Rect::new(0.0, 2.0, 1.0, 3.0));

        assert_eq!(view.transform().scale_x(), 1.0);
        assert!((view.transform_x(1.0)).abs() < EPS);
        assert!((view.transform_y(2.0)).abs() < EPS);
        assert_eq!(view.screen_rect(), Rect::new(-1.0, 1.0, -1.0, 1.0));
    }

    #[test]
    fn test_adjust_translate_with_off_center_screen_rect() {
        let mut view = ViewMatrix::new();
        view.set_screen_rect(Rect::new(0.0, 2.0, 0.0, 2.0));
        view.set_max_screen_rect(Rect::new(-1.0, 3.0, -1.0, 3.0));
        view.set_min_scale(0.5);
        view.set_max_scale(2.0);

        // The max rect reaches one unit past the screen on every side.
        view.adjust_translate(5.0, 5.0);
        assert!(view.max_screen_rect_on_screen().contains_rect(&view.screen_rect()));
        assert!((view.transform_x(-1.0) + 1.0).abs() < EPS);
        assert!((view.transform_y(-1.0) + 1.0).abs() < EPS);

        view.adjust_translate(-10.0, -10.0);
        assert!(view.max_screen_rect_on_screen().contains_rect(&view.screen_rect()));
        assert!((view.transform_x(3.0) - 1.0).abs() < EPS);
        assert!((view.transform_y(3.0) - 1.0).abs() < EPS);
    }

    #[test]
    fn test_adjust_translate_keeps_screen_inside_max_rect() {
        let mut view = clamped(0.8, 2.0);
        view.adjust_translate(5.0, -5.0);

        assert!(view.max_screen_rect_on_screen().contains_rect(&view.screen_rect()));
        assert!((view.transform().translate_x() - 1.0).abs() < EPS);
        assert!((view.transform().translate_y() + 1.0).abs() < EPS);
    }

    #[test]
    fn test_adjust_scale_pivots_and_clamps() {
        let mut view = clamped(0.8, 2.0);
        view.adjust_scale(0.5, 0.5, 4.0);

        assert_eq!(view.transform().scale_x(), 2.0);
        // Before the zoom the view was identity, so the pivot point must
        // still map onto itself.
        assert!((view.transform_x(0.5) - 0.5).abs() < EPS);
        assert!((view.transform_y(0.5) - 0.5).abs() < EPS);
    }

    #[test]
    fn test_invert_round_trip_after_zoom() {
        let mut view = clamped(0.5, 2.0);
        view.scale(1.7, 1.7);
        view.adjust_translate(0.3, -0.2);

        for v in [-3.0_f32, -0.5, 0.0, 0.75, 2.5] {
            assert!((view.invert_transform_x(view.transform_x(v)) - v).abs() < EPS);
            assert!((view.invert_transform_y(view.transform_y(v)) - v).abs() < EPS);
        }
    }

    impl ViewMatrix {
        fn max_screen_rect_on_screen(&self) -> Rect {
            Rect::new(
                self.transform_x(self.max_screen.left),
                self.transform_x(self.max_screen.right),
                self.transform_y(self.max_screen.bottom),
                self.transform_y(self.max_screen.top),
            )
        }
    }
}
