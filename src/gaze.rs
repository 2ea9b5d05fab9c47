//! Gaze targeting: turns an absolute pointer position into a signed
//! per-axis signal relative to where the character's eyes are on the
//! monitor.

use crate::geometry::WindowGeometry;
use crate::math::{Transform2D, Vec2};
use crate::view::ViewMatrix;

#[derive(Debug, Clone)]
pub struct GazeMapper {
    viewpoint_target: Vec2,
    viewpoint_screen: Vec2,
}

impl Default for GazeMapper {
    fn default() -> Self {
        Self::new()
    }
}

impl GazeMapper {
    pub fn new() -> Self {
        Self {
            viewpoint_target: Vec2::ZERO,
            viewpoint_screen: Vec2::new(1.0, 1.0),
        }
    }

    /// Monitor-space reference point, Y measured from the bottom edge.
    pub fn viewpoint_screen(&self) -> Vec2 {
        self.viewpoint_screen
    }

    /// Stores a new view-space target. The caller must follow up with
    /// [`GazeMapper::update_viewpoint_screen`].
    pub fn set_viewpoint_target(&mut self, target: Vec2) {
        self.viewpoint_target = target;
    }

    /// Projects the view-space target back through the view matrix and the
    /// device-to-screen map, then onto the monitor using the window
    /// placement.
    pub fn update_viewpoint_screen(
        &mut self,
        device_to_screen: &Transform2D,
        view: &ViewMatrix,
        geometry: &WindowGeometry,
    ) {
        let target = self.viewpoint_target;
        let mut screen = Vec2::new(
            device_to_screen.invert_transform_x(view.invert_transform_x(target.x))
                + geometry.x as f32,
            device_to_screen.invert_transform_y(view.invert_transform_y(target.y))
                + (geometry.monitor_height - geometry.height - geometry.y) as f32,
        );
        // Zero would divide by zero in `normalize`.
        if screen.x == 0.0 {
            screen.x = 1.0;
        }
        if screen.y == 0.0 {
            screen.y = 1.0;
        }
        self.viewpoint_screen = screen;
        log::debug!(
            "gaze viewpoint {:?} projected to monitor {:?}",
            target,
            screen
        );
    }

    /// Maps a top-down monitor-space point to a ratio that is 0 at the
    /// reference point and reaches ±1 at the monitor edges. Points outside
    /// the monitor go beyond ±1; no clamping is applied.
    pub fn normalize(&self, x: f32, y: f32, monitor_width: f32, monitor_height: f32) -> Vec2 {
        let reference = self.viewpoint_screen;
        let y = monitor_height - y;
        Vec2::new(
            ramp(x, reference.x, monitor_width),
            ramp(y, reference.y, monitor_height),
        )
    }
}

fn ramp(value: f32, reference: f32, max: f32) -> f32 {
    if value < reference {
        (value - reference) / reference
    } else {
        (value - reference) / (max - reference)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f32 = 1e-5;

    fn centered_on_full_hd() -> GazeMapper {
        let geometry = WindowGeometry {
            x: 0,
            y: 0,
            width: 1920,
            height: 1080,
            monitor_width: 1920,
            monitor_height: 1080,
        };
        let mut gaze = GazeMapper::new();
        gaze.set_viewpoint_target(Vec2::new(960.0, 540.0));
        gaze.update_viewpoint_screen(&Transform2D::identity(), &ViewMatrix::new(), &geometry);
        gaze
    }

    #[test]
    fn test_saturates_at_monitor_corners() {
        let gaze = centered_on_full_hd();
        assert_eq!(gaze.viewpoint_screen(), Vec2::new(960.0, 540.0));

        // Raw y=1080 flips to 0.
        let low = gaze.normalize(0.0, 1080.0, 1920.0, 1080.0);
        assert!((low.x + 1.0).abs() < EPS && (low.y + 1.0).abs() < EPS);

        let center = gaze.normalize(960.0, 540.0, 1920.0, 1080.0);
        assert!(center.x.abs() < EPS && center.y.abs() < EPS);

        let high = gaze.normalize(1920.0, 0.0, 1920.0, 1080.0);
        assert!((high.x - 1.0).abs() < EPS && (high.y - 1.0).abs() < EPS);
    }

    #[test]
    fn test_outside_monitor_is_not_clamped() {
        let gaze = centered_on_full_hd();
        let beyond = gaze.normalize(2880.0, -540.0, 1920.0, 1080.0);

        assert!((beyond.x - 2.0).abs() < EPS);
        assert!((beyond.y - 2.0).abs() < EPS);
    }

    #[test]
    fn test_projection_uses_window_placement() {
        let geometry = WindowGeometry {
            x: 100,
            y: 50,
            width: 800,
            height: 600,
            monitor_width: 1920,
            monitor_height: 1080,
        };
        let mut gaze = GazeMapper::new();
        gaze.set_viewpoint_target(Vec2::new(10.0, 20.0));
        gaze.update_viewpoint_screen(&Transform2D::identity(), &ViewMatrix::new(), &geometry);

        assert_eq!(gaze.viewpoint_screen(), Vec2::new(110.0, 450.0));
    }

    #[test]
    fn test_zero_reference_is_replaced() {
        let mut gaze = GazeMapper::new();
        gaze.update_viewpoint_screen(
            &Transform2D::identity(),
            &ViewMatrix::new(),
            &WindowGeometry::default(),
        );

        assert_eq!(gaze.viewpoint_screen(), Vec2::new(1.0, 1.0));
        assert!(gaze.normalize(0.0, 0.0, 10.0, 10.0).x.is_finite());
    }
}
