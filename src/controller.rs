use crate::capabilities::{DefaultWindowHost, RenderBackend, SceneManager, WindowHost};
use crate::config::ViewConfig;
use crate::gaze::GazeMapper;
use crate::geometry::WindowGeometry;
use crate::math::{Transform2D, Vec2};
use crate::touch::{TouchEvent, TouchState};
use crate::view::{Rect, ViewMatrix};

/// Owns the device-to-screen map, the view matrix and the pointer/gaze
/// state, and turns host callbacks into scene updates.
///
/// Coordinates passed to the input callbacks are monitor pixels measured
/// from the top-left corner of the monitor holding the window.
pub struct ViewController<B: RenderBackend, S: SceneManager> {
    config: ViewConfig,
    geometry: WindowGeometry,
    device_to_screen: Transform2D,
    view_matrix: ViewMatrix,
    touch: TouchState,
    gaze: GazeMapper,
    cursor: Vec2,
    last_pointer: Vec2,
    backend: B,
    scene: S,
    window_host: Box<dyn WindowHost>,
}

impl<B: RenderBackend, S: SceneManager> ViewController<B, S> {
    /// Fails when the configuration does not pass [`ViewConfig::validate`].
    pub fn new(config: ViewConfig, backend: B, scene: S) -> anyhow::Result<Self> {
        config.validate()?;
        let mut controller = Self {
            config,
            geometry: WindowGeometry::default(),
            device_to_screen: Transform2D::identity(),
            view_matrix: ViewMatrix::new(),
            touch: TouchState::new(),
            gaze: GazeMapper::new(),
            cursor: Vec2::ZERO,
            last_pointer: Vec2::ZERO,
            backend,
            scene,
            window_host: Box::new(DefaultWindowHost),
        };
        controller.update_eyes_viewpoint_screen();
        Ok(controller)
    }

    pub fn with_window_host(mut self, host: impl WindowHost + 'static) -> Self {
        self.window_host = Box::new(host);
        self
    }

    pub fn geometry(&self) -> &WindowGeometry {
        &self.geometry
    }

    pub fn view_matrix(&self) -> &ViewMatrix {
        &self.view_matrix
    }

    pub fn device_to_screen(&self) -> &Transform2D {
        &self.device_to_screen
    }

    pub fn touch(&self) -> &TouchState {
        &self.touch
    }

    pub fn gaze(&self) -> &GazeMapper {
        &self.gaze
    }

    pub fn backend_mut(&mut self) -> &mut B {
        &mut self.backend
    }

    /// Stores the window size without re-deriving the transforms.
    pub fn set_window_size(&mut self, width: i32, height: i32) {
        self.geometry.width = width;
        self.geometry.height = height;
    }

    /// Stores the size and re-initializes when it changed and is usable.
    /// Returns whether the transforms were rebuilt.
    pub fn resize(&mut self, width: i32, height: i32) -> bool {
        let resized = WindowGeometry {
            width,
            height,
            ..self.geometry
        };
        if !resized.has_valid_size() || resized == self.geometry {
            return false;
        }
        self.set_window_size(width, height);
        self.initialize();
        true
    }

    pub fn set_monitor_size(&mut self, width: i32, height: i32) {
        self.geometry.monitor_width = width;
        self.geometry.monitor_height = height;
        self.update_eyes_viewpoint_screen();
    }

    /// Rebuilds both transforms from the current window size. Does nothing
    /// while the window has no area, e.g. when minimized.
    pub fn initialize(&mut self) {
        if !self.geometry.has_valid_size() {
            return;
        }
        let (width, height) = (self.geometry.width, self.geometry.height);
        let (w, h) = (width as f32, height as f32);
        let cfg = &self.config;

        // The vertical span is fixed; the horizontal one follows the aspect
        // ratio.
        let ratio = w / h;
        let unit = (cfg.view_logical_right - cfg.view_logical_left).abs() * 0.5;
        let screen = Rect::new(
            -ratio * unit,
            ratio * unit,
            cfg.view_logical_left,
            cfg.view_logical_right,
        );

        self.view_matrix.set_screen_rect(screen);
        self.view_matrix.set_max_scale(cfg.view_max_scale);
        self.view_matrix.set_min_scale(cfg.view_min_scale);
        self.view_matrix.set_max_screen_rect(Rect::new(
            cfg.view_logical_max_left,
            cfg.view_logical_max_right,
            cfg.view_logical_max_bottom,
            cfg.view_logical_max_top,
        ));
        self.view_matrix.scale(cfg.view_scale, cfg.view_scale);

        self.device_to_screen.load_identity();
        let s = if width > height {
            screen.width() / w
        } else {
            screen.height() / h
        };
        self.device_to_screen.scale_relative(s, -s);
        self.device_to_screen.translate_relative(-w * 0.5, -h * 0.5);

        log::debug!(
            "view initialized for {}x{}: screen rect {:?}",
            width,
            height,
            screen
        );
        self.update_eyes_viewpoint_screen();
    }

    /// One frame: pre hook, view matrix push, scene update, post hook.
    pub fn render(&mut self, tick: f32) {
        self.backend.render_pre();
        self.scene.set_view_matrix(&self.view_matrix);
        self.scene.on_update(tick);
        self.backend.render_post();
    }

    pub fn on_touch_began(&mut self, x: f32, y: f32) {
        self.last_pointer = Vec2::new(x, y);
        let origin = self.window_origin();
        self.touch.begin(x - origin.x, y - origin.y);
        log::debug!("touch began x:{:.2} y:{:.2}", x, y);
    }

    /// Drags the window along with the pointer while a capture is active.
    pub fn on_touch_moved(&mut self, x: f32, y: f32) {
        if !self.touch.is_captured() {
            return;
        }
        let now = Vec2::new(x, y);
        let delta = now - self.last_pointer;
        self.last_pointer = now;

        let origin = self.window_origin();
        let target = origin + delta;
        self.window_host.set_window_position(target.x, target.y);

        if let Some(TouchEvent::Moved { delta, .. }) =
            self.touch.moved(x - origin.x, y - origin.y)
        {
            log::trace!("touch moved by {:?}", delta);
        }
    }

    pub fn on_touch_ended(&mut self, _x: f32, _y: f32) {
        if let Some(TouchEvent::Ended { position }) = self.touch.end() {
            let x = self.device_to_screen.transform_x(position.x);
            let y = self.device_to_screen.transform_y(position.y);
            log::debug!("touch ended x:{:.2} y:{:.2}", x, y);
        }
    }

    pub fn on_touch_cancelled(&mut self) {
        if self.touch.end().is_some() {
            log::debug!("touch cancelled");
        }
    }

    /// Feeds the gaze signal to the scene, captured or not.
    pub fn on_pointer_moved(&mut self, x: f32, y: f32) {
        let signal = self.gaze.normalize(
            x,
            y,
            self.geometry.monitor_width as f32,
            self.geometry.monitor_height as f32,
        );
        self.scene.on_drag(signal.x, signal.y);
    }

    /// Raw cursor motion from the host: gaze always, drag only while
    /// captured.
    pub fn on_cursor_moved(&mut self, x: f32, y: f32) {
        self.on_pointer_moved(x, y);
        self.cursor = Vec2::new(x, y);
        if self.touch.is_captured() {
            self.on_touch_moved(x, y);
        }
    }

    /// Primary button press/release at the last cursor position.
    pub fn on_pointer_button(&mut self, pressed: bool) {
        let cursor = self.cursor;
        if pressed {
            self.try_begin_capture(cursor.x, cursor.y);
        } else if self.touch.is_captured() {
            self.on_touch_ended(cursor.x, cursor.y);
        }
    }

    /// Starts a capture at an absolute point, but only where the host
    /// reports the point as draggable. Returns whether the capture started.
    pub fn try_begin_capture(&mut self, x: f32, y: f32) -> bool {
        let origin = self.window_origin();
        let view_x = self.to_view_x(x - origin.x);
        let view_y = self.to_view_y(y - origin.y);
        if !self.window_host.is_draggable_area(view_x, view_y) {
            return false;
        }
        self.on_touch_began(x, y);
        true
    }

    pub fn on_window_position_changed(&mut self, x: i32, y: i32) {
        self.geometry.x = x;
        self.geometry.y = y;
        self.update_eyes_viewpoint_screen();
    }

    pub fn set_eyes_viewpoint(&mut self, x: f32, y: f32) {
        self.gaze.set_viewpoint_target(Vec2::new(x, y));
        self.update_eyes_viewpoint_screen();
    }

    /// Zooms around a window-relative device point.
    pub fn zoom_at(&mut self, device_x: f32, device_y: f32, factor: f32) {
        let cx = self.to_screen_x(device_x);
        let cy = self.to_screen_y(device_y);
        self.view_matrix.adjust_scale(cx, cy, factor);
        self.update_eyes_viewpoint_screen();
    }

    /// Pans by a device-pixel delta.
    pub fn pan_by(&mut self, device_dx: f32, device_dy: f32) {
        let dx = device_dx * self.device_to_screen.scale_x();
        let dy = device_dy * self.device_to_screen.scale_y();
        self.view_matrix.adjust_translate(dx, dy);
        self.update_eyes_viewpoint_screen();
    }

    pub fn to_view_x(&self, device_x: f32) -> f32 {
        let screen_x = self.device_to_screen.transform_x(device_x);
        self.view_matrix.invert_transform_x(screen_x)
    }

    pub fn to_view_y(&self, device_y: f32) -> f32 {
        let screen_y = self.device_to_screen.transform_y(device_y);
        self.view_matrix.invert_transform_y(screen_y)
    }

    pub fn to_screen_x(&self, device_x: f32) -> f32 {
        self.device_to_screen.transform_x(device_x)
    }

    pub fn to_screen_y(&self, device_y: f32) -> f32 {
        self.device_to_screen.transform_y(device_y)
    }

    fn window_origin(&self) -> Vec2 {
        Vec2::new(self.geometry.x as f32, self.geometry.y as f32)
    }

    fn update_eyes_viewpoint_screen(&mut self) {
        self.gaze
            .update_viewpoint_screen(&self.device_to_screen, &self.view_matrix, &self.geometry);
    }
}
