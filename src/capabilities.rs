//! Seams between the view controller and its collaborators: the graphics
//! backend, the character scene, and the host window.

use crate::view::ViewMatrix;

/// Per-backend graphics hooks. `render_pre` and `render_post` are always
/// called as a pair around each frame.
pub trait RenderBackend {
    /// Handle the scene uses to draw a model with the current view matrix.
    type Renderer;
    type Texture;

    fn render_pre(&mut self);
    fn render_post(&mut self);
    fn create_renderer(&mut self) -> Self::Renderer;
    /// Uploads tightly packed RGBA8 pixels.
    fn create_texture(
        &mut self,
        width: u32,
        height: u32,
        rgba: &[u8],
    ) -> anyhow::Result<Self::Texture>;
}

/// The character scene driven by the controller once per frame.
pub trait SceneManager {
    fn set_view_matrix(&mut self, view: &ViewMatrix);
    /// Advances animation by `tick` seconds and draws.
    fn on_update(&mut self, tick: f32);
    /// Gaze signal, roughly -1..1 per axis.
    fn on_drag(&mut self, x: f32, y: f32);
}

/// Optional window-level capabilities of the host shell. Every method has a
/// permissive default, so hosts only implement what they support.
pub trait WindowHost {
    /// Requests the window's top-left corner be moved to `(x, y)`.
    fn set_window_position(&mut self, _x: f32, _y: f32) {}

    /// Whether a press at the given view-space point may start a drag.
    fn is_draggable_area(&self, _view_x: f32, _view_y: f32) -> bool {
        true
    }
}

/// Host with no window control: drags are always allowed and never move
/// anything.
#[derive(Debug, Default, Clone, Copy)]
pub struct DefaultWindowHost;

impl WindowHost for DefaultWindowHost {}
