use crate::capabilities::{RenderBackend, SceneManager};
use crate::renderer::ViewUniform;
use crate::view::{Uniforms, ViewMatrix};

/// Stand-in scene used until a character model is attached: keeps the view
/// transform on the GPU.
pub struct PreviewScene {
    view: ViewUniform,
    uniforms: Uniforms,
}

impl PreviewScene {
    pub fn new<B>(backend: &mut B) -> Self
    where
        B: RenderBackend<Renderer = ViewUniform>,
    {
        Self {
            view: backend.create_renderer(),
            uniforms: Uniforms::new(),
        }
    }
}

impl SceneManager for PreviewScene {
    fn set_view_matrix(&mut self, view: &ViewMatrix) {
        self.uniforms.update_transform(view);
    }

    fn on_update(&mut self, tick: f32) {
        self.view.upload(&self.uniforms);
        log::trace!("frame tick {:.4}s", tick);
    }

    fn on_drag(&mut self, x: f32, y: f32) {
        log::trace!("gaze signal x:{:.3} y:{:.3}", x, y);
    }
}
