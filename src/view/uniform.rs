use crate::math::Mat4;
use crate::view::ViewMatrix;

#[repr(C)]
#[derive(Debug, Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
pub struct Uniforms {
    transform: [[f32; 4]; 4],
}

impl Uniforms {
    pub fn new() -> Self {
        Self {
            transform: Mat4::identity().into(),
        }
    }

    pub fn update_transform(&mut self, view: &ViewMatrix) {
        self.transform = view.to_mat4().into();
    }

    pub fn transform(&self) -> Mat4 {
        Mat4 {
            data: self.transform,
        }
    }
}

impl Default for Uniforms {
    fn default() -> Self {
        Self::new()
    }
}
