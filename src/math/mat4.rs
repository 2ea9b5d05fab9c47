use crate::math::{Transform2D, Vec2};

/// Column-major 4x4 matrix in the layout the shaders expect.
#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Mat4 {
    pub data: [[f32; 4]; 4],
}

impl Mat4 {
    pub fn identity() -> Self {
        Self {
            data: [
                [1.0, 0.0, 0.0, 0.0],
                [0.0, 1.0, 0.0, 0.0],
                [0.0, 0.0, 1.0, 0.0],
                [0.0, 0.0, 0.0, 1.0],
            ],
        }
    }

    pub fn transform_point(&self, point: Vec2) -> Vec2 {
        let x = self.data[0][0] * point.x + self.data[1][0] * point.y + self.data[3][0];
        let y = self.data[0][1] * point.x + self.data[1][1] * point.y + self.data[3][1];
        let w = self.data[0][3] * point.x + self.data[1][3] * point.y + self.data[3][3];

        if w != 0.0 {
            Vec2::new(x / w, y / w)
        } else {
            Vec2::new(x, y)
        }
    }
}

impl From<&Transform2D> for Mat4 {
    fn from(t: &Transform2D) -> Self {
        Self {
            data: [
                [t.scale_x(), 0.0, 0.0, 0.0],
                [0.0, t.scale_y(), 0.0, 0.0],
                [0.0, 0.0, 1.0, 0.0],
                [t.translate_x(), t.translate_y(), 0.0, 1.0],
            ],
        }
    }
}

impl From<Mat4> for [[f32; 4]; 4] {
    fn from(mat: Mat4) -> Self {
        mat.data
    }
}

unsafe impl bytemuck::Pod for Mat4 {}
unsafe impl bytemuck::Zeroable for Mat4 {}
