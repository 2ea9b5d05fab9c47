mod mat4;
mod transform2d;
mod vec2;

pub use mat4::Mat4;
pub use transform2d::Transform2D;
pub use vec2::Vec2;
