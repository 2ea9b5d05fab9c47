mod uniform;
mod view_matrix;

pub use uniform::Uniforms;
pub use view_matrix::{Rect, ViewMatrix};
