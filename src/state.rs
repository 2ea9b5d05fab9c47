use std::sync::Arc;
use wgpu::{Device, Queue, Surface, SurfaceConfiguration};
use winit::keyboard::ModifiersState;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UserInputState {
    Idle,
    Panning,
}

pub struct GpuContext {
    pub surface: Surface<'static>,
    pub device: Device,
    pub queue: Arc<Queue>,
    pub config: SurfaceConfiguration,
}

pub struct InputState {
    /// Cursor position relative to the window's client area.
    pub mouse_pos: [f32; 2],
    pub modifiers: ModifiersState,
    pub state: UserInputState,
    pub pan_last: Option<[f32; 2]>,
    /// The one touch point being followed; other fingers are ignored.
    pub touch_id: Option<u64>,
}

impl InputState {
    pub fn new() -> Self {
        Self {
            mouse_pos: [0.0; 2],
            modifiers: ModifiersState::empty(),
            state: UserInputState::Idle,
            pan_last: None,
            touch_id: None,
        }
    }
}
