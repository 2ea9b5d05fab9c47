use crate::app_state::State;
use crate::state::UserInputState::{Idle, Panning};

use winit::event::*;
use winit::keyboard::{KeyCode, PhysicalKey};

impl State {
    pub fn resize(&mut self, new_size: winit::dpi::PhysicalSize<u32>) {
        if new_size.width > 0 && new_size.height > 0 {
            self.size = new_size;
            self.controller.backend_mut().resize(new_size);
            self.controller
                .resize(new_size.width as i32, new_size.height as i32);
        }
    }

    pub fn input(&mut self, event: &WindowEvent) -> bool {
        match event {
            WindowEvent::ModifiersChanged(modifiers) => {
                self.input.modifiers = modifiers.state();
                false
            }
            WindowEvent::Moved(_) => {
                self.sync_window_placement();
                true
            }
            WindowEvent::MouseInput { state, button, .. } => match button {
                MouseButton::Left => {
                    self.controller
                        .on_pointer_button(*state == ElementState::Pressed);
                    true
                }
                MouseButton::Middle => {
                    match state {
                        ElementState::Pressed => {
                            self.input.state = Panning;
                            self.input.pan_last = Some(self.input.mouse_pos);
                        }
                        ElementState::Released => {
                            self.input.state = Idle;
                            self.input.pan_last = None;
                        }
                    }
                    true
                }
                _ => false,
            },
            WindowEvent::CursorMoved { position, .. } => {
                self.input.mouse_pos = [position.x as f32, position.y as f32];

                if self.input.state == Panning {
                    if let Some(last) = self.input.pan_last {
                        self.controller.pan_by(
                            self.input.mouse_pos[0] - last[0],
                            self.input.mouse_pos[1] - last[1],
                        );
                    }
                    self.input.pan_last = Some(self.input.mouse_pos);
                }

                let [x, y] = self.to_monitor(self.input.mouse_pos);
                self.controller.on_cursor_moved(x, y);
                true
            }
            WindowEvent::Touch(touch) => {
                if self.input.touch_id.is_some_and(|id| id != touch.id) {
                    return true;
                }
                let local = [touch.location.x as f32, touch.location.y as f32];
                let [x, y] = self.to_monitor(local);
                match touch.phase {
                    TouchPhase::Started => {
                        if self.controller.try_begin_capture(x, y) {
                            self.input.touch_id = Some(touch.id);
                        }
                    }
                    TouchPhase::Moved => {
                        self.controller.on_pointer_moved(x, y);
                        self.controller.on_touch_moved(x, y);
                    }
                    TouchPhase::Ended => {
                        self.input.touch_id = None;
                        self.controller.on_touch_ended(x, y);
                    }
                    TouchPhase::Cancelled => {
                        self.input.touch_id = None;
                        self.controller.on_touch_cancelled();
                    }
                }
                true
            }
            WindowEvent::MouseWheel { delta, .. } => {
                let zoom_factor = match delta {
                    MouseScrollDelta::LineDelta(_, y) => 1.0 + y * 0.1,
                    MouseScrollDelta::PixelDelta(pos) => 1.0 + pos.y as f32 * 0.001,
                };
                if zoom_factor > 0.0 {
                    let [x, y] = self.input.mouse_pos;
                    self.controller.zoom_at(x, y, zoom_factor);
                }
                true
            }
            WindowEvent::KeyboardInput {
                event: key_event, ..
            } => {
                if key_event.state != ElementState::Pressed {
                    return false;
                }

                let is_ctrl_or_cmd =
                    self.input.modifiers.control_key() || self.input.modifiers.super_key();
                if !is_ctrl_or_cmd {
                    return false;
                }

                let center = [self.size.width as f32 * 0.5, self.size.height as f32 * 0.5];
                match key_event.physical_key {
                    PhysicalKey::Code(KeyCode::Minus) => {
                        self.controller.zoom_at(center[0], center[1], 0.9);
                        true
                    }
                    PhysicalKey::Code(KeyCode::Equal) => {
                        self.controller.zoom_at(center[0], center[1], 1.1);
                        true
                    }
                    PhysicalKey::Code(KeyCode::Digit0) => {
                        self.controller.initialize();
                        true
                    }
                    _ => false,
                }
            }
            _ => false,
        }
    }
}
