use crate::app_state::State;
use crate::config::AppConfig;
use std::sync::Arc;
use winit::{
    application::ApplicationHandler,
    event::*,
    event_loop::{ActiveEventLoop, EventLoop},
    keyboard::{KeyCode, PhysicalKey},
    window::{Window, WindowId},
};

struct App {
    config: AppConfig,
    state: Option<State>,
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.state.is_some() {
            return;
        }

        let window_attributes = Window::default_attributes()
            .with_title("avatar_view")
            .with_transparent(true)
            .with_decorations(false);

        let window = match event_loop.create_window(window_attributes) {
            Ok(window) => Arc::new(window),
            Err(e) => {
                log::error!("failed to create window: {}", e);
                event_loop.exit();
                return;
            }
        };

        match pollster::block_on(State::new(window, self.config.clone())) {
            Ok(state) => self.state = Some(state),
            Err(e) => {
                log::error!("failed to initialize renderer: {:#}", e);
                event_loop.exit();
            }
        }
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        window_id: WindowId,
        event: WindowEvent,
    ) {
        let Some(state) = &mut self.state else {
            return;
        };
        if window_id != state.window().id() || state.input(&event) {
            return;
        }
        match event {
            WindowEvent::CloseRequested
            | WindowEvent::KeyboardInput {
                event:
                    KeyEvent {
                        state: ElementState::Pressed,
                        physical_key: PhysicalKey::Code(KeyCode::Escape),
                        ..
                    },
                ..
            } => event_loop.exit(),
            WindowEvent::Resized(physical_size) => {
                log::info!(
                    "WindowEvent::Resized: {}x{}",
                    physical_size.width,
                    physical_size.height
                );
                state.resize(physical_size);
            }
            WindowEvent::RedrawRequested => state.update(),
            _ => {}
        }
    }

    fn about_to_wait(&mut self, _event_loop: &ActiveEventLoop) {
        if let Some(state) = &self.state {
            state.window().request_redraw();
        }
    }
}

pub async fn run() -> anyhow::Result<()> {
    env_logger::init();

    let config = AppConfig::from_args_or_env()?;
    let event_loop = EventLoop::new()?;
    let mut app = App {
        config,
        state: None,
    };

    event_loop.run_app(&mut app)?;
    Ok(())
}
