use anyhow::Result;
use std::cell::Cell;
use std::rc::Rc;
use std::sync::Arc;
use std::time::Instant;
use winit::dpi::{PhysicalPosition, PhysicalSize};
use winit::window::Window;

use crate::capabilities::WindowHost;
use crate::config::AppConfig;
use crate::controller::ViewController;
use crate::geometry::MonitorPlacement;
use crate::renderer::WgpuBackend;
use crate::scene::PreviewScene;
use crate::state::InputState;

/// Moves the real window when the controller asks for it.
struct WinitWindowHost {
    window: Arc<Window>,
    monitor: Rc<Cell<MonitorPlacement>>,
}

impl WindowHost for WinitWindowHost {
    fn set_window_position(&mut self, x: f32, y: f32) {
        // The controller works with the client-area origin relative to the
        // monitor, winit positions the outer frame on the desktop.
        let (Ok(outer), Ok(inner)) = (self.window.outer_position(), self.window.inner_position())
        else {
            return;
        };
        let (x, y) = self.monitor.get().to_desktop(x, y);
        self.window.set_outer_position(PhysicalPosition::new(
            x.round() as i32 + (outer.x - inner.x),
            y.round() as i32 + (outer.y - inner.y),
        ));
    }
}

pub struct State {
    pub window: Arc<Window>,
    pub size: PhysicalSize<u32>,
    pub controller: ViewController<WgpuBackend, PreviewScene>,
    pub input: InputState,
    pub last_frame: Instant,
    monitor: Rc<Cell<MonitorPlacement>>,
}

impl State {
    pub async fn new(window: Arc<Window>, config: AppConfig) -> Result<State> {
        let size = window.inner_size();

        let mut backend = WgpuBackend::new(window.clone(), config.background_color).await?;
        let scene = PreviewScene::new(&mut backend);
        let monitor = Rc::new(Cell::new(MonitorPlacement::default()));

        let mut controller = ViewController::new(config.view, backend, scene)?.with_window_host(
            WinitWindowHost {
                window: window.clone(),
                monitor: monitor.clone(),
            },
        );
        controller.set_eyes_viewpoint(config.eyes_viewpoint[0], config.eyes_viewpoint[1]);

        let mut state = Self {
            window,
            size,
            controller,
            input: InputState::new(),
            last_frame: Instant::now(),
            monitor,
        };
        state.sync_window_placement();
        state
            .controller
            .resize(size.width as i32, size.height as i32);

        Ok(state)
    }

    pub fn window(&self) -> &Arc<Window> {
        &self.window
    }

    /// Pulls window position and monitor placement from the windowing
    /// system. Positions handed to the controller are relative to the
    /// monitor the window is on.
    pub fn sync_window_placement(&mut self) {
        if let Some(handle) = self.window.current_monitor() {
            let (origin, size) = (handle.position(), handle.size());
            let monitor = MonitorPlacement {
                x: origin.x,
                y: origin.y,
                width: size.width as i32,
                height: size.height as i32,
            };
            if monitor != self.monitor.get() {
                log::info!(
                    "monitor {}x{} at ({}, {})",
                    monitor.width,
                    monitor.height,
                    monitor.x,
                    monitor.y
                );
                self.monitor.set(monitor);
                self.controller
                    .set_monitor_size(monitor.width, monitor.height);
            }
        }
        match self.window.inner_position() {
            Ok(pos) => {
                let (x, y) = self.monitor.get().to_local(pos.x, pos.y);
                self.controller.on_window_position_changed(x, y);
            }
            Err(e) => log::debug!("window position unavailable: {}", e),
        }
    }

    /// Monitor-relative position of a point given relative to the client
    /// area.
    pub fn to_monitor(&self, local: [f32; 2]) -> [f32; 2] {
        let geometry = self.controller.geometry();
        [local[0] + geometry.x as f32, local[1] + geometry.y as f32]
    }

    pub fn update(&mut self) {
        let now = Instant::now();
        let tick = now.duration_since(self.last_frame).as_secs_f32();
        self.last_frame = now;
        self.controller.render(tick);
    }
}
