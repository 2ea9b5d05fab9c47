mod app;
mod app_state;
pub mod capabilities;
pub mod config;
pub mod controller;
mod event_handler;
pub mod gaze;
pub mod geometry;
pub mod math;
pub mod renderer;
pub mod scene;
mod state;
pub mod touch;
pub mod view;

// Re-export the main public interface
pub use app::run;
pub use capabilities::{DefaultWindowHost, RenderBackend, SceneManager, WindowHost};
pub use config::{AppConfig, ViewConfig};
pub use controller::ViewController;
