mod app;
pub mod cli;
mod effects;
mod render;
mod settings;

pub use app::run_app;
