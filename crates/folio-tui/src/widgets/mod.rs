mod canvas;
mod status_bar;

pub use canvas::CanvasWidget;
pub use status_bar::StatusBarWidget;
