mod file_loader;
mod map_sync;
mod progress;
mod route_loader;

pub use file_loader::FileLoader;
pub use map_sync::MapSync;
pub use progress::{draw_marker, status_widget, Presentation, NOT_ENOUGH_STOPS};
pub use route_loader::{RouteLoader, RouteSource};
