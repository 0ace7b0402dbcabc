mod pointer;
mod resize;

pub use pointer::wire_pointer_handlers;
pub use resize::wire_window_resize;
