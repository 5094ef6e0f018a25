//! Components built on the Tessera styling engine

mod button;
mod checkbox;
mod dialog;
mod scroll_area;
mod simple_grid;

pub use button::*;
pub use checkbox::*;
pub use dialog::*;
pub use scroll_area::*;
pub use simple_grid::*;
