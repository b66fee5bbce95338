//! Small helpers shared by the renderers

mod date;
mod html;

pub use date::*;
pub use html::*;
