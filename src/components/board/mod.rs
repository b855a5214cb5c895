mod animation;
mod component;
mod render;
mod state;

pub use component::BoardCanvas;
pub use state::BoardState;
