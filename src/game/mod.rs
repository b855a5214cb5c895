pub mod driver;
mod layout;
mod selection;
mod session;
mod view;

pub use layout::normalize_positions;
pub use session::{GameSession, MoveOutcome};
pub use view::GameView;
