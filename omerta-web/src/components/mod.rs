pub mod button;
pub mod countdown_badge;
pub mod modal;
pub mod ui;

pub use button::Button;
pub use countdown_badge::CountdownBadge;
pub use modal::Modal;
