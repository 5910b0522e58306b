mod app;
pub mod help;
pub mod keybindings;
pub mod terminal_guard;
pub mod view;

pub use app::App;
pub use help::HelpDialog;
pub use view::{GuideView, InfoPanel};
