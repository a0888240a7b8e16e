pub mod context;
pub mod shell;

pub use context::{use_ui, ActiveTab, UiContext};
pub use shell::Shell;
