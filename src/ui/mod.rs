pub mod dialogs;
pub mod keybindings;
pub mod terminal_guard;
pub mod wizard;

pub use wizard::UpdateWizard;
