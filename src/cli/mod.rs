pub mod commands;
pub mod console;

pub use commands::run;
pub use console::{ConsoleConfirm, ConsoleNotifier};
