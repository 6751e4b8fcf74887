mod build;
mod config;
mod outline;
mod slug;

pub use build::handle_build_command;
pub use outline::handle_outline_command;
pub use slug::handle_slug_command;
