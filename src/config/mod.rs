mod types;
mod loader;
mod defaults;
mod validation;

pub use types::*;
pub use loader::{load_config, load_options};
pub use validation::is_valid_tag_name;
