pub mod choice;
pub mod user;

pub use choice::{Auth, AuthFlags, Database, DatabaseFlags, ResolvedConfig};
pub use user::{config_path, load_user_config_from, UserConfig};
