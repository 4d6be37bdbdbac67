pub mod delete;
pub mod fallback;
pub mod get;
pub mod health;
pub mod list;
pub mod put;
pub mod root;

pub use delete::delete_handler;
pub use fallback::{key_required, method_not_allowed, not_found};
pub use get::get_handler;
pub use health::health_handler;
pub use list::list_handler;
pub use put::put_handler;
pub use root::root_handler;
