// One handler file per operation: list, get, create, update, delete.

pub mod create;
pub mod delete;
pub mod get;
pub mod list;
pub mod payload;
pub mod update;

pub use create::create;
pub use delete::delete;
pub use get::get;
pub use list::list;
pub use update::update;
