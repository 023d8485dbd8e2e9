pub mod file_info;
pub mod todo;
pub mod user;

pub use file_info::Entity as FileInfo;
pub use todo::Entity as Todo;
pub use user::Entity as User;
