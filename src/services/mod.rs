//! Service layer mediating between the HTTP surface and the store.
//!
//! Services are stateless structs with associated functions generic over
//! [`sea_orm::ConnectionTrait`], so they run equally well against the
//! pooled connection or a transaction.

pub mod email;
pub mod reminders;
pub mod todos;
pub mod users;

pub use email::{Mailer, SendGridMailer};
pub use todos::TodoService;
pub use users::UserService;
