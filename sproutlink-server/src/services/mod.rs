mod auth_service;
mod evaluation_service;
mod notification_service;
mod revocation_service;
mod token_service;

pub use auth_service::*;
pub use evaluation_service::*;
pub use notification_service::*;
pub use revocation_service::*;
pub use token_service::*;
