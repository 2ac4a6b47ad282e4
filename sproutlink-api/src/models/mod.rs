mod auth;
mod device;
mod plant;
mod reading;

pub use auth::*;
pub use device::*;
pub use plant::*;
pub use reading::*;

pub type Id = i32;
