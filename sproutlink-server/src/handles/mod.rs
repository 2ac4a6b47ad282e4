mod auth_handle;
mod device_handle;
mod plant_handle;
mod reading_handle;

pub use auth_handle::*;
pub use device_handle::*;
pub use plant_handle::*;
pub use reading_handle::*;
