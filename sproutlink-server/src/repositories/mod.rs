mod device;
mod plant;
mod user;

pub use device::DeviceRepository;
pub use plant::PlantRepository;
pub use user::UserRepository;
