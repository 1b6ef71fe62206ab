pub mod container;
pub mod controller;
pub mod router;
pub mod settings;

pub use container::{Container, ContainerConfig};
pub use router::Router;
pub use settings::Settings;
