pub mod building;
pub mod collection;
pub mod message;

pub use building::{Building, ComponentKind, Corridor, Floor, Lift, Position, Restroom};
pub use collection::BuildingCollection;
pub use message::{ChatMessage, Sender};
