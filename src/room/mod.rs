//! Planning-poker room state machine.

pub mod card;
pub mod event;
pub mod model;
pub mod registry;
pub mod stats;

pub use card::Card;
pub use event::{ClientEvent, Outbound, ServerEvent, Target, UserView};
pub use model::{Room, User};
pub use registry::{RoomError, RoomRegistry};
pub use stats::Stats;
