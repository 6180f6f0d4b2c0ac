pub mod gate;
pub mod point;
pub mod snapshot;

pub use gate::{Gate, Vertex};
pub use point::{Coord, Plot, Point};
pub use snapshot::{GroupVisibility, ScratchEntry, SessionMeta, SessionRecord, SessionSnapshot};
