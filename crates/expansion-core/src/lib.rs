// Library root for the expansion draft core: player/roster model, the
// protection and loss partitioner, the draft allocator, and the advisor
// boundary used by the assisted modes.

pub mod allocate;
pub mod caps;
pub mod error;
pub mod partition;
pub mod player;
pub mod protection;
pub mod roster;
pub mod simulation;
pub mod suggest;

pub use error::ExpansionError;
