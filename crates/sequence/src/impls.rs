pub mod arena;
pub mod linked;

pub use arena::ArenaSequence;
pub use linked::LinkedSequence;
