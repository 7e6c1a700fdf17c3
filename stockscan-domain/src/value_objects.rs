// Domain value objects
pub mod action_type;
pub mod identifiers;
pub mod input_channel;
pub mod scan_cue;
pub mod tag_strategy;

pub use action_type::*;
pub use identifiers::*;
pub use input_channel::*;
pub use scan_cue::*;
pub use tag_strategy::*;
