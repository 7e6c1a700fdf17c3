pub mod key_locks;
pub mod status_board;

pub use key_locks::KeyedLocks;
pub use status_board::StatusBoard;
