// Domain entities
pub mod barcode;
pub mod config;
pub mod outcome;
pub mod requests;
pub mod scan_event;

pub use barcode::*;
pub use config::*;
pub use outcome::*;
pub use requests::*;
pub use scan_event::*;
