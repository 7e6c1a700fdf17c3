pub mod tag_generators;

pub use tag_generators::*;
