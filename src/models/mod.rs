pub mod media;

pub use media::ItemShape;
