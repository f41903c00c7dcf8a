pub mod serve;
pub mod valuate;

pub use serve::serve;
pub use valuate::valuate;
