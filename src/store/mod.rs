pub mod blob;
pub mod canvas;

pub use blob::BlobStore;
pub use canvas::CanvasStore;
