//! Albums module: domain record and validation, the store abstraction,
//! and the in-memory store the server runs on.

pub mod domain;
pub mod memory;
pub mod repository;

pub use domain::{seed_albums, Album, AlbumChanges, AlbumInput};
pub use memory::InMemoryAlbumStore;
pub use repository::AlbumStore;
