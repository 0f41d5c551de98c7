use async_trait::async_trait;

use super::domain::{Album, AlbumInput};
use crate::errors::ServiceError;

/// Store abstraction for the album collection. Implementations must keep
/// insertion order for `list` and serialize mutations against each other.
#[async_trait]
pub trait AlbumStore: Send + Sync {
    async fn list(&self) -> Vec<Album>;
    async fn get(&self, id: &str) -> Result<Album, ServiceError>;
    async fn create(&self, input: AlbumInput) -> Result<Album, ServiceError>;
    async fn update(&self, id: &str, input: AlbumInput) -> Result<Album, ServiceError>;
    async fn delete(&self, id: &str) -> Result<(), ServiceError>;
    async fn len(&self) -> usize;
}
