use async_trait::async_trait;
use tokio::sync::RwLock;
use tracing::{debug, instrument};

use super::domain::{seed_albums, Album, AlbumInput};
use super::repository::AlbumStore;
use crate::errors::ServiceError;

/// Process-local album collection.
///
/// One `RwLock` guards the whole `Vec`; it is held only for the in-memory
/// step and callers receive clones. Lookups are linear scans returning the
/// first match, so duplicate ids resolve to the oldest record.
pub struct InMemoryAlbumStore {
    inner: RwLock<Vec<Album>>,
    on_len: Option<LenObserver>,
}

/// Called with the collection size while the write lock is still held,
/// so successive calls arrive in mutation order.
pub type LenObserver = Box<dyn Fn(usize) + Send + Sync>;

impl InMemoryAlbumStore {
    pub fn new(albums: Vec<Album>) -> Self {
        Self { inner: RwLock::new(albums), on_len: None }
    }

    /// Report the current size to `f` now and after every create or delete.
    pub fn observe_len(mut self, f: impl Fn(usize) + Send + Sync + 'static) -> Self {
        f(self.inner.get_mut().len());
        self.on_len = Some(Box::new(f));
        self
    }

    fn notify_len(&self, len: usize) {
        if let Some(f) = &self.on_len {
            f(len);
        }
    }

    /// Store holding the startup records.
    pub fn seeded() -> Self {
        Self::new(seed_albums())
    }
}

impl Default for InMemoryAlbumStore {
    fn default() -> Self {
        Self::seeded()
    }
}

fn position(albums: &[Album], id: &str) -> Result<usize, ServiceError> {
    albums
        .iter()
        .position(|a| a.id == id)
        .ok_or_else(|| ServiceError::not_found("album"))
}

#[async_trait]
impl AlbumStore for InMemoryAlbumStore {
    async fn list(&self) -> Vec<Album> {
        self.inner.read().await.clone()
    }

    async fn get(&self, id: &str) -> Result<Album, ServiceError> {
        let albums = self.inner.read().await;
        let idx = position(&albums, id)?;
        Ok(albums[idx].clone())
    }

    /// Duplicate ids are accepted; the new record is appended regardless.
    #[instrument(skip(self, input))]
    async fn create(&self, input: AlbumInput) -> Result<Album, ServiceError> {
        let album = input.into_album()?;
        let mut albums = self.inner.write().await;
        albums.push(album.clone());
        debug!(id = %album.id, len = albums.len(), "album appended");
        self.notify_len(albums.len());
        Ok(album)
    }

    /// Lookup precedes validation, so an unknown id wins over a bad body.
    #[instrument(skip(self, input))]
    async fn update(&self, id: &str, input: AlbumInput) -> Result<Album, ServiceError> {
        let mut albums = self.inner.write().await;
        let idx = position(&albums, id)?;
        input.into_changes()?.apply(&mut albums[idx]);
        Ok(albums[idx].clone())
    }

    #[instrument(skip(self))]
    async fn delete(&self, id: &str) -> Result<(), ServiceError> {
        let mut albums = self.inner.write().await;
        let idx = position(&albums, id)?;
        // Vec::remove shifts the tail, keeping relative order
        albums.remove(idx);
        debug!(len = albums.len(), "album removed");
        self.notify_len(albums.len());
        Ok(())
    }

    async fn len(&self) -> usize {
        self.inner.read().await.len()
    }
}
