use serde::{Deserialize, Serialize};

use crate::errors::ServiceError;

pub const CREATE_REQUIREMENTS: &str = "all fields are required and price must be greater than 0s";
pub const UPDATE_REQUIREMENTS: &str = "title, artist and price are required";

/// A record album as stored and as serialized on the wire.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Album {
    pub id: String,
    pub title: String,
    pub artist: String,
    pub price: f64,
}

impl Album {
    pub fn new(id: impl Into<String>, title: impl Into<String>, artist: impl Into<String>, price: f64) -> Self {
        Self { id: id.into(), title: title.into(), artist: artist.into(), price }
    }
}

/// Create/update request body.
///
/// Absent or `null` fields fall back to empty/zero so that they surface as
/// validation failures rather than parse failures. Unknown fields are ignored.
/// Capitalized and upper-case keys (`Title`, `TITLE`) are accepted as well.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct AlbumInput {
    #[serde(alias = "Id", alias = "ID")]
    pub id: Option<String>,
    #[serde(alias = "Title", alias = "TITLE")]
    pub title: Option<String>,
    #[serde(alias = "Artist", alias = "ARTIST")]
    pub artist: Option<String>,
    #[serde(alias = "Price", alias = "PRICE")]
    pub price: Option<f64>,
}

/// The fields an update is allowed to touch; `id` is immutable.
#[derive(Debug, Clone, PartialEq)]
pub struct AlbumChanges {
    pub title: String,
    pub artist: String,
    pub price: f64,
}

impl AlbumChanges {
    pub fn apply(self, album: &mut Album) {
        album.title = self.title;
        album.artist = self.artist;
        album.price = self.price;
    }
}

fn present(field: &Option<String>) -> bool {
    field.as_deref().is_some_and(|s| !s.is_empty())
}

fn positive(price: Option<f64>) -> bool {
    // NaN fails this comparison too
    price.is_some_and(|p| p > 0.0)
}

impl AlbumInput {
    /// Validate as a new record: every field present and `price > 0`.
    pub fn into_album(self) -> Result<Album, ServiceError> {
        if !(present(&self.id) && present(&self.title) && present(&self.artist) && positive(self.price)) {
            return Err(ServiceError::InvalidArgument(CREATE_REQUIREMENTS.into()));
        }
        Ok(Album {
            id: self.id.unwrap_or_default(),
            title: self.title.unwrap_or_default(),
            artist: self.artist.unwrap_or_default(),
            price: self.price.unwrap_or_default(),
        })
    }

    /// Validate as a replacement for an existing record. `id` is neither
    /// checked nor used; the path id decides which record changes.
    pub fn into_changes(self) -> Result<AlbumChanges, ServiceError> {
        if !(present(&self.title) && present(&self.artist) && positive(self.price)) {
            return Err(ServiceError::InvalidArgument(UPDATE_REQUIREMENTS.into()));
        }
        Ok(AlbumChanges {
            title: self.title.unwrap_or_default(),
            artist: self.artist.unwrap_or_default(),
            price: self.price.unwrap_or_default(),
        })
    }
}

/// Records present when the process starts.
pub fn seed_albums() -> Vec<Album> {
    vec![
        Album::new("1", "Blue Train", "Rell", 56.99),
        Album::new("2", "Jeru", "portillas", 17.99),
        Album::new("3", "lol found hahh", "Sarah Vaughan", 39.99),
    ]
}
