//! Service layer for the album store.
//! - `albums` holds the domain record, validation rules and the store abstraction.
//! - `errors` is the error taxonomy every store operation reports through.

pub mod albums;
pub mod errors;
