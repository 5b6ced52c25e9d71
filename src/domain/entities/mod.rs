//! Core domain entities representing the gateway's data model.
//!
//! Entities are plain data structures. Each synchronized resource comes in
//! three shapes:
//!
//! - the stored entity ([`Todo`], [`Album`], [`Photo`]) with a store-assigned id
//! - the local-insertable record ([`NewTodo`], [`NewAlbum`], [`NewPhoto`]) with no id
//! - the upstream record ([`UpstreamTodo`], [`UpstreamAlbum`], [`UpstreamPhoto`])
//!   carrying the upstream-assigned id, which is dropped when it is mapped into
//!   the local-insertable record
//!
//! [`User`] and [`Principal`] describe accounts and authenticated identities.

pub mod album;
pub mod photo;
pub mod todo;
pub mod user;

pub use album::{Album, NewAlbum, UpstreamAlbum};
pub use photo::{NewPhoto, Photo, PhotoChanges, PhotoInput, UpstreamPhoto};
pub use todo::{NewTodo, Todo, TodoInput, UpstreamTodo};
pub use user::{NewUser, Principal, UpstreamUser, User, UserChanges};
