//! Core services behind the RPC surface: visibility, feed assembly,
//! thread/reply assembly, trending, toggles and the notification recorder.
//!
//! Every function takes the database handle explicitly; there is no shared
//! mutable state and no per-process caching. Each call recomputes what it
//! needs from the tables.

pub mod auth;
pub mod engagement;
pub mod error;
pub mod feed;
pub mod follow;
pub mod hashtag;
pub mod interaction;
pub mod notification;
pub mod page;
pub mod post;
pub mod thread;
pub mod trending;
pub mod views;
pub mod visibility;

pub use error::ServiceError;

pub use sea_orm;
