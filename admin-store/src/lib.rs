pub mod error;
pub mod models;
pub mod slug;
#[cfg(feature = "native-client")]
pub mod store;

pub use error::StoreError;
pub use models::{NewPost, Post, PostPatch};
#[cfg(feature = "native-client")]
pub use store::{PostStore, RestPostStore};
