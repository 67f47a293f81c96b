//! Media module: descriptions of resolvable media and the resolvers producing them.

pub mod item;
pub mod remote;
pub mod resolver;

pub use item::{MediaInfo, MediaType};
pub use remote::RemoteResolver;
pub use resolver::{normalize_url, MediaResolver, PlaceholderResolver};
