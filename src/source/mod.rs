//! Everything that talks to, or mirrors, the Sorted service.

pub mod client;
pub mod images;
pub mod model;

pub use client::{RequestContext, SortedClient};
pub use images::{FetchedImage, ImageFetcher};
pub use model::{PackDetail, RawRecipe, UserPack};
