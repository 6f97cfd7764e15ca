//! Domain Layer
//!
//! Owned resources, their value objects, ownership rule and repository traits.

pub mod entities;
pub mod ownership;
pub mod repository;
pub mod services;
pub mod value_objects;

pub use entities::{Comment, Favorite, NewComment, NewFavorite, NewRating, Rating};
pub use ownership::OwnedByUser;
pub use repository::{CommentRepository, FavoriteRepository, RatingRepository};
pub use services::RatingStats;
