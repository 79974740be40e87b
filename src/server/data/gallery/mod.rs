//! Gallery repositories: items, votes, favorites and comments.

pub mod comment;
pub mod favorite;
pub mod item;
pub mod vote;

pub use comment::GalleryCommentRepository;
pub use favorite::GalleryFavoriteRepository;
pub use item::GalleryItemRepository;
pub use vote::GalleryVoteRepository;
