//! Response models for the metadata API
//!
//! One shape per operation family. Gateway responses are decoded into these
//! at the boundary; a body that does not fit is rejected as malformed.

pub mod common;
pub mod movie;
pub mod person;
pub mod tv;

// Re-export commonly used types
pub use common::{
    CastMember, Credits, CrewMember, Genre, GenreList, Image, Paged, Video, VideoList,
};
pub use movie::{MovieDetails, MovieSummary};
pub use person::{
    CastCredit, CrewCredit, MultiSearchResult, PersonDetails, PersonImages, PersonMovieCredits,
    PersonSummary,
};
pub use tv::{SeasonSummary, TvDetails, TvSummary};

/// Catalog items carrying the numeric identifier favorites are keyed by.
pub trait Identified {
    fn id(&self) -> u64;
}
