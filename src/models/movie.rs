//! Movie listing and detail shapes.

use serde::{Deserialize, Serialize};

use super::{Credits, Genre, Identified, Paged, VideoList};

// == Movie Summary ==
/// A movie as it appears in listings, search results and favorites.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MovieSummary {
    pub id: u64,
    pub title: String,
    #[serde(default)]
    pub original_title: Option<String>,
    #[serde(default)]
    pub overview: Option<String>,
    #[serde(default)]
    pub poster_path: Option<String>,
    #[serde(default)]
    pub backdrop_path: Option<String>,
    #[serde(default)]
    pub release_date: Option<String>,
    #[serde(default)]
    pub genre_ids: Vec<u64>,
    #[serde(default)]
    pub vote_average: f64,
    #[serde(default)]
    pub vote_count: u64,
    #[serde(default)]
    pub popularity: f64,
}

impl Identified for MovieSummary {
    fn id(&self) -> u64 {
        self.id
    }
}

// == Movie Details ==
/// Full movie record, with credits, videos and similar titles when they were
/// appended to the response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MovieDetails {
    pub id: u64,
    pub title: String,
    #[serde(default)]
    pub original_title: Option<String>,
    #[serde(default)]
    pub overview: Option<String>,
    #[serde(default)]
    pub tagline: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub release_date: Option<String>,
    #[serde(default)]
    pub runtime: Option<u32>,
    #[serde(default)]
    pub genres: Vec<Genre>,
    #[serde(default)]
    pub poster_path: Option<String>,
    #[serde(default)]
    pub backdrop_path: Option<String>,
    #[serde(default)]
    pub vote_average: f64,
    #[serde(default)]
    pub vote_count: u64,
    #[serde(default)]
    pub budget: Option<u64>,
    #[serde(default)]
    pub revenue: Option<u64>,
    #[serde(default)]
    pub credits: Option<Credits>,
    #[serde(default)]
    pub videos: Option<VideoList>,
    #[serde(default)]
    pub similar: Option<Paged<MovieSummary>>,
}

impl MovieDetails {
    /// The listing view of this movie, as stored in favorites.
    pub fn summary(&self) -> MovieSummary {
        MovieSummary {
            id: self.id,
            title: self.title.clone(),
            original_title: self.original_title.clone(),
            overview: self.overview.clone(),
            poster_path: self.poster_path.clone(),
            backdrop_path: self.backdrop_path.clone(),
            release_date: self.release_date.clone(),
            genre_ids: self.genres.iter().map(|g| g.id).collect(),
            vote_average: self.vote_average,
            vote_count: self.vote_count,
            popularity: 0.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_summary_tolerates_nulls() {
        let movie: MovieSummary = serde_json::from_value(json!({
            "id": 550,
            "title": "Fight Club",
            "poster_path": null,
            "release_date": "1999-10-15",
            "vote_average": 8.4
        }))
        .unwrap();

        assert_eq!(movie.id(), 550);
        assert!(movie.poster_path.is_none());
        assert!(movie.genre_ids.is_empty());
    }

    #[test]
    fn test_details_with_appended_relations() {
        let details: MovieDetails = serde_json::from_value(json!({
            "id": 550,
            "title": "Fight Club",
            "runtime": 139,
            "genres": [{"id": 18, "name": "Drama"}],
            "credits": {"cast": [{"id": 819, "name": "Edward Norton", "character": "Narrator"}], "crew": []},
            "videos": {"results": []},
            "similar": {"page": 1, "results": [{"id": 807, "title": "Se7en"}], "total_pages": 3, "total_results": 60}
        }))
        .unwrap();

        assert_eq!(details.runtime, Some(139));
        assert_eq!(details.credits.as_ref().unwrap().cast[0].name, "Edward Norton");
        assert!(details.similar.as_ref().unwrap().has_next());
        assert_eq!(details.summary().genre_ids, vec![18]);
    }

    #[test]
    fn test_summary_requires_title() {
        let result: Result<MovieSummary, _> = serde_json::from_value(json!({"id": 1}));
        assert!(result.is_err());
    }
}
