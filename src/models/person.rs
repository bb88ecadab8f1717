//! Person profile, filmography and image shapes, plus multi-search results.

use serde::{Deserialize, Serialize};

use super::{Identified, Image, MovieSummary, TvSummary};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PersonSummary {
    pub id: u64,
    pub name: String,
    #[serde(default)]
    pub profile_path: Option<String>,
    #[serde(default)]
    pub known_for_department: Option<String>,
    #[serde(default)]
    pub popularity: f64,
}

impl Identified for PersonSummary {
    fn id(&self) -> u64 {
        self.id
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PersonDetails {
    pub id: u64,
    pub name: String,
    #[serde(default)]
    pub biography: Option<String>,
    #[serde(default)]
    pub birthday: Option<String>,
    #[serde(default)]
    pub deathday: Option<String>,
    #[serde(default)]
    pub place_of_birth: Option<String>,
    #[serde(default)]
    pub profile_path: Option<String>,
    #[serde(default)]
    pub known_for_department: Option<String>,
    #[serde(default)]
    pub also_known_as: Vec<String>,
    #[serde(default)]
    pub popularity: f64,
}

impl PersonDetails {
    pub fn summary(&self) -> PersonSummary {
        PersonSummary {
            id: self.id,
            name: self.name.clone(),
            profile_path: self.profile_path.clone(),
            known_for_department: self.known_for_department.clone(),
            popularity: self.popularity,
        }
    }
}

// == Filmography ==
/// A movie the person acted in.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CastCredit {
    #[serde(flatten)]
    pub movie: MovieSummary,
    #[serde(default)]
    pub character: Option<String>,
}

/// A movie the person worked on behind the camera.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CrewCredit {
    #[serde(flatten)]
    pub movie: MovieSummary,
    #[serde(default)]
    pub job: Option<String>,
    #[serde(default)]
    pub department: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PersonMovieCredits {
    #[serde(default)]
    pub id: Option<u64>,
    #[serde(default)]
    pub cast: Vec<CastCredit>,
    #[serde(default)]
    pub crew: Vec<CrewCredit>,
}

impl PersonMovieCredits {
    /// Acting credits, most popular first.
    pub fn known_for(&self) -> Vec<&MovieSummary> {
        let mut movies: Vec<&MovieSummary> = self.cast.iter().map(|c| &c.movie).collect();
        movies.sort_by(|a, b| b.popularity.total_cmp(&a.popularity));
        movies
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PersonImages {
    #[serde(default)]
    pub id: Option<u64>,
    #[serde(default)]
    pub profiles: Vec<Image>,
}

// == Multi Search ==
/// One hit from a search across movies, series and people.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "media_type", rename_all = "lowercase")]
pub enum MultiSearchResult {
    Movie(MovieSummary),
    Tv(TvSummary),
    Person(PersonSummary),
}
