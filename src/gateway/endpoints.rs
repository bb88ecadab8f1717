//! Catalog operations
//!
//! One method per logical request. Each picks its cache domain, endpoint path
//! and parameters, then goes through `ApiGateway::fetch`.

use crate::cache::{CacheDomain, RequestParams};
use crate::error::Result;
use crate::models::{
    Credits, GenreList, MovieDetails, MovieSummary, MultiSearchResult, Paged, PersonDetails,
    PersonImages, PersonMovieCredits, PersonSummary, TvDetails, TvSummary, VideoList,
};

use super::ApiGateway;

/// Relations fetched together with a movie's details.
const MOVIE_APPEND: &str = "credits,videos,similar";
/// Relations fetched together with a series' details.
const TV_APPEND: &str = "credits,videos";

/// Page parameter, coerced to at least 1.
fn page_params(page: u32) -> RequestParams {
    RequestParams::new().with("page", page.max(1))
}

fn search_params(query: &str, page: u32) -> RequestParams {
    page_params(page)
        .with("query", query.trim())
        .with("include_adult", false)
}

fn discover_params(genre_id: u64, page: u32) -> RequestParams {
    page_params(page)
        .with("with_genres", genre_id)
        .with("sort_by", "popularity.desc")
}

impl ApiGateway {
    // == Movies (catalog) ==
    pub async fn popular_movies(&self, page: u32) -> Result<Paged<MovieSummary>> {
        self.fetch(CacheDomain::Catalog, "/movie/popular", page_params(page))
            .await
    }

    pub async fn top_rated_movies(&self, page: u32) -> Result<Paged<MovieSummary>> {
        self.fetch(CacheDomain::Catalog, "/movie/top_rated", page_params(page))
            .await
    }

    pub async fn now_playing_movies(&self, page: u32) -> Result<Paged<MovieSummary>> {
        self.fetch(CacheDomain::Catalog, "/movie/now_playing", page_params(page))
            .await
    }

    pub async fn upcoming_movies(&self, page: u32) -> Result<Paged<MovieSummary>> {
        self.fetch(CacheDomain::Catalog, "/movie/upcoming", page_params(page))
            .await
    }

    /// Movie details with credits, videos and similar titles appended.
    pub async fn movie_details(&self, movie_id: u64) -> Result<MovieDetails> {
        let params = RequestParams::new().with("append_to_response", MOVIE_APPEND);
        self.fetch(CacheDomain::Catalog, &format!("/movie/{}", movie_id), params)
            .await
    }

    pub async fn movie_credits(&self, movie_id: u64) -> Result<Credits> {
        self.fetch(
            CacheDomain::Catalog,
            &format!("/movie/{}/credits", movie_id),
            RequestParams::new(),
        )
        .await
    }

    pub async fn movie_videos(&self, movie_id: u64) -> Result<VideoList> {
        self.fetch(
            CacheDomain::Catalog,
            &format!("/movie/{}/videos", movie_id),
            RequestParams::new(),
        )
        .await
    }

    pub async fn similar_movies(&self, movie_id: u64, page: u32) -> Result<Paged<MovieSummary>> {
        self.fetch(
            CacheDomain::Catalog,
            &format!("/movie/{}/similar", movie_id),
            page_params(page),
        )
        .await
    }

    // == Series (catalog) ==
    pub async fn popular_tv(&self, page: u32) -> Result<Paged<TvSummary>> {
        self.fetch(CacheDomain::Catalog, "/tv/popular", page_params(page))
            .await
    }

    pub async fn top_rated_tv(&self, page: u32) -> Result<Paged<TvSummary>> {
        self.fetch(CacheDomain::Catalog, "/tv/top_rated", page_params(page))
            .await
    }

    /// Series details with credits and videos appended.
    pub async fn tv_details(&self, tv_id: u64) -> Result<TvDetails> {
        let params = RequestParams::new().with("append_to_response", TV_APPEND);
        self.fetch(CacheDomain::Catalog, &format!("/tv/{}", tv_id), params)
            .await
    }

    // == Genres and discovery ==
    pub async fn movie_genres(&self) -> Result<GenreList> {
        self.fetch(CacheDomain::Discovery, "/genre/movie/list", RequestParams::new())
            .await
    }

    pub async fn tv_genres(&self) -> Result<GenreList> {
        self.fetch(CacheDomain::Discovery, "/genre/tv/list", RequestParams::new())
            .await
    }

    /// Most popular movies in a genre.
    pub async fn movies_by_genre(&self, genre_id: u64, page: u32) -> Result<Paged<MovieSummary>> {
        self.fetch(
            CacheDomain::Discovery,
            "/discover/movie",
            discover_params(genre_id, page),
        )
        .await
    }

    /// Most popular series in a genre.
    pub async fn tv_by_genre(&self, genre_id: u64, page: u32) -> Result<Paged<TvSummary>> {
        self.fetch(
            CacheDomain::Discovery,
            "/discover/tv",
            discover_params(genre_id, page),
        )
        .await
    }

    // == People ==
    pub async fn popular_people(&self, page: u32) -> Result<Paged<PersonSummary>> {
        self.fetch(CacheDomain::Person, "/person/popular", page_params(page))
            .await
    }

    pub async fn person_details(&self, person_id: u64) -> Result<PersonDetails> {
        self.fetch(
            CacheDomain::Person,
            &format!("/person/{}", person_id),
            RequestParams::new(),
        )
        .await
    }

    pub async fn person_movie_credits(&self, person_id: u64) -> Result<PersonMovieCredits> {
        self.fetch(
            CacheDomain::Person,
            &format!("/person/{}/movie_credits", person_id),
            RequestParams::new(),
        )
        .await
    }

    pub async fn person_images(&self, person_id: u64) -> Result<PersonImages> {
        self.fetch(
            CacheDomain::Person,
            &format!("/person/{}/images", person_id),
            RequestParams::new(),
        )
        .await
    }

    // == Search ==
    pub async fn search_movies(&self, query: &str, page: u32) -> Result<Paged<MovieSummary>> {
        self.fetch(CacheDomain::Search, "/search/movie", search_params(query, page))
            .await
    }

    pub async fn search_tv(&self, query: &str, page: u32) -> Result<Paged<TvSummary>> {
        self.fetch(CacheDomain::Search, "/search/tv", search_params(query, page))
            .await
    }

    pub async fn search_people(&self, query: &str, page: u32) -> Result<Paged<PersonSummary>> {
        self.fetch(CacheDomain::Search, "/search/person", search_params(query, page))
            .await
    }

    /// Search across movies, series and people at once.
    pub async fn search_multi(&self, query: &str, page: u32) -> Result<Paged<MultiSearchResult>> {
        self.fetch(CacheDomain::Search, "/search/multi", search_params(query, page))
            .await
    }
}
