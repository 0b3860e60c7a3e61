/// TMDB movie catalog provider
///
/// API Flow:
/// 1. Discovery: /discover/movie with filter parameters and a page number
/// 2. Details: /movie/{id}?append_to_response=credits for runtime, credits and IMDB ID
use crate::{
    models::{DiscoverPage, DiscoverQuery, TmdbMovieDetails},
    services::providers::{read_json, CatalogProvider, UpstreamError},
};
use reqwest::Client as HttpClient;
use std::time::Duration;

#[derive(Clone)]
pub struct TmdbProvider {
    http_client: HttpClient,
    api_key: String,
    api_url: String,
}

impl TmdbProvider {
    pub fn new(api_key: String, api_url: String, timeout: Duration) -> reqwest::Result<Self> {
        let http_client = HttpClient::builder().timeout(timeout).build()?;

        Ok(Self {
            http_client,
            api_key,
            api_url: api_url.trim_end_matches('/').to_string(),
        })
    }

    fn discover_url(&self) -> String {
        format!("{}/discover/movie", self.api_url)
    }

    fn details_url(&self, movie_id: u64) -> String {
        format!("{}/movie/{}", self.api_url, movie_id)
    }

    fn details_request(&self, movie_id: u64, language: &str) -> reqwest::RequestBuilder {
        self.http_client.get(self.details_url(movie_id)).query(&[
            ("api_key", self.api_key.as_str()),
            ("language", language),
            ("append_to_response", "credits"),
        ])
    }
}

#[async_trait::async_trait]
impl CatalogProvider for TmdbProvider {
    async fn discover_movies(&self, query: &DiscoverQuery) -> Result<DiscoverPage, UpstreamError> {
        let response = self
            .http_client
            .get(self.discover_url())
            .query(&[("api_key", self.api_key.as_str())])
            .query(query)
            .send()
            .await?;

        let page: DiscoverPage = read_json(response).await?;

        tracing::debug!(
            page = page.page,
            results = page.results.len(),
            total_pages = page.total_pages,
            provider = "tmdb",
            "Discover page fetched"
        );

        Ok(page)
    }

    async fn movie_details(
        &self,
        movie_id: u64,
        language: &str,
    ) -> Result<TmdbMovieDetails, UpstreamError> {
        let response = self.details_request(movie_id, language).send().await?;

        read_json(response).await
    }
}
