/// Streaming Availability API provider (via RapidAPI)
///
/// Looks up a show by IMDB ID and returns the raw per-country streaming options, or
/// searches movies by service catalog.
use crate::{
    models::{ApiShowDetails, ShowSearchPage, ShowSearchQuery},
    services::providers::{read_json, StreamingProvider, UpstreamError},
};
use reqwest::Client as HttpClient;
use std::time::Duration;

#[derive(Clone)]
pub struct StreamingAvailabilityProvider {
    http_client: HttpClient,
    api_key: String,
    api_url: String,
}

impl StreamingAvailabilityProvider {
    pub fn new(api_key: String, api_url: String, timeout: Duration) -> reqwest::Result<Self> {
        let http_client = HttpClient::builder().timeout(timeout).build()?;

        Ok(Self {
            http_client,
            api_key,
            api_url: api_url.trim_end_matches('/').to_string(),
        })
    }

    fn show_url(&self, imdb_id: &str) -> String {
        format!("{}/shows/{}", self.api_url, imdb_id)
    }

    fn search_url(&self) -> String {
        format!("{}/shows/search/filters", self.api_url)
    }
}

#[async_trait::async_trait]
impl StreamingProvider for StreamingAvailabilityProvider {
    async fn fetch_show(
        &self,
        imdb_id: &str,
        country: &str,
    ) -> Result<ApiShowDetails, UpstreamError> {
        let response = self
            .http_client
            .get(self.show_url(imdb_id))
            .header("X-RapidAPI-Key", &self.api_key)
            .query(&[("country", country)])
            .send()
            .await?;

        let details: ApiShowDetails = read_json(response).await?;

        tracing::debug!(
            imdb_id = %imdb_id,
            country = %country,
            regions = details.streaming_options.len(),
            provider = "streaming_availability",
            "Show fetched"
        );

        Ok(details)
    }

    async fn search_shows(&self, query: &ShowSearchQuery) -> Result<ShowSearchPage, UpstreamError> {
        let response = self
            .http_client
            .get(self.search_url())
            .header("X-RapidAPI-Key", &self.api_key)
            .query(query)
            .send()
            .await?;

        let page: ShowSearchPage = read_json(response).await?;

        tracing::debug!(
            catalogs = %query.catalogs,
            country = %query.country,
            shows = page.shows.len(),
            has_more = page.has_more,
            provider = "streaming_availability",
            "Shows searched"
        );

        Ok(page)
    }
}
