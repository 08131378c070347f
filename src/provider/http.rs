//! HTTP implementation of the resource provider

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use std::time::Duration;

use crate::{
    config::BackendConfig,
    error::{ClientError, ClientResult},
    models::{
        filters::Availability, Book, FilterCatalog, FilterState, ResourceKind, ResultPage,
        SuggestionSet,
    },
};

use super::ResourceProvider;

/// Reqwest-backed provider talking to the catalog backend.
#[derive(Clone)]
pub struct HttpProvider {
    client: reqwest::Client,
    base_url: String,
}

impl HttpProvider {
    pub fn new(config: &BackendConfig) -> ClientResult<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;
        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}/resources/{}", self.base_url, path)
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        url: String,
        params: &[(String, String)],
    ) -> ClientResult<T> {
        tracing::debug!(%url, params = params.len(), "issuing catalog request");
        let response = self.client.get(&url).query(params).send().await?;
        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(ClientError::Status {
                status: status.as_u16(),
                message,
            });
        }
        response
            .json::<T>()
            .await
            .map_err(|e| ClientError::Decode(e.to_string()))
    }
}

/// Projects the inclusive availability set onto the boolean the backend
/// expects; unrestricted sets send nothing.
fn availability_param(filters: &FilterState) -> Option<bool> {
    let available = filters.availability.contains(&Availability::AvailableToBorrow);
    let reserved = filters.availability.contains(&Availability::ReservedOnly);
    match (available, reserved) {
        (true, false) => Some(true),
        (false, true) => Some(false),
        _ => None,
    }
}

/// Request parameters for the filtered/searched endpoints.
///
/// Emission order and omission rules are part of the backend contract:
/// `query` (searched only), comma-joined `categories`/`languages` (omitted
/// when empty, never repeated keys), the year bounds, `isAvailable` when
/// restricted, and `page` last.
fn filter_params(filters: &FilterState, include_query: bool) -> Vec<(String, String)> {
    let mut params = Vec::new();
    if include_query {
        if let Some(query) = filters.active_query() {
            params.push(("query".to_string(), query.to_string()));
        }
    }
    if !filters.categories.is_empty() {
        params.push((
            "categories".to_string(),
            filters
                .categories
                .iter()
                .map(String::as_str)
                .collect::<Vec<_>>()
                .join(","),
        ));
    }
    if !filters.languages.is_empty() {
        params.push((
            "languages".to_string(),
            filters
                .languages
                .iter()
                .map(String::as_str)
                .collect::<Vec<_>>()
                .join(","),
        ));
    }
    params.push(("minYear".to_string(), filters.min_year.to_string()));
    params.push(("maxYear".to_string(), filters.max_year.to_string()));
    if let Some(is_available) = availability_param(filters) {
        params.push(("isAvailable".to_string(), is_available.to_string()));
    }
    params.push(("page".to_string(), filters.page.to_string()));
    params
}

#[async_trait]
impl ResourceProvider for HttpProvider {
    async fn fetch_all(&self, kind: ResourceKind, page: u32) -> ClientResult<ResultPage<Book>> {
        let params = vec![("page".to_string(), page.to_string())];
        self.get_json(self.url(kind.as_slug()), &params).await
    }

    async fn fetch_filtered(
        &self,
        kind: ResourceKind,
        filters: &FilterState,
    ) -> ClientResult<ResultPage<Book>> {
        let params = filter_params(filters, false);
        self.get_json(self.url(&format!("filtered-{}", kind.as_slug())), &params)
            .await
    }

    async fn fetch_searched(
        &self,
        kind: ResourceKind,
        filters: &FilterState,
    ) -> ClientResult<ResultPage<Book>> {
        let params = filter_params(filters, true);
        self.get_json(self.url(&format!("searched-{}", kind.as_slug())), &params)
            .await
    }

    async fn fetch_catalog(&self, kind: ResourceKind) -> ClientResult<FilterCatalog> {
        self.get_json(self.url(&format!("{}-filters", kind.as_slug())), &[])
            .await
    }

    async fn fetch_suggestions(
        &self,
        kind: ResourceKind,
        query: &str,
    ) -> ClientResult<SuggestionSet> {
        let params = vec![("query".to_string(), query.to_string())];
        self.get_json(self.url(&format!("suggested-{}", kind.as_slug())), &params)
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use indexmap::IndexSet;

    fn filters() -> FilterState {
        let mut filters = FilterState::default();
        filters.categories.insert("Fiction".to_string());
        filters.categories.insert("History".to_string());
        filters.languages.insert("English".to_string());
        filters.min_year = 1950;
        filters.max_year = 2020;
        filters.page = 2;
        filters
    }

    fn value_of<'a>(params: &'a [(String, String)], key: &str) -> Option<&'a str> {
        params
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    #[test]
    fn sets_are_comma_joined_single_parameters() {
        let params = filter_params(&filters(), false);
        assert_eq!(value_of(&params, "categories"), Some("Fiction,History"));
        assert_eq!(value_of(&params, "languages"), Some("English"));
        assert_eq!(params.iter().filter(|(k, _)| k == "categories").count(), 1);
    }

    #[test]
    fn empty_sets_omit_their_parameter() {
        let mut filters = FilterState::default();
        filters.page = 0;
        let params = filter_params(&filters, false);
        assert_eq!(value_of(&params, "categories"), None);
        assert_eq!(value_of(&params, "languages"), None);
        assert_eq!(value_of(&params, "minYear"), Some("1000"));
        assert_eq!(value_of(&params, "page"), Some("0"));
    }

    #[test]
    fn availability_projects_to_the_wire_boolean() {
        let mut filters = FilterState::default();
        assert_eq!(availability_param(&filters), None);

        filters.availability = IndexSet::from([Availability::AvailableToBorrow]);
        assert_eq!(availability_param(&filters), Some(true));

        filters.availability = IndexSet::from([Availability::ReservedOnly]);
        assert_eq!(availability_param(&filters), Some(false));
    }

    #[test]
    fn searched_params_lead_with_the_trimmed_query_and_end_with_page() {
        let mut filters = filters();
        filters.query = "  orwell  ".to_string();
        let params = filter_params(&filters, true);
        assert_eq!(params.first().map(|(k, _)| k.as_str()), Some("query"));
        assert_eq!(value_of(&params, "query"), Some("orwell"));
        assert_eq!(params.last().map(|(k, _)| k.as_str()), Some("page"));

        // Filtered requests never carry the query.
        let params = filter_params(&filters, false);
        assert_eq!(value_of(&params, "query"), None);
    }

    #[test]
    fn urls_follow_the_resource_routes() {
        let provider = HttpProvider::new(&BackendConfig {
            base_url: "http://localhost:8080/api/".to_string(),
            timeout_secs: 5,
        })
        .unwrap();
        assert_eq!(
            provider.url("filtered-books"),
            "http://localhost:8080/api/resources/filtered-books"
        );
        assert_eq!(
            provider.url("books-filters"),
            "http://localhost:8080/api/resources/books-filters"
        );
    }
}
