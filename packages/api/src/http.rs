//! # HTTP backend: the real remote collaborator
//!
//! [`HttpBackend`] maps every [`Backend`] method onto one request against the
//! backend's REST API using `reqwest` (which runs on `fetch` in the browser).
//!
//! Responses are handled uniformly by [`HttpBackend::send`]: a 2xx body is
//! decoded as JSON, anything else becomes [`ApiError::Backend`] with the
//! message taken from the backend's error body, and a request that never got
//! a response becomes [`ApiError::Unreachable`].
//!
//! The list search always sends all five criteria, blank ones as empty
//! values. The backend only treats a request as a full search when `name`
//! and `ownerName` are present, so omitting them would silently return the
//! unfiltered list or the suggestion search instead.

use model::{Horse, HorseFamilyTree, HorseId, HorseSearch, HorseSuggestionQuery, Owner};
use reqwest::{Client, RequestBuilder};
use serde::de::DeserializeOwned;

use crate::backend::Backend;
use crate::error::{ApiError, ApiResult};

/// [`Backend`] over HTTP.
#[derive(Clone, Debug)]
pub struct HttpBackend {
    client: Client,
    base_url: String,
}

impl HttpBackend {
    pub fn new(base_url: &str) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn horses_url(&self) -> String {
        format!("{}/horses", self.base_url)
    }

    fn horse_url(&self, id: HorseId) -> String {
        format!("{}/horses/{id}", self.base_url)
    }

    fn owners_url(&self) -> String {
        format!("{}/owners", self.base_url)
    }

    async fn send<T: DeserializeOwned>(request: RequestBuilder) -> ApiResult<T> {
        let response = Self::dispatch(request).await?;
        response.json::<T>().await.map_err(|e| {
            tracing::error!("Failed to decode response: {}", e);
            ApiError::Decode(e.to_string())
        })
    }

    async fn dispatch(request: RequestBuilder) -> ApiResult<reqwest::Response> {
        let response = request.send().await.map_err(|e| {
            tracing::error!("Request failed: {}", e);
            ApiError::from(e)
        })?;

        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        let err = ApiError::from_body(status.as_u16(), status.canonical_reason(), &body);
        tracing::warn!("Backend returned {}", err);
        Err(err)
    }
}

impl Backend for HttpBackend {
    async fn list_horses(&self) -> ApiResult<Vec<Horse>> {
        tracing::debug!("GET /horses");
        Self::send(self.client.get(self.horses_url())).await
    }

    async fn search_horses(&self, search: &HorseSearch) -> ApiResult<Vec<Horse>> {
        let query = search_query(search);
        tracing::debug!("GET /horses {:?}", query);
        Self::send(self.client.get(self.horses_url()).query(&query)).await
    }

    async fn suggest_horses(&self, query: &HorseSuggestionQuery) -> ApiResult<Vec<Horse>> {
        let query = suggestion_query(query);
        tracing::debug!("GET /horses {:?}", query);
        Self::send(self.client.get(self.horses_url()).query(&query)).await
    }

    async fn get_horse(&self, id: HorseId) -> ApiResult<Horse> {
        tracing::debug!("GET /horses/{}", id);
        Self::send(self.client.get(self.horse_url(id))).await
    }

    async fn create_horse(&self, horse: &Horse) -> ApiResult<Horse> {
        tracing::debug!("POST /horses {}", horse.name);
        Self::send(self.client.post(self.horses_url()).json(horse)).await
    }

    async fn update_horse(&self, id: HorseId, horse: &Horse) -> ApiResult<Horse> {
        tracing::debug!("PUT /horses/{}", id);
        Self::send(self.client.put(self.horse_url(id)).json(horse)).await
    }

    async fn delete_horse(&self, id: HorseId) -> ApiResult<()> {
        tracing::debug!("DELETE /horses/{}", id);
        Self::dispatch(self.client.delete(self.horse_url(id)))
            .await
            .map(|_| ())
    }

    async fn family_tree(&self, id: HorseId, generations: u32) -> ApiResult<Vec<HorseFamilyTree>> {
        tracing::debug!("GET /horses/{}/familytree generations={}", id, generations);
        let url = format!("{}/familytree", self.horse_url(id));
        Self::send(
            self.client
                .get(url)
                .query(&[("generations", generations.to_string())]),
        )
        .await
    }

    async fn list_owners(&self) -> ApiResult<Vec<Owner>> {
        tracing::debug!("GET /owners");
        Self::send(self.client.get(self.owners_url())).await
    }

    async fn search_owners(&self, name: &str, max_amount: usize) -> ApiResult<Vec<Owner>> {
        let query = owner_search_query(name, max_amount);
        tracing::debug!("GET /owners {:?}", query);
        Self::send(self.client.get(self.owners_url()).query(&query)).await
    }

    async fn create_owner(&self, owner: &Owner) -> ApiResult<Owner> {
        tracing::debug!("POST /owners {}", owner.full_name());
        Self::send(self.client.post(self.owners_url()).json(owner)).await
    }
}

/// Query parameters of the list search.
pub fn search_query(search: &HorseSearch) -> Vec<(&'static str, String)> {
    vec![
        ("name", search.name.clone().unwrap_or_default()),
        ("description", search.description.clone().unwrap_or_default()),
        (
            "bornBefore",
            search
                .born_before
                .map(|d| d.format("%Y-%m-%d").to_string())
                .unwrap_or_default(),
        ),
        (
            "sex",
            search.sex.map(|s| s.as_str().to_string()).unwrap_or_default(),
        ),
        ("ownerName", search.owner_name.clone().unwrap_or_default()),
    ]
}

/// Query parameters of the mother/father autocomplete.
pub fn suggestion_query(query: &HorseSuggestionQuery) -> Vec<(&'static str, String)> {
    vec![
        ("name", query.name.clone()),
        ("sex", query.sex.as_str().to_string()),
        ("limit", query.limit.to_string()),
    ]
}

/// Query parameters of the owner name search.
pub fn owner_search_query(name: &str, max_amount: usize) -> Vec<(&'static str, String)> {
    vec![("name", name.to_string()), ("maxAmount", max_amount.to_string())]
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use model::Sex;

    #[test]
    fn test_search_query_sends_every_criterion() {
        let search = HorseSearch {
            sex: Some(Sex::Female),
            ..HorseSearch::default()
        };
        assert_eq!(
            search_query(&search),
            vec![
                ("name", String::new()),
                ("description", String::new()),
                ("bornBefore", String::new()),
                ("sex", "FEMALE".to_string()),
                ("ownerName", String::new()),
            ]
        );

        let search = HorseSearch {
            name: Some("Wind".to_string()),
            born_before: NaiveDate::from_ymd_opt(2020, 2, 3),
            owner_name: Some("Ada".to_string()),
            ..HorseSearch::default()
        };
        let query = search_query(&search);
        assert_eq!(query[0], ("name", "Wind".to_string()));
        assert_eq!(query[2], ("bornBefore", "2020-02-03".to_string()));
        assert_eq!(query[3], ("sex", String::new()));
        assert_eq!(query[4], ("ownerName", "Ada".to_string()));
    }

    #[test]
    fn test_suggestion_query() {
        let query = HorseSuggestionQuery {
            name: "Ma".to_string(),
            sex: Sex::Male,
            limit: 5,
        };
        assert_eq!(
            suggestion_query(&query),
            vec![
                ("name", "Ma".to_string()),
                ("sex", "MALE".to_string()),
                ("limit", "5".to_string()),
            ]
        );
    }

    #[test]
    fn test_owner_search_query() {
        assert_eq!(
            owner_search_query("Ad", 3),
            vec![("name", "Ad".to_string()), ("maxAmount", "3".to_string())]
        );
    }

    #[test]
    fn test_urls_ignore_trailing_slash() {
        let backend = HttpBackend::new("http://localhost:8080/");
        assert_eq!(backend.base_url(), "http://localhost:8080");
        assert_eq!(backend.horses_url(), "http://localhost:8080/horses");
        assert_eq!(backend.horse_url(7), "http://localhost:8080/horses/7");
        assert_eq!(backend.owners_url(), "http://localhost:8080/owners");
    }
}
