//! Gym-review backend client
//!
//! The base URL comes from `RuntimeConfig::api_base_url()` on every call, so
//! runtime overrides take effect without rebuilding the client.

use std::sync::Arc;
use std::time::Duration;

use gymreview_common::config::RuntimeConfig;
use gymreview_domain::constants::NEARBY_GYM_PAGE_SIZE;
use gymreview_domain::{
    Gym, GymSearchQuery, GymSummary, GymUpsertRequest, PageResponse, Photo, Review, ReviewQuery,
    ReviewUpsertRequest,
};
use reqwest::multipart::{Form, Part};
use reqwest::{Client, RequestBuilder, Response, StatusCode};
use serde::de::DeserializeOwned;
use tracing::{debug, info, instrument, warn};
use url::Url;

use super::auth::AccessTokenProvider;
use super::errors::ApiError;

const HTTP_TIMEOUT: Duration = Duration::from_secs(30);

/// Typed client for the gym and review endpoints
#[derive(Clone)]
pub struct GymApiClient {
    config: RuntimeConfig,
    auth: Arc<dyn AccessTokenProvider>,
    http: Client,
}

impl GymApiClient {
    pub fn new(config: RuntimeConfig, auth: Arc<dyn AccessTokenProvider>) -> Self {
        let http = Client::builder().timeout(HTTP_TIMEOUT).build().unwrap_or_else(|e| {
            warn!(error = %e, "Failed to build HTTP client, falling back to defaults without timeout");
            Client::new()
        });
        Self { config, auth, http }
    }

    // Public endpoints

    /// `GET /gyms` with search filters
    ///
    /// # Errors
    /// Returns `ApiError` on transport, status or decode failure
    #[instrument(skip(self))]
    pub async fn search_gyms(
        &self,
        query: &GymSearchQuery,
    ) -> Result<PageResponse<GymSummary>, ApiError> {
        let mut url = self.endpoint(&["gyms"])?;
        url.query_pairs_mut().extend_pairs(query.to_query_pairs());
        self.fetch(self.http.get(url)).await
    }

    /// Gyms around a point, excluding `gym_id` itself
    ///
    /// # Errors
    /// Returns `ApiError` on transport, status or decode failure
    pub async fn nearby_gyms(
        &self,
        gym_id: &str,
        latitude: f64,
        longitude: f64,
        radius: f64,
    ) -> Result<PageResponse<GymSummary>, ApiError> {
        let query = GymSearchQuery {
            page: 1,
            size: NEARBY_GYM_PAGE_SIZE,
            ..GymSearchQuery::near(latitude, longitude, radius)
        };
        let page = self.search_gyms(&query).await?;
        Ok(page.retain(|gym| gym.id != gym_id))
    }

    /// `GET /gyms/{id}`
    ///
    /// # Errors
    /// `NotFound` for an unknown id, otherwise transport/status/decode errors
    #[instrument(skip(self))]
    pub async fn gym(&self, id: &str) -> Result<Gym, ApiError> {
        let url = self.endpoint(&["gyms", id])?;
        self.fetch(self.http.get(url)).await
    }

    /// `GET /gyms/{id}/reviews` with paging and sorting
    ///
    /// # Errors
    /// Returns `ApiError` on transport, status or decode failure
    #[instrument(skip(self))]
    pub async fn reviews(
        &self,
        gym_id: &str,
        query: &ReviewQuery,
    ) -> Result<PageResponse<Review>, ApiError> {
        let mut url = self.endpoint(&["gyms", gym_id, "reviews"])?;
        url.query_pairs_mut().extend_pairs(query.to_query_pairs());
        self.fetch(self.http.get(url)).await
    }

    /// `GET /gyms/{id}/reviews/{review_id}`
    ///
    /// The backend answers an unknown review with `204 No Content`.
    ///
    /// # Errors
    /// `NotFound` for an unknown review, otherwise transport/status/decode errors
    #[instrument(skip(self))]
    pub async fn review(&self, gym_id: &str, review_id: &str) -> Result<Review, ApiError> {
        let url = self.endpoint(&["gyms", gym_id, "reviews", review_id])?;
        let response = self.execute(self.http.get(url)).await?;
        if response.status() == StatusCode::NO_CONTENT {
            return Err(ApiError::NotFound(format!("Review {review_id}")));
        }

        let body = response.text().await?;
        if body.trim().is_empty() {
            return Err(ApiError::NotFound(format!("Review {review_id}")));
        }
        decode(&body)
    }

    /// Public URL of an uploaded photo
    #[must_use]
    pub fn photo_url(&self, photo: &Photo) -> String {
        format!("{}/photos/{}", self.config.api_base_url().trim_end_matches('/'), photo.url)
    }

    // Authenticated endpoints

    /// `POST /gyms`
    ///
    /// # Errors
    /// `NotAuthenticated` without a session, `Unauthorized` when the backend
    /// rejects the token, otherwise transport/status/decode errors
    #[instrument(skip(self, request), fields(name = %request.name))]
    pub async fn create_gym(&self, request: &GymUpsertRequest) -> Result<Gym, ApiError> {
        let url = self.endpoint(&["gyms"])?;
        let gym: Gym = self.fetch(self.authorized(self.http.post(url))?.json(request)).await?;
        info!(id = ?gym.id, "Gym created");
        Ok(gym)
    }

    /// `PUT /gyms/{id}`
    ///
    /// # Errors
    /// As for [`create_gym`](Self::create_gym), plus `NotFound`
    #[instrument(skip(self, request))]
    pub async fn update_gym(&self, id: &str, request: &GymUpsertRequest) -> Result<Gym, ApiError> {
        let url = self.endpoint(&["gyms", id])?;
        self.fetch(self.authorized(self.http.put(url))?.json(request)).await
    }

    /// `DELETE /gyms/{id}`
    ///
    /// # Errors
    /// As for [`create_gym`](Self::create_gym), plus `NotFound`
    #[instrument(skip(self))]
    pub async fn delete_gym(&self, id: &str) -> Result<(), ApiError> {
        let url = self.endpoint(&["gyms", id])?;
        self.execute(self.authorized(self.http.delete(url))?).await?;
        info!("Gym deleted");
        Ok(())
    }

    /// `POST /gyms/{id}/reviews`
    ///
    /// # Errors
    /// As for [`create_gym`](Self::create_gym)
    #[instrument(skip(self, request), fields(rating = request.rating))]
    pub async fn create_review(
        &self,
        gym_id: &str,
        request: &ReviewUpsertRequest,
    ) -> Result<Review, ApiError> {
        let url = self.endpoint(&["gyms", gym_id, "reviews"])?;
        self.fetch(self.authorized(self.http.post(url))?.json(request)).await
    }

    /// `PUT /gyms/{id}/reviews/{review_id}`
    ///
    /// # Errors
    /// As for [`create_gym`](Self::create_gym), plus `NotFound`
    #[instrument(skip(self, request))]
    pub async fn update_review(
        &self,
        gym_id: &str,
        review_id: &str,
        request: &ReviewUpsertRequest,
    ) -> Result<Review, ApiError> {
        let url = self.endpoint(&["gyms", gym_id, "reviews", review_id])?;
        self.fetch(self.authorized(self.http.put(url))?.json(request)).await
    }

    /// `DELETE /gyms/{id}/reviews/{review_id}`
    ///
    /// # Errors
    /// As for [`create_gym`](Self::create_gym), plus `NotFound`
    #[instrument(skip(self))]
    pub async fn delete_review(&self, gym_id: &str, review_id: &str) -> Result<(), ApiError> {
        let url = self.endpoint(&["gyms", gym_id, "reviews", review_id])?;
        self.execute(self.authorized(self.http.delete(url))?).await?;
        Ok(())
    }

    /// `POST /photos` as multipart field `file`
    ///
    /// The returned photo's `url` is the id to reference in upsert requests.
    ///
    /// # Errors
    /// As for [`create_gym`](Self::create_gym)
    #[instrument(skip(self, bytes), fields(size = bytes.len()))]
    pub async fn upload_photo(&self, file_name: &str, bytes: Vec<u8>) -> Result<Photo, ApiError> {
        let url = self.endpoint(&["photos"])?;
        let form = Form::new().part("file", Part::bytes(bytes).file_name(file_name.to_string()));
        let photo: Photo = self.fetch(self.authorized(self.http.post(url))?.multipart(form)).await?;
        debug!(url = %photo.url, "Photo uploaded");
        Ok(photo)
    }

    // Plumbing

    /// Base URL plus percent-encoded path segments
    fn endpoint(&self, segments: &[&str]) -> Result<Url, ApiError> {
        let base = self.config.api_base_url();
        let mut url = Url::parse(&base).map_err(|e| ApiError::InvalidUrl(format!("{base}: {e}")))?;
        url.path_segments_mut()
            .map_err(|()| ApiError::InvalidUrl(format!("{base}: cannot be a base")))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    fn authorized(&self, request: RequestBuilder) -> Result<RequestBuilder, ApiError> {
        let header = self.auth.bearer_header().ok_or(ApiError::NotAuthenticated)?;
        Ok(request.header(reqwest::header::AUTHORIZATION, header))
    }

    async fn execute(&self, request: RequestBuilder) -> Result<Response, ApiError> {
        let response = request.send().await?;
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        let err = ApiError::from_status(status, &body);
        warn!(status = status.as_u16(), error = %err, "Backend request failed");
        Err(err)
    }

    async fn fetch<T: DeserializeOwned>(&self, request: RequestBuilder) -> Result<T, ApiError> {
        let body = self.execute(request).await?.text().await?;
        decode(&body)
    }
}

fn decode<T: DeserializeOwned>(body: &str) -> Result<T, ApiError> {
    serde_json::from_str(body).map_err(|e| ApiError::Decode(e.to_string()))
}

impl std::fmt::Debug for GymApiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GymApiClient").field("config", &self.config).finish_non_exhaustive()
    }
}
