//! Unsplash random photo client.

use serde::Deserialize;
use tracing::info;
use ureq::Agent;
use wxpub_config::UnsplashConfig;

use crate::error::CoverError;
use crate::http::{agent, success_body};

/// Unsplash API base URL.
const API_URL: &str = "https://api.unsplash.com";

/// Upper bound for downloaded photos.
const MAX_PHOTO_BYTES: u64 = 20 * 1024 * 1024;

/// Unsplash API client.
pub struct UnsplashClient {
    agent: Agent,
    base_url: String,
    access_key: String,
    orientation: String,
}

/// Photo picked as article cover.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Photo {
    /// Unsplash photo ID.
    pub id: String,
    /// Regular-size image URL.
    pub url: String,
    /// Photographer display name.
    pub photographer: String,
    /// Photographer profile page.
    pub profile_url: Option<String>,
}

impl Photo {
    /// Attribution line for the article footer.
    #[must_use]
    pub fn attribution(&self) -> String {
        format!("Unsplash / {}", self.photographer)
    }
}

/// Random photo API response.
///
/// Only includes fields that are actually used.
#[derive(Debug, Deserialize)]
struct RandomPhotoResponse {
    id: String,
    urls: PhotoUrls,
    user: PhotoUser,
}

#[derive(Debug, Deserialize)]
struct PhotoUrls {
    regular: Option<String>,
}

#[derive(Debug, Deserialize)]
struct PhotoUser {
    name: String,
    #[serde(default)]
    links: Option<UserLinks>,
}

#[derive(Debug, Deserialize)]
struct UserLinks {
    html: Option<String>,
}

impl TryFrom<RandomPhotoResponse> for Photo {
    type Error = CoverError;

    fn try_from(response: RandomPhotoResponse) -> Result<Self, Self::Error> {
        let url = response
            .urls
            .regular
            .ok_or(CoverError::MissingField("urls.regular"))?;
        Ok(Self {
            id: response.id,
            url,
            photographer: response.user.name,
            profile_url: response.user.links.and_then(|links| links.html),
        })
    }
}

impl UnsplashClient {
    /// Create client for the given access key and orientation.
    pub fn new(access_key: impl Into<String>, orientation: impl Into<String>) -> Self {
        Self {
            agent: agent(),
            base_url: API_URL.to_owned(),
            access_key: access_key.into(),
            orientation: orientation.into(),
        }
    }

    /// Create client from the `[unsplash]` config section.
    #[must_use]
    pub fn from_config(config: &UnsplashConfig) -> Self {
        Self::new(&config.access_key, &config.orientation)
    }

    /// Fetch a random photo matching `query`.
    ///
    /// # Errors
    ///
    /// Returns [`CoverError`] on network failure, error status, or an
    /// unexpected response body.
    pub fn random_photo(&self, query: &str) -> Result<Photo, CoverError> {
        let url = format!("{}/photos/random", self.base_url);

        info!("Searching Unsplash for '{}'", query);

        let response = self
            .agent
            .get(&url)
            .query("query", query)
            .query("orientation", &self.orientation)
            .query("content_filter", "high")
            .header("Authorization", &format!("Client-ID {}", self.access_key))
            .header("Accept-Version", "v1")
            .call()?;

        let response: RandomPhotoResponse = success_body(response)?.read_json()?;
        let photo = Photo::try_from(response)?;
        info!("Picked photo {} by {}", photo.id, photo.photographer);
        Ok(photo)
    }

    /// Download the photo's image bytes.
    ///
    /// # Errors
    ///
    /// Returns [`CoverError`] on network failure or error status.
    pub fn download(&self, photo: &Photo) -> Result<Vec<u8>, CoverError> {
        info!("Downloading photo {}", photo.id);

        let response = self.agent.get(&photo.url).call()?;
        let mut body = success_body(response)?;
        let bytes = body.with_config().limit(MAX_PHOTO_BYTES).read_to_vec()?;

        info!("Downloaded {} bytes", bytes.len());
        Ok(bytes)
    }
}
