//! Remote user directory.
//!
//! Fetches `GET {base}/users` and groups users by department. Departments
//! are not known up front; the category set is whatever the payload
//! contains, sorted by name.

use std::collections::BTreeSet;

use reqwest::Client;
use serde::Deserialize;
use sorter_core::{CategoryId, Record, Roster};
use tracing::{debug, info};
use url::Url;

use crate::error::{Error, Result};

/// Default directory endpoint.
pub const DEFAULT_BASE_URL: &str = "https://dummyjson.com";

/// Department for users that have none.
pub const UNKNOWN_DEPARTMENT: &str = "Unknown";

/// A user as the directory returns it.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiUser {
    /// User id.
    pub id: u64,
    /// Given name.
    pub first_name: String,
    /// Family name.
    pub last_name: String,
    /// Employer details.
    #[serde(default)]
    pub company: Option<Company>,
}

impl ApiUser {
    /// Full display name.
    #[must_use]
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }

    /// Department, or [`UNKNOWN_DEPARTMENT`] when missing or empty.
    #[must_use]
    pub fn department(&self) -> &str {
        self.company
            .as_ref()
            .and_then(|company| company.department.as_deref())
            .filter(|department| !department.is_empty())
            .unwrap_or(UNKNOWN_DEPARTMENT)
    }
}

/// Employer details.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Company {
    /// Department name.
    #[serde(default)]
    pub department: Option<String>,
}

/// Response body of the users endpoint.
#[derive(Debug, Deserialize)]
struct UsersPage {
    users: Vec<ApiUser>,
}

/// HTTP client for the user directory.
#[derive(Debug, Clone)]
pub struct UsersClient {
    base_url: Url,
    http_client: Client,
}

impl UsersClient {
    /// Creates a client for the directory at `base_url`.
    ///
    /// # Errors
    ///
    /// Returns an error if the URL is invalid.
    pub fn new(base_url: impl AsRef<str>) -> Result<Self> {
        let mut base_url = Url::parse(base_url.as_ref())?;
        if !base_url.path().ends_with('/') {
            let path = format!("{}/", base_url.path());
            base_url.set_path(&path);
        }
        Ok(Self {
            base_url,
            http_client: Client::new(),
        })
    }

    /// Client for the public demo directory at [`DEFAULT_BASE_URL`].
    ///
    /// # Errors
    ///
    /// Returns an error if URL parsing fails.
    pub fn dummyjson() -> Result<Self> {
        Self::new(DEFAULT_BASE_URL)
    }

    /// The endpoint that will be fetched.
    ///
    /// # Errors
    ///
    /// Returns an error if the URL cannot be built.
    pub fn users_url(&self) -> Result<Url> {
        Ok(self.base_url.join("users")?)
    }

    /// Fetches every user.
    ///
    /// # Errors
    ///
    /// Returns an error on network failure, a non-success status, or a body
    /// that is not a users page.
    pub async fn fetch_users(&self) -> Result<Vec<ApiUser>> {
        let url = self.users_url()?;
        debug!("Fetching users from {url}");

        let response = self.http_client.get(url).send().await?;
        if !response.status().is_success() {
            return Err(Error::Status(response.status().as_u16()));
        }

        let body = response.bytes().await?;
        let page: UsersPage = serde_json::from_slice(&body)?;
        info!("Fetched {} users", page.users.len());
        Ok(page.users)
    }

    /// Fetches every user and groups them by department.
    ///
    /// # Errors
    ///
    /// See [`UsersClient::fetch_users`].
    pub async fn fetch_roster(&self) -> Result<Roster> {
        let users = self.fetch_users().await?;
        Ok(roster_from_users(&users))
    }
}

/// Maps users to a roster, keeping their order.
///
/// Categories are the distinct departments, sorted by name.
#[must_use]
pub fn roster_from_users(users: &[ApiUser]) -> Roster {
    let departments: BTreeSet<&str> = users.iter().map(ApiUser::department).collect();
    let categories = departments.into_iter().map(CategoryId::new).collect();

    let records = users
        .iter()
        .map(|user| {
            let department = user.department();
            Record::new(user.id.to_string(), department, user.full_name()).with_detail(department)
        })
        .collect();

    Roster::new(categories, records)
}
