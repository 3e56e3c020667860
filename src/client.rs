use std::collections::BTreeMap;

use anyhow::{bail, Context, Result};
use reqwest::{Client, Response};
use tracing::debug;

use crate::models::{Activity, ErrorResponse, MessageResponse};

/// Typed client for the activities JSON API.
pub struct RosterClient {
    client: Client,
    base_url: String,
}

impl RosterClient {
    pub fn new(base_url: &str) -> Result<Self> {
        let client = Client::builder()
            .build()
            .context("Failed to build HTTP client")?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Fetch every activity, keyed (and sorted) by name.
    pub async fn list_activities(&self) -> Result<BTreeMap<String, Activity>> {
        let url = format!("{}/activities", self.base_url);

        let resp = self
            .client
            .get(&url)
            .send()
            .await
            .context("Failed to fetch activities")?;

        let text = read_success(resp).await?;
        let mut activities: BTreeMap<String, Activity> = serde_json::from_str(&text)
            .with_context(|| format!("Failed to parse activities: {text}"))?;
        for (name, activity) in activities.iter_mut() {
            activity.name = name.clone();
        }
        debug!("Fetched {} activities", activities.len());
        Ok(activities)
    }

    pub async fn sign_up(&self, activity_name: &str, email: &str) -> Result<String> {
        self.post_roster_change(activity_name, "signup", email).await
    }

    pub async fn withdraw(&self, activity_name: &str, email: &str) -> Result<String> {
        self.post_roster_change(activity_name, "withdraw", email).await
    }

    async fn post_roster_change(&self, activity_name: &str, action: &str, email: &str) -> Result<String> {
        let url = format!(
            "{}/activities/{}/{}",
            self.base_url,
            urlencoding::encode(activity_name),
            action
        );

        let resp = self
            .client
            .post(&url)
            .query(&[("email", email)])
            .send()
            .await
            .with_context(|| format!("Failed to send {action} request"))?;

        let text = read_success(resp).await?;
        let body: MessageResponse = serde_json::from_str(&text)
            .with_context(|| format!("Failed to parse {action} response: {text}"))?;
        Ok(body.message)
    }
}

/// Return the body of a 2xx response, or fail with the server's `detail`.
async fn read_success(resp: Response) -> Result<String> {
    let status = resp.status();
    let text = resp.text().await.context("Failed to read response")?;
    debug!("Response (status {}): {}", status, text);

    if !status.is_success() {
        match serde_json::from_str::<ErrorResponse>(&text) {
            Ok(err) => bail!("{} ({})", err.detail, status),
            Err(_) => bail!("Request failed ({status}): {text}"),
        }
    }
    Ok(text)
}
