//! Crossref journal-name lookup
//!
//! Best-effort external lookup keyed by DOI. Every failure path (HTTP
//! error, non-success status, unexpected payload) degrades to `None`;
//! it never blocks record acceptance.

use std::time::Duration;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);
const USER_AGENT: &str = concat!("litdb/", env!("CARGO_PKG_VERSION"));

/// Resolver from DOI to journal (container) title.
pub trait JournalLookup {
    fn journal_for(&self, doi: &str) -> Option<String>;
}

/// `JournalLookup` backed by the Crossref works API.
pub struct CrossrefClient {
    client: reqwest::blocking::Client,
    base_url: String,
}

impl Default for CrossrefClient {
    fn default() -> Self {
        Self::new()
    }
}

impl CrossrefClient {
    pub fn new() -> Self {
        Self::with_base_url("https://api.crossref.org")
    }

    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        let client = reqwest::blocking::Client::builder()
            .user_agent(USER_AGENT)
            .timeout(REQUEST_TIMEOUT)
            .build()
            .expect("failed to build HTTP client");
        Self {
            client,
            base_url: base_url.into(),
        }
    }
}

impl JournalLookup for CrossrefClient {
    fn journal_for(&self, doi: &str) -> Option<String> {
        let url = format!("{}/works/{doi}", self.base_url);
        let response = match self.client.get(&url).send() {
            Ok(r) => r,
            Err(e) => {
                log::debug!("Crossref request failed for {doi}: {e}");
                return None;
            }
        };
        if !response.status().is_success() {
            log::debug!("Crossref returned {} for {doi}", response.status());
            return None;
        }
        let body: serde_json::Value = match response.json() {
            Ok(v) => v,
            Err(e) => {
                log::debug!("Crossref payload for {doi} was not JSON: {e}");
                return None;
            }
        };
        container_title(&body)
    }
}

/// Extract `message.container-title[0]` from a Crossref works response.
fn container_title(body: &serde_json::Value) -> Option<String> {
    body.get("message")?
        .get("container-title")?
        .get(0)?
        .as_str()
        .map(str::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn container_title_from_works_response() {
        let body = json!({
            "status": "ok",
            "message": {
                "DOI": "10.1186/s12967-020-02658-5",
                "container-title": ["Journal of Translational Medicine"]
            }
        });
        assert_eq!(
            container_title(&body),
            Some("Journal of Translational Medicine".to_string())
        );
    }

    #[test]
    fn missing_container_title_is_none() {
        assert_eq!(container_title(&json!({"message": {}})), None);
    }

    #[test]
    fn empty_container_title_list_is_none() {
        let body = json!({"message": {"container-title": []}});
        assert_eq!(container_title(&body), None);
    }

    #[test]
    fn non_string_entry_is_none() {
        let body = json!({"message": {"container-title": [42]}});
        assert_eq!(container_title(&body), None);
    }
}
