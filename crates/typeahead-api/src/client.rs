//! Blocking client for the remote autocomplete endpoint

use crate::{ApiError, Settings, USER_AGENT};
use reqwest::blocking::Client;
use reqwest::header::{ACCEPT, AUTHORIZATION};
use serde::Deserialize;
use serde_json::Value;
use typeahead_core::{Candidate, CandidateSource};
use url::Url;

#[derive(Deserialize)]
struct AutocompleteResponse {
    #[serde(default)]
    autocomplete: Option<Vec<Value>>,
}

/// Parse an autocomplete response body.
///
/// A missing or `null` `autocomplete` field means no candidates. Entries that are not
/// JSON objects are skipped; objects with missing fields are kept.
pub fn parse_autocomplete(body: &str) -> Result<Vec<Candidate>, ApiError> {
    let response: AutocompleteResponse = serde_json::from_str(body)?;

    let candidates = response
        .autocomplete
        .unwrap_or_default()
        .iter()
        .enumerate()
        .filter_map(|(i, value)| {
            let candidate = Candidate::from_json(value);
            if candidate.is_none() {
                log::warn!("Skipping malformed autocomplete entry #{}: {}", i, value);
            }
            candidate
        })
        .collect();

    Ok(candidates)
}

#[derive(Debug, Clone)]
pub struct AutocompleteClient {
    http: Client,
    settings: Settings,
}

impl AutocompleteClient {
    pub fn new(settings: Settings) -> Result<Self, ApiError> {
        let http = Client::builder()
            .user_agent(USER_AGENT)
            .timeout(settings.timeout())
            .build()?;
        Ok(Self { http, settings })
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// `<endpoint>?q=<query>&limit=<page size>&from=<offset>`
    pub fn request_url(&self, query: &str) -> Url {
        let mut url = self.settings.endpoint.clone();
        url.query_pairs_mut()
            .append_pair("q", query)
            .append_pair("limit", &self.settings.page_size.to_string())
            .append_pair("from", &self.settings.offset.to_string());
        url
    }

    /// Fetch the raw (unranked) candidates for `query`
    pub fn search(&self, query: &str) -> Result<Vec<Candidate>, ApiError> {
        let url = self.request_url(query);
        log::debug!("GET {}", url);

        let mut request = self.http.get(url).header(ACCEPT, "application/json");
        if let Some(token) = &self.settings.token {
            request = request.header(AUTHORIZATION, token);
        }

        let response = request.send()?;
        let status = response.status();
        if !status.is_success() {
            return Err(ApiError::Status(status));
        }

        let body = response.text()?;
        parse_autocomplete(&body)
    }
}

impl CandidateSource for AutocompleteClient {
    fn fetch(&self, query: &str) -> anyhow::Result<Vec<Candidate>> {
        Ok(self.search(query)?)
    }
}
