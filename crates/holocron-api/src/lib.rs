// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use anyhow::{Context, Result, anyhow, bail};
use reqwest::StatusCode;
use reqwest::blocking::{Client as HttpClient, Response};
use serde::Deserialize;
use serde::de::DeserializeOwned;
use std::time::Duration;
use url::Url;

use holocron_app::{
    Character, CharacterFormInput, CharacterId, Film, Page, PageRequest, Planet, Species,
    Starship, SupportData, Vehicle,
};

mod wire;

use wire::CharacterFormWire;

/// Blocking REST client for the catalog API.
///
/// One instance per process; the base address is injected at
/// construction, never read from ambient state.
#[derive(Debug, Clone)]
pub struct Client {
    base_url: String,
    timeout: Duration,
    http: HttpClient,
}

impl Client {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self> {
        let base_url = base_url.trim_end_matches('/').to_owned();
        if base_url.is_empty() {
            bail!("api.base_url must not be empty");
        }
        Url::parse(&base_url)
            .with_context(|| format!("api.base_url {base_url:?} is not an absolute URL"))?;

        let http = HttpClient::builder()
            .timeout(timeout)
            .build()
            .context("build HTTP client")?;

        Ok(Self {
            base_url,
            timeout,
            http,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    pub fn characters(&self, request: &PageRequest) -> Result<Page<Character>> {
        self.fetch_page("characters", request)
    }

    pub fn films(&self, request: &PageRequest) -> Result<Page<Film>> {
        self.fetch_page("films", request)
    }

    pub fn species(&self, request: &PageRequest) -> Result<Page<Species>> {
        self.fetch_page("species", request)
    }

    pub fn starships(&self, request: &PageRequest) -> Result<Page<Starship>> {
        self.fetch_page("starships", request)
    }

    pub fn vehicles(&self, request: &PageRequest) -> Result<Page<Vehicle>> {
        self.fetch_page("vehicles", request)
    }

    pub fn planets(&self, request: &PageRequest) -> Result<Page<Planet>> {
        self.fetch_page("planets", request)
    }

    pub fn support_data(&self) -> Result<SupportData> {
        let response = self
            .http
            .get(format!("{}/characters/support-data", self.base_url))
            .send()
            .map_err(|error| connection_error(&self.base_url, &error))?;
        let response = check_status(response)?;
        response.json().context("decode support data")
    }

    pub fn create_character(&self, form: &CharacterFormInput) -> Result<()> {
        let response = self
            .http
            .post(format!("{}/characters", self.base_url))
            .json(&CharacterFormWire::from(form))
            .send()
            .map_err(|error| connection_error(&self.base_url, &error))?;
        check_status(response)?;
        Ok(())
    }

    pub fn update_character(&self, id: CharacterId, form: &CharacterFormInput) -> Result<()> {
        let response = self
            .http
            .put(format!("{}/characters/{}", self.base_url, id.get()))
            .json(&CharacterFormWire::from(form))
            .send()
            .map_err(|error| connection_error(&self.base_url, &error))?;
        check_status(response)?;
        Ok(())
    }

    pub fn delete_character(&self, id: CharacterId) -> Result<()> {
        let response = self
            .http
            .delete(format!("{}/characters/{}", self.base_url, id.get()))
            .send()
            .map_err(|error| connection_error(&self.base_url, &error))?;
        check_status(response)?;
        Ok(())
    }

    fn fetch_page<T: DeserializeOwned>(
        &self,
        entity: &str,
        request: &PageRequest,
    ) -> Result<Page<T>> {
        let mut params = vec![
            ("page", request.page.to_string()),
            ("size", request.size.to_string()),
        ];
        if let Some(search) = &request.search {
            params.push(("search", search.clone()));
        }
        if let Some(sort) = &request.sort {
            params.push(("sort", sort.clone()));
        }

        let response = self
            .http
            .get(format!("{}/{entity}", self.base_url))
            .query(&params)
            .send()
            .map_err(|error| connection_error(&self.base_url, &error))?;
        let response = check_status(response)?;
        response
            .json()
            .with_context(|| format!("decode {entity} page"))
    }
}

fn check_status(response: Response) -> Result<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let body = response.text().unwrap_or_default();
    Err(clean_error_response(status, &body))
}

fn connection_error(base_url: &str, error: &reqwest::Error) -> anyhow::Error {
    if error.is_timeout() {
        return anyhow!("catalog API at {base_url} timed out -- raise api.timeout or retry");
    }
    anyhow!(
        "cannot reach catalog API at {base_url} -- check api.base_url and that the server is up: {error}"
    )
}

fn clean_error_response(status: StatusCode, body: &str) -> anyhow::Error {
    #[derive(Deserialize)]
    struct ErrorBody {
        message: Option<String>,
        error: Option<String>,
    }

    if let Ok(parsed) = serde_json::from_str::<ErrorBody>(body) {
        if let Some(message) = parsed.message.or(parsed.error) {
            return anyhow!("catalog API returned {status}: {message}");
        }
    }

    let snippet = body.trim();
    if snippet.is_empty() {
        anyhow!("catalog API returned {status}")
    } else {
        let snippet: String = snippet.chars().take(200).collect();
        anyhow!("catalog API returned {status}: {snippet}")
    }
}
