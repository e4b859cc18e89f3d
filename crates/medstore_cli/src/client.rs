//! Blocking HTTP client for the record endpoints.
//!
//! # Invariants
//! - Only fetch carries a timeout.
//! - Any status other than 200 is an error, whatever the body says.

use crate::config::ClientConfig;
use log::{error, info};
use medstore_core::protocol::{
    DELETE_ID_PARAM, ENDPOINT_DELETE, ENDPOINT_FETCH, ENDPOINT_INSERT, ENDPOINT_UPDATE,
};
use medstore_core::{Medicine, MedicineId, MenuBackend};
use reqwest::blocking::{Client, RequestBuilder, Response};
use reqwest::StatusCode;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::time::{Duration, Instant};

pub type ClientResult<T> = Result<T, ClientError>;

#[derive(Debug)]
pub enum ClientError {
    /// Connection, timeout or body decoding failure.
    Http(reqwest::Error),
    /// The server answered with a non-200 status.
    Status { status: StatusCode, body: String },
}

impl Display for ClientError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Http(err) => write!(f, "{err}"),
            Self::Status { status, body } if body.is_empty() => {
                write!(f, "server returned non-200 status code: {status}")
            }
            Self::Status { status, body } => {
                write!(f, "server returned non-200 status code: {status}: {body}")
            }
        }
    }
}

impl Error for ClientError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Http(err) => Some(err),
            Self::Status { .. } => None,
        }
    }
}

impl From<reqwest::Error> for ClientError {
    fn from(value: reqwest::Error) -> Self {
        Self::Http(value)
    }
}

/// Client for one medstore server.
pub struct ApiClient {
    http: Client,
    base_url: String,
    fetch_timeout: Duration,
}

impl ApiClient {
    pub fn new(config: &ClientConfig) -> ClientResult<Self> {
        let http = Client::builder().timeout(None::<Duration>).build()?;
        Ok(Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            fetch_timeout: config.fetch_timeout,
        })
    }

    /// `GET /fetch`.
    pub fn fetch(&self) -> ClientResult<Vec<Medicine>> {
        let request = self
            .http
            .get(self.url(ENDPOINT_FETCH))
            .timeout(self.fetch_timeout);
        let response = self.send("GET", ENDPOINT_FETCH, request)?;
        Ok(response.json()?)
    }

    /// `POST /insert`; returns the server's confirmation text.
    pub fn insert(&self, medicine: &Medicine) -> ClientResult<String> {
        let request = self.http.post(self.url(ENDPOINT_INSERT)).json(medicine);
        Ok(self.send("POST", ENDPOINT_INSERT, request)?.text()?)
    }

    /// `PUT /update`; returns the server's confirmation text.
    pub fn update(&self, medicine: &Medicine) -> ClientResult<String> {
        let request = self.http.put(self.url(ENDPOINT_UPDATE)).json(medicine);
        Ok(self.send("PUT", ENDPOINT_UPDATE, request)?.text()?)
    }

    /// `DELETE /delete?id=<id>`; returns the server's confirmation text.
    pub fn delete(&self, id: MedicineId) -> ClientResult<String> {
        let request = self
            .http
            .delete(self.url(ENDPOINT_DELETE))
            .query(&[(DELETE_ID_PARAM, id)]);
        Ok(self.send("DELETE", ENDPOINT_DELETE, request)?.text()?)
    }

    fn url(&self, endpoint: &str) -> String {
        format!("{}{}", self.base_url, endpoint)
    }

    fn send(
        &self,
        method: &str,
        endpoint: &str,
        request: RequestBuilder,
    ) -> ClientResult<Response> {
        let started_at = Instant::now();
        let response = request.send().map_err(|err| {
            error!(
                "event=http_call module=client status=error method={} endpoint={} duration_ms={} error={}",
                method,
                endpoint,
                started_at.elapsed().as_millis(),
                err
            );
            ClientError::from(err)
        })?;

        let status = response.status();
        if status != StatusCode::OK {
            let body = response.text().unwrap_or_default();
            error!(
                "event=http_call module=client status=error method={} endpoint={} duration_ms={} http_status={}",
                method,
                endpoint,
                started_at.elapsed().as_millis(),
                status.as_u16()
            );
            return Err(ClientError::Status { status, body });
        }

        info!(
            "event=http_call module=client status=ok method={} endpoint={} duration_ms={}",
            method,
            endpoint,
            started_at.elapsed().as_millis()
        );
        Ok(response)
    }
}

impl MenuBackend for ApiClient {
    type Error = ClientError;

    fn insert(&self, medicine: &Medicine) -> Result<(), Self::Error> {
        ApiClient::insert(self, medicine).map(|_| ())
    }

    fn update(&self, medicine: &Medicine) -> Result<(), Self::Error> {
        ApiClient::update(self, medicine).map(|_| ())
    }

    fn delete(&self, id: MedicineId) -> Result<(), Self::Error> {
        ApiClient::delete(self, id).map(|_| ())
    }

    fn list(&self) -> Result<Vec<Medicine>, Self::Error> {
        self.fetch()
    }
}
