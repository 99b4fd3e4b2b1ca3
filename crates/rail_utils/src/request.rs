use anyhow::{Result, anyhow};
use reqwest::header::USER_AGENT;
use reqwest::multipart::{Form, Part};
use reqwest::{Client, RequestBuilder, Response, StatusCode};
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::Path;
use tracing::debug;

#[derive(Debug)]
pub struct RequestError {
    pub text: String,
    pub status: StatusCode,
}

impl RequestError {
    pub fn new(text: &str, status: StatusCode) -> Self {
        Self {
            text: text.to_owned(),
            status,
        }
    }
}

impl Display for RequestError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "response {}: {}", self.status, self.text)
    }
}

impl Error for RequestError {}

pub struct Request {
    request: RequestBuilder,
}

impl Request {
    pub fn get(url: &str) -> Self {
        debug!("GET {url}");
        Self {
            request: Client::new().get(url).header(USER_AGENT, "rail"),
        }
    }

    pub fn post(url: &str) -> Self {
        debug!("POST {url}");
        Self {
            request: Client::new().post(url).header(USER_AGENT, "rail"),
        }
    }

    pub fn header(mut self, key: &str, value: &str) -> Self {
        self.request = self.request.header(key, value);
        self
    }

    pub fn basic_auth(mut self, username: &str, password: &str) -> Self {
        self.request = self.request.basic_auth(username, Some(password));
        self
    }

    pub async fn text(self) -> Result<String> {
        let response = self.request.send().await.map_err(|e| anyhow!(e))?;
        Self::response_text(response).await
    }

    pub async fn text_with_data<T: Serialize + ?Sized>(self, data: &T) -> Result<String> {
        let response = self
            .request
            .json(data)
            .send()
            .await
            .map_err(|e| anyhow!(e))?;
        Self::response_text(response).await
    }

    pub async fn json<T: DeserializeOwned>(self) -> Result<T> {
        let response = self.request.send().await.map_err(|e| anyhow!(e))?;
        Self::response_json(response).await
    }

    pub async fn json_with_data<T, V>(self, data: &T) -> Result<V>
    where
        T: Serialize + ?Sized,
        V: DeserializeOwned,
    {
        let response = self
            .request
            .json(data)
            .send()
            .await
            .map_err(|e| anyhow!(e))?;
        Self::response_json(response).await
    }

    /// Sends the file at `path` as the multipart field `field`.
    pub async fn json_with_file<V: DeserializeOwned>(self, field: &str, path: &Path) -> Result<V> {
        let bytes = tokio::fs::read(path)
            .await
            .map_err(|e| anyhow!("unable to read {}: {e}", path.display()))?;
        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_else(|| field.to_owned());
        let form = Form::new().part(field.to_owned(), Part::bytes(bytes).file_name(file_name));
        self.json_with_form(form).await
    }

    pub async fn json_with_form<V: DeserializeOwned>(self, form: Form) -> Result<V> {
        let response = self
            .request
            .multipart(form)
            .send()
            .await
            .map_err(|e| anyhow!(e))?;
        Self::response_json(response).await
    }

    async fn response_text(response: Response) -> Result<String> {
        let response = Self::check_status(response).await?;
        response.text().await.map_err(|e| anyhow!(e))
    }

    async fn response_json<T: DeserializeOwned>(response: Response) -> Result<T> {
        let response = Self::check_status(response).await?;
        response.json::<T>().await.map_err(|e| anyhow!(e))
    }

    async fn check_status(response: Response) -> Result<Response> {
        let status = response.status();
        debug!("response from server status: {status}");

        match status {
            st if st.is_success() => Ok(response),
            StatusCode::UNAUTHORIZED => {
                let message = format!("request failed with status code: {status}");
                Err(RequestError::new(&message, StatusCode::UNAUTHORIZED).into())
            }
            st if st.is_client_error() => {
                let text = response.text().await.map_err(|e| anyhow!(e))?;
                Err(RequestError::new(&text, st).into())
            }
            st => {
                let message = format!("request failed with status code: {st}");
                Err(RequestError::new(&message, st).into())
            }
        }
    }
}
