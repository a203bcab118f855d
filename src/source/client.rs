use crate::config::Timeouts;
use crate::error::ExportError;
use crate::source::model::{AuthResponse, Credentials, UserPack};
use log::debug;
use reqwest::blocking::Client;
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION, CONTENT_TYPE};
use reqwest::Method;
use serde::de::DeserializeOwned;
use serde::Serialize;

/// Base URL and headers sent with every API request.
///
/// A context never changes once built; adding the auth token produces a new
/// context, and a new client is built from it.
#[derive(Debug, Clone)]
pub struct RequestContext {
    base_url: String,
    headers: HeaderMap,
}

impl RequestContext {
    pub fn new(base_url: impl Into<String>) -> Self {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        RequestContext {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            headers,
        }
    }

    /// Returns a copy of this context carrying `Authorization: Token <token>`
    pub fn with_token(&self, token: &str) -> Result<Self, ExportError> {
        let mut value = HeaderValue::from_str(&format!("Token {}", token)).map_err(|_| {
            ExportError::AuthenticationFailure(
                "login returned a token that is not a valid header value".to_string(),
            )
        })?;
        value.set_sensitive(true);

        let mut headers = self.headers.clone();
        headers.insert(AUTHORIZATION, value);

        Ok(RequestContext {
            base_url: self.base_url.clone(),
            headers,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}

/// Blocking client for the Sorted API
pub struct SortedClient {
    client: Client,
    context: RequestContext,
    timeouts: Timeouts,
}

impl SortedClient {
    pub fn new(context: RequestContext, timeouts: Timeouts) -> Result<Self, ExportError> {
        let client = Client::builder()
            .timeout(timeouts.request)
            .connect_timeout(timeouts.connect)
            .pool_idle_timeout(timeouts.idle)
            .default_headers(context.headers().clone())
            .build()
            .map_err(|e| ExportError::network("create HTTP client", e))?;

        Ok(SortedClient {
            client,
            context,
            timeouts,
        })
    }

    /// Authenticate and return a client whose requests carry the token
    pub fn login(
        context: RequestContext,
        timeouts: Timeouts,
        username: &str,
        password: &str,
    ) -> Result<Self, ExportError> {
        let anonymous = SortedClient::new(context, timeouts)?;
        let token = anonymous.authenticate(username, password)?;
        anonymous.with_token(&token)
    }

    pub fn context(&self) -> &RequestContext {
        &self.context
    }

    pub fn with_token(&self, token: &str) -> Result<Self, ExportError> {
        SortedClient::new(self.context.with_token(token)?, self.timeouts)
    }

    pub fn authenticate(&self, username: &str, password: &str) -> Result<String, ExportError> {
        let credentials = Credentials { username, password };
        let response: AuthResponse = self
            .request(Method::POST, "/auth/login/", Some(&credentials), "log in")
            .map_err(|e| ExportError::AuthenticationFailure(e.to_string()))?;

        if response.key.is_empty() {
            return Err(ExportError::AuthenticationFailure(
                "login response did not contain a token".to_string(),
            ));
        }
        Ok(response.key)
    }

    pub fn list_packs(&self) -> Result<Vec<UserPack>, ExportError> {
        self.request::<(), _>(Method::GET, "/api/v1/user/packs/", None, "list packs")
    }

    pub fn get_pack(&self, id: u64) -> Result<UserPack, ExportError> {
        self.request::<(), _>(
            Method::GET,
            &format!("/api/v1/user/packs/{}", id),
            None,
            &format!("get pack `{}`", id),
        )
    }

    fn request<P: Serialize, R: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        payload: Option<&P>,
        operation: &str,
    ) -> Result<R, ExportError> {
        let url = self.context.url(path);
        debug!("{} {}", method, url);

        let mut request = self.client.request(method, &url);
        if let Some(payload) = payload {
            request = request.json(payload);
        }

        request
            .send()
            .and_then(|response| response.error_for_status())
            .and_then(|response| response.json::<R>())
            .map_err(|e| ExportError::network(operation, e))
    }
}
