use crate::errors::*;
use crate::models::*;
use reqwest::{Method, RequestBuilder};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::fmt;
use std::time::Duration;

pub const API_USER_HEADER: &str = "X-Minion-Api-User";
pub const API_KEY_HEADER: &str = "X-Minion-Api-Key";

#[derive(Debug, Deserialize)]
struct Envelope {
    success: bool,
    #[serde(default)]
    reason: Option<String>,
    #[serde(flatten)]
    payload: serde_json::Map<String, serde_json::Value>,
}

fn decode_envelope<T: DeserializeOwned>(body: &[u8]) -> Result<T> {
    let envelope = serde_json::from_slice::<Envelope>(body)?;
    if !envelope.success {
        return Err(Error::Unsuccessful {
            reason: envelope.reason,
        });
    }
    let payload = serde_json::from_value(serde_json::Value::Object(envelope.payload))?;
    Ok(payload)
}

/// Client for the Minion web service API.
///
/// Every request carries the api user and api key headers. All clones share
/// one `reqwest::Client`, which pools connections internally, so a
/// `MinionClient` can be cloned freely and used from multiple tasks at once.
/// No other state is kept between calls.
#[derive(Clone)]
pub struct MinionClient {
    http: reqwest::Client,
    endpoint: String,
    api_user: String,
    api_key: String,
    timeout: Option<Duration>,
}

impl fmt::Debug for MinionClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MinionClient")
            .field("endpoint", &self.endpoint)
            .field("api_user", &self.api_user)
            .field("api_key", &"<redacted>")
            .field("timeout", &self.timeout)
            .finish()
    }
}

impl MinionClient {
    pub fn new<E, U, K>(endpoint: E, api_user: U, api_key: K) -> Self
    where
        E: Into<String>,
        U: Into<String>,
        K: Into<String>,
    {
        Self::with_http_client(endpoint, api_user, api_key, reqwest::Client::new())
    }

    pub fn with_http_client<E, U, K>(
        endpoint: E,
        api_user: U,
        api_key: K,
        http: reqwest::Client,
    ) -> Self
    where
        E: Into<String>,
        U: Into<String>,
        K: Into<String>,
    {
        let mut endpoint = endpoint.into();
        while endpoint.ends_with('/') {
            endpoint.pop();
        }

        MinionClient {
            http,
            endpoint,
            api_user: api_user.into(),
            api_key: api_key.into(),
            timeout: None,
        }
    }

    /// Copy of this client that gives up on requests after `timeout`.
    ///
    /// The copy shares the connection pool, so this is cheap enough to call
    /// for a single request.
    pub fn with_timeout(&self, timeout: Duration) -> Self {
        MinionClient {
            timeout: Some(timeout),
            ..self.clone()
        }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    pub fn api_user(&self) -> &str {
        &self.api_user
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let url = format!("{}{}", self.endpoint, path);
        debug!("{} {}", method, url);

        let mut req = self
            .http
            .request(method, url)
            .header(API_USER_HEADER, &self.api_user)
            .header(API_KEY_HEADER, &self.api_key);
        if let Some(timeout) = self.timeout {
            req = req.timeout(timeout);
        }
        req
    }

    async fn send<T: DeserializeOwned>(&self, req: RequestBuilder) -> Result<T> {
        let res = req.send().await?;

        let status = res.status();
        if !status.is_success() {
            let body = res.text().await.unwrap_or_default();
            return Err(Error::Status { status, body });
        }

        let body = res.bytes().await?;
        decode_envelope(&body)
    }

    pub async fn get_sites(&self) -> Result<Vec<Site>> {
        let req = self.request(Method::GET, "/ws/sites");
        let payload = self.send::<SitesPayload>(req).await?;
        debug!("Found {} sites", payload.sites.len());
        Ok(payload.sites)
    }

    pub async fn get_sites_by_url(&self, site_url: &str) -> Result<Vec<Site>> {
        let req = self
            .request(Method::GET, "/ws/sites")
            .query(&[("url", site_url)]);
        let payload = self.send::<SitesPayload>(req).await?;
        debug!("Found {} sites for {:?}", payload.sites.len(), site_url);
        Ok(payload.sites)
    }

    pub async fn create_site(&self, template: &Site) -> Result<Site> {
        let req = self.request(Method::POST, "/ws/sites").json(template);
        let payload = self.send::<SitePayload>(req).await?;
        info!("Created site {:?} ({})", payload.site.url, payload.site.id);
        Ok(payload.site)
    }

    pub async fn get_plan_by_name(&self, plan_name: &str) -> Result<Plan> {
        let req = self
            .request(Method::GET, "/ws/plans")
            .query(&[("name", plan_name)]);
        let payload = self.send::<PlansPayload>(req).await?;
        payload
            .plans
            .into_iter()
            .next()
            .ok_or_else(|| Error::PlanNotFound(plan_name.to_string()))
    }

    pub async fn get_scans(&self, site_id: &str, plan_name: &str, limit: u32) -> Result<Vec<Scan>> {
        let limit = limit.to_string();
        let req = self.request(Method::GET, "/ws/scans").query(&[
            ("site_id", site_id),
            ("plan_name", plan_name),
            ("limit", limit.as_str()),
        ]);
        let payload = self.send::<ScansPayload>(req).await?;
        debug!("Found {} scans", payload.scans.len());
        Ok(payload.scans)
    }

    pub async fn get_scan(&self, scan_id: &str) -> Result<Scan> {
        let path = format!("/ws/scans/{}", urlencoding::encode(scan_id));
        let req = self.request(Method::GET, &path);
        let payload = self.send::<ScanPayload>(req).await?;
        Ok(payload.scan)
    }

    /// Start a scan of `site_id` with `plan_name`.
    ///
    /// The service posts scan and session state changes to `callback_url`,
    /// see [`crate::callback::CallbackEvent`].
    pub async fn create_scan(
        &self,
        site_id: &str,
        plan_name: &str,
        callback_url: &str,
    ) -> Result<Scan> {
        let body = CreateScanRequest {
            plan_name: plan_name.to_string(),
            site_id: site_id.to_string(),
            callback_url: callback_url.to_string(),
        };
        let req = self.request(Method::PUT, "/ws/scans/create").json(&body);
        let payload = self.send::<ScanPayload>(req).await?;
        info!("Created scan {} ({})", payload.scan.id, payload.scan.state);
        Ok(payload.scan)
    }
}
