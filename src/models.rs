use serde::{Deserialize, Deserializer, Serialize};

/// The service sends `null` for unset lists, strings and timestamps.
fn nullable<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Site {
    #[serde(default, deserialize_with = "nullable")]
    pub url: String,
    #[serde(default, deserialize_with = "nullable")]
    pub id: String,
    #[serde(default, deserialize_with = "nullable")]
    pub plans: Vec<String>,
    #[serde(default, deserialize_with = "nullable")]
    pub groups: Vec<String>,
    #[serde(default, deserialize_with = "nullable")]
    pub created: i64,
}

impl Site {
    /// Site template for `create_site`, only the url is set
    pub fn new<I: Into<String>>(url: I) -> Self {
        Site {
            url: url.into(),
            ..Default::default()
        }
    }

    pub fn with_plans<I: IntoIterator<Item = String>>(mut self, plans: I) -> Self {
        self.plans = plans.into_iter().collect();
        self
    }

    pub fn with_groups<I: IntoIterator<Item = String>>(mut self, groups: I) -> Self {
        self.groups = groups.into_iter().collect();
        self
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Plan {
    #[serde(default, deserialize_with = "nullable")]
    pub name: String,
    #[serde(default, deserialize_with = "nullable")]
    pub created: i64,
    #[serde(default, deserialize_with = "nullable")]
    pub description: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScanConfiguration {
    #[serde(default, deserialize_with = "nullable")]
    pub target: String,
}

/// One execution of a plan against a site.
///
/// `state` is owned by the service and not interpreted here. The
/// `started` and `finished` timestamps stay zero until the service
/// moves the scan along.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Scan {
    #[serde(default, deserialize_with = "nullable")]
    pub id: String,
    #[serde(default, deserialize_with = "nullable")]
    pub state: String,
    #[serde(default, deserialize_with = "nullable")]
    pub created: i64,
    #[serde(default, deserialize_with = "nullable")]
    pub started: i64,
    #[serde(default, deserialize_with = "nullable")]
    pub finished: i64,
    #[serde(default, deserialize_with = "nullable")]
    pub configuration: ScanConfiguration,
    #[serde(default, deserialize_with = "nullable")]
    pub sessions: Vec<ScanSession>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScanSession {
    #[serde(default, deserialize_with = "nullable")]
    pub id: String,
    #[serde(default, deserialize_with = "nullable")]
    pub state: String,
    #[serde(default, deserialize_with = "nullable")]
    pub created: i64,
    #[serde(default, deserialize_with = "nullable")]
    pub started: i64,
    #[serde(default, deserialize_with = "nullable")]
    pub finished: i64,
    #[serde(default, deserialize_with = "nullable")]
    pub issues: Vec<ScanSessionIssue>,
    #[serde(default, deserialize_with = "nullable")]
    pub plugin: ScanSessionPlugin,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScanSessionIssue {
    #[serde(default, deserialize_with = "nullable")]
    pub id: String,
    #[serde(default, deserialize_with = "nullable")]
    pub code: String,
    #[serde(default, deserialize_with = "nullable")]
    pub severity: String,
    #[serde(default, deserialize_with = "nullable")]
    pub summary: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScanSessionPlugin {
    #[serde(default, deserialize_with = "nullable")]
    pub version: String,
    #[serde(default, deserialize_with = "nullable")]
    pub class: String,
    #[serde(default, deserialize_with = "nullable")]
    pub weight: String,
    #[serde(default, deserialize_with = "nullable")]
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CreateScanRequest {
    #[serde(rename = "planName")]
    pub plan_name: String,
    #[serde(rename = "siteId")]
    pub site_id: String,
    #[serde(rename = "callbackURL")]
    pub callback_url: String,
}

// Payloads of the `{"success": .., ...}` envelopes

#[derive(Debug, Deserialize)]
pub(crate) struct SitesPayload {
    #[serde(default, deserialize_with = "nullable")]
    pub sites: Vec<Site>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct SitePayload {
    pub site: Site,
}

#[derive(Debug, Deserialize)]
pub(crate) struct PlansPayload {
    #[serde(default, deserialize_with = "nullable")]
    pub plans: Vec<Plan>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ScansPayload {
    #[serde(default, deserialize_with = "nullable")]
    pub scans: Vec<Scan>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ScanPayload {
    pub scan: Scan,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_decode_scan_with_sessions() -> serde_json::Result<()> {
        let scan: Scan = serde_json::from_value(json!({
            "id": "8c5a1f2e",
            "state": "FINISHED",
            "created": 1370000000,
            "started": 1370000010,
            "finished": 1370000300,
            "configuration": { "target": "http://example.com" },
            "sessions": [{
                "id": "a1",
                "state": "FINISHED",
                "created": 1370000001,
                "started": 1370000011,
                "finished": 1370000299,
                "issues": [{
                    "id": "i1",
                    "code": "XFO-0",
                    "severity": "Medium",
                    "summary": "X-Frame-Options header is not set",
                }],
                "plugin": {
                    "version": "0.1",
                    "class": "minion.plugins.basic.XFrameOptionsPlugin",
                    "weight": "light",
                    "name": "XFrameOptions",
                },
            }],
        }))?;

        assert_eq!(scan.id, "8c5a1f2e");
        assert_eq!(scan.configuration.target, "http://example.com");
        assert_eq!(scan.sessions.len(), 1);
        let session = &scan.sessions[0];
        assert_eq!(session.plugin.name, "XFrameOptions");
        assert_eq!(session.issues[0].code, "XFO-0");
        assert_eq!(session.issues[0].severity, "Medium");
        Ok(())
    }

    #[test]
    fn test_decode_fresh_scan_with_nulls() -> serde_json::Result<()> {
        let scan: Scan = serde_json::from_value(json!({
            "id": "s-new",
            "state": "CREATED",
            "created": 1370000000,
            "started": null,
            "finished": null,
            "configuration": { "target": "http://example.com" },
            "sessions": null,
        }))?;

        assert_eq!(scan.state, "CREATED");
        assert_eq!(scan.started, 0);
        assert_eq!(scan.finished, 0);
        assert!(scan.sessions.is_empty());
        Ok(())
    }

    #[test]
    fn test_site_reencodes_same_fields() -> serde_json::Result<()> {
        let value = json!({
            "url": "http://example.com",
            "id": "s1",
            "plans": ["basic", "nmap"],
            "groups": ["mozilla"],
            "created": 1370000000,
        });
        let site: Site = serde_json::from_value(value.clone())?;
        assert_eq!(serde_json::to_value(&site)?, value);
        Ok(())
    }

    #[test]
    fn test_site_missing_lists() -> serde_json::Result<()> {
        let site: Site =
            serde_json::from_str(r#"{"url":"http://example.com","id":"s1","plans":null}"#)?;
        assert_eq!(
            site,
            Site {
                url: "http://example.com".to_string(),
                id: "s1".to_string(),
                ..Default::default()
            }
        );
        Ok(())
    }

    #[test]
    fn test_site_template() {
        let site = Site::new("http://example.com")
            .with_plans(vec!["basic".to_string()])
            .with_groups(vec!["infra".to_string()]);
        assert_eq!(site.url, "http://example.com");
        assert_eq!(site.id, "");
        assert_eq!(site.plans, vec!["basic"]);
        assert_eq!(site.groups, vec!["infra"]);
        assert_eq!(site.created, 0);
    }

    #[test]
    fn test_create_scan_request_field_names() -> serde_json::Result<()> {
        let req = CreateScanRequest {
            plan_name: "basic".to_string(),
            site_id: "s1".to_string(),
            callback_url: "http://localhost:8080/callback".to_string(),
        };
        assert_eq!(
            serde_json::to_value(&req)?,
            json!({
                "planName": "basic",
                "siteId": "s1",
                "callbackURL": "http://localhost:8080/callback",
            })
        );
        Ok(())
    }
}
