//! # Reference URL Probe
//!
//! Live reachability check for a rule's `ref` link. A rule passes if the
//! URL starts with `http` and a GET returns any HTTP response at all.
//!
//! A non-200 status (404, 500, ...) is still "reachable": the status is
//! reported in [`RefStatus`] and logged at warn level but does not fail
//! validation. Only transport failures (DNS, connect, TLS, a URL reqwest
//! cannot parse) produce [`ScannerError::UnreachableRef`].
//!
//! There is no retry and no timeout override; the request uses
//! reqwest's defaults, including its redirect policy.

use scanner_core::{validate_ref_scheme, Rule, ScannerError};

/// HTTP status observed for a reachable reference URL.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RefStatus {
    pub status: u16,
}

impl RefStatus {
    /// Returns true if the server answered 200.
    pub fn is_ok(&self) -> bool {
        self.status == 200
    }
}

/// HTTP client used to probe reference URLs.
#[derive(Debug, Clone)]
pub struct RefProbe {
    http: reqwest::Client,
}

impl RefProbe {
    /// Build a probe with a default client.
    pub fn new() -> Result<Self, reqwest::Error> {
        let http = reqwest::Client::builder().build()?;
        Ok(Self { http })
    }

    /// GET `url` and return the response status.
    pub async fn fetch_status(&self, url: &str) -> Result<u16, reqwest::Error> {
        let response = self.http.get(url).send().await?;
        Ok(response.status().as_u16())
    }
}

/// Check a rule's `ref`: scheme prefix first, then a live GET.
///
/// # Errors
///
/// - [`ScannerError::BadScheme`] if `ref` does not start with `http`.
/// - [`ScannerError::UnreachableRef`] if no HTTP response was received.
pub async fn validate_ref_url(probe: &RefProbe, rule: &Rule) -> Result<RefStatus, ScannerError> {
    validate_ref_scheme(rule)?;

    tracing::debug!(rule = %rule.name, url = %rule.reference, "probing reference URL");
    match probe.fetch_status(&rule.reference).await {
        Ok(status) => {
            let outcome = RefStatus { status };
            if !outcome.is_ok() {
                tracing::warn!(
                    rule = %rule.name,
                    url = %rule.reference,
                    status,
                    "reference URL did not return 200"
                );
            }
            Ok(outcome)
        }
        Err(e) => Err(ScannerError::UnreachableRef {
            rule: rule.name.clone(),
            url: rule.reference.clone(),
            reason: e.to_string(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn rule_with_ref(url: &str) -> Rule {
        Rule {
            categories: vec!["ALL".into()],
            description: "d".into(),
            driver: "semgrep".into(),
            group: "Injection".into(),
            name: "sqli".into(),
            pretty_name: "SQL injection".into(),
            reference: url.into(),
        }
    }

    #[tokio::test]
    async fn ok_reference_is_reachable() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/docs/sqli"))
            .respond_with(ResponseTemplate::new(200).set_body_string("ok"))
            .expect(1)
            .mount(&server)
            .await;

        let probe = RefProbe::new().unwrap();
        let rule = rule_with_ref(&format!("{}/docs/sqli", server.uri()));
        let status = validate_ref_url(&probe, &rule).await.unwrap();
        assert!(status.is_ok());
    }

    #[tokio::test]
    async fn not_found_reference_still_passes() {
        // Any HTTP response counts as reachable; the status is reported, not enforced.
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&server)
            .await;

        let probe = RefProbe::new().unwrap();
        let rule = rule_with_ref(&format!("{}/gone", server.uri()));
        let status = validate_ref_url(&probe, &rule).await.unwrap();
        assert_eq!(status.status, 404);
        assert!(!status.is_ok());
    }

    #[tokio::test]
    async fn server_error_reference_still_passes() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(503))
            .mount(&server)
            .await;

        let probe = RefProbe::new().unwrap();
        let status = validate_ref_url(&probe, &rule_with_ref(&server.uri()))
            .await
            .unwrap();
        assert_eq!(status.status, 503);
    }

    #[tokio::test]
    async fn closed_port_is_unreachable() {
        let probe = RefProbe::new().unwrap();
        let err = validate_ref_url(&probe, &rule_with_ref("http://127.0.0.1:1/docs"))
            .await
            .unwrap_err();
        assert!(matches!(err, ScannerError::UnreachableRef { .. }), "got: {err}");
        assert_eq!(
            err.to_string(),
            r#"Invalid link: "http://127.0.0.1:1/docs" from rule "sqli""#
        );
    }

    #[tokio::test]
    async fn malformed_http_prefix_is_unreachable() {
        // Passes the prefix check, fails when reqwest parses it.
        let probe = RefProbe::new().unwrap();
        let err = validate_ref_url(&probe, &rule_with_ref("httpfoo"))
            .await
            .unwrap_err();
        assert!(matches!(err, ScannerError::UnreachableRef { .. }), "got: {err}");
    }

    #[tokio::test]
    async fn bad_scheme_skips_network() {
        let probe = RefProbe::new().unwrap();
        let err = validate_ref_url(&probe, &rule_with_ref("owasp.org/sqli"))
            .await
            .unwrap_err();
        assert!(matches!(err, ScannerError::BadScheme { .. }), "got: {err}");
    }
}
