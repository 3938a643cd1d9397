use crate::validator::ChallengeFormat;

/// Which device certificate a challenge accepts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CertificateSelector {
    /// The device is not workplace-joined; no certificate is requested.
    Unconstrained,
    /// A certificate with this thumbprint.
    Thumbprint(String),
    /// A certificate issued by one of these distinguished names, in challenge order.
    ///
    /// May be empty when the server sent the `CertAuthorities` key without
    /// a value (no certificate, or no permission on the device container).
    Authorities(Vec<String>),
}

/// A parsed and validated PKeyAuth challenge.
///
/// Built once by the parser and never modified afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChallengeRequest {
    nonce: String,
    context: String,
    version: String,
    submit_url: String,
    selector: CertificateSelector,
    format: ChallengeFormat,
}

impl ChallengeRequest {
    pub(crate) fn new(
        nonce: String,
        context: String,
        version: String,
        submit_url: String,
        selector: CertificateSelector,
        format: ChallengeFormat,
    ) -> Self {
        Self {
            nonce,
            context,
            version,
            submit_url,
            selector,
            format,
        }
    }

    /// Wire encoding the challenge was parsed from.
    pub fn format(&self) -> ChallengeFormat {
        self.format
    }

    /// Server anti-replay value, signed into the proof token.
    pub fn nonce(&self) -> &str {
        &self.nonce
    }

    /// Opaque server state echoed back in the response.
    pub fn context(&self) -> &str {
        &self.context
    }

    /// Protocol version echoed back in the response.
    pub fn version(&self) -> &str {
        &self.version
    }

    /// Endpoint the response is submitted to.
    pub fn submit_url(&self) -> &str {
        &self.submit_url
    }

    /// Returns the certificate selection rule.
    pub fn selector(&self) -> &CertificateSelector {
        &self.selector
    }

    /// Accepted issuers; empty unless the challenge is authority based.
    pub fn cert_authorities(&self) -> &[String] {
        match &self.selector {
            CertificateSelector::Authorities(authorities) => authorities,
            _ => &[],
        }
    }

    /// Accepted thumbprint, if the challenge names one.
    pub fn thumbprint(&self) -> Option<&str> {
        match &self.selector {
            CertificateSelector::Thumbprint(thumbprint) => Some(thumbprint),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(selector: CertificateSelector) -> ChallengeRequest {
        ChallengeRequest::new(
            "n1".to_string(),
            "ctx".to_string(),
            "1.0".to_string(),
            "https://submit.example/".to_string(),
            selector,
            ChallengeFormat::Header,
        )
    }

    #[test]
    fn authorities_selector_exposes_list_only() {
        let req = request(CertificateSelector::Authorities(vec![
            "DN1".to_string(),
            "DN2".to_string(),
        ]));

        assert_eq!(req.cert_authorities(), &["DN1", "DN2"]);
        assert_eq!(req.thumbprint(), None);
    }

    #[test]
    fn thumbprint_selector_exposes_thumbprint_only() {
        let req = request(CertificateSelector::Thumbprint("AB12".to_string()));

        assert_eq!(req.thumbprint(), Some("AB12"));
        assert!(req.cert_authorities().is_empty());
    }

    #[test]
    fn unconstrained_selector_exposes_nothing() {
        let req = request(CertificateSelector::Unconstrained);

        assert_eq!(req.thumbprint(), None);
        assert!(req.cert_authorities().is_empty());
        assert_eq!(req.nonce(), "n1");
        assert_eq!(req.context(), "ctx");
        assert_eq!(req.version(), "1.0");
        assert_eq!(req.submit_url(), "https://submit.example/");
        assert_eq!(req.format(), ChallengeFormat::Header);
    }
}
