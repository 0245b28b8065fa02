//! Upstream endpoint parsing.
//!
//! An endpoint is either a vendor shorthand (`alchemy://<key>`) or a plain
//! HTTP/WebSocket URL. Credentials are redacted whenever an endpoint is
//! displayed or debug-printed.

use serde::{Serialize, Serializer};
use std::fmt;
use std::str::FromStr;
use url::Url;

const REDACTED: &str = "****";

/// Node providers addressable through the `<provider>://<credential>` shorthand.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Provider {
    Alchemy,
    Infura,
    Drpc,
    BlastApi,
    Dwellir,
    Chainstack,
    Conduit,
    OnFinality,
    Thirdweb,
    Envio,
    Pimlico,
    Etherspot,
}

impl Provider {
    pub const ALL: [Self; 12] = [
        Self::Alchemy,
        Self::Infura,
        Self::Drpc,
        Self::BlastApi,
        Self::Dwellir,
        Self::Chainstack,
        Self::Conduit,
        Self::OnFinality,
        Self::Thirdweb,
        Self::Envio,
        Self::Pimlico,
        Self::Etherspot,
    ];

    #[must_use]
    pub const fn scheme(self) -> &'static str {
        match self {
            Self::Alchemy => "alchemy",
            Self::Infura => "infura",
            Self::Drpc => "drpc",
            Self::BlastApi => "blastapi",
            Self::Dwellir => "dwellir",
            Self::Chainstack => "chainstack",
            Self::Conduit => "conduit",
            Self::OnFinality => "onfinality",
            Self::Thirdweb => "thirdweb",
            Self::Envio => "envio",
            Self::Pimlico => "pimlico",
            Self::Etherspot => "etherspot",
        }
    }
}

impl FromStr for Provider {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.to_lowercase();
        Self::ALL
            .into_iter()
            .find(|p| p.scheme() == s)
            .ok_or(())
    }
}

impl fmt::Display for Provider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.scheme())
    }
}

/// A parsed upstream endpoint.
#[derive(Clone, PartialEq, Eq)]
pub enum Endpoint {
    Provider {
        provider: Provider,
        credential: String,
    },
    Http(Url),
    WebSocket(Url),
}

impl Endpoint {
    /// Parses an already-interpolated endpoint string.
    ///
    /// # Errors
    ///
    /// Returns a human-readable reason when the scheme is unknown, the
    /// credential is empty or malformed, or the URL has no host.
    pub fn parse(raw: &str) -> Result<Self, String> {
        let raw = raw.trim();
        let Some((scheme, rest)) = raw.split_once("://") else {
            return Err("expected <scheme>://... (e.g. alchemy://<key> or https://host)".to_string());
        };

        match scheme.to_lowercase().as_str() {
            "http" | "https" => Ok(Self::Http(parse_url(raw)?)),
            "ws" | "wss" => Ok(Self::WebSocket(parse_url(raw)?)),
            other => {
                let provider = other
                    .parse::<Provider>()
                    .map_err(|()| format!("unsupported scheme '{other}'"))?;
                check_credential(rest)?;
                Ok(Self::Provider {
                    provider,
                    credential: rest.to_string(),
                })
            }
        }
    }

    #[must_use]
    pub const fn provider(&self) -> Option<Provider> {
        match self {
            Self::Provider { provider, .. } => Some(*provider),
            _ => None,
        }
    }

    /// Full endpoint string including credentials, for the consuming runtime.
    #[must_use]
    pub fn expose(&self) -> String {
        match self {
            Self::Provider {
                provider,
                credential,
            } => format!("{provider}://{credential}"),
            Self::Http(url) | Self::WebSocket(url) => url.to_string(),
        }
    }

    /// Id used for an upstream declared without one.
    #[must_use]
    pub fn default_id(&self) -> String {
        match self {
            Self::Provider { provider, .. } => provider.scheme().to_string(),
            Self::Http(url) | Self::WebSocket(url) => url
                .host_str()
                .map_or_else(|| "upstream".to_string(), str::to_string),
        }
    }
}

fn parse_url(raw: &str) -> Result<Url, String> {
    let url = Url::parse(raw).map_err(|e| format!("malformed URL: {e}"))?;
    if url.host_str().is_none_or(str::is_empty) {
        return Err("URL has no host".to_string());
    }
    Ok(url)
}

fn check_credential(credential: &str) -> Result<(), String> {
    if credential.is_empty() {
        return Err("provider credential is empty".to_string());
    }
    if credential.chars().any(|c| c.is_whitespace() || c == '/') {
        return Err("provider credential contains whitespace or '/'".to_string());
    }
    Ok(())
}

fn redacted_url(url: &Url) -> String {
    let mut out = format!("{}://", url.scheme());
    if !url.username().is_empty() {
        out.push_str(url.username());
        if url.password().is_some() {
            out.push(':');
            out.push_str(REDACTED);
        }
        out.push('@');
    }
    out.push_str(url.host_str().unwrap_or_default());
    if let Some(port) = url.port() {
        out.push_str(&format!(":{port}"));
    }
    if url.path() != "/" || url.query().is_some() {
        out.push_str("/…");
    }
    out
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Provider { provider, .. } => write!(f, "{provider}://{REDACTED}"),
            Self::Http(url) | Self::WebSocket(url) => f.write_str(&redacted_url(url)),
        }
    }
}

impl fmt::Debug for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Endpoint({self})")
    }
}

impl Serialize for Endpoint {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}
