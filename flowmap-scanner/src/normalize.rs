use crate::error::NormalizeError;
use url::Url;

/// Resolves links against a fixed base and keeps them inside the base's host.
#[derive(Debug, Clone)]
pub struct Normalizer {
    base: Url,
}

impl Normalizer {
    pub fn new(base: &str) -> Result<Self, NormalizeError> {
        let base = Url::parse(base)?;
        if base.host_str().is_none() {
            return Err(NormalizeError::NoHost);
        }
        Ok(Self { base })
    }

    pub fn base(&self) -> &Url {
        &self.base
    }

    /// Canonical form of `link`: origin + path, query and fragment dropped.
    pub fn try_normalize(&self, link: &str) -> Result<String, NormalizeError> {
        let resolved = self.base.join(link)?;
        let base_host = self.base.host_str().ok_or(NormalizeError::NoHost)?;

        match resolved.host_str() {
            Some(host) if host == base_host => Ok(format!(
                "{}{}",
                resolved.origin().ascii_serialization(),
                resolved.path()
            )),
            Some(host) => Err(NormalizeError::CrossOrigin {
                host: host.to_string(),
            }),
            None => Err(NormalizeError::NoHost),
        }
    }

    pub fn normalize(&self, link: &str) -> Option<String> {
        self.try_normalize(link).ok()
    }
}

/// Normalize `link` relative to `base`, or `None` if it is malformed or leaves the base host.
pub fn normalize(link: &str, base: &str) -> Option<String> {
    Normalizer::new(base).ok()?.normalize(link)
}
