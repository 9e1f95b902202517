use super::CardError;
use crate::theme::Color;
use regex::Regex;
use std::collections::BTreeMap;
use std::sync::LazyLock;
use url::Url;

static USERNAME_REGEX: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^[A-Za-z0-9-]{1,39}$").expect("invalid regex"));

const MAX_WEIGHT: u32 = 1000;

/// Raw parameters of a single card request.
///
/// Keys are matched exactly. Values are kept verbatim; validation happens in [`super::Card::normalize`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CardRequest {
    params: BTreeMap<String, String>,
}

impl CardRequest {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a URL query string such as `username=octocat&tq=dark`. A leading `?` is ignored.
    ///
    /// When a key repeats, the last value wins.
    #[must_use]
    pub fn from_query(query: &str) -> Self {
        let query = query.strip_prefix('?').unwrap_or(query);
        Self {
            params: url::form_urlencoded::parse(query.as_bytes()).into_owned().collect(),
        }
    }

    /// Set a parameter, replacing any previous value.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        let _ = self.params.insert(key.into(), value.into());
    }

    #[must_use]
    pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.insert(key, value);
        self
    }

    #[must_use]
    pub fn get(&self, key: &str) -> Option<&str> {
        self.params.get(key).map(String::as_str)
    }

    /// The trimmed value of `key`, treating blank values as absent.
    #[must_use]
    pub fn value(&self, key: &str) -> Option<&str> {
        self.get(key).map(str::trim).filter(|v| !v.is_empty())
    }

    /// The required `username` parameter, checked against GitHub's login syntax.
    pub fn username(&self) -> Result<String, CardError> {
        let username = self.value("username").ok_or_else(|| CardError::invalid("missing 'username' parameter"))?;

        if !USERNAME_REGEX.is_match(username) || username.starts_with('-') {
            return Err(CardError::invalid(format!("'{username}' is not a valid GitHub login")));
        }

        Ok(username.to_string())
    }

    /// An optional absolute `http`/`https` URL.
    pub fn url(&self, key: &str) -> Result<Option<Url>, CardError> {
        let Some(raw) = self.value(key) else {
            return Ok(None);
        };

        let url = Url::parse(raw).map_err(|e| CardError::invalid(format!("'{key}' is not a valid URL: {e}")))?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(CardError::invalid(format!("'{key}' must be an http or https URL, got '{}'", url.scheme())));
        }

        Ok(Some(url))
    }

    /// An optional color in hex or CSS-name form.
    pub fn color(&self, key: &str) -> Result<Option<Color>, CardError> {
        self.value(key)
            .map(|raw| raw.parse().map_err(|e| CardError::invalid(format!("'{key}': {e}"))))
            .transpose()
    }

    /// An optional strictly positive integer.
    pub fn positive(&self, key: &str) -> Result<Option<u32>, CardError> {
        let Some(raw) = self.value(key) else {
            return Ok(None);
        };

        match raw.parse::<u32>() {
            Ok(0) | Err(_) => Err(CardError::invalid(format!("'{key}' must be a positive integer, got '{raw}'"))),
            Ok(value) => Ok(Some(value)),
        }
    }

    /// An optional font weight in `1..=1000`.
    pub fn weight(&self, key: &str) -> Result<Option<u32>, CardError> {
        match self.positive(key)? {
            Some(weight) if weight > MAX_WEIGHT => Err(CardError::invalid(format!(
                "'{key}' must be between 1 and {MAX_WEIGHT}, got {weight}"
            ))),
            other => Ok(other),
        }
    }

    /// Iterate over all raw parameters in key order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.params.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for CardRequest {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            params: iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect(),
        }
    }
}
