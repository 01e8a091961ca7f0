//! Query string parsing for page parameters.
//!
//! Pages receive their parameters as the raw query component of the address
//! (`?codec1=vp9&codec2=x264&criterion=psnr`). No percent-decoding happens
//! here; values are returned exactly as they appear.

use std::collections::BTreeMap;

use crate::error::{Error, Result};

/// Value of one query parameter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParamValue {
    /// `name=value` with a non-empty value.
    Text(String),
    /// Bare `name` (or `name=`), present without a value.
    Flag,
}

impl ParamValue {
    /// The text value, or `None` for a presence flag.
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Text(s) => Some(s),
            Self::Flag => None,
        }
    }
}

/// Parsed query parameters.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Query {
    params: BTreeMap<String, ParamValue>,
}

impl Query {
    /// Parse a delimiter-prefixed query string.
    ///
    /// One leading `?`, `#` or `&` is stripped, the rest is split on `&`, and
    /// each part is split on its first `=`. Parts with an empty name are
    /// dropped; a later duplicate name replaces an earlier one.
    ///
    /// ```
    /// use codec_results::query::{ParamValue, Query};
    ///
    /// let q = Query::parse("?codec1=av1&codec2=vp9&criterion=psnr");
    /// assert_eq!(q.get("codec1"), Some(&ParamValue::Text("av1".into())));
    /// assert_eq!(q.len(), 3);
    /// ```
    #[must_use]
    pub fn parse(raw: &str) -> Self {
        let body = raw
            .strip_prefix(['?', '#', '&'])
            .unwrap_or(raw);

        let mut params = BTreeMap::new();
        for part in body.split('&') {
            let (name, value) = match part.split_once('=') {
                Some((name, value)) => (name, value),
                None => (part, ""),
            };
            if name.is_empty() {
                continue;
            }
            let value = if value.is_empty() {
                ParamValue::Flag
            } else {
                ParamValue::Text(value.to_string())
            };
            params.insert(name.to_string(), value);
        }

        Self { params }
    }

    /// Look up a parameter.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&ParamValue> {
        self.params.get(name)
    }

    /// The text value of a parameter, if present with a value.
    #[must_use]
    pub fn get_str(&self, name: &str) -> Option<&str> {
        self.params.get(name).and_then(ParamValue::as_str)
    }

    /// The text value of a parameter, failing if it is absent or a flag.
    pub fn require(&self, name: &str) -> Result<&str> {
        self.get_str(name)
            .ok_or_else(|| Error::MissingParameter(name.to_string()))
    }

    /// Whether the parameter is present at all.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.params.contains_key(name)
    }

    /// Number of parameters.
    #[must_use]
    pub fn len(&self) -> usize {
        self.params.len()
    }

    /// Whether no parameters were parsed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.params.is_empty()
    }

    /// Iterate parameters in name order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &ParamValue)> {
        self.params.iter().map(|(k, v)| (k.as_str(), v))
    }
}
