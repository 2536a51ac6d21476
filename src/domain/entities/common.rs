use serde::{Deserialize, Serialize};

/// Store platform a purchase, receipt or user lookup refers to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Platform {
    Ios,
    Android,
    /// Platform value not known to this client version. The raw string is
    /// kept so a growing server-side taxonomy never breaks decoding.
    #[serde(untagged)]
    Unrecognized(String),
}

impl Platform {
    pub fn as_str(&self) -> &str {
        match self {
            Platform::Ios => "ios",
            Platform::Android => "android",
            Platform::Unrecognized(value) => value,
        }
    }
}

/// Application environment every API call is scoped to. Forwarded verbatim as
/// the `environment` query parameter; the service treats it as an open
/// string, so arbitrary values can be carried through [`Environment::Other`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    #[default]
    Production,
    Sandbox,
    #[serde(untagged)]
    Other(String),
}

impl Environment {
    pub fn as_str(&self) -> &str {
        match self {
            Environment::Production => "production",
            Environment::Sandbox => "sandbox",
            Environment::Other(value) => value,
        }
    }
}

/// Sort direction for purchase listings. The service spells ascending "ask".
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    Ask,
    Desc,
    #[serde(untagged)]
    Unrecognized(String),
}

impl SortOrder {
    pub fn as_str(&self) -> &str {
        match self {
            SortOrder::Ask => "ask",
            SortOrder::Desc => "desc",
            SortOrder::Unrecognized(value) => value,
        }
    }
}
