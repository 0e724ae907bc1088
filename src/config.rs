//! Connection URLs and driver connection options.
//!
//! URLs follow the `<backend>+<driver>://[user[:password]@][host]/<database>?<options>`
//! shape, for example
//! `postgresql+auroradataapi://:@/mydb?aurora_cluster_arn=arn:...&secret_arn=arn:...`.
//! The Data API authenticates with the cluster and secret ARNs, so user, password
//! and host are ignored.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use url::Url;

use crate::error::{AdaError, Result};

/// A parsed connection URL.
#[derive(Debug, Clone, PartialEq)]
pub struct DataApiUrl {
    /// Backend part of the scheme, e.g. `postgresql`.
    pub backend: String,
    /// Driver part of the scheme, e.g. `auroradataapi`.
    pub driver: Option<String>,
    pub database: Option<String>,
    pub query: Vec<(String, String)>,
}

impl DataApiUrl {
    pub fn parse(raw: &str) -> Result<Self> {
        // `://:@/db` has an empty host after the userinfo, which the URL parser
        // rejects. The authority is ignored anyway, so swap in a placeholder.
        let (scheme, rest) = raw
            .split_once("://")
            .ok_or_else(|| AdaError::InvalidUrl(format!("{}: missing scheme", raw)))?;
        let path_start = rest.find(['/', '?']).unwrap_or(rest.len());
        let normalized = format!("{}://localhost{}", scheme, &rest[path_start..]);
        let url = Url::parse(&normalized)
            .map_err(|e| AdaError::InvalidUrl(format!("{}: {}", raw, e)))?;

        let (backend, driver) = match url.scheme().split_once('+') {
            Some((backend, driver)) => (backend.to_string(), Some(driver.to_string())),
            None => (url.scheme().to_string(), None),
        };
        if backend.is_empty() || driver.as_deref() == Some("") {
            return Err(AdaError::InvalidUrl(format!("{}: malformed scheme", raw)));
        }

        let database = Some(url.path().trim_start_matches('/'))
            .filter(|path| !path.is_empty())
            .map(str::to_string);
        let query = url
            .query_pairs()
            .map(|(k, v)| (k.into_owned(), v.into_owned()))
            .collect();

        Ok(Self {
            backend,
            driver,
            database,
            query,
        })
    }

    /// Registry key for the URL's dialect, e.g. `postgresql.auroradataapi`.
    pub fn dialect_name(&self) -> String {
        match &self.driver {
            Some(driver) => format!("{}.{}", self.backend, driver),
            None => self.backend.clone(),
        }
    }
}

/// Arguments handed to the driver's `connect`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConnectOptions {
    pub database: Option<String>,
    pub aurora_cluster_arn: Option<String>,
    pub secret_arn: Option<String>,
    pub schema: Option<String>,
    /// Query options the dialect does not interpret, passed through to the driver.
    pub extra: BTreeMap<String, String>,
}

impl ConnectOptions {
    /// Builds options from a parsed URL. Recognized query keys fill the typed
    /// fields; everything else lands in `extra`.
    pub fn from_url(url: &DataApiUrl) -> Self {
        let mut options = ConnectOptions {
            database: url.database.clone(),
            ..ConnectOptions::default()
        };
        for (key, value) in &url.query {
            match key.as_str() {
                "aurora_cluster_arn" | "cluster_arn" => {
                    options.aurora_cluster_arn = Some(value.clone())
                }
                "secret_arn" => options.secret_arn = Some(value.clone()),
                "schema" => options.schema = Some(value.clone()),
                "database" => options.database = Some(value.clone()),
                _ => {
                    options.extra.insert(key.clone(), value.clone());
                }
            }
        }
        options
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_data_api_url() {
        let url = DataApiUrl::parse(
            "postgresql+auroradataapi://:@/mydb?aurora_cluster_arn=arn:aws:rds:us-east-1:123:cluster:db&secret_arn=arn:aws:secretsmanager:us-east-1:123:secret:s",
        )
        .unwrap();
        assert_eq!(url.backend, "postgresql");
        assert_eq!(url.driver.as_deref(), Some("auroradataapi"));
        assert_eq!(url.database.as_deref(), Some("mydb"));
        assert_eq!(url.dialect_name(), "postgresql.auroradataapi");

        let options = ConnectOptions::from_url(&url);
        assert_eq!(
            options.aurora_cluster_arn.as_deref(),
            Some("arn:aws:rds:us-east-1:123:cluster:db")
        );
        assert_eq!(
            options.secret_arn.as_deref(),
            Some("arn:aws:secretsmanager:us-east-1:123:secret:s")
        );
        assert!(options.extra.is_empty());
    }

    #[test]
    fn test_unknown_query_keys_are_extra() {
        let url = DataApiUrl::parse("mysql+auroradataapi://:@/?continue_after_timeout=true").unwrap();
        assert_eq!(url.database, None);
        let options = ConnectOptions::from_url(&url);
        assert_eq!(
            options.extra.get("continue_after_timeout").map(String::as_str),
            Some("true")
        );
    }

    #[test]
    fn test_invalid_url() {
        assert!(matches!(
            DataApiUrl::parse("not a url"),
            Err(AdaError::InvalidUrl(_))
        ));
    }

    #[test]
    fn test_options_deserialize_with_defaults() {
        let options: ConnectOptions =
            serde_json::from_str(r#"{"database": "app", "secret_arn": "arn:s"}"#).unwrap();
        assert_eq!(options.database.as_deref(), Some("app"));
        assert_eq!(options.aurora_cluster_arn, None);
    }
}
