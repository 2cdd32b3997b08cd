//! Configuration types and parsing for datebound.yml

use crate::column_type::ColumnType;
use crate::error::{CoreError, CoreResult};
use crate::function::DateFunction;
use serde::{Deserialize, Serialize};
use std::path::Path;
use url::{form_urlencoded, Url};

/// Connection string used when none is configured.
pub const DEFAULT_DSN: &str = "root:@tcp(127.0.0.1:4000)/test";

/// Default config file name looked up in the working directory.
pub const CONFIG_FILE_NAME: &str = "datebound.yml";

const DEFAULT_MYSQL_PORT: u16 = 3306;

/// Run configuration from datebound.yml
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Connection string, Go driver style or `mysql://` URL
    #[serde(default = "default_dsn")]
    pub dsn: String,

    /// Scratch table recreated for every case
    #[serde(default = "default_table")]
    pub table: String,

    /// Session time zone set before any case runs
    #[serde(default = "default_time_zone")]
    pub time_zone: String,

    /// Functions to exercise
    #[serde(default = "default_functions")]
    pub functions: Vec<DateFunction>,

    /// Column types to exercise
    #[serde(default = "default_column_types")]
    pub column_types: Vec<ColumnType>,
}

fn default_dsn() -> String {
    DEFAULT_DSN.to_string()
}

fn default_table() -> String {
    "t".to_string()
}

fn default_time_zone() -> String {
    "UTC".to_string()
}

fn default_functions() -> Vec<DateFunction> {
    DateFunction::ALL.to_vec()
}

fn default_column_types() -> Vec<ColumnType> {
    ColumnType::ALL.to_vec()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            dsn: default_dsn(),
            table: default_table(),
            time_zone: default_time_zone(),
            functions: default_functions(),
            column_types: default_column_types(),
        }
    }
}

impl Config {
    /// Load configuration from a file
    pub fn load(path: &Path) -> CoreResult<Self> {
        if !path.exists() {
            return Err(CoreError::ConfigNotFound {
                path: path.display().to_string(),
            });
        }

        let content = std::fs::read_to_string(path)?;
        let config: Config =
            serde_yaml::from_str(&content).map_err(|e| CoreError::ConfigParseError {
                message: e.to_string(),
            })?;

        config.validate()?;
        Ok(config)
    }

    /// Load `datebound.yml` from `dir` if present, defaults otherwise
    pub fn load_from_dir(dir: &Path) -> CoreResult<Self> {
        let path = dir.join(CONFIG_FILE_NAME);
        if path.exists() {
            Self::load(&path)
        } else {
            Ok(Self::default())
        }
    }

    /// Check values that serde cannot
    pub fn validate(&self) -> CoreResult<()> {
        if !is_plain_identifier(&self.table) {
            return Err(CoreError::ConfigInvalid {
                message: format!(
                    "table '{}' must match [A-Za-z_][A-Za-z0-9_]*",
                    self.table
                ),
            });
        }
        if self.time_zone.is_empty() || self.time_zone.contains('\'') {
            return Err(CoreError::ConfigInvalid {
                message: format!("time_zone '{}' is not a valid zone name", self.time_zone),
            });
        }
        if self.functions.is_empty() {
            return Err(CoreError::ConfigInvalid {
                message: "functions must list at least one function".to_string(),
            });
        }
        if self.column_types.is_empty() {
            return Err(CoreError::ConfigInvalid {
                message: "column_types must list at least one column type".to_string(),
            });
        }
        dsn_to_url(&self.dsn)?;
        Ok(())
    }

    /// Connection URL derived from `dsn`
    pub fn connection_url(&self) -> CoreResult<String> {
        dsn_to_url(&self.dsn)
    }
}

/// Whether `name` can be spliced into SQL as an unquoted identifier.
pub fn is_plain_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    matches!(chars.next(), Some(c) if c.is_ascii_alphabetic() || c == '_')
        && chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

/// Convert a connection string into a `mysql://` URL.
///
/// URLs are parsed and re-serialized. Otherwise the Go driver form
/// `[user[:password]@][protocol[(address)]]/dbname[?params]` is expected.
pub fn dsn_to_url(dsn: &str) -> CoreResult<String> {
    let invalid = |reason: &str| CoreError::InvalidDsn {
        dsn: dsn.to_string(),
        reason: reason.to_string(),
    };

    if dsn.starts_with("mysql://") {
        let url = Url::parse(dsn).map_err(|e| invalid(&e.to_string()))?;
        return Ok(url.into());
    }

    let (prefix, tail) = dsn
        .rsplit_once('/')
        .ok_or_else(|| invalid("missing '/dbname'"))?;
    let (dbname, params) = match tail.split_once('?') {
        Some((db, params)) => (db, Some(params)),
        None => (tail, None),
    };

    let (credentials, endpoint) = match prefix.rsplit_once('@') {
        Some((credentials, endpoint)) => (Some(credentials), endpoint),
        None => (None, prefix),
    };

    let (protocol, address) = match endpoint.split_once('(') {
        Some((protocol, rest)) => (
            protocol,
            rest.strip_suffix(')')
                .ok_or_else(|| invalid("unterminated address"))?,
        ),
        None => (endpoint, ""),
    };

    let mut query: Vec<(String, String)> = Vec::new();
    let mut url = match protocol {
        "" | "tcp" => {
            let address = if address.is_empty() { "127.0.0.1" } else { address };
            let mut url = Url::parse(&format!("mysql://{address}"))
                .map_err(|e| invalid(&format!("bad address '{address}': {e}")))?;
            if url.port().is_none() {
                url.set_port(Some(DEFAULT_MYSQL_PORT))
                    .map_err(|_| invalid("address has no host"))?;
            }
            url
        }
        "unix" => {
            if address.is_empty() {
                return Err(invalid("unix protocol requires a socket path"));
            }
            query.push(("socket".to_string(), address.to_string()));
            Url::parse("mysql://localhost").map_err(|e| invalid(&e.to_string()))?
        }
        other => return Err(invalid(&format!("unsupported protocol '{other}'"))),
    };

    if let Some(credentials) = credentials {
        let (user, password) = match credentials.split_once(':') {
            Some((user, password)) => (user, password),
            None => (credentials, ""),
        };
        url.set_username(user)
            .map_err(|_| invalid("credentials need a host"))?;
        if !password.is_empty() {
            url.set_password(Some(password))
                .map_err(|_| invalid("credentials need a host"))?;
        }
    }

    url.set_path(&format!("/{dbname}"));
    if let Some(params) = params {
        query.extend(form_urlencoded::parse(params.as_bytes()).into_owned());
    }
    if !query.is_empty() {
        let mut pairs = url.query_pairs_mut();
        for (key, value) in &query {
            pairs.append_pair(key, value);
        }
    }
    Ok(url.into())
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
