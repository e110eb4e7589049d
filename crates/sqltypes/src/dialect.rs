use std::{
    convert::Infallible,
    fmt::{self, Display, Formatter},
    str::FromStr,
};

use crate::{Error, Result};

/// The SQL variant a statement is rendered for.
///
/// Dialects we have no rendering for are kept as [`Dialect::Unsupported`] rather than rejected,
/// so that callers can still construct statements and check [`Dialect::is_supported`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub enum Dialect {
    MySql,
    /// MySQL-compatible, but without a native JSON column type.
    MariaDb,
    Postgres,
    #[default]
    Sqlite,
    Unsupported(String),
}

impl Dialect {
    /// Look up a dialect by name. Unknown names produce [`Dialect::Unsupported`].
    pub fn from_name(name: &str) -> Self {
        match name.trim().to_ascii_lowercase().as_str() {
            "mysql" => Dialect::MySql,
            "mariadb" => Dialect::MariaDb,
            "postgres" | "postgresql" => Dialect::Postgres,
            "sqlite" | "sqlite3" => Dialect::Sqlite,
            _ => Dialect::Unsupported(name.to_string()),
        }
    }

    /// Pick the dialect from the scheme of a database URL such as `postgres://host/db` or
    /// `sqlite::memory:`.
    pub fn from_url(database_url: &str) -> Result<Self> {
        let url = url::Url::parse(database_url)
            .map_err(|e| Error::Config(format!("invalid database url {database_url:?}: {e}")))?;
        Ok(Self::from_name(url.scheme()))
    }

    /// MySQL, or MariaDB when the reported server version says so.
    pub fn mysql_with_version(server_version: &str) -> Self {
        if server_version.contains("MariaDB") {
            Dialect::MariaDb
        } else {
            Dialect::MySql
        }
    }

    /// Canonical identifier. MariaDB reports as `mysql`, since it shares MySQL's function family.
    pub fn name(&self) -> &str {
        match self {
            Dialect::MySql | Dialect::MariaDb => "mysql",
            Dialect::Postgres => "postgres",
            Dialect::Sqlite => "sqlite",
            Dialect::Unsupported(name) => name.as_str(),
        }
    }

    pub fn is_supported(&self) -> bool {
        !matches!(self, Dialect::Unsupported(_))
    }

    /// True for the dialects that share MySQL's `JSON_*` function family.
    pub fn is_mysql_family(&self) -> bool {
        matches!(self, Dialect::MySql | Dialect::MariaDb)
    }

    /// Whether bind parameters are numbered (`$1`, `$2`, ...) rather than written as `?`.
    pub fn numbered_placeholders(&self) -> bool {
        matches!(self, Dialect::Postgres)
    }

    /// Quote an SQL identifier, escaping embedded quote characters.
    pub fn quote_identifier(&self, ident: &str) -> String {
        if self.is_mysql_family() {
            format!("`{}`", ident.replace('`', "``"))
        } else {
            format!("\"{}\"", ident.replace('"', "\"\""))
        }
    }
}

impl Display for Dialect {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.pad(self.name())
    }
}

impl FromStr for Dialect {
    type Err = Infallible;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Ok(Self::from_name(s))
    }
}
