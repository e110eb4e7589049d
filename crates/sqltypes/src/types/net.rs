//! Network addresses: [`Cidr`] for networks and [`Inet`] for host addresses.

use std::{
    fmt::{self, Display, Formatter},
    net::IpAddr,
    str::FromStr,
};

use ipnetwork::IpNetwork;
use serde::{Deserialize, Serialize};

use crate::{
    Dialect, Error,
    decode::Decode,
    encode::Encode,
    error::{DecodeError, EncodeError},
    types::ColumnType,
    value::{DataType, Value},
};

/// An IP network in `address/prefix` notation, such as `192.168.0.0/24`.
///
/// Host bits are cleared on construction, so `192.168.0.7/24` is stored as `192.168.0.0/24`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Cidr(pub IpNetwork);

impl Cidr {
    pub fn parse(input: &str) -> crate::Result<Self> {
        parse_network(input).map_err(|e| Error::parse("CIDR", input, e))
    }

    pub fn network(&self) -> IpAddr {
        self.0.network()
    }

    pub fn prefix(&self) -> u8 {
        self.0.prefix()
    }

    pub fn contains(&self, ip: IpAddr) -> bool {
        self.0.contains(ip)
    }
}

fn parse_network(input: &str) -> Result<Cidr, ipnetwork::IpNetworkError> {
    let net: IpNetwork = input.trim().parse()?;
    IpNetwork::new(net.network(), net.prefix()).map(Cidr)
}

impl Display for Cidr {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.0.ip(), self.0.prefix())
    }
}

impl FromStr for Cidr {
    type Err = Error;

    fn from_str(s: &str) -> crate::Result<Self> {
        Self::parse(s)
    }
}

impl Encode for Cidr {
    fn encode(self) -> Result<Value, EncodeError> {
        Ok(Value::tagged_text(self.to_string(), DataType::Cidr))
    }
}

impl<'r> Decode<'r> for Cidr {
    fn decode(value: &'r Value) -> Result<Self, DecodeError> {
        compatible!(value, DataType::Cidr | DataType::Inet | DataType::Text | DataType::Blob);
        let text = value.as_text()?;
        parse_network(text)
            .map_err(|e| DecodeError::Conversion(format!("invalid CIDR {text:?}: {e}")))
    }
}

impl ColumnType for Cidr {
    fn data_type() -> DataType {
        DataType::Cidr
    }

    fn column_type(dialect: &Dialect) -> Option<&'static str> {
        match dialect {
            Dialect::Postgres => Some("CIDR"),
            // Longest form: an IPv6 address plus `/128`.
            Dialect::MySql | Dialect::MariaDb => Some("VARCHAR(43)"),
            Dialect::Sqlite => Some("TEXT"),
            Dialect::Unsupported(_) => None,
        }
    }
}

/// A single host address.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Inet(pub IpAddr);

impl Inet {
    pub fn parse(input: &str) -> crate::Result<Self> {
        parse_inet(input).map_err(|e| Error::parse("inet", input, e))
    }

    pub fn ip(&self) -> IpAddr {
        self.0
    }
}

/// PostgreSQL returns `inet` values with a prefix (`10.0.0.1/32`); a full-length prefix is
/// accepted and dropped.
fn parse_inet(input: &str) -> Result<Inet, String> {
    let input = input.trim();
    let (addr, prefix) = match input.split_once('/') {
        Some((addr, prefix)) => (addr, Some(prefix)),
        None => (input, None),
    };
    let ip: IpAddr = addr.parse().map_err(|e: std::net::AddrParseError| e.to_string())?;
    let full = if ip.is_ipv4() { "32" } else { "128" };
    match prefix {
        None => Ok(Inet(ip)),
        Some(p) if p == full => Ok(Inet(ip)),
        Some(p) => Err(format!("unexpected network prefix /{p} on a host address")),
    }
}

impl Display for Inet {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl FromStr for Inet {
    type Err = Error;

    fn from_str(s: &str) -> crate::Result<Self> {
        Self::parse(s)
    }
}

impl From<IpAddr> for Inet {
    fn from(ip: IpAddr) -> Self {
        Self(ip)
    }
}

impl Encode for Inet {
    fn encode(self) -> Result<Value, EncodeError> {
        Ok(Value::tagged_text(self.0.to_string(), DataType::Inet))
    }
}

impl<'r> Decode<'r> for Inet {
    fn decode(value: &'r Value) -> Result<Self, DecodeError> {
        compatible!(value, DataType::Inet | DataType::Text | DataType::Blob);
        let text = value.as_text()?;
        parse_inet(text).map_err(|e| DecodeError::Conversion(format!("invalid inet {text:?}: {e}")))
    }
}

impl ColumnType for Inet {
    fn data_type() -> DataType {
        DataType::Inet
    }

    fn column_type(dialect: &Dialect) -> Option<&'static str> {
        match dialect {
            Dialect::Postgres => Some("INET"),
            Dialect::MySql | Dialect::MariaDb => Some("VARCHAR(39)"),
            Dialect::Sqlite => Some("TEXT"),
            Dialect::Unsupported(_) => None,
        }
    }
}
