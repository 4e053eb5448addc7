// SPDX-License-Identifier: MPL-2.0
//! Crate-level error type.
//!
//! Toast store operations never fail; only configuration file I/O does.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("I/O Error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Config Error: {0}")]
    ConfigParse(#[from] toml::de::Error),

    #[error("Config Error: {0}")]
    ConfigSerialize(#[from] toml::ser::Error),
}

pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_formats_io_error() {
        let err = Error::Io(std::io::Error::other("disk failure"));
        assert_eq!(format!("{}", err), "I/O Error: disk failure");
    }

    #[test]
    fn from_io_error_produces_io_variant() {
        let io_error = std::io::Error::other("boom");
        let err: Error = io_error.into();
        match err {
            Error::Io(inner) => assert!(inner.to_string().contains("boom")),
            _ => panic!("expected Io variant"),
        }
    }

    #[test]
    fn toml_parse_error_becomes_config_error() {
        let parse_error = toml::from_str::<toml::Table>("not = valid = toml").unwrap_err();
        let err: Error = parse_error.into();
        assert!(matches!(err, Error::ConfigParse(_)));
        assert!(format!("{}", err).starts_with("Config Error:"));
    }
}
