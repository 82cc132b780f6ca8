//! Compact flag syntax
//!
//! Some flags pack several structured values into a single string so that
//! users do not have to repeat the flag once per value:
//!
//! - `--pipes NAME:PORT:REMOTE,NAME:PORT:REMOTE,...`
//! - `--labels KEY=VALUE,KEY=VALUE,...`
//!
//! Every element type implements [`FromStr`] with [`FlagError`] as its error,
//! and [`parse_list`] splits the raw flag value and parses the elements in
//! order. A single malformed element fails the whole flag.

use serde::{Deserialize, Serialize};
use std::num::IntErrorKind;
use std::str::FromStr;
use thiserror::Error;

/// Expected layout of a single pipe, used in error messages and help texts.
pub const PIPE_FORMAT: &str = "NAME:PORT:REMOTE";

/// Errors produced while parsing compact flag values.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum FlagError {
    #[error("pipe '{spec}' is incomplete: expected a colon-separated list `NAME:PORT:REMOTE`")]
    IncompletePipe { spec: String },

    #[error("invalid port '{port}' in pipe '{spec}'")]
    InvalidPort {
        spec: String,
        port: String,
        #[source]
        source: PortError,
    },

    #[error("label '{spec}' is invalid: expected `KEY=VALUE` with a non-empty key")]
    InvalidLabel { spec: String },

    #[error("failed to parse flag `{flag}` (element {index})")]
    Element {
        flag: String,
        index: usize,
        #[source]
        source: Box<FlagError>,
    },
}

/// Why a port field was rejected.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum PortError {
    #[error("not an unsigned decimal number")]
    NotANumber,
    #[error("out of range, must be between 0 and 65535")]
    OutOfRange,
}

/// A named port-forwarding rule of a gateway.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PipeSpec {
    /// Service endpoint exposed on the client side
    pub name: String,
    /// Port the pipe listens on in the client pod
    pub port: u16,
    /// Remote service endpoint the pipe forwards to
    pub remote: String,
}

impl FromStr for PipeSpec {
    type Err = FlagError;

    fn from_str(spec: &str) -> Result<Self, Self::Err> {
        let fields: Vec<&str> = spec.split(':').collect();
        if fields.len() < 3 {
            return Err(FlagError::IncompletePipe {
                spec: spec.to_string(),
            });
        }
        if fields.len() > 3 {
            // only the first three fields are meaningful
            tracing::warn!(
                pipe = spec,
                ignored = %fields[3..].join(":"),
                "ignoring extra fields in pipe"
            );
        }

        let port = parse_port(fields[1]).map_err(|source| FlagError::InvalidPort {
            spec: spec.to_string(),
            port: fields[1].to_string(),
            source,
        })?;

        Ok(PipeSpec {
            name: fields[0].to_string(),
            port,
            remote: fields[2].to_string(),
        })
    }
}

fn parse_port(field: &str) -> Result<u16, PortError> {
    // u16::from_str accepts a leading '+', a port must be plain digits
    if field.is_empty() || !field.bytes().all(|b| b.is_ascii_digit()) {
        return Err(PortError::NotANumber);
    }
    field.parse::<u16>().map_err(|e| match e.kind() {
        IntErrorKind::PosOverflow => PortError::OutOfRange,
        _ => PortError::NotANumber,
    })
}

/// A `KEY=VALUE` label attached to a resource.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Label {
    pub key: String,
    pub value: String,
}

impl FromStr for Label {
    type Err = FlagError;

    fn from_str(spec: &str) -> Result<Self, Self::Err> {
        match spec.split_once('=') {
            Some((key, value)) if !key.is_empty() => Ok(Label {
                key: key.to_string(),
                value: value.to_string(),
            }),
            _ => Err(FlagError::InvalidLabel {
                spec: spec.to_string(),
            }),
        }
    }
}

/// Parse a comma-separated flag value into its elements, preserving order.
///
/// The raw value is split on `,` without trimming or skipping empty
/// candidates, so `""` yields one empty element which then has to parse on
/// its own. The first failing element aborts the parse.
///
/// # Errors
/// Returns [`FlagError::Element`] naming the flag and the failing element.
pub fn parse_list<T>(flag: &str, value: &str) -> Result<Vec<T>, FlagError>
where
    T: FromStr<Err = FlagError>,
{
    value
        .split(',')
        .enumerate()
        .map(|(index, element)| {
            element.parse::<T>().map_err(|source| FlagError::Element {
                flag: flag.to_string(),
                index,
                source: Box::new(source),
            })
        })
        .collect()
}

/// Parse the `--pipes` flag of `gateway create`.
pub fn parse_pipes(value: &str) -> Result<Vec<PipeSpec>, FlagError> {
    parse_list("pipes", value)
}

/// Parse a `--labels` flag into key/value pairs.
pub fn parse_labels(value: &str) -> Result<Vec<Label>, FlagError> {
    parse_list("labels", value)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn inner(err: FlagError) -> FlagError {
        match err {
            FlagError::Element { source, .. } => *source,
            other => other,
        }
    }

    #[test]
    fn test_parse_single_pipe() {
        let pipe: PipeSpec = "svc1:8080:backend.internal".parse().unwrap();
        assert_eq!(
            pipe,
            PipeSpec {
                name: "svc1".to_string(),
                port: 8080,
                remote: "backend.internal".to_string(),
            }
        );
    }

    #[test]
    fn test_pipe_port_bounds() {
        let low: PipeSpec = "a:0:b".parse().unwrap();
        assert_eq!(low.port, 0);
        let high: PipeSpec = "a:65535:b".parse().unwrap();
        assert_eq!(high.port, 65535);
    }

    #[test]
    fn test_pipe_extra_fields_are_ignored() {
        let pipe: PipeSpec = "svc1:8080:backend.internal:9090".parse().unwrap();
        assert_eq!(pipe.name, "svc1");
        assert_eq!(pipe.port, 8080);
        assert_eq!(pipe.remote, "backend.internal");
    }

    #[test]
    fn test_pipe_port_out_of_range() {
        let err = "svc1:70000:backend.internal".parse::<PipeSpec>().unwrap_err();
        assert_eq!(
            err,
            FlagError::InvalidPort {
                spec: "svc1:70000:backend.internal".to_string(),
                port: "70000".to_string(),
                source: PortError::OutOfRange,
            }
        );
    }

    #[test]
    fn test_pipe_port_not_a_number() {
        for spec in ["svc:http:remote", "svc::remote", "svc:-1:remote", "svc:+80:remote"] {
            let err = spec.parse::<PipeSpec>().unwrap_err();
            assert!(
                matches!(
                    err,
                    FlagError::InvalidPort {
                        source: PortError::NotANumber,
                        ..
                    }
                ),
                "{spec} should be rejected as not a number, got {err:?}"
            );
        }
    }

    #[test]
    fn test_pipe_incomplete() {
        let err = "svc1:8080".parse::<PipeSpec>().unwrap_err();
        assert_eq!(
            err,
            FlagError::IncompletePipe {
                spec: "svc1:8080".to_string()
            }
        );
        assert!(err.to_string().contains(PIPE_FORMAT));
    }

    #[test]
    fn test_parse_pipes_preserves_order() {
        let pipes = parse_pipes("svc1:8080:backend.internal,svc2:9090:other.internal").unwrap();
        assert_eq!(pipes.len(), 2);
        assert_eq!(pipes[0].name, "svc1");
        assert_eq!(pipes[0].remote, "backend.internal");
        assert_eq!(pipes[1].name, "svc2");
        assert_eq!(pipes[1].port, 9090);
    }

    #[test]
    fn test_parse_pipes_fails_atomically() {
        let err = parse_pipes("a:1:x,b:2:y,c:99999:z,d:4:w").unwrap_err();
        match err {
            FlagError::Element {
                ref flag, index, ..
            } => {
                assert_eq!(flag, "pipes");
                assert_eq!(index, 2);
            }
            other => panic!("unexpected error {other:?}"),
        }
        assert!(matches!(
            inner(err),
            FlagError::InvalidPort {
                source: PortError::OutOfRange,
                ..
            }
        ));
    }

    #[test]
    fn test_parse_pipes_empty_value_is_an_error() {
        let err = parse_pipes("").unwrap_err();
        assert_eq!(
            inner(err),
            FlagError::IncompletePipe {
                spec: String::new()
            }
        );
    }

    #[test]
    fn test_parse_pipes_trailing_comma_is_an_error() {
        let err = parse_pipes("a:1:x,").unwrap_err();
        assert!(matches!(err, FlagError::Element { index: 1, .. }));
    }

    #[test]
    fn test_parse_labels() {
        let labels = parse_labels("team=core,env=prod,empty=").unwrap();
        assert_eq!(labels.len(), 3);
        assert_eq!(labels[0].key, "team");
        assert_eq!(labels[1].value, "prod");
        assert_eq!(labels[2].value, "");

        assert!(parse_labels("=value").is_err());
        assert!(parse_labels("novalue").is_err());
    }

    #[test]
    fn test_error_message_names_flag_and_element() {
        let err = parse_pipes("svc1:8080").unwrap_err();
        let msg = err.to_string();
        assert!(msg.contains("`pipes`"));
        assert!(msg.contains("element 0"));
    }
}
