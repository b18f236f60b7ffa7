use std::error::Error;
use std::fmt::{self, Display, Formatter};
use std::io;

pub type ConnectionResult<T> = Result<T, ConnectionError>;

#[derive(Debug)]
pub enum ConnectionError {
    NoStdio,
    Spawn(Box<io::Error>),
    Init(Box<RequestError>),
}

impl Display for ConnectionError {
    fn fmt(&self, fmt: &mut Formatter) -> fmt::Result {
        match self {
            ConnectionError::NoStdio    => write!(fmt, "engine stdio not captured"),
            ConnectionError::Spawn(err) => err.fmt(fmt),
            ConnectionError::Init(err)  => err.fmt(fmt),
        }
    }
}

impl Error for ConnectionError {}

impl From<io::Error> for ConnectionError {
    fn from(err: io::Error) -> Self {
        ConnectionError::Spawn(Box::new(err))
    }
}

impl From<RequestError> for ConnectionError {
    fn from(err: RequestError) -> Self {
        ConnectionError::Init(Box::new(err))
    }
}

pub type RequestResult<T> = Result<T, RequestError>;

#[derive(Debug)]
pub enum RequestError {
    Io(Box<io::Error>),
    Protocol(Box<serde_json::Error>),
    EngineClosed,
    /// Case when the engine itself reported a failure, carrying the
    /// engine's reason string. For an analyze request this refers to the
    /// submitted line only; the engine is still usable afterwards.
    Engine(String),
    Deserialization(Box<DeserializationError>),
}

impl Display for RequestError {
    fn fmt(&self, fmt: &mut Formatter) -> fmt::Result {
        match self {
            RequestError::Io(err)              => err.fmt(fmt),
            RequestError::Protocol(err)        => err.fmt(fmt),
            RequestError::EngineClosed         => write!(fmt, "engine closed its output stream"),
            RequestError::Engine(reason)       => write!(fmt, "engine error: {}", reason),
            RequestError::Deserialization(err) => err.fmt(fmt),
        }
    }
}

impl Error for RequestError {}

impl From<io::Error> for RequestError {
    fn from(err: io::Error) -> Self {
        RequestError::Io(Box::new(err))
    }
}

impl From<serde_json::Error> for RequestError {
    fn from(err: serde_json::Error) -> Self {
        RequestError::Protocol(Box::new(err))
    }
}

impl From<DeserializationError> for RequestError {
    fn from(err: DeserializationError) -> Self {
        RequestError::Deserialization(Box::new(err))
    }
}

pub(crate) type DeserializationResult<T> = Result<T, DeserializationError>;

#[derive(Debug, PartialEq, Eq)]
pub enum DeserializationError {
    FieldMissing,
    FieldOutOfRange,
}

impl Display for DeserializationError {
    fn fmt(&self, fmt: &mut Formatter) -> fmt::Result {
        write!(fmt, "error deserializing Oruri response: {}", match self {
            DeserializationError::FieldMissing    => "missing field",
            DeserializationError::FieldOutOfRange => "field out of range",
        })
    }
}

impl Error for DeserializationError {}

#[derive(Debug)]
pub struct InvalidModeError(pub String);

impl Display for InvalidModeError {
    fn fmt(&self, fmt: &mut Formatter) -> fmt::Result {
        write!(fmt, "mode should be A, B or C, not {:?}", self.0)
    }
}

impl Error for InvalidModeError {}

pub(crate) trait Exists<T> {
    fn exists(self) -> DeserializationResult<T>;
}

impl<T> Exists<T> for Option<T> {
    fn exists(self) -> DeserializationResult<T> {
        self.ok_or(DeserializationError::FieldMissing)
    }
}
