#![deny(missing_docs)]

//! This crate defines error & result types for GraphAr.
//! It also contains a variety of useful macros for error handling.

use std::backtrace::Backtrace;
use std::borrow::Cow;
use std::fmt::{Debug, Display, Formatter};
use std::ops::Deref;
use std::{fmt, io};

/// A string that can be used as an error message.
#[derive(Debug)]
pub struct ErrString(Cow<'static, str>);

impl<T> From<T> for ErrString
where
    T: Into<Cow<'static, str>>,
{
    fn from(msg: T) -> Self {
        Self(msg.into())
    }
}

impl AsRef<str> for ErrString {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl Deref for ErrString {
    type Target = str;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl Display for ErrString {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        Display::fmt(&self.0, f)
    }
}

/// The top-level error type for GraphAr.
#[derive(thiserror::Error)]
#[non_exhaustive]
pub enum GarError {
    /// A property group that is not declared for the vertex type or adjacency list ordering.
    #[error("unknown property group: {0}\nBacktrace:\n{1}")]
    UnknownPropertyGroup(ErrString, Box<Backtrace>),
    /// An adjacency list ordering that is not declared, or lacks a requested capability.
    #[error("unsupported adjacency list type: {0}\nBacktrace:\n{1}")]
    UnsupportedAdjListType(ErrString, Box<Backtrace>),
    /// A resolved chunk path that is absent from storage.
    #[error("chunk not found: {0}\nBacktrace:\n{1}")]
    ChunkNotFound(ErrString, Box<Backtrace>),
    /// A file format that is unknown, or that the loader cannot decode.
    #[error("unsupported format: {0}\nBacktrace:\n{1}")]
    UnsupportedFormat(ErrString, Box<Backtrace>),
    /// A counter or offset chunk that is required but absent or malformed.
    #[error("metadata missing: {0}\nBacktrace:\n{1}")]
    MetadataMissing(ErrString, Box<Backtrace>),
    /// A schema value that violates its construction invariants.
    #[error("invalid schema: {0}\nBacktrace:\n{1}")]
    InvalidSchema(ErrString, Box<Backtrace>),
    /// An invalid argument was provided.
    #[error("{0}\nBacktrace:\n{1}")]
    InvalidArgument(ErrString, Box<Backtrace>),
    /// Tables that were expected to line up row for row do not.
    #[error("misaligned chunks: {0}\nBacktrace:\n{1}")]
    MisalignedChunks(ErrString, Box<Backtrace>),
    /// An error with additional context.
    #[error("{0}: {1}")]
    Context(ErrString, #[source] Box<GarError>),
    /// A wrapper for IO errors.
    #[error("{0}\nBacktrace:\n{1}")]
    IOError(io::Error, Box<Backtrace>),
    /// A wrapper for errors from the Arrow library.
    #[error("{0}\nBacktrace:\n{1}")]
    ArrowError(arrow_schema::ArrowError, Box<Backtrace>),
    /// A wrapper for errors from the Parquet library.
    #[cfg(feature = "parquet")]
    #[error("{0}\nBacktrace:\n{1}")]
    ParquetError(parquet::errors::ParquetError, Box<Backtrace>),
    /// A wrapper for failures to build a rayon thread pool.
    #[cfg(feature = "rayon")]
    #[error("{0}\nBacktrace:\n{1}")]
    ThreadPoolError(rayon::ThreadPoolBuildError, Box<Backtrace>),
    /// A wrapper for errors from the serde_json library.
    #[cfg(feature = "serde")]
    #[error("{0}\nBacktrace:\n{1}")]
    JsonError(serde_json::Error, Box<Backtrace>),
}

impl GarError {
    /// Adds additional context to an error.
    pub fn with_context<T: Into<ErrString>>(self, msg: T) -> Self {
        GarError::Context(msg.into(), Box::new(self))
    }

    /// Strips any [`GarError::Context`] layers and returns the underlying error.
    pub fn root_cause(&self) -> &GarError {
        match self {
            GarError::Context(_, inner) => inner.root_cause(),
            other => other,
        }
    }

    /// Whether the root cause is [`GarError::ChunkNotFound`].
    pub fn is_chunk_not_found(&self) -> bool {
        matches!(self.root_cause(), GarError::ChunkNotFound(..))
    }
}

impl Debug for GarError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        Display::fmt(self, f)
    }
}

/// A type alias for Results that return GarErrors as their error type.
pub type GarResult<T> = Result<T, GarError>;

/// A convenient macro for creating a GarError.
#[macro_export]
macro_rules! gar_err {
    ($variant:ident: $fmt:literal $(, $arg:expr)* $(,)?) => {{
        use std::backtrace::Backtrace;
        $crate::__private::must_use(
            $crate::GarError::$variant(format!($fmt, $($arg),*).into(), Box::new(Backtrace::capture()))
        )
    }};
    ($variant:ident: $err:expr $(,)?) => {
        $crate::__private::must_use(
            $crate::GarError::$variant($err)
        )
    };
    ($fmt:literal $(, $arg:expr)* $(,)?) => {
        $crate::gar_err!(InvalidArgument: $fmt, $($arg),*)
    };
}

/// A convenience macro for creating a GarError and immediately returning it.
#[macro_export]
macro_rules! gar_bail {
    ($($tt:tt)+) => {
        return Err($crate::gar_err!($($tt)+))
    };
}

impl From<io::Error> for GarError {
    fn from(value: io::Error) -> Self {
        GarError::IOError(value, Box::new(Backtrace::capture()))
    }
}

impl From<arrow_schema::ArrowError> for GarError {
    fn from(value: arrow_schema::ArrowError) -> Self {
        GarError::ArrowError(value, Box::new(Backtrace::capture()))
    }
}

#[cfg(feature = "parquet")]
impl From<parquet::errors::ParquetError> for GarError {
    fn from(value: parquet::errors::ParquetError) -> Self {
        GarError::ParquetError(value, Box::new(Backtrace::capture()))
    }
}

#[cfg(feature = "rayon")]
impl From<rayon::ThreadPoolBuildError> for GarError {
    fn from(value: rayon::ThreadPoolBuildError) -> Self {
        GarError::ThreadPoolError(value, Box::new(Backtrace::capture()))
    }
}

#[cfg(feature = "serde")]
impl From<serde_json::Error> for GarError {
    fn from(value: serde_json::Error) -> Self {
        GarError::JsonError(value, Box::new(Backtrace::capture()))
    }
}

// Not public, referenced by macros only.
#[doc(hidden)]
pub mod __private {
    #[doc(hidden)]
    #[inline]
    #[must_use]
    pub const fn must_use(error: crate::GarError) -> crate::GarError {
        error
    }
}
