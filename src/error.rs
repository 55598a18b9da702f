//! Bridge-level error types shared across configuration, request parsing, and documents.

// std
use std::{io, path::PathBuf};
// self
use crate::_prelude::*;

/// Bridge-wide result type alias returning [`Error`] by default.
pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Canonical bridge error exposed by public APIs.
#[derive(Debug, ThisError)]
pub enum Error {
	/// Caller-supplied configuration failed validation.
	#[error(transparent)]
	Config(#[from] ConfigError),
	/// Caller-supplied request parameters failed validation.
	#[error(transparent)]
	Request(#[from] RequestError),
	/// Configuration document could not be produced, parsed, or written.
	#[error(transparent)]
	Document(#[from] DocumentError),
}

/// Configuration and validation failures raised while assembling a client configuration.
#[derive(Debug, ThisError)]
pub enum ConfigError {
	/// The `clientId` entry is missing, null, or empty.
	#[error("Client identifier is required.")]
	MissingClientId,
	/// No redirect URI was supplied and none could be derived.
	#[error("Redirect URI is required when no signing certificate is available to derive one.")]
	MissingRedirectUri,
	/// A derived broker redirect URI cannot be built.
	#[error("Redirect URI is invalid.")]
	InvalidRedirect {
		/// Underlying parsing failure.
		#[source]
		source: url::ParseError,
	},
	/// A required bridge entry is absent or null.
	#[error("Configuration field `{field}` is required.")]
	MissingField {
		/// Dotted path of the missing entry.
		field: &'static str,
	},
	/// A bridge entry exists but carries an unexpected type tag.
	#[error("Configuration field `{field}` must be {expected}.")]
	InvalidField {
		/// Dotted path of the offending entry.
		field: String,
		/// Human-readable description of the accepted type.
		expected: &'static str,
	},
	/// Redirect derivation requires exactly one signing certificate.
	#[error("Expected exactly one signing certificate for package `{package}`, found {count}.")]
	UnexpectedSignatureCount {
		/// Application package name.
		package: String,
		/// Number of certificates supplied.
		count: usize,
	},
}

/// Failures raised while parsing token request parameters from the bridge.
#[derive(Clone, Debug, PartialEq, ThisError)]
pub enum RequestError {
	/// A required entry is absent or null.
	#[error("Request field `{field}` is required.")]
	MissingField {
		/// Dotted path of the missing entry.
		field: &'static str,
	},
	/// An entry exists but carries an unexpected type tag.
	#[error("Request field `{field}` must be {expected}.")]
	InvalidField {
		/// Dotted path of the offending entry.
		field: &'static str,
		/// Human-readable description of the accepted type.
		expected: &'static str,
	},
	/// The prompt type index does not name a known prompt behavior.
	#[error("Prompt type {value} is not supported.")]
	UnknownPromptType {
		/// Raw numeric value supplied by the caller.
		value: f64,
	},
}

/// Failures while serializing, parsing, or persisting configuration documents.
#[derive(Debug, ThisError)]
pub enum DocumentError {
	/// Document could not be rendered as JSON text.
	#[error("Configuration document could not be serialized.")]
	Serialize(#[source] serde_json::Error),
	/// JSON text could not be parsed into a document.
	#[error("Configuration document is malformed.")]
	Parse(#[from] serde_path_to_error::Error<serde_json::Error>),
	/// The parsed JSON value is not an object.
	#[error("Configuration document must be a JSON object.")]
	NotAnObject,
	/// Writing the document to disk failed.
	#[error("Failed to write configuration document to {}.", .path.display())]
	Io {
		/// Destination (or temporary) path involved in the failure.
		path: PathBuf,
		/// Underlying I/O failure.
		#[source]
		source: io::Error,
	},
}
