// std
use std::{
	fs::{self, File},
	io::Write,
	path::{Path, PathBuf},
};
// crates.io
use serde_json::Map as JsonMap;
// self
use crate::{
	_prelude::*,
	authority::{AudienceType, AuthorityKind},
	error::DocumentError,
};

/// JSON configuration document consumed by the identity library.
///
/// Always a JSON object; key order follows insertion order.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ConfigDocument(JsonMap<String, JsonValue>);
impl ConfigDocument {
	/// Wraps an already-built JSON object.
	pub fn from_object(object: JsonMap<String, JsonValue>) -> Self {
		Self(object)
	}

	/// Parses JSON text, reporting the failing path on malformed input.
	pub fn from_json_str(text: &str) -> Result<Self, DocumentError> {
		let mut deserializer = serde_json::Deserializer::from_str(text);
		let value: JsonValue = serde_path_to_error::deserialize(&mut deserializer)?;

		match value {
			JsonValue::Object(object) => Ok(Self(object)),
			_ => Err(DocumentError::NotAnObject),
		}
	}

	/// Borrows the underlying JSON object.
	pub fn as_object(&self) -> &JsonMap<String, JsonValue> {
		&self.0
	}

	/// Consumes the document, returning the JSON object.
	pub fn into_object(self) -> JsonMap<String, JsonValue> {
		self.0
	}

	/// Looks up a top-level field.
	pub fn get(&self, key: &str) -> Option<&JsonValue> {
		self.0.get(key)
	}

	/// Primary authority recorded in the document.
	pub fn authority(&self) -> Option<&str> {
		self.get("authority").and_then(JsonValue::as_str)
	}

	/// Rendered `authorities` entries.
	pub fn authorities(&self) -> &[JsonValue] {
		self.get("authorities").and_then(JsonValue::as_array).map_or(&[], Vec::as_slice)
	}

	/// Compact JSON text.
	pub fn to_json_string(&self) -> Result<String, DocumentError> {
		serde_json::to_string(&self.0).map_err(DocumentError::Serialize)
	}

	/// Indented JSON text.
	pub fn to_json_pretty(&self) -> Result<String, DocumentError> {
		serde_json::to_string_pretty(&self.0).map_err(DocumentError::Serialize)
	}

	/// Reads the document back into a typed view, reporting the failing path on mismatch.
	pub fn summary(&self) -> Result<ConfigSummary, DocumentError> {
		let value = JsonValue::Object(self.0.clone());

		Ok(serde_path_to_error::deserialize(&value)?)
	}

	/// Writes the document to `path` via a sibling temporary file and an atomic rename.
	pub fn write_to(&self, path: impl AsRef<Path>) -> Result<(), DocumentError> {
		let path = path.as_ref();
		let serialized = self.to_json_string()?;

		if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
			fs::create_dir_all(parent)
				.map_err(|source| DocumentError::Io { path: parent.to_path_buf(), source })?;
		}

		let mut tmp_path = PathBuf::from(path);

		tmp_path.set_extension("tmp");

		{
			let io_err = |source| DocumentError::Io { path: tmp_path.clone(), source };
			let mut file = File::create(&tmp_path).map_err(io_err)?;

			file.write_all(serialized.as_bytes()).map_err(io_err)?;
			file.sync_all().map_err(io_err)?;
		}

		fs::rename(&tmp_path, path)
			.map_err(|source| DocumentError::Io { path: path.to_path_buf(), source })?;

		#[cfg(feature = "tracing")]
		tracing::debug!(path = %path.display(), "configuration document written");

		Ok(())
	}
}
impl Display for ConfigDocument {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		write!(f, "{}", JsonValue::Object(self.0.clone()))
	}
}

/// Typed read-back of a rendered configuration document.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct ConfigSummary {
	/// Account mode; always `MULTIPLE` for documents built by this crate.
	pub account_mode: String,
	/// Whether the broker redirect URI is registered.
	pub broker_redirect_uri_registered: bool,
	/// Primary authority.
	pub authority: String,
	/// Application (client) identifier.
	pub client_id: String,
	/// Redirect URI.
	pub redirect_uri: String,
	/// Authority entries in document order.
	pub authorities: Vec<AuthorityEntry>,
}
impl ConfigSummary {
	/// Returns the entry flagged as default.
	pub fn default_authority(&self) -> Option<&AuthorityEntry> {
		self.authorities.iter().find(|entry| entry.default)
	}
}

/// Typed read-back of one `authorities` entry.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct AuthorityEntry {
	/// Default flag; absent means `false`.
	#[serde(default)]
	pub default: bool,
	/// Authority family; null for unrecognized authorities.
	#[serde(rename = "type")]
	pub kind: Option<AuthorityKind>,
	/// Full authority URL; only set for B2C authorities.
	pub authority_url: Option<String>,
	/// Audience; only set for AAD authorities.
	pub audience: Option<AudienceEntry>,
}

/// Typed read-back of an AAD audience block.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct AudienceEntry {
	/// Audience type.
	#[serde(rename = "type")]
	pub audience: AudienceType,
	/// Tenant; only set for single-tenant audiences.
	pub tenant_id: Option<String>,
}
