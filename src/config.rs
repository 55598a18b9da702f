//! Client configuration inputs and the assembled configuration document.
//!
//! [`MsalConfiguration`] captures what a host passes when creating a client application.
//! [`ConfigAssembler`] validates it, resolves the authority list, and renders the JSON
//! [`ConfigDocument`] the identity library reads at startup.

/// Validation + rendering of configuration documents.
pub mod assembler;
/// Rendered configuration documents and their typed read-back view.
pub mod document;
/// Broker redirect URI derivation from the app's signing certificate.
pub mod redirect;

pub use assembler::*;
pub use document::*;
pub use redirect::*;

// self
use crate::{
	_prelude::*,
	bridge::{BridgeMap, BridgeValue, ReadableType},
	error::ConfigError,
	transcode,
	value::Mapping,
};

/// Authentication settings supplied by the host.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthConfig {
	/// Application (client) identifier; required.
	pub client_id: String,
	/// Primary authority; defaults to [`DEFAULT_AUTHORITY`](crate::authority::DEFAULT_AUTHORITY).
	#[serde(default)]
	pub authority: Option<String>,
	/// Additional authorities the app will request tokens from.
	#[serde(default)]
	pub known_authorities: Vec<String>,
	/// Redirect URI; derived from the app signature when absent.
	#[serde(default)]
	pub redirect_uri: Option<String>,
}
impl AuthConfig {
	/// Creates settings for the given client identifier.
	pub fn new(client_id: impl Into<String>) -> Self {
		Self { client_id: client_id.into(), ..Default::default() }
	}

	/// Sets the primary authority.
	pub fn with_authority(mut self, authority: impl Into<String>) -> Self {
		self.authority = Some(authority.into());

		self
	}

	/// Replaces the known authority list.
	pub fn with_known_authorities<I, S>(mut self, authorities: I) -> Self
	where
		I: IntoIterator<Item = S>,
		S: Into<String>,
	{
		self.known_authorities = authorities.into_iter().map(Into::into).collect();

		self
	}

	/// Sets the redirect URI.
	pub fn with_redirect_uri(mut self, redirect_uri: impl Into<String>) -> Self {
		self.redirect_uri = Some(redirect_uri.into());

		self
	}
}

/// Full client configuration: auth settings plus pass-through library options.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct MsalConfiguration {
	/// Authentication settings.
	pub auth: AuthConfig,
	/// Extra library options copied verbatim into the document before fixed fields are applied.
	pub library_options: Mapping,
}
impl MsalConfiguration {
	/// Creates a configuration with no extra library options.
	pub fn new(auth: AuthConfig) -> Self {
		Self { auth, library_options: Mapping::new() }
	}

	/// Replaces the pass-through library options.
	pub fn with_library_options(mut self, options: Mapping) -> Self {
		self.library_options = options;

		self
	}

	/// Reads a configuration from the bridge parameters of `createPublicClientApplication`.
	///
	/// Expected shape: `{ auth: { clientId, authority?, knownAuthorities?, redirectUri? },
	/// androidConfigOptions? }`. Absent and null optional entries fall back to defaults; entries
	/// with the wrong type tag are rejected. Known authorities are read as text the way host
	/// string lists are (`BridgeArray::to_string_list`).
	pub fn from_bridge(params: &BridgeMap) -> Result<Self, ConfigError> {
		let auth = optional(params, "auth", "auth", ReadableType::Map, BridgeValue::as_map)?
			.ok_or(ConfigError::MissingClientId)?;
		let client_id =
			optional(auth, "clientId", "auth.clientId", ReadableType::String, BridgeValue::as_str)?
				.filter(|id| !id.is_empty())
				.ok_or(ConfigError::MissingClientId)?;
		let authority =
			optional(auth, "authority", "auth.authority", ReadableType::String, BridgeValue::as_str)?;
		let known_authorities = optional(
			auth,
			"knownAuthorities",
			"auth.knownAuthorities",
			ReadableType::Array,
			BridgeValue::as_array,
		)?
		.map(|array| array.to_string_list())
		.unwrap_or_default();
		let redirect_uri = optional(
			auth,
			"redirectUri",
			"auth.redirectUri",
			ReadableType::String,
			BridgeValue::as_str,
		)?;
		let library_options = optional(
			params,
			"androidConfigOptions",
			"androidConfigOptions",
			ReadableType::Map,
			BridgeValue::as_map,
		)?
		.map(transcode::from_bridge_map)
		.unwrap_or_default();

		Ok(Self {
			auth: AuthConfig {
				client_id: client_id.to_owned(),
				authority: authority.map(str::to_owned),
				known_authorities,
				redirect_uri: redirect_uri.map(str::to_owned),
			},
			library_options,
		})
	}
}

pub(crate) fn optional<'a, T>(
	map: &'a BridgeMap,
	key: &str,
	field: &str,
	expected: ReadableType,
	extract: impl FnOnce(&'a BridgeValue) -> Option<T>,
) -> Result<Option<T>, ConfigError> {
	map.get_optional(key, extract).map_err(|actual: ReadableType| {
		#[cfg(feature = "tracing")]
		tracing::debug!(field, actual = actual.as_str(), "configuration entry has wrong type");
		#[cfg(not(feature = "tracing"))]
		let _ = actual;

		ConfigError::InvalidField { field: field.to_owned(), expected: expected.as_str() }
	})
}
