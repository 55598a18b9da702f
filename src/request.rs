//! Typed token request parameters read from bridge containers.
//!
//! The bridge forwards these to the identity library untouched; parsing them here keeps the
//! validation rules (required scopes, prompt indices, default authority fallback) in one place.

// self
use crate::{
	_prelude::*,
	bridge::{BridgeArray, BridgeMap, BridgeValue, ReadableType},
	error::RequestError,
	obs::{self, OpKind, OpOutcome, OpSpan},
};

/// Prompt behavior for interactive requests, in host index order.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PromptType {
	/// Show the account picker.
	SelectAccount,
	/// Force credential entry.
	Login,
	/// Force the consent screen.
	Consent,
	/// Prompt only when the library needs to.
	#[default]
	WhenRequired,
}
impl PromptType {
	const ORDER: [PromptType; 4] =
		[PromptType::SelectAccount, PromptType::Login, PromptType::Consent, PromptType::WhenRequired];

	/// Maps the host's numeric prompt index onto a prompt type.
	pub fn from_index(value: f64) -> Result<Self, RequestError> {
		if value.fract() != 0.0 || value < 0.0 {
			return Err(RequestError::UnknownPromptType { value });
		}

		Self::ORDER.get(value as usize).copied().ok_or(RequestError::UnknownPromptType { value })
	}

	/// Returns the library's prompt label.
	pub const fn as_str(self) -> &'static str {
		match self {
			PromptType::SelectAccount => "select_account",
			PromptType::Login => "login",
			PromptType::Consent => "consent",
			PromptType::WhenRequired => "when_required",
		}
	}
}
impl Display for PromptType {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}

/// Embedded web view preferences.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct WebviewParams {
	/// iOS 13+: use an ephemeral browser session.
	pub prefers_ephemeral_web_browser_session: Option<bool>,
}
impl WebviewParams {
	fn from_bridge(params: &BridgeMap) -> Result<Self, RequestError> {
		let Some(webview) =
			optional(params, "webviewParameters", ReadableType::Map, BridgeValue::as_map)?
		else {
			return Ok(Self::default());
		};
		let prefers_ephemeral_web_browser_session = optional(
			webview,
			"ios_prefersEphemeralWebBrowserSession",
			ReadableType::Boolean,
			BridgeValue::as_bool,
		)?;

		Ok(Self { prefers_ephemeral_web_browser_session })
	}
}

/// Parameters of an interactive token request.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct InteractiveParams {
	/// Scopes to request; required.
	pub scopes: Vec<String>,
	/// Authority override for this request.
	pub authority: Option<String>,
	/// Prompt behavior.
	pub prompt: Option<PromptType>,
	/// Login hint (usually a username).
	pub login_hint: Option<String>,
	/// Extra scopes the user should consent to up front.
	pub extra_scopes_to_consent: Vec<String>,
	/// Extra authorization query parameters, in caller order, values rendered as text.
	pub extra_query_parameters: Vec<(String, String)>,
	/// Web view preferences.
	pub webview: WebviewParams,
}
impl InteractiveParams {
	/// Reads `{ scopes, authority?, promptType?, loginHint?, extraScopesToConsent?,
	/// extraQueryParameters?, webviewParameters? }`.
	pub fn from_bridge(params: &BridgeMap) -> Result<Self, RequestError> {
		parse(OpKind::ParseRequest, "interactive", || {
			let scopes = required_string_list(params, "scopes")?;
			let authority = optional_string(params, "authority")?;
			let prompt = optional(params, "promptType", ReadableType::Number, BridgeValue::as_f64)?
				.map(PromptType::from_index)
				.transpose()?;
			let login_hint = optional_string(params, "loginHint")?;
			let extra_scopes_to_consent =
				optional(params, "extraScopesToConsent", ReadableType::Array, BridgeValue::as_array)?
					.map(BridgeArray::to_string_list)
					.unwrap_or_default();
			let extra_query_parameters =
				optional(params, "extraQueryParameters", ReadableType::Map, BridgeValue::as_map)?
					.map(|map| map.iter().map(|(k, v)| (k.to_owned(), v.to_string())).collect())
					.unwrap_or_default();
			let webview = WebviewParams::from_bridge(params)?;

			Ok(Self {
				scopes,
				authority,
				prompt,
				login_hint,
				extra_scopes_to_consent,
				extra_query_parameters,
				webview,
			})
		})
	}
}

/// Parameters of a silent token request.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SilentParams {
	/// Scopes to request; required.
	pub scopes: Vec<String>,
	/// Identifier of the cached account; required.
	pub account_identifier: String,
	/// Authority to use; falls back to the client's default authority.
	pub authority: String,
	/// Skip the cache and force a refresh.
	pub force_refresh: bool,
}
impl SilentParams {
	/// Reads `{ scopes, account: { identifier }, authority?, forceRefresh? }`.
	///
	/// `default_authority` comes from the caller-owned client application and is used when the
	/// request does not name an authority.
	pub fn from_bridge(params: &BridgeMap, default_authority: &str) -> Result<Self, RequestError> {
		parse(OpKind::ParseRequest, "silent", || {
			let scopes = required_string_list(params, "scopes")?;
			let account_identifier = account_identifier(params)?;
			let authority =
				optional_string(params, "authority")?.unwrap_or_else(|| default_authority.to_owned());
			let force_refresh =
				optional(params, "forceRefresh", ReadableType::Boolean, BridgeValue::as_bool)?
					.unwrap_or(false);

			Ok(Self { scopes, account_identifier, authority, force_refresh })
		})
	}
}

/// Parameters of a sign-out request.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SignoutParams {
	/// Identifier of the account to sign out; required.
	pub account_identifier: String,
	/// Also clear the system browser session (iOS only).
	pub signout_from_browser: bool,
	/// Web view preferences.
	pub webview: WebviewParams,
}
impl SignoutParams {
	/// Reads `{ account: { identifier }, signoutFromBrowser?, webviewParameters? }`.
	pub fn from_bridge(params: &BridgeMap) -> Result<Self, RequestError> {
		parse(OpKind::ParseRequest, "signout", || {
			let account_identifier = account_identifier(params)?;
			let signout_from_browser =
				optional(params, "signoutFromBrowser", ReadableType::Boolean, BridgeValue::as_bool)?
					.unwrap_or(false);
			let webview = WebviewParams::from_bridge(params)?;

			Ok(Self { account_identifier, signout_from_browser, webview })
		})
	}
}

fn parse<T>(
	kind: OpKind,
	stage: &'static str,
	f: impl FnOnce() -> Result<T, RequestError>,
) -> Result<T, RequestError> {
	let _guard = OpSpan::new(kind, stage).entered();

	obs::record_op_outcome(kind, OpOutcome::Attempt);

	let result = f();

	obs::record_op_outcome(kind, OpOutcome::of(&result));

	result
}

fn optional<'a, T>(
	map: &'a BridgeMap,
	field: &'static str,
	expected: ReadableType,
	extract: impl FnOnce(&'a BridgeValue) -> Option<T>,
) -> Result<Option<T>, RequestError> {
	map.get_optional(field, extract)
		.map_err(|_| RequestError::InvalidField { field, expected: expected.as_str() })
}

fn optional_string(map: &BridgeMap, field: &'static str) -> Result<Option<String>, RequestError> {
	Ok(optional(map, field, ReadableType::String, BridgeValue::as_str)?.map(str::to_owned))
}

fn required_string_list(map: &BridgeMap, field: &'static str) -> Result<Vec<String>, RequestError> {
	optional(map, field, ReadableType::Array, BridgeValue::as_array)?
		.map(BridgeArray::to_string_list)
		.ok_or(RequestError::MissingField { field })
}

fn account_identifier(params: &BridgeMap) -> Result<String, RequestError> {
	let account = optional(params, "account", ReadableType::Map, BridgeValue::as_map)?
		.ok_or(RequestError::MissingField { field: "account" })?;

	optional(account, "identifier", ReadableType::String, BridgeValue::as_str)
		.map_err(|_| RequestError::InvalidField {
			field: "account.identifier",
			expected: ReadableType::String.as_str(),
		})?
		.map(str::to_owned)
		.ok_or(RequestError::MissingField { field: "account.identifier" })
}
