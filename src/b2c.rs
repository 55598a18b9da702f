//! Azure AD B2C helpers: policy-based authorities, account lookup per policy, and the
//! password-reset retry path.

// self
use crate::{
	_prelude::*,
	bridge::{BridgeMap, BridgeValue, ReadableType},
	config::{self, AuthConfig, MsalConfiguration},
	error::ConfigError,
	marshal::Account,
	request::InteractiveParams,
	transcode,
	value::Mapping,
};

/// Error code the service returns when the user picked "Forgot password".
pub const PASSWORD_RESET_ERROR_CODE: &str = "AADB2C90118";
/// Error code the service returns when the refresh grant has expired.
pub const EXPIRED_GRANT_ERROR_CODE: &str = "AADB2C90080";

/// User flows (policies) an app signs in with.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct B2cPolicies {
	/// Sign-in/sign-up policy; required.
	pub sign_in_sign_up: String,
	/// Password reset policy.
	#[serde(default)]
	pub password_reset: Option<String>,
}
impl B2cPolicies {
	/// Finds the first account whose identifier contains the lower-cased policy name.
	pub fn account_for_policy<'a>(accounts: &'a [Account], policy: &str) -> Option<&'a Account> {
		let policy = policy.to_lowercase();

		accounts.iter().find(|account| account.identifier.contains(&policy))
	}

	/// Every configured policy, sign-in/sign-up first.
	pub fn names(&self) -> impl Iterator<Item = &str> {
		std::iter::once(self.sign_in_sign_up.as_str()).chain(self.password_reset.as_deref())
	}

	/// Account signed in through the sign-in/sign-up policy.
	pub fn signed_in_account<'a>(&self, accounts: &'a [Account]) -> Option<&'a Account> {
		Self::account_for_policy(accounts, &self.sign_in_sign_up)
	}
}

/// Authentication settings of a B2C app.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct B2cAuthConfig {
	/// Application (client) identifier; required.
	pub client_id: String,
	/// Authority URL without a policy, e.g. `https://<tenant>.b2clogin.com/tfp/<tenant>.onmicrosoft.com`.
	pub authority_base: String,
	/// Policies the app uses.
	pub policies: B2cPolicies,
	/// Redirect URI; derived from the app signature when absent.
	#[serde(default)]
	pub redirect_uri: Option<String>,
}

/// B2C client configuration; converts into a regular [`MsalConfiguration`].
#[derive(Clone, Debug, Default, PartialEq)]
pub struct B2cConfiguration {
	/// Authentication settings.
	pub auth: B2cAuthConfig,
	/// Extra library options, passed through unchanged.
	pub library_options: Mapping,
}
impl B2cConfiguration {
	/// Creates a configuration with no extra library options.
	pub fn new(auth: B2cAuthConfig) -> Self {
		Self { auth, library_options: Mapping::new() }
	}

	/// Reads `{ auth: { clientId, authorityBase, policies: { signInSignUp, passwordReset? },
	/// redirectUri? }, androidConfigOptions? }`.
	pub fn from_bridge(params: &BridgeMap) -> Result<Self, ConfigError> {
		let auth = config::optional(params, "auth", "auth", ReadableType::Map, BridgeValue::as_map)?
			.ok_or(ConfigError::MissingClientId)?;
		let client_id = config::optional(
			auth,
			"clientId",
			"auth.clientId",
			ReadableType::String,
			BridgeValue::as_str,
		)?
		.filter(|id| !id.is_empty())
		.ok_or(ConfigError::MissingClientId)?;
		let authority_base = required_string(auth, "authorityBase", "auth.authorityBase")?;
		let policies = config::optional(
			auth,
			"policies",
			"auth.policies",
			ReadableType::Map,
			BridgeValue::as_map,
		)?
		.ok_or(ConfigError::MissingField { field: "auth.policies" })?;
		let sign_in_sign_up =
			required_string(policies, "signInSignUp", "auth.policies.signInSignUp")?;
		let password_reset = config::optional(
			policies,
			"passwordReset",
			"auth.policies.passwordReset",
			ReadableType::String,
			BridgeValue::as_str,
		)?;
		let redirect_uri = config::optional(
			auth,
			"redirectUri",
			"auth.redirectUri",
			ReadableType::String,
			BridgeValue::as_str,
		)?;
		let library_options = config::optional(
			params,
			"androidConfigOptions",
			"androidConfigOptions",
			ReadableType::Map,
			BridgeValue::as_map,
		)?
		.map(transcode::from_bridge_map)
		.unwrap_or_default();

		Ok(Self {
			auth: B2cAuthConfig {
				client_id: client_id.to_owned(),
				authority_base,
				policies: B2cPolicies {
					sign_in_sign_up,
					password_reset: password_reset.map(str::to_owned),
				},
				redirect_uri: redirect_uri.map(str::to_owned),
			},
			library_options,
		})
	}

	/// Authority URL of a policy: `<authority_base>/<policy>`.
	pub fn authority(&self, policy: &str) -> String {
		format!("{}/{policy}", self.auth.authority_base.trim_end_matches('/'))
	}

	/// Regular configuration with the sign-in/sign-up authority as primary and every policy
	/// authority known up front.
	pub fn to_msal_configuration(&self) -> MsalConfiguration {
		let policies = &self.auth.policies;
		let mut auth = AuthConfig::new(self.auth.client_id.as_str())
			.with_authority(self.authority(&policies.sign_in_sign_up))
			.with_known_authorities(policies.names().map(|policy| self.authority(policy)));

		auth.redirect_uri = self.auth.redirect_uri.clone();

		MsalConfiguration::new(auth).with_library_options(self.library_options.clone())
	}

	/// Parameters for the password-reset flow that follows a [`B2cError::PasswordReset`].
	///
	/// Targets the reset policy and forces an ephemeral browser session. Returns `None` when no
	/// reset policy is configured.
	pub fn password_reset_params(&self, params: &InteractiveParams) -> Option<InteractiveParams> {
		let policy = self.auth.policies.password_reset.as_deref()?;
		let mut reset = params.clone();

		reset.authority = Some(self.authority(policy));
		reset.webview.prefers_ephemeral_web_browser_session = Some(true);

		Some(reset)
	}
}

/// B2C service errors the client reacts to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum B2cError {
	/// The user asked to reset their password; run the reset policy, then sign in again.
	PasswordReset,
	/// The refresh grant expired; sign out and sign in again.
	ExpiredGrant,
}
impl B2cError {
	/// Recognizes a B2C error code inside a library error message.
	pub fn from_message(message: &str) -> Option<Self> {
		if message.contains(PASSWORD_RESET_ERROR_CODE) {
			Some(Self::PasswordReset)
		} else if message.contains(EXPIRED_GRANT_ERROR_CODE) {
			Some(Self::ExpiredGrant)
		} else {
			None
		}
	}

	/// Service error code.
	pub const fn code(self) -> &'static str {
		match self {
			Self::PasswordReset => PASSWORD_RESET_ERROR_CODE,
			Self::ExpiredGrant => EXPIRED_GRANT_ERROR_CODE,
		}
	}
}

fn required_string(
	map: &BridgeMap,
	key: &str,
	field: &'static str,
) -> Result<String, ConfigError> {
	config::optional(map, key, field, ReadableType::String, BridgeValue::as_str)?
		.filter(|value| !value.is_empty())
		.map(str::to_owned)
		.ok_or(ConfigError::MissingField { field })
}
