//! Marshals identity-library results back into bridge containers for the caller.

// crates.io
use serde_json::Map as JsonMap;
// self
use crate::{
	_prelude::*,
	bridge::{BridgeArray, BridgeMap, BridgeValue},
	obs::{self, OpKind, OpOutcome, OpSpan},
	transcode,
};

/// Cached account as reported by the identity library.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Account {
	/// Library-assigned account identifier.
	pub identifier: String,
	/// Username (usually the UPN or email).
	pub username: String,
	/// Home tenant, when known.
	#[serde(default)]
	pub tenant_id: Option<String>,
	/// Raw ID token for the home tenant, when the library keeps one on the account.
	#[serde(default)]
	pub id_token: Option<String>,
	/// ID token claims, forwarded to the caller untouched.
	#[serde(default)]
	pub claims: Option<JsonMap<String, JsonValue>>,
}
impl Account {
	/// Renders `{ identifier, username, tenantId, claims? }`.
	pub fn to_bridge(&self) -> BridgeMap {
		let mut map = BridgeMap::new();

		map.put_string("identifier", self.identifier.as_str());
		map.put_string("username", self.username.as_str());
		map.put_optional_string("tenantId", self.tenant_id.as_deref());

		if let Some(claims) = &self.claims {
			map.put_map("claims", transcode::document_object_to_bridge(claims));
		}

		map
	}
}

/// Per-tenant view of a multi-tenant account.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TenantProfile {
	/// Tenant the profile belongs to.
	pub tenant_id: String,
	/// ID token issued by that tenant.
	#[serde(default)]
	pub id_token: Option<String>,
}

/// Successful token acquisition result.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthenticationResult {
	/// Access token; callers must avoid logging it.
	pub access_token: String,
	/// Access token expiry.
	#[serde(with = "time::serde::timestamp")]
	pub expires_on: OffsetDateTime,
	/// Granted scopes.
	pub scopes: Vec<String>,
	/// Tenant that issued the token.
	#[serde(default)]
	pub tenant_id: Option<String>,
	/// Authority the request was sent to.
	#[serde(default)]
	pub authority: Option<String>,
	/// Account the token belongs to.
	pub account: Account,
	/// Tenant profiles of the account, used when the account carries no ID token itself.
	#[serde(default)]
	pub tenant_profiles: Vec<TenantProfile>,
}
impl AuthenticationResult {
	/// ID token for the result: the account's own, or else the profile of the issuing tenant.
	pub fn id_token(&self) -> Option<&str> {
		if let Some(id_token) = self.account.id_token.as_deref() {
			return Some(id_token);
		}

		let tenant_id = self.tenant_id.as_deref()?;

		self.tenant_profiles
			.iter()
			.find(|profile| profile.tenant_id == tenant_id)
			.and_then(|profile| profile.id_token.as_deref())
	}

	/// Renders `{ accessToken, expiresOn, idToken, scopes, authority, tenantId, account }`.
	///
	/// `expiresOn` is the expiry as unix seconds, rendered as text.
	pub fn to_bridge(&self) -> BridgeMap {
		let span = OpSpan::new(OpKind::MarshalResult, "authentication_result");

		span.record_count(self.scopes.len());

		let _guard = span.entered();

		obs::record_op_outcome(OpKind::MarshalResult, OpOutcome::Attempt);

		let mut map = BridgeMap::new();

		map.put_string("accessToken", self.access_token.as_str());
		map.put_string("expiresOn", self.expires_on.unix_timestamp().to_string());
		map.put_optional_string("idToken", self.id_token());
		map.put_array("scopes", self.scopes.iter().cloned().map(BridgeValue::String).collect());
		map.put_optional_string("authority", self.authority.as_deref());
		map.put_optional_string("tenantId", self.tenant_id.as_deref());
		map.put_map("account", self.account.to_bridge());

		obs::record_op_outcome(OpKind::MarshalResult, OpOutcome::Success);

		map
	}
}

/// Renders a list of accounts as a bridge array, preserving order.
pub fn accounts_to_bridge(accounts: &[Account]) -> BridgeArray {
	let mut array = BridgeArray::new();

	for account in accounts {
		array.push_map(account.to_bridge());
	}

	array
}
