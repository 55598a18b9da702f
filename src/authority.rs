//! Identity-provider authority descriptors (data), classification, and list resolution.
//!
//! `classifier` turns a single authority URL into an [`AuthorityDescriptor`] by walking an
//! ordered rule table. `resolver` builds the full authority list for a client configuration,
//! guaranteeing the primary authority is present and exactly one entry is the default.

/// Ordered rule table mapping one authority URL onto a descriptor.
pub mod classifier;
/// Authority list resolution and default assignment.
pub mod resolver;

pub use classifier::*;
pub use resolver::*;

// self
use crate::_prelude::*;

/// Host serving Azure AD authorities.
pub const AAD_AUTHORITY_HOST: &str = "login.microsoftonline.com";
/// Authority used when the caller does not pick one.
pub const DEFAULT_AUTHORITY: &str = "https://login.microsoftonline.com/common";

/// Identity-provider family an authority belongs to.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AuthorityKind {
	/// Azure Active Directory (work, school, and personal Microsoft accounts).
	#[serde(rename = "AAD")]
	Aad,
	/// Azure AD B2C; always addressed by its full authority URL.
	#[serde(rename = "B2C")]
	B2c,
	/// URL matched no known authority shape.
	#[default]
	Unrecognized,
}
impl AuthorityKind {
	/// Returns the identity library's type label, or `None` for unrecognized authorities.
	pub const fn label(self) -> Option<&'static str> {
		match self {
			AuthorityKind::Aad => Some("AAD"),
			AuthorityKind::B2c => Some("B2C"),
			AuthorityKind::Unrecognized => None,
		}
	}
}
impl Display for AuthorityKind {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.label().unwrap_or("unrecognized"))
	}
}

/// Account populations accepted by an AAD authority.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AudienceType {
	/// Work, school, and personal Microsoft accounts (`/common`).
	#[serde(rename = "AzureADandPersonalMicrosoftAccount")]
	AzureAdAndPersonalMicrosoftAccount,
	/// Work and school accounts from any tenant (`/organizations`).
	#[serde(rename = "AzureADMultipleOrgs")]
	AzureAdMultipleOrgs,
	/// Personal Microsoft accounts only (`/consumers`).
	PersonalMicrosoftAccount,
	/// Accounts from a single tenant.
	#[serde(rename = "AzureADMyOrg")]
	AzureAdMyOrg,
}
impl AudienceType {
	/// Returns the identity library's audience label.
	pub const fn as_str(self) -> &'static str {
		match self {
			AudienceType::AzureAdAndPersonalMicrosoftAccount => "AzureADandPersonalMicrosoftAccount",
			AudienceType::AzureAdMultipleOrgs => "AzureADMultipleOrgs",
			AudienceType::PersonalMicrosoftAccount => "PersonalMicrosoftAccount",
			AudienceType::AzureAdMyOrg => "AzureADMyOrg",
		}
	}
}
impl Display for AudienceType {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}

/// One configured authority, as consumed by configuration assembly.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthorityDescriptor {
	/// Source URL the descriptor was classified from.
	pub url: String,
	/// Identity-provider family.
	pub kind: AuthorityKind,
	/// Audience; present only for AAD authorities.
	pub audience: Option<AudienceType>,
	/// Tenant; present only for [`AudienceType::AzureAdMyOrg`].
	pub tenant_id: Option<String>,
	/// Raw authority URL; present only for B2C authorities.
	pub explicit_url: Option<String>,
	/// Whether this entry is the configuration's default authority.
	pub is_default: bool,
}
impl AuthorityDescriptor {
	/// Descriptor for a URL that matched no rule.
	pub fn unrecognized(url: impl Into<String>) -> Self {
		Self { url: url.into(), ..Default::default() }
	}

	/// Descriptor for an AAD authority with the given audience.
	pub fn aad(url: impl Into<String>, audience: AudienceType) -> Self {
		Self {
			url: url.into(),
			kind: AuthorityKind::Aad,
			audience: Some(audience),
			..Default::default()
		}
	}

	/// Descriptor for a single-tenant AAD authority.
	pub fn aad_tenant(url: impl Into<String>, tenant_id: impl Into<String>) -> Self {
		Self {
			tenant_id: Some(tenant_id.into()),
			..Self::aad(url, AudienceType::AzureAdMyOrg)
		}
	}

	/// Descriptor for a B2C authority referenced by its full URL.
	pub fn b2c(url: impl Into<String>) -> Self {
		let url = url.into();

		Self {
			explicit_url: Some(url.clone()),
			url,
			kind: AuthorityKind::B2c,
			..Default::default()
		}
	}

	/// Returns true when the URL matched a known authority shape.
	pub fn is_recognized(&self) -> bool {
		self.kind != AuthorityKind::Unrecognized
	}

	/// Renders the descriptor as an entry of the identity library's `authorities` array.
	///
	/// `default` is only emitted when set; absent optional fields render as null.
	pub fn to_document(&self) -> JsonValue {
		let mut entry = serde_json::Map::new();

		if self.is_default {
			entry.insert("default".into(), JsonValue::Bool(true));
		}

		entry.insert("type".into(), self.kind.label().map_or(JsonValue::Null, JsonValue::from));
		entry.insert(
			"authority_url".into(),
			self.explicit_url.as_deref().map_or(JsonValue::Null, JsonValue::from),
		);

		let audience = match self.audience {
			Some(audience) => serde_json::json!({
				"type": audience.as_str(),
				"tenant_id": self.tenant_id,
			}),
			None => JsonValue::Null,
		};

		entry.insert("audience".into(), audience);

		JsonValue::Object(entry)
	}
}

#[cfg(test)]
mod tests {
	// crates.io
	use serde_json::json;
	// self
	use super::*;

	#[test]
	fn default_entry_renders_flag_first() {
		let mut descriptor = AuthorityDescriptor::aad_tenant(
			"https://login.microsoftonline.com/contoso.onmicrosoft.com",
			"contoso.onmicrosoft.com",
		);

		descriptor.is_default = true;

		let rendered = descriptor.to_document();

		assert_eq!(
			rendered,
			json!({
				"default": true,
				"type": "AAD",
				"authority_url": null,
				"audience": { "type": "AzureADMyOrg", "tenant_id": "contoso.onmicrosoft.com" }
			})
		);
		assert_eq!(
			rendered.as_object().and_then(|o| o.keys().next().cloned()).as_deref(),
			Some("default")
		);
	}

	#[test]
	fn unrecognized_entry_renders_nulls_without_default() {
		let rendered = AuthorityDescriptor::unrecognized("not-a-url").to_document();

		assert_eq!(rendered, json!({ "type": null, "authority_url": null, "audience": null }));
	}

	#[test]
	fn kinds_serialize_with_library_labels() {
		assert_eq!(
			serde_json::to_string(&AuthorityKind::B2c).expect("Kind should serialize."),
			"\"B2C\""
		);
		assert_eq!(
			serde_json::to_string(&AudienceType::AzureAdAndPersonalMicrosoftAccount)
				.expect("Audience should serialize."),
			"\"AzureADandPersonalMicrosoftAccount\""
		);
	}
}
