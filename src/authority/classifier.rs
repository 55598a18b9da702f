// std
use std::sync::LazyLock;
// crates.io
use regex::Regex;
// self
use crate::authority::{AudienceType, AuthorityDescriptor};

/// Well-known multi-tenant AAD authority accepting every account type.
pub const AAD_COMMON_AUTHORITY: &str = "https://login.microsoftonline.com/common";
/// Well-known multi-tenant AAD authority accepting work and school accounts.
pub const AAD_ORGANIZATIONS_AUTHORITY: &str = "https://login.microsoftonline.com/organizations";
/// Well-known AAD authority accepting personal Microsoft accounts.
pub const AAD_CONSUMERS_AUTHORITY: &str = "https://login.microsoftonline.com/consumers";

// `https://<host>/tfp/<tenant>/<policy...>`; searched anywhere in the input.
static B2C_AUTHORITY: LazyLock<Regex> = LazyLock::new(|| {
	Regex::new(r"https://.+?/tfp/(?P<tenant>.+?)/.+").expect("B2C authority pattern must compile")
});
// `https://login.microsoftonline.com/<tenant...>`; searched anywhere, dots match any character.
static AAD_MY_ORG_AUTHORITY: LazyLock<Regex> = LazyLock::new(|| {
	Regex::new(r"https://login.microsoftonline.com/(?P<tenant>.+)")
		.expect("AAD tenant authority pattern must compile")
});

/// A single classification rule; returns `Some` when the URL matches.
#[derive(Clone, Copy, Debug)]
pub struct ClassificationRule {
	/// Stable rule label, used in trace output.
	pub name: &'static str,
	/// Matcher + constructor.
	pub apply: fn(&str) -> Option<AuthorityDescriptor>,
}

/// Classification rules in precedence order; the first match wins.
///
/// The B2C rule must stay ahead of the single-tenant AAD rule because B2C URLs hosted on the
/// AAD host also satisfy the looser tenant pattern.
pub const CLASSIFICATION_RULES: &[ClassificationRule] = &[
	ClassificationRule { name: "aad_common", apply: aad_common },
	ClassificationRule { name: "aad_organizations", apply: aad_organizations },
	ClassificationRule { name: "aad_consumers", apply: aad_consumers },
	ClassificationRule { name: "b2c", apply: b2c },
	ClassificationRule { name: "aad_my_org", apply: aad_my_org },
];

/// Classifies an authority URL. Never fails; unmatched input yields an unrecognized
/// descriptor with every optional field absent. The default flag is left unset.
pub fn classify(url: &str) -> AuthorityDescriptor {
	for rule in CLASSIFICATION_RULES {
		if let Some(descriptor) = (rule.apply)(url) {
			#[cfg(feature = "tracing")]
			tracing::trace!(rule = rule.name, url, "authority classified");

			return descriptor;
		}
	}

	#[cfg(feature = "tracing")]
	tracing::warn!(url, "authority matched no known shape; emitting it untyped");

	AuthorityDescriptor::unrecognized(url)
}

fn aad_common(url: &str) -> Option<AuthorityDescriptor> {
	(url == AAD_COMMON_AUTHORITY)
		.then(|| AuthorityDescriptor::aad(url, AudienceType::AzureAdAndPersonalMicrosoftAccount))
}

fn aad_organizations(url: &str) -> Option<AuthorityDescriptor> {
	(url == AAD_ORGANIZATIONS_AUTHORITY)
		.then(|| AuthorityDescriptor::aad(url, AudienceType::AzureAdMultipleOrgs))
}

fn aad_consumers(url: &str) -> Option<AuthorityDescriptor> {
	(url == AAD_CONSUMERS_AUTHORITY)
		.then(|| AuthorityDescriptor::aad(url, AudienceType::PersonalMicrosoftAccount))
}

fn b2c(url: &str) -> Option<AuthorityDescriptor> {
	B2C_AUTHORITY.is_match(url).then(|| AuthorityDescriptor::b2c(url))
}

fn aad_my_org(url: &str) -> Option<AuthorityDescriptor> {
	let captures = AAD_MY_ORG_AUTHORITY.captures(url)?;

	Some(AuthorityDescriptor::aad_tenant(url, &captures["tenant"]))
}
