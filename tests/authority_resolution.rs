// self
use msal_bridge::{
	_preludet::*,
	authority::{self, AudienceType, AuthorityDescriptor, AuthorityKind, DEFAULT_AUTHORITY},
};

const B2C_SIGNUP: &str = "https://contoso.b2clogin.com/tfp/contoso.onmicrosoft.com/B2C_1_signup";
const ORGANIZATIONS: &str = "https://login.microsoftonline.com/organizations";

fn tenant_authority() -> String {
	format!("https://login.microsoftonline.com/{TEST_TENANT}")
}

fn default_count(resolved: &[AuthorityDescriptor]) -> usize {
	resolved.iter().filter(|d| d.is_default).count()
}

#[test]
fn classifies_documented_examples() {
	let common = authority::classify(DEFAULT_AUTHORITY);

	assert_eq!(common.kind, AuthorityKind::Aad);
	assert_eq!(common.audience, Some(AudienceType::AzureAdAndPersonalMicrosoftAccount));
	assert_eq!(common.tenant_id, None);

	let organizations = authority::classify(ORGANIZATIONS);

	assert_eq!(organizations.kind, AuthorityKind::Aad);
	assert_eq!(organizations.audience, Some(AudienceType::AzureAdMultipleOrgs));

	let b2c = authority::classify(B2C_SIGNUP);

	assert_eq!(b2c.kind, AuthorityKind::B2c);
	assert_eq!(b2c.explicit_url.as_deref(), Some(B2C_SIGNUP));
	assert_eq!(b2c.audience, None);

	let tenant = authority::classify(&tenant_authority());

	assert_eq!(tenant.kind, AuthorityKind::Aad);
	assert_eq!(tenant.audience, Some(AudienceType::AzureAdMyOrg));
	assert_eq!(tenant.tenant_id.as_deref(), Some(TEST_TENANT));

	let unrecognized = authority::classify("not-a-url");

	assert_eq!(unrecognized.kind, AuthorityKind::Unrecognized);
	assert_eq!(unrecognized.audience, None);
	assert_eq!(unrecognized.tenant_id, None);
	assert_eq!(unrecognized.explicit_url, None);
	assert!(!unrecognized.is_default);
}

#[test]
fn empty_known_list_yields_single_default() {
	let resolved = authority::resolve::<&str>(&[], DEFAULT_AUTHORITY);

	assert_eq!(resolved.len(), 1);
	assert_eq!(resolved[0].url, DEFAULT_AUTHORITY);
	assert!(resolved[0].is_default);
}

#[test]
fn missing_primary_is_appended_last_as_default() {
	let tenant = tenant_authority();
	let resolved = authority::resolve(&[B2C_SIGNUP, ORGANIZATIONS], &tenant);

	assert_eq!(resolved.len(), 3);
	assert_eq!(resolved.last().map(|d| d.url.as_str()), Some(tenant.as_str()));
	assert!(resolved[2].is_default);
	assert_eq!(default_count(&resolved), 1);
}

#[test]
fn present_primary_keeps_its_position() {
	let resolved = authority::resolve(&[ORGANIZATIONS, B2C_SIGNUP, DEFAULT_AUTHORITY], B2C_SIGNUP);

	assert_eq!(resolved.len(), 3);
	assert!(resolved[1].is_default);
	assert_eq!(default_count(&resolved), 1);
}

#[test]
fn duplicates_still_carry_exactly_one_default() {
	let resolved =
		authority::resolve(&[DEFAULT_AUTHORITY, DEFAULT_AUTHORITY, "not-a-url"], DEFAULT_AUTHORITY);

	assert_eq!(resolved.len(), 3);
	assert!(resolved[0].is_default);
	assert_eq!(default_count(&resolved), 1);
	assert_eq!(resolved[2].kind, AuthorityKind::Unrecognized);
}

#[test]
fn fallback_default_is_first_entry() {
	let mut descriptors = vec![authority::classify(ORGANIZATIONS), authority::classify(B2C_SIGNUP)];

	authority::assign_default(&mut descriptors, "https://elsewhere.example/authority");

	assert!(descriptors[0].is_default);
	assert_eq!(default_count(&descriptors), 1);
}

#[test]
fn every_non_empty_resolution_has_one_default() {
	let pool = [DEFAULT_AUTHORITY, ORGANIZATIONS, B2C_SIGNUP, "not-a-url", ""];

	for len in 0..=pool.len() {
		for primary in pool {
			let resolved = authority::resolve(&pool[..len], primary);

			assert!(!resolved.is_empty());
			assert_eq!(default_count(&resolved), 1, "known={:?} primary={primary:?}", &pool[..len]);
		}
	}
}
