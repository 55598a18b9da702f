// std
use std::{env, fs, process};
// self
use msal_bridge::{
	_preludet::*,
	authority::{AudienceType, AuthorityKind, DEFAULT_AUTHORITY},
	b2c::B2cConfiguration,
	bridge::{BridgeArray, BridgeMap},
	config::{AppSignature, ConfigAssembler, ConfigDocument, MsalConfiguration},
	error::ConfigError,
};

const B2C_SUSI: &str = "https://contoso.b2clogin.com/tfp/contoso.onmicrosoft.com/B2C_1_SUSI";

fn create_params(auth: BridgeMap) -> BridgeMap {
	let mut logging = BridgeMap::new();

	logging.put_boolean("pii_enabled", false);
	logging.put_string("log_level", "WARNING");

	let mut options = BridgeMap::new();

	options.put_map("logging", logging);
	options.put_string("authorization_user_agent", "DEFAULT");

	let mut params = BridgeMap::new();

	params.put_map("auth", auth);
	params.put_map("androidConfigOptions", options);

	params
}

#[test]
fn bridge_params_render_a_readable_document() {
	let tenant = format!("https://login.microsoftonline.com/{TEST_TENANT}");
	let params = create_params(test_auth_map(Some(&tenant), &[B2C_SUSI]));
	let configuration =
		MsalConfiguration::from_bridge(&params).expect("Fixture params should parse.");
	let document =
		ConfigAssembler::new(configuration).assemble().expect("Fixture config should assemble.");
	let summary = document.summary().expect("Assembled documents must read back.");

	assert_eq!(summary.account_mode, "MULTIPLE");
	assert!(!summary.broker_redirect_uri_registered);
	assert_eq!(summary.client_id, TEST_CLIENT_ID);
	assert_eq!(summary.redirect_uri, TEST_REDIRECT_URI);
	assert_eq!(summary.authority, tenant);
	assert_eq!(summary.authorities.len(), 2);
	assert_eq!(summary.authorities[0].kind, Some(AuthorityKind::B2c));
	assert_eq!(summary.authorities[0].authority_url.as_deref(), Some(B2C_SUSI));

	let default = summary.default_authority().expect("Exactly one entry is the default.");

	assert_eq!(default.kind, Some(AuthorityKind::Aad));
	assert_eq!(default.audience.as_ref().map(|a| a.audience), Some(AudienceType::AzureAdMyOrg));
	assert_eq!(
		default.audience.as_ref().and_then(|a| a.tenant_id.as_deref()),
		Some(TEST_TENANT)
	);
	assert_eq!(
		document.get("logging").and_then(|l| l.get("log_level")).and_then(|l| l.as_str()),
		Some("WARNING")
	);
}

#[test]
fn missing_authority_defaults_to_common() {
	let mut configuration = test_configuration(DEFAULT_AUTHORITY, &[]);

	configuration.auth.authority = None;

	let document =
		ConfigAssembler::new(configuration).assemble().expect("Fixture config should assemble.");

	assert_eq!(document.authority(), Some(DEFAULT_AUTHORITY));
	assert_eq!(document.authorities().len(), 1);
	assert_eq!(document.authorities()[0].get("default").and_then(|d| d.as_bool()), Some(true));
}

#[test]
fn unrecognized_authorities_are_emitted_with_null_fields() {
	let configuration = test_configuration(DEFAULT_AUTHORITY, &["not-a-url"]);
	let document =
		ConfigAssembler::new(configuration).assemble().expect("Unrecognized entries are allowed.");
	let entry = &document.authorities()[0];

	assert_eq!(entry.get("type"), Some(&JsonValue::Null));
	assert_eq!(entry.get("authority_url"), Some(&JsonValue::Null));
	assert_eq!(entry.get("audience"), Some(&JsonValue::Null));
	assert!(entry.get("default").is_none());
}

#[test]
fn wrong_type_tags_are_rejected_before_rendering() {
	let mut auth = test_auth_map(None, &[]);
	let mut known = BridgeArray::new();

	known.push_string(DEFAULT_AUTHORITY);
	auth.put_array("knownAuthorities", known);
	auth.put_boolean("redirectUri", true);

	let err = MsalConfiguration::from_bridge(&create_params(auth))
		.expect_err("A boolean redirect URI must be rejected.");

	assert!(
		matches!(err, ConfigError::InvalidField { ref field, .. } if field == "auth.redirectUri")
	);
}

#[test]
fn derived_redirect_and_b2c_round_trip_through_disk() {
	let mut auth = BridgeMap::new();
	let mut policies = BridgeMap::new();

	policies.put_string("signInSignUp", "B2C_1_SUSI");
	policies.put_string("passwordReset", "B2C_1_Reset");
	auth.put_string("clientId", TEST_CLIENT_ID);
	auth.put_string("authorityBase", "https://contoso.b2clogin.com/tfp/contoso.onmicrosoft.com");
	auth.put_map("policies", policies);

	let b2c = B2cConfiguration::from_bridge(&create_params(auth))
		.expect("B2C fixture params should parse.");
	let document = ConfigAssembler::new(b2c.to_msal_configuration())
		.with_app_signature(AppSignature::new("com.example.app", [b"abc".to_vec()]))
		.assemble()
		.expect("B2C config should assemble.");
	let path = env::temp_dir().join(format!("msal_bridge_b2c_{}.json", process::id()));

	document.write_to(&path).expect("Failed to write the assembled document.");

	let text = fs::read_to_string(&path).expect("Written document should be readable.");
	let reloaded = ConfigDocument::from_json_str(&text).expect("Written document should parse.");

	fs::remove_file(&path).expect("Failed to remove the temporary document.");

	let summary = reloaded.summary().expect("Reloaded document should read back.");

	assert_eq!(reloaded, document);
	assert_eq!(summary.authority, B2C_SUSI);
	assert_eq!(summary.redirect_uri, "msauth://com.example.app/qZk%2BNkcGgWq6PiVxeFDCbJzQ2J0%3D");
	assert!(summary.authorities.iter().all(|a| a.kind == Some(AuthorityKind::B2c)));
	assert_eq!(summary.default_authority().and_then(|a| a.authority_url.as_deref()), Some(B2C_SUSI));
}
