// crates.io
use serde_json::json;
use time::macros;
// self
use msal_bridge::{
	_preludet::*,
	bridge::{BridgeArray, BridgeMap, BridgeValue, ReadableType},
	marshal::{self, Account, AuthenticationResult, TenantProfile},
	request::{InteractiveParams, PromptType, SilentParams},
};

fn account() -> Account {
	Account {
		identifier: format!("uid.{TEST_TENANT}"),
		username: "alice@contoso.com".into(),
		tenant_id: Some(TEST_TENANT.into()),
		id_token: None,
		claims: json!({ "name": "Alice", "oid": "uid", "tid": TEST_TENANT }).as_object().cloned(),
	}
}

#[test]
fn result_map_carries_tenant_profile_token_and_claims() {
	let result = AuthenticationResult {
		access_token: "access-token".into(),
		expires_on: macros::datetime!(2025-11-10 13:00 UTC),
		scopes: vec!["User.Read".into(), "openid".into()],
		tenant_id: Some(TEST_TENANT.into()),
		authority: Some(format!("https://login.microsoftonline.com/{TEST_TENANT}")),
		account: account(),
		tenant_profiles: vec![TenantProfile {
			tenant_id: TEST_TENANT.into(),
			id_token: Some("id-token".into()),
		}],
	};
	let map = result.to_bridge();

	assert_eq!(map.get_string("accessToken"), Some("access-token"));
	assert_eq!(map.get_string("expiresOn"), Some("1762779600"));
	assert_eq!(map.get_string("idToken"), Some("id-token"));
	assert_eq!(map.get_array("scopes").map(|s| s.len()), Some(2));

	let account = map.get_map("account").expect("Account should be rendered.");
	let claims = account.get_map("claims").expect("Claims should be rendered.");

	assert_eq!(account.get_string("tenantId"), Some(TEST_TENANT));
	assert_eq!(claims.get_string("tid"), Some(TEST_TENANT));
}

#[test]
fn account_list_keeps_order() {
	let mut second = account();

	second.identifier = "uid2.tenant".into();
	second.claims = None;

	let array = marshal::accounts_to_bridge(&[account(), second]);

	assert_eq!(array.len(), 2);
	assert_eq!(array.get_type(1), Some(ReadableType::Map));
	assert!(matches!(
		array.get(1).and_then(BridgeValue::as_map).and_then(|m| m.get_string("identifier")),
		Some("uid2.tenant")
	));
	assert!(array.get(1).and_then(BridgeValue::as_map).is_some_and(|m| !m.has_key("claims")));
}

#[test]
fn request_params_read_from_host_maps() {
	let mut auth = test_auth_map(None, &[]);

	auth.put_int("promptType", 0);

	let mut scopes = BridgeArray::new();

	scopes.push_string("User.Read");
	auth.put_array("scopes", scopes.clone());

	let interactive = InteractiveParams::from_bridge(&auth).expect("Interactive params parse.");

	assert_eq!(interactive.prompt, Some(PromptType::SelectAccount));
	assert_eq!(interactive.scopes, vec!["User.Read"]);

	let mut silent = BridgeMap::new();
	let mut account = BridgeMap::new();

	account.put_string("identifier", "uid.utid");
	silent.put_array("scopes", scopes);
	silent.put_map("account", account);
	silent.put_boolean("forceRefresh", true);

	let silent = SilentParams::from_bridge(&silent, "https://login.microsoftonline.com/common")
		.expect("Silent params parse.");

	assert!(silent.force_refresh);
	assert_eq!(silent.authority, "https://login.microsoftonline.com/common");
}
