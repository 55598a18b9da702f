//! Demonstrates turning host-supplied bridge parameters into the identity library's JSON
//! configuration, deriving the broker redirect URI from the app's signing certificate.

// crates.io
use color_eyre::Result;
// self
use msal_bridge::{
	bridge::{BridgeArray, BridgeMap},
	config::{AppSignature, ConfigAssembler, MsalConfiguration},
};

fn main() -> Result<()> {
	color_eyre::install()?;

	let mut known = BridgeArray::new();

	known.push_string("https://contoso.b2clogin.com/tfp/contoso.onmicrosoft.com/B2C_1_SUSI");
	known.push_string("https://login.microsoftonline.com/organizations");

	let mut auth = BridgeMap::new();

	auth.put_string("clientId", "00000000-aaaa-bbbb-cccc-000000000000");
	auth.put_string("authority", "https://login.microsoftonline.com/common");
	auth.put_array("knownAuthorities", known);

	let mut logging = BridgeMap::new();

	logging.put_boolean("pii_enabled", false);

	let mut options = BridgeMap::new();

	options.put_map("logging", logging);

	let mut params = BridgeMap::new();

	params.put_map("auth", auth);
	params.put_map("androidConfigOptions", options);

	let configuration = MsalConfiguration::from_bridge(&params)?;
	let signature = AppSignature::new("com.contoso.app", [b"demo-signing-certificate".to_vec()]);
	let document = ConfigAssembler::new(configuration).with_app_signature(signature).assemble()?;
	let summary = document.summary()?;

	println!("{}", document.to_json_pretty()?);
	println!(
		"{} authorities, default is {}.",
		summary.authorities.len(),
		summary.default_authority().and_then(|a| a.kind).unwrap_or_default(),
	);

	Ok(())
}
