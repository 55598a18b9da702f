//! Authority resolution and value-tree transcoding core for MSAL host bridges.
//!
//! Hosts hand bridge containers in; the crate classifies authorities, picks the default one,
//! renders the configuration document, and marshals results back out.

#![deny(clippy::all, missing_docs, unused_crate_dependencies)]

pub mod authority;
pub mod b2c;
pub mod bridge;
pub mod config;
pub mod error;
pub mod marshal;
pub mod obs;
pub mod request;
pub mod transcode;
pub mod value;
#[cfg(any(test, feature = "test"))]
pub mod _preludet {
	//! Convenience re-exports and helpers for integration tests; enabled via `cfg(test)` or the
	//! `test` crate feature.

	pub use crate::_prelude::*;

	// self
	use crate::{
		bridge::{BridgeArray, BridgeMap},
		config::{AuthConfig, MsalConfiguration},
	};

	/// Well-known tenant used across fixtures.
	pub const TEST_TENANT: &str = "11111111-2222-3333-4444-555555555555";
	/// Client identifier used across fixtures.
	pub const TEST_CLIENT_ID: &str = "00000000-aaaa-bbbb-cccc-000000000000";
	/// Redirect URI used across fixtures.
	pub const TEST_REDIRECT_URI: &str = "msauth://com.example.app/aGFzaA%3D%3D";

	/// Builds a configuration carrying the fixture client id and redirect URI.
	pub fn test_configuration(authority: &str, known_authorities: &[&str]) -> MsalConfiguration {
		let auth = AuthConfig::new(TEST_CLIENT_ID)
			.with_authority(authority)
			.with_known_authorities(known_authorities.iter().copied())
			.with_redirect_uri(TEST_REDIRECT_URI);

		MsalConfiguration::new(auth)
	}

	/// Builds the bridge-side `auth` map that a host would pass to the bridge.
	pub fn test_auth_map(authority: Option<&str>, known_authorities: &[&str]) -> BridgeMap {
		let mut auth = BridgeMap::new();

		auth.put_string("clientId", TEST_CLIENT_ID);
		auth.put_string("redirectUri", TEST_REDIRECT_URI);

		if let Some(authority) = authority {
			auth.put_string("authority", authority);
		}
		if !known_authorities.is_empty() {
			let mut known = BridgeArray::new();

			for url in known_authorities {
				known.push_string(*url);
			}

			auth.put_array("knownAuthorities", known);
		}

		auth
	}
}

mod _prelude {
	pub use std::{
		error::Error as StdError,
		fmt::{Debug, Display, Formatter, Result as FmtResult},
		str::FromStr,
	};

	pub use serde::{Deserialize, Serialize};
	pub use serde_json::Value as JsonValue;
	pub use thiserror::Error as ThisError;
	pub use time::OffsetDateTime;
	pub use url::Url;

	pub use crate::error::{Error, Result};
}

pub use serde_json;
pub use url;
#[cfg(test)] use color_eyre as _;
