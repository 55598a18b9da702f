// crates.io
use base64::{Engine as _, engine::general_purpose::STANDARD};
use sha1::{Digest, Sha1};
use url::form_urlencoded;
// self
use crate::{_prelude::*, error::ConfigError};

/// Scheme the identity library's broker expects on redirect URIs.
pub const BROKER_REDIRECT_SCHEME: &str = "msauth";

/// Application identity used to derive the broker redirect URI.
///
/// Hosts look these up from the platform package manager; the core only hashes them.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AppSignature {
	/// Application package name (for example `com.contoso.app`).
	pub package_name: String,
	/// DER bytes of every signing certificate attached to the package.
	pub signing_certificates: Vec<Vec<u8>>,
}
impl AppSignature {
	/// Creates a signature from a package name and its signing certificates.
	pub fn new<I, C>(package_name: impl Into<String>, certificates: I) -> Self
	where
		I: IntoIterator<Item = C>,
		C: Into<Vec<u8>>,
	{
		Self {
			package_name: package_name.into(),
			signing_certificates: certificates.into_iter().map(Into::into).collect(),
		}
	}

	/// Base64 (standard alphabet, padded) SHA-1 digest of the single signing certificate.
	pub fn signature_hash(&self) -> Result<String, ConfigError> {
		let [certificate] = self.signing_certificates.as_slice() else {
			return Err(ConfigError::UnexpectedSignatureCount {
				package: self.package_name.clone(),
				count: self.signing_certificates.len(),
			});
		};
		let digest = Sha1::digest(certificate);

		Ok(STANDARD.encode(digest))
	}

	/// Derives `msauth://<package>/<url-encoded signature hash>`.
	pub fn redirect_uri(&self) -> Result<Url, ConfigError> {
		let hash = self.signature_hash()?;
		let encoded = form_urlencoded::byte_serialize(hash.as_bytes()).collect::<String>();

		Url::parse(&format!("{BROKER_REDIRECT_SCHEME}://{}/{encoded}", self.package_name))
			.map_err(|source| ConfigError::InvalidRedirect { source })
	}
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[test]
	fn redirect_uri_escapes_base64_symbols() {
		let signature = AppSignature::new("com.example.app", [b"abc".to_vec()]);

		assert_eq!(
			signature.signature_hash().expect("Single certificate should hash."),
			"qZk+NkcGgWq6PiVxeFDCbJzQ2J0="
		);
		assert_eq!(
			signature.redirect_uri().expect("Redirect should build.").as_str(),
			"msauth://com.example.app/qZk%2BNkcGgWq6PiVxeFDCbJzQ2J0%3D"
		);
	}

	#[test]
	fn multiple_certificates_are_rejected() {
		let signature = AppSignature::new("com.example.app", [vec![1_u8], vec![2_u8]]);
		let err = signature.redirect_uri().expect_err("Two certificates must be rejected.");

		assert!(matches!(err, ConfigError::UnexpectedSignatureCount { count: 2, .. }));
	}

	#[test]
	fn no_certificates_are_rejected() {
		let signature = AppSignature::new("com.example.app", Vec::<Vec<u8>>::new());

		assert!(matches!(
			signature.signature_hash(),
			Err(ConfigError::UnexpectedSignatureCount { count: 0, .. })
		));
	}
}
