// self
use crate::{
	_prelude::*,
	authority::{self, AuthorityDescriptor, DEFAULT_AUTHORITY},
	config::{AppSignature, ConfigDocument, MsalConfiguration},
	error::ConfigError,
	obs::{self, OpKind, OpOutcome, OpSpan},
	transcode,
};

/// Account mode written into every document; the bridge always manages multiple accounts.
pub const ACCOUNT_MODE_MULTIPLE: &str = "MULTIPLE";

/// Combines a [`MsalConfiguration`] with the resolved authority list into a
/// [`ConfigDocument`].
///
/// Caller options are copied first, then the fixed fields are applied on top:
/// `account_mode` is always overwritten, `broker_redirect_uri_registered` defaults to `false`
/// unless the options set it to a boolean. Validation finishes before anything is rendered.
#[derive(Clone, Debug)]
pub struct ConfigAssembler {
	/// Configuration being rendered.
	pub configuration: MsalConfiguration,
	/// App identity used to derive a redirect URI when none is configured.
	pub app_signature: Option<AppSignature>,
}
impl ConfigAssembler {
	/// Creates an assembler for the provided configuration.
	pub fn new(configuration: MsalConfiguration) -> Self {
		Self { configuration, app_signature: None }
	}

	/// Supplies the app identity used for redirect derivation.
	pub fn with_app_signature(mut self, signature: AppSignature) -> Self {
		self.app_signature = Some(signature);

		self
	}

	/// Primary authority, falling back to [`DEFAULT_AUTHORITY`].
	pub fn authority(&self) -> &str {
		self.configuration.auth.authority.as_deref().unwrap_or(DEFAULT_AUTHORITY)
	}

	/// Configured redirect URI (passed through as given), or one derived from the app signature.
	pub fn redirect_uri(&self) -> Result<String, ConfigError> {
		match (&self.configuration.auth.redirect_uri, &self.app_signature) {
			(Some(uri), _) => Ok(uri.clone()),
			(None, Some(signature)) => Ok(signature.redirect_uri()?.into()),
			(None, None) => Err(ConfigError::MissingRedirectUri),
		}
	}

	/// Resolves the ordered authority list with exactly one default entry.
	pub fn authorities(&self) -> Vec<AuthorityDescriptor> {
		authority::resolve(&self.configuration.auth.known_authorities, self.authority())
	}

	/// Validates the configuration and renders the document.
	pub fn assemble(&self) -> Result<ConfigDocument, ConfigError> {
		let span = OpSpan::new(OpKind::AssembleConfig, "assemble");
		let _guard = span.clone().entered();

		obs::record_op_outcome(OpKind::AssembleConfig, OpOutcome::Attempt);

		let result = self.render();

		if let Ok(document) = &result {
			span.record_count(document.authorities().len());
		}

		obs::record_op_outcome(OpKind::AssembleConfig, OpOutcome::of(&result));

		result
	}

	fn render(&self) -> Result<ConfigDocument, ConfigError> {
		let client_id = self.configuration.auth.client_id.as_str();

		if client_id.is_empty() {
			return Err(ConfigError::MissingClientId);
		}

		let redirect_uri = self.redirect_uri()?;
		let authorities = self.authorities();
		let mut document = transcode::to_document_object(&self.configuration.library_options);

		document.insert("account_mode".into(), ACCOUNT_MODE_MULTIPLE.into());

		if !matches!(document.get("broker_redirect_uri_registered"), Some(JsonValue::Bool(_))) {
			document.insert("broker_redirect_uri_registered".into(), false.into());
		}

		document.insert("authority".into(), self.authority().into());
		document.insert("client_id".into(), client_id.into());
		document.insert("redirect_uri".into(), redirect_uri.into());
		document.insert(
			"authorities".into(),
			JsonValue::Array(authorities.iter().map(AuthorityDescriptor::to_document).collect()),
		);

		let document = ConfigDocument::from_object(document);

		#[cfg(feature = "tracing")]
		tracing::debug!(%document, "configuration document assembled");

		Ok(document)
	}
}
