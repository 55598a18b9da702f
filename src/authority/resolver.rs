// self
use crate::authority::{AuthorityDescriptor, classify};

/// Builds the ordered authority list for a client configuration.
///
/// `primary` is appended when `known` does not already contain it (exact string match), every
/// URL is classified in order, and the first entry equal to `primary` becomes the default. If
/// no entry matches, the first entry is the default instead. An empty list stays empty and has
/// no default.
pub fn resolve<S>(known: &[S], primary: &str) -> Vec<AuthorityDescriptor>
where
	S: AsRef<str>,
{
	let mut urls = known.iter().map(AsRef::as_ref).collect::<Vec<&str>>();

	if !urls.contains(&primary) {
		urls.push(primary);
	}

	let mut authorities = urls.into_iter().map(classify).collect::<Vec<_>>();

	assign_default(&mut authorities, primary);

	authorities
}

/// Marks exactly one entry as the default: the first whose URL equals `primary`, or else the
/// first entry. Leaves an empty list untouched.
pub fn assign_default(authorities: &mut [AuthorityDescriptor], primary: &str) {
	for authority in authorities.iter_mut() {
		authority.is_default = false;
	}

	let index = authorities.iter().position(|authority| authority.url == primary).unwrap_or(0);

	if let Some(authority) = authorities.get_mut(index) {
		authority.is_default = true;
	}
}
