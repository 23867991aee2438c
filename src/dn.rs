//! Distinguished name templates and LDAP string escaping.

/// Marker substring in a configured user DN template which gets replaced with
/// a username when resolving the bind DN.
pub const USERNAME_MARKER: &str = "[username]";

/// Marker substring in a configured search filter template which gets
/// replaced with a search term.
pub const SEARCH_MARKER: &str = "[search]";

/// Resolve a DN template against a username.
///
/// If `template` is unset or empty the identifier is assumed to already be a
/// full DN and is returned unchanged. Otherwise every occurrence of
/// [`USERNAME_MARKER`] in the template is replaced with `identifier`. A
/// template without the marker is returned verbatim.
///
/// No escaping is performed; callers are responsible for supplying safe
/// identifiers (see [`escape_value`]).
#[must_use]
pub fn resolve(template: Option<&str>, identifier: &str) -> String {
	substitute(template, USERNAME_MARKER, identifier)
}

/// Replace every occurrence of `marker` in the template, or return `value`
/// unchanged when no template is configured.
pub(crate) fn substitute(template: Option<&str>, marker: &str, value: &str) -> String {
	match template {
		Some(template) if !template.is_empty() => template.replace(marker, value),
		_ => value.to_owned(),
	}
}

/// Escape an attribute value for use inside a DN, per RFC 4514.
///
/// `,` `+` `"` `\` `<` `>` `;` `=` are backslash-escaped, NUL becomes `\00`,
/// leading and trailing spaces become `\20` and a leading `#` becomes `\23`.
#[must_use]
pub fn escape_value(value: &str) -> String {
	let last = value.chars().count().saturating_sub(1);
	let mut out = String::with_capacity(value.len() * 2);
	for (i, c) in value.chars().enumerate() {
		match c {
			',' | '+' | '"' | '\\' | '<' | '>' | ';' | '=' => {
				out.push('\\');
				out.push(c);
			}
			'\0' => out.push_str("\\00"),
			' ' if i == 0 || i == last => out.push_str("\\20"),
			'#' if i == 0 => out.push_str("\\23"),
			_ => out.push(c),
		}
	}
	out
}

/// Escape a value for use inside a search filter, per RFC 4515.
#[must_use]
pub fn escape_filter_value(value: &str) -> String {
	let mut out = String::with_capacity(value.len());
	for c in value.chars() {
		match c {
			'\\' => out.push_str("\\5c"),
			'*' => out.push_str("\\2a"),
			'(' => out.push_str("\\28"),
			')' => out.push_str("\\29"),
			'\0' => out.push_str("\\00"),
			_ => out.push(c),
		}
	}
	out
}

#[cfg(test)]
mod tests {
	use super::{escape_filter_value, escape_value, resolve};

	#[test]
	fn resolve_without_template() {
		assert_eq!(resolve(None, "admin"), "admin");
		assert_eq!(resolve(None, "cn=admin,dc=joomla,dc=org"), "cn=admin,dc=joomla,dc=org");
		assert_eq!(resolve(Some(""), "admin"), "admin", "Empty template behaves like none");
	}

	#[test]
	fn resolve_with_template() {
		assert_eq!(
			resolve(Some("cn=[username],dc=joomla,dc=org"), "admin"),
			"cn=admin,dc=joomla,dc=org"
		);
		assert_eq!(
			resolve(Some("uid=[username],cn=admin,dc=joomla,dc=org"), "admin"),
			"uid=admin,cn=admin,dc=joomla,dc=org"
		);
	}

	#[test]
	fn resolve_replaces_every_occurrence() {
		assert_eq!(
			resolve(Some("uid=[username],ou=[username],dc=example,dc=org"), "jdoe"),
			"uid=jdoe,ou=jdoe,dc=example,dc=org"
		);
	}

	#[test]
	fn resolve_without_marker() {
		assert_eq!(
			resolve(Some("cn=admin,dc=example,dc=org"), "jdoe"),
			"cn=admin,dc=example,dc=org",
			"A template without the marker is returned verbatim"
		);
	}

	#[test]
	fn resolve_is_pure() {
		let template = Some("cn=[username],dc=example,dc=org");
		assert_eq!(resolve(template, "admin"), resolve(template, "admin"));
	}

	#[test]
	fn escape_value_passthrough() {
		assert_eq!(escape_value("John Doe"), "John Doe");
		assert_eq!(escape_value("admin#1"), "admin#1");
	}

	#[test]
	fn escape_value_special_chars() {
		assert_eq!(escape_value("a,b"), "a\\,b");
		assert_eq!(escape_value("a+b"), "a\\+b");
		assert_eq!(escape_value("a\"b"), "a\\\"b");
		assert_eq!(escape_value("a\\b"), "a\\\\b");
		assert_eq!(escape_value("a<b>c"), "a\\<b\\>c");
		assert_eq!(escape_value("a;b=c"), "a\\;b\\=c");
	}

	#[test]
	fn escape_value_positional() {
		assert_eq!(escape_value(" admin "), "\\20admin\\20");
		assert_eq!(escape_value("#admin"), "\\23admin");
	}

	#[test]
	fn escape_value_injection() {
		assert_eq!(escape_value("admin,dc=evil,dc=com"), "admin\\,dc\\=evil\\,dc\\=com");
	}

	#[test]
	fn escape_filter_value_special_chars() {
		assert_eq!(escape_filter_value("John Doe"), "John Doe");
		assert_eq!(escape_filter_value("a*"), "a\\2a");
		assert_eq!(escape_filter_value("(admin)"), "\\28admin\\29");
		assert_eq!(escape_filter_value("a\\b"), "a\\5cb");
	}
}
