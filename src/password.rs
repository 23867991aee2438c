//! Hashing of `userPassword` values.
use base64::{engine::general_purpose::STANDARD as BASE64, Engine as _};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256, Sha512};

/// Hash scheme for directory password values. The scheme name is prepended
/// to the hash in the format servers expect for `userPassword`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PasswordScheme {
	/// SHA-256, stored as `{SHA256}`
	Sha256,
	/// SHA-512, stored as `{SHA512}`
	Sha512,
}

/// Hash a plaintext password into a scheme-prefixed `userPassword` value,
/// suitable for storing in a directory entry.
///
/// The value consists of the scheme name in braces followed by the base64
/// encoded raw digest, e.g. `{SHA256}K7gNU3sdo+OL0wNhqoVWhr3g6s1xYv72ol/pe/Unols=`.
#[must_use]
pub fn hash_password(password: &str, scheme: PasswordScheme) -> String {
	match scheme {
		PasswordScheme::Sha256 => {
			format!("{{SHA256}}{}", BASE64.encode(Sha256::digest(password.as_bytes())))
		}
		PasswordScheme::Sha512 => {
			format!("{{SHA512}}{}", BASE64.encode(Sha512::digest(password.as_bytes())))
		}
	}
}
