//! Error types for the client.

/// Errors that can occur when using this library
#[derive(thiserror::Error, Debug)]
pub enum Error {
	/// An operation was attempted before [`connect`][crate::Client::connect]
	/// was called, or after the connection was closed.
	#[error("Not connected to a directory server")]
	NotConnected,
	/// The configuration was malformed.
	#[error("Invalid configuration: {0}")]
	Invalid(String),
	/// Reading configured certificate or key files failed.
	#[error(transparent)]
	Io(#[from] std::io::Error),
	/// An underlying protocol error or similar occurred, or the LDAP library
	/// was used incorrectly. Failure result codes returned by the server end
	/// up here; the rendered message carries the server's diagnostic text.
	#[error(transparent)]
	Ldap(#[from] ldap3::LdapError),
}
