//! Config for the LDAP client.
use std::{path::PathBuf, sync::Arc, time::Duration};

use ldap3::LdapConnSettings;
use serde::{Deserialize, Serialize};
use url::Url;

use crate::error::Error;

/// LDAP client configuration. Immutable after construction; the client never
/// mutates it and resolving the same templates against the same inputs always
/// yields the same result.
#[derive(Deserialize, Serialize, Clone, Debug)]
pub struct Config {
	/// The URL to connect to the server with. Supports ldap, ldaps, and ldapi
	/// schemes
	pub url: Url,
	/// Connection settings.
	#[serde(default)]
	pub connection: ConnectionConfig,
	/// The default base DN for searches
	pub base_dn: String,
	/// Template for the bind DN of a user, containing the literal marker
	/// `[username]` where the username should be inserted. When unset, users
	/// are expected to bind with a full DN.
	#[serde(default)]
	pub user_dn: Option<String>,
	/// Template for the filter used by simple searches, containing the
	/// literal marker `[search]` where the search term should be inserted.
	/// When unset, the search term is used as the complete filter.
	#[serde(default)]
	pub search_filter: Option<String>,
	/// If set, enables the [simple paged search control] and sets the page
	/// size to the given value
	///
	/// [simple paged search control]: https://www.rfc-editor.org/rfc/rfc2696.html
	#[serde(default)]
	pub page_size: Option<i32>,
}

/// Configuration for how to connect to the LDAP server
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ConnectionConfig {
	/// Timeout to establish a connection in seconds.
	pub timeout: u64,

	/// LDAP operation timeout. For search per reply.
	pub operation_timeout: Duration,

	/// TLS config
	#[serde(default)]
	pub tls: TLSConfig,
}

impl Default for ConnectionConfig {
	fn default() -> Self {
		ConnectionConfig {
			timeout: 5,
			operation_timeout: Duration::from_secs(60),
			tls: TLSConfig::default(),
		}
	}
}

/// TLS Configuration
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct TLSConfig {
	/// Use StartTLS extended operation for establishing a secure connection,
	/// rather than TLS on a dedicated port.
	#[serde(default)]
	pub starttls: bool,

	/// Disable verification of TLS certificates
	#[serde(default)]
	pub no_tls_verify: bool,

	/// TLS root certificates path
	#[serde(default)]
	pub root_certificates_path: Option<PathBuf>,

	/// Path of the TLS client key to use for the connection
	#[serde(default)]
	pub client_key_path: Option<PathBuf>,

	/// Path of the TLS client certificate to use for the connection
	#[serde(default)]
	pub client_certificate_path: Option<PathBuf>,
}

impl ConnectionConfig {
	/// Create a [`LdapConnSettings`] based on this [`ConnectionConfig`]
	pub(crate) async fn to_settings(&self) -> Result<LdapConnSettings, Error> {
		let mut settings = LdapConnSettings::new();

		settings = settings.set_conn_timeout(Duration::from_secs(self.timeout));
		settings = settings.set_starttls(self.tls.starttls);
		settings = settings.set_no_tls_verify(self.tls.no_tls_verify);

		if let Some(path) = &self.tls.root_certificates_path {
			let client_auth = match (&self.tls.client_key_path, &self.tls.client_certificate_path) {
				(Some(key_path), Some(cert_path)) => Some((key_path, cert_path)),
				(None, None) => None,
				_ => {
					return Err(Error::Invalid(
						"Both a client certificate and key file in PKCS8 format must be specified"
							.to_owned(),
					))
				}
			};

			let mut roots = rustls::RootCertStore::empty();
			let certs = rustls_pemfile::certs(&mut tokio::fs::read(path).await?.as_slice())?;
			if certs.is_empty() {
				return Err(Error::Invalid("No root certificates found".to_owned()));
			}
			for cert in certs {
				roots
					.add(&rustls::Certificate(cert))
					.map_err(|_| Error::Invalid("Could not read root certificate".to_owned()))?;
			}

			let builder =
				rustls::ClientConfig::builder().with_safe_defaults().with_root_certificates(roots);

			let config = if let Some((key_path, cert_path)) = client_auth {
				let certs =
					rustls_pemfile::certs(&mut tokio::fs::read(cert_path).await?.as_slice())?
						.into_iter()
						.map(rustls::Certificate)
						.collect();
				let key = rustls_pemfile::pkcs8_private_keys(
					&mut tokio::fs::read(key_path).await?.as_slice(),
				)?
				.into_iter()
				.next()
				.ok_or_else(|| Error::Invalid("No PKCS8 key found".to_owned()))?;
				builder
					.with_client_auth_cert(certs, rustls::PrivateKey(key))
					.map_err(|_| Error::Invalid("Could not read client certificates".to_owned()))?
			} else {
				builder.with_no_client_auth()
			};
			settings = settings.set_config(Arc::new(config));
		}
		Ok(settings)
	}
}
