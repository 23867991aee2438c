//! Client for connecting to a directory server and performing operations on
//! its entries

use std::{collections::HashSet, hash::Hash};

use ldap3::{
	adapters::{Adapter, EntriesOnly, PagedResults},
	LdapConnAsync, Mod, Scope, SearchEntry,
};
use tokio::task::JoinHandle;
use tracing::warn;

use crate::{config::Config, dn, error::Error};

/// Holds data and provides interface for interactions with an LDAP server.
///
/// All operations are delegated to the underlying protocol library; the
/// client itself only resolves DNs and filters from the configured templates
/// and keeps track of the open connection.
pub struct Client {
	/// The configuration of the LDAP client.
	config: Config,
	/// The currently open connection, if any.
	session: Option<Session>,
}

/// An established connection to a directory server.
struct Session {
	/// Handle for performing operations on the connection.
	ldap: ldap3::Ldap,
	/// Task driving IO on the underlying connection.
	driver: JoinHandle<()>,
}

impl Client {
	/// Create a new [`Client`] with the given configuration. No connection is
	/// opened until [`connect`][Self::connect] is called.
	#[must_use]
	pub fn new(config: Config) -> Self {
		Client { config, session: None }
	}

	/// The configuration the client was created with.
	#[must_use]
	pub fn config(&self) -> &Config {
		&self.config
	}

	/// Whether a connection is currently open.
	#[must_use]
	pub fn is_connected(&self) -> bool {
		self.session.is_some()
	}

	/// Resolve the bind DN for a username using the configured user DN
	/// template. See [`dn::resolve`].
	#[must_use]
	pub fn resolve_dn(&self, username: &str) -> String {
		dn::resolve(self.config.user_dn.as_deref(), username)
	}

	/// Open a connection to the directory server based on the settings and
	/// url specified in the configuration. An already open connection is
	/// closed first.
	pub async fn connect(&mut self) -> Result<(), Error> {
		self.close().await?;

		let settings = self.config.connection.to_settings().await?;
		let (conn, ldap) =
			LdapConnAsync::from_url_with_settings(settings, &self.config.url).await?;
		let driver = tokio::spawn(async move {
			if let Err(err) = conn.drive().await {
				warn!("Ldap connection error {err}");
			}
		});
		self.session = Some(Session { ldap, driver });
		Ok(())
	}

	/// Unbind and close the connection. Does nothing if no connection is
	/// open.
	pub async fn close(&mut self) -> Result<(), Error> {
		if let Some(mut session) = self.session.take() {
			session.ldap.unbind().await?;
			if let Err(err) = session.driver.await {
				warn!("Failed to join connection driver: {err}");
			}
		}
		Ok(())
	}

	/// Get the operation handle of the open connection, with the configured
	/// operation timeout applied.
	fn ldap(&mut self) -> Result<&mut ldap3::Ldap, Error> {
		let timeout = self.config.connection.operation_timeout;
		let session = self.session.as_mut().ok_or(Error::NotConnected)?;
		Ok(session.ldap.with_timeout(timeout))
	}

	/// Bind to the directory as the given user.
	///
	/// The bind DN is produced by resolving the configured user DN template
	/// against the username; without a template the username is taken to be
	/// a full DN already.
	pub async fn bind(&mut self, username: &str, password: &str) -> Result<(), Error> {
		let bind_dn = dn::resolve(self.config.user_dn.as_deref(), username);
		self.ldap()?.simple_bind(&bind_dn, password).await?.success()?;
		Ok(())
	}

	/// Bind to the directory anonymously.
	pub async fn anonymous_bind(&mut self) -> Result<(), Error> {
		self.ldap()?.simple_bind("", "").await?.success()?;
		Ok(())
	}

	/// Perform a subtree search for each of the given filters and return the
	/// collected entries.
	///
	/// Searches below `base` when given, below the configured base DN
	/// otherwise. An empty attribute list requests all user attributes. When
	/// a page size is configured the simple paged results control is used.
	pub async fn search(
		&mut self,
		filters: &[&str],
		base: Option<&str>,
		attrs: &[&str],
	) -> Result<Vec<SearchEntry>, Error> {
		let base = base.unwrap_or(&self.config.base_dn).to_owned();
		let attrs = if attrs.is_empty() { vec!["*"] } else { attrs.to_vec() };
		let page_size = self.config.page_size;

		let mut entries = Vec::new();
		for &filter in filters {
			let mut adapters: Vec<Box<dyn Adapter<_, _>>> = vec![Box::new(EntriesOnly::new())];
			if let Some(page_size) = page_size {
				adapters.push(Box::new(PagedResults::new(page_size)));
			}

			let mut search = self
				.ldap()?
				.streaming_search_with(adapters, &base, Scope::Subtree, filter, attrs.clone())
				.await?;
			while let Some(entry) = search.next().await? {
				entries.push(SearchEntry::construct(entry));
			}
			search.finish().await.success()?;
		}
		Ok(entries)
	}

	/// Perform a search with the configured filter template resolved against
	/// the given term. Without a configured template the term is used as the
	/// complete filter.
	pub async fn simple_search(&mut self, term: &str) -> Result<Vec<SearchEntry>, Error> {
		let filter =
			dn::substitute(self.config.search_filter.as_deref(), dn::SEARCH_MARKER, term);
		self.search(&[filter.as_str()], None, &[]).await
	}

	/// Read all user attributes of the entry with the given DN.
	pub async fn read(&mut self, dn: &str) -> Result<Vec<SearchEntry>, Error> {
		let (results, _res) = self
			.ldap()?
			.search(dn, Scope::Base, "(objectClass=*)", vec!["*"])
			.await?
			.success()?;
		Ok(results.into_iter().map(SearchEntry::construct).collect())
	}

	/// Check whether the entry with the given DN contains the given attribute
	/// value.
	pub async fn compare(&mut self, dn: &str, attr: &str, value: &str) -> Result<bool, Error> {
		Ok(self.ldap()?.compare(dn, attr, value).await?.equal()?)
	}

	/// Create a new entry with the given attributes.
	pub async fn create<S: AsRef<[u8]> + Eq + Hash>(
		&mut self,
		dn: &str,
		attrs: Vec<(S, HashSet<S>)>,
	) -> Result<(), Error> {
		self.ldap()?.add(dn, attrs).await?.success()?;
		Ok(())
	}

	/// Add the given values to attributes of an existing entry.
	pub async fn add<S: AsRef<[u8]> + Eq + Hash>(
		&mut self,
		dn: &str,
		attrs: Vec<(S, HashSet<S>)>,
	) -> Result<(), Error> {
		let mods = attrs.into_iter().map(|(attr, values)| Mod::Add(attr, values)).collect();
		self.modify(dn, mods).await
	}

	/// Replace the values of the given attributes of an existing entry.
	pub async fn replace<S: AsRef<[u8]> + Eq + Hash>(
		&mut self,
		dn: &str,
		attrs: Vec<(S, HashSet<S>)>,
	) -> Result<(), Error> {
		let mods = attrs.into_iter().map(|(attr, values)| Mod::Replace(attr, values)).collect();
		self.modify(dn, mods).await
	}

	/// Remove the given attribute values from an existing entry. An empty
	/// value set removes the attribute entirely.
	pub async fn remove<S: AsRef<[u8]> + Eq + Hash>(
		&mut self,
		dn: &str,
		attrs: Vec<(S, HashSet<S>)>,
	) -> Result<(), Error> {
		let mods = attrs.into_iter().map(|(attr, values)| Mod::Delete(attr, values)).collect();
		self.modify(dn, mods).await
	}

	/// Apply a list of modifications to the entry with the given DN.
	pub async fn modify<S: AsRef<[u8]> + Eq + Hash>(
		&mut self,
		dn: &str,
		mods: Vec<Mod<S>>,
	) -> Result<(), Error> {
		self.ldap()?.modify(dn, mods).await?.success()?;
		Ok(())
	}

	/// Move or rename the entry with the given DN.
	///
	/// `new_rdn` becomes the new relative DN of the entry, below `new_parent`
	/// when given. `delete_old` removes the attribute values of the old RDN
	/// from the entry.
	pub async fn rename(
		&mut self,
		dn: &str,
		new_rdn: &str,
		new_parent: Option<&str>,
		delete_old: bool,
	) -> Result<(), Error> {
		self.ldap()?.modifydn(dn, new_rdn, delete_old, new_parent).await?.success()?;
		Ok(())
	}

	/// Delete the entry with the given DN.
	pub async fn delete(&mut self, dn: &str) -> Result<(), Error> {
		self.ldap()?.delete(dn).await?.success()?;
		Ok(())
	}
}

impl std::fmt::Debug for Client {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("Client").field("config", &self.config).finish_non_exhaustive()
	}
}

#[cfg(test)]
mod tests {
	#![allow(clippy::unwrap_used)]

	use url::Url;

	use super::Client;
	use crate::{
		config::{Config, ConnectionConfig},
		error::Error,
	};

	/// Config pointing at a server which is never connected to.
	fn example_config() -> Config {
		Config {
			url: Url::parse("ldap://localhost:1389").unwrap(),
			connection: ConnectionConfig::default(),
			base_dn: "dc=example,dc=org".to_owned(),
			user_dn: Some("cn=[username],ou=users,dc=example,dc=org".to_owned()),
			search_filter: Some("(cn=[search])".to_owned()),
			page_size: None,
		}
	}

	#[test]
	fn resolve_dn_uses_template() {
		let client = Client::new(example_config());
		assert_eq!(client.resolve_dn("admin"), "cn=admin,ou=users,dc=example,dc=org");
	}

	#[test]
	fn resolve_dn_without_template() {
		let mut config = example_config();
		config.user_dn = None;
		let client = Client::new(config);
		assert_eq!(
			client.resolve_dn("cn=admin,dc=example,dc=org"),
			"cn=admin,dc=example,dc=org",
			"Without a template the username is already a full DN"
		);
	}

	#[tokio::test]
	async fn operations_require_connect() {
		let mut client = Client::new(example_config());

		assert!(!client.is_connected());
		assert!(matches!(client.anonymous_bind().await, Err(Error::NotConnected)));
		assert!(matches!(client.bind("admin", "secret").await, Err(Error::NotConnected)));
		assert!(matches!(
			client.search(&["(objectClass=*)"], None, &[]).await,
			Err(Error::NotConnected)
		));
		assert!(matches!(
			client.delete("cn=user,dc=example,dc=org").await,
			Err(Error::NotConnected)
		));
	}

	#[tokio::test]
	async fn close_without_connection() {
		let mut client = Client::new(example_config());
		assert!(client.close().await.is_ok());
	}
}
