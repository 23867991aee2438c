//! Perform operations against an LDAP directory server.
//!
//! The library is a thin asynchronous layer over the `ldap3` crate: it keeps
//! an open connection, resolves bind DNs and search filters from configured
//! templates, and delegates every protocol operation (bind, search, compare
//! and the various entry modifications) to the underlying library.
//!
//! For a general primer on LDAP, the [introduction] in the `ldap3` crate
//! which is used here for interfacing with LDAP is an excellent resource.
//!
//! [introduction]: https://github.com/inejge/ldap3/blob/master/LDAP-primer.md
//!
//! # Getting started
//! A minimal example of using the client might look like so:
//! ```no_run
//! # async fn run() -> Result<(), Box<dyn std::error::Error>> {
//! use url::Url;
//! use ldap_client::{
//!     config::{Config, ConnectionConfig},
//!     Client,
//! };
//!
//! // Configuration can also be deserialized with serde. It's hand-constructed
//! // here for demonstration purposes.
//! let config = Config {
//!     url: Url::parse("ldap://localhost")?,
//!     connection: ConnectionConfig::default(),
//!     base_dn: "dc=example,dc=com".to_owned(),
//!     user_dn: Some("uid=[username],ou=people,dc=example,dc=com".to_owned()),
//!     search_filter: Some("(&(objectClass=inetOrgPerson)(uid=[search]))".to_owned()),
//!     page_size: None,
//! };
//!
//! let mut client = Client::new(config);
//! client.connect().await?;
//! client.bind("admin", "verysecret").await?;
//!
//! for entry in client.simple_search("jdoe").await? {
//!     println!("Found entry: {entry:#?}");
//! }
//!
//! client.close().await?;
//! # Ok(())
//! # }
//! ```
//!
//! # Limitations
//! * Only simple binds are supported. The underlying library also implements
//!   SASL EXTERNAL binds, which are not exposed here.
//! * A client drives a single connection; operations on it are sequential.
//!   There is no pooling.
//! * [secrecy](https://docs.rs/secrecy) is not used for storing bind
//!   passwords, it probably should be
//! * Referral chasing is left to the underlying library's defaults and is
//!   not configurable.

pub mod client;
pub mod config;
pub mod dn;
pub mod entry;
pub mod error;
pub mod password;

pub use ldap3::{self, Mod, Scope, SearchEntry};

pub use crate::{
	client::Client,
	config::{Config, ConnectionConfig, TLSConfig},
	dn::resolve,
	entry::SearchEntryExt,
	error::Error,
	password::{hash_password, PasswordScheme},
};
