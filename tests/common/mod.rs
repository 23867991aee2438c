use std::error::Error;

use ldap_client::{Client, Config, ConnectionConfig};
use url::Url;

pub fn test_config() -> Config {
	Config {
		url: Url::parse("ldap://localhost:1389").unwrap(),
		connection: ConnectionConfig::default(),
		base_dn: "dc=example,dc=org".to_owned(),
		user_dn: Some("cn=[username],ou=users,dc=example,dc=org".to_owned()),
		search_filter: Some("(&(objectClass=inetOrgPerson)(cn=[search]))".to_owned()),
		page_size: None,
	}
}

pub fn user_dn(cn: &str) -> String {
	format!("cn={cn},ou=users,dc=example,dc=org")
}

pub async fn admin_client() -> Result<Client, Box<dyn Error>> {
	let mut config = test_config();
	// The admin binds with a full DN, not through the user template
	config.user_dn = None;
	let mut client = Client::new(config);
	client.connect().await?;
	client.bind("cn=admin,dc=example,dc=org", "adminpassword").await?;
	Ok(client)
}

pub async fn add_organizational_unit(client: &mut Client, ou: &str) -> Result<(), Box<dyn Error>> {
	client
		.create(
			&format!("ou={ou},dc=example,dc=org"),
			vec![("objectClass", ["organizationalUnit"].into())],
		)
		.await?;
	Ok(())
}

pub async fn add_user(client: &mut Client, cn: &str, sn: &str) -> Result<(), Box<dyn Error>> {
	client
		.create(
			&user_dn(cn),
			vec![("objectClass", ["inetOrgPerson"].into()), ("sn", [sn].into())],
		)
		.await?;
	Ok(())
}
