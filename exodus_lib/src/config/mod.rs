use std::env;

mod error;
pub use error::Error;

/// Auth0 tenant coordinates, read from the environment at startup and
/// passed explicitly to every collaborator.
#[derive(Debug, Clone)]
pub struct Config {
    pub domain: String,
    pub client_id: String,
    pub client_secret: String,
    pub audience: String,
    pub connection_id: String,
}

impl Config {
    pub fn from_env() -> Result<Self, Error> {
        Ok(Self {
            domain: var("AUTH0_DOMAIN")?,
            client_id: var("AUTH0_CLIENT_ID")?,
            client_secret: var("AUTH0_CLIENT_SECRET")?,
            audience: var("AUTH0_AUDIENCE")?,
            connection_id: var("AUTH0_CONNECTION_ID")?,
        })
    }
}

fn var(name: &'static str) -> Result<String, Error> {
    env::var(name).map_err(|_| Error(name))
}
