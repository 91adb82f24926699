use std::env;

use cds_common::{helpers::parse_boolean_flag, Secret};
use jwt_compact::alg::Hs256Key;
use log::*;
use rand::{distributions::Alphanumeric, thread_rng, Rng};

use crate::errors::ServerError;

const DEFAULT_CDS_HOST: &str = "127.0.0.1";
const DEFAULT_CDS_PORT: u16 = 5000;
const DEFAULT_CDS_DATABASE_URL: &str = "sqlite://car_doctor.db";

#[derive(Clone, Debug)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub database_url: String,
    pub auth: AuthConfig,
    /// Selects the production cookie profile. Cross-site cookie delivery over HTTPS requires
    /// `Secure` together with `SameSite=None`; everything else gets the strict profile.
    pub production: bool,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_CDS_HOST.to_string(),
            port: DEFAULT_CDS_PORT,
            database_url: DEFAULT_CDS_DATABASE_URL.to_string(),
            auth: AuthConfig::default(),
            production: false,
        }
    }
}

impl ServerConfig {
    pub fn new(host: &str, port: u16) -> Self {
        Self { host: host.to_string(), port, ..Default::default() }
    }

    /// Load the configuration from the environment. A missing or empty `CDS_JWT_SECRET` is a hard
    /// error: a server that cannot sign or verify tokens must not come up at all.
    pub fn from_env() -> Result<Self, ServerError> {
        let host = env::var("CDS_HOST").ok().unwrap_or_else(|| DEFAULT_CDS_HOST.into());
        let port = env::var("CDS_PORT")
            .map(|s| {
                s.parse::<u16>().unwrap_or_else(|e| {
                    error!(
                        "🪛️ {s} is not a valid port for CDS_PORT. {e} Using the default, {DEFAULT_CDS_PORT}, instead."
                    );
                    DEFAULT_CDS_PORT
                })
            })
            .ok()
            .unwrap_or(DEFAULT_CDS_PORT);
        let database_url = env::var("CDS_DATABASE_URL").ok().unwrap_or_else(|| {
            warn!("🪛️ CDS_DATABASE_URL is not set. Using the default, {DEFAULT_CDS_DATABASE_URL}, instead.");
            DEFAULT_CDS_DATABASE_URL.into()
        });
        let auth = AuthConfig::try_from_env()?;
        let production = parse_boolean_flag(env::var("CDS_PRODUCTION").ok(), false);
        if production {
            info!("🪛️ Production cookie profile enabled (Secure; SameSite=None).");
        }
        Ok(Self { host, port, database_url, auth, production })
    }
}

//-------------------------------------------------  AuthConfig  -------------------------------------------------------
#[derive(Clone, Debug)]
pub struct AuthConfig {
    /// The symmetric secret used to sign and verify session tokens (HS256).
    pub jwt_secret: Secret<String>,
}

impl Default for AuthConfig {
    fn default() -> Self {
        warn!(
            "🚨️🚨️🚨️ The JWT signing secret has not been set. I'm using a random value for this session. Every token \
             dies with this process, and DO NOT operate on production like this. Set CDS_JWT_SECRET instead. 🚨️🚨️🚨️"
        );
        let secret: String = thread_rng().sample_iter(&Alphanumeric).take(48).map(char::from).collect();
        Self { jwt_secret: Secret::new(secret) }
    }
}

impl AuthConfig {
    pub fn try_from_env() -> Result<Self, ServerError> {
        let secret =
            env::var("CDS_JWT_SECRET").map_err(|e| ServerError::ConfigurationError(format!("{e} [CDS_JWT_SECRET]")))?;
        if secret.trim().is_empty() {
            return Err(ServerError::ConfigurationError(
                "CDS_JWT_SECRET is empty. The server cannot sign session tokens without a secret.".to_string(),
            ));
        }
        Ok(Self { jwt_secret: Secret::new(secret) })
    }

    pub fn hs256_key(&self) -> Hs256Key {
        Hs256Key::new(self.jwt_secret.reveal().as_bytes())
    }
}

//-------------------------------------------------  ServerOptions  ----------------------------------------------------
/// A subset of the server configuration that request handlers need. Excludes secrets to avoid
/// passing sensitive information around the system.
#[derive(Clone, Copy, Debug)]
pub struct ServerOptions {
    pub production: bool,
}

impl ServerOptions {
    pub fn from_config(config: &ServerConfig) -> Self {
        Self { production: config.production }
    }
}
