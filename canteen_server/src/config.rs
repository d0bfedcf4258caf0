use std::{env, io::Write};

use ccs_common::Secret;
use chrono::Duration;
use log::*;
use midtrans_tools::MidtransConfig;
use rand::{distributions::Alphanumeric, thread_rng, Rng};
use tempfile::NamedTempFile;

use crate::errors::ServerError;

const DEFAULT_CCS_HOST: &str = "127.0.0.1";
const DEFAULT_CCS_PORT: u16 = 8480;
const DEFAULT_JWT_EXPIRY: Duration = Duration::hours(24);

#[derive(Clone, Debug)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub database_url: String,
    /// Redis URL for the cache-aside user lookup layer. When unset, lookups go straight to the
    /// store.
    pub redis_url: Option<String>,
    pub auth: AuthConfig,
    pub midtrans: MidtransConfig,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_CCS_HOST.to_string(),
            port: DEFAULT_CCS_PORT,
            database_url: String::default(),
            redis_url: None,
            auth: AuthConfig::default(),
            midtrans: MidtransConfig::default(),
        }
    }
}

impl ServerConfig {
    pub fn new(host: &str, port: u16) -> Self {
        Self { host: host.to_string(), port, ..Default::default() }
    }

    pub fn from_env_or_default() -> Self {
        let host = env::var("CCS_HOST").ok().unwrap_or_else(|| DEFAULT_CCS_HOST.into());
        let port = env::var("CCS_PORT")
            .map(|s| {
                s.parse::<u16>().unwrap_or_else(|e| {
                    error!(
                        "🪛️ {s} is not a valid port for CCS_PORT. {e} Using the default, {DEFAULT_CCS_PORT}, instead."
                    );
                    DEFAULT_CCS_PORT
                })
            })
            .ok()
            .unwrap_or(DEFAULT_CCS_PORT);
        let database_url = env::var("CCS_DATABASE_URL").ok().unwrap_or_else(|| {
            error!("🪛️ CCS_DATABASE_URL is not set. Please set it to the URL for the canteen database.");
            String::default()
        });
        let redis_url = env::var("CCS_REDIS_URL").ok();
        if redis_url.is_none() {
            info!("🪛️ CCS_REDIS_URL is not set. User lookups will not be cached.");
        }
        let auth = AuthConfig::try_from_env().unwrap_or_else(|e| {
            warn!(
                "🪛️ Could not load the authentication configuration from environment variables. {e}. Reverting to the \
                 default configuration."
            );
            AuthConfig::default()
        });
        let midtrans = MidtransConfig::new_from_env_or_default();
        Self { host, port, database_url, redis_url, auth, midtrans }
    }
}

//-------------------------------------------------  AuthConfig  ------------------------------------------------------
#[derive(Clone, Debug)]
pub struct AuthConfig {
    /// The HS256 key used to sign and verify access tokens.
    pub jwt_secret: Secret<String>,
    /// Access token lifetime.
    pub jwt_expiry: Duration,
}

impl Default for AuthConfig {
    fn default() -> Self {
        let mut tmpfile = NamedTempFile::new().ok().and_then(|f| f.keep().ok());
        warn!(
            "🚨️🚨️🚨️ The JWT signing key has not been set. I'm using a random value for this session. DO NOT operate \
             on production like this, since every access token dies with this process. 🚨️🚨️🚨️"
        );
        let secret: String = thread_rng().sample_iter(&Alphanumeric).take(64).map(char::from).collect();
        match &mut tmpfile {
            Some((f, p)) => match writeln!(f, "CCS_JWT_SECRET={secret}") {
                Ok(()) => warn!(
                    "🚨️🚨️🚨️ The JWT signing key for this session was written to {}. If this is a production \
                     instance, you are doing it wrong! Set the CCS_JWT_SECRET environment variable instead. 🚨️🚨️🚨️",
                    p.to_str().unwrap_or("???")
                ),
                Err(e) => warn!("🪛️ Could not write the JWT signing key to the temporary file. {e}"),
            },
            None => {
                warn!("🪛️ Could not create a temporary file to store the JWT signing key.");
            },
        }
        Self { jwt_secret: Secret::new(secret), jwt_expiry: DEFAULT_JWT_EXPIRY }
    }
}

impl AuthConfig {
    pub fn try_from_env() -> Result<Self, ServerError> {
        let jwt_secret =
            env::var("CCS_JWT_SECRET").map_err(|e| ServerError::ConfigurationError(format!("{e} [CCS_JWT_SECRET]")))?;
        if jwt_secret.len() < 32 {
            return Err(ServerError::ConfigurationError(
                "CCS_JWT_SECRET must be at least 32 characters long.".to_string(),
            ));
        }
        let jwt_expiry = env::var("CCS_JWT_EXPIRY_HOURS")
            .ok()
            .and_then(|s| {
                s.parse::<i64>()
                    .map_err(|e| warn!("🪛️ Invalid configuration value for CCS_JWT_EXPIRY_HOURS. {e}"))
                    .ok()
            })
            .map(Duration::hours)
            .unwrap_or(DEFAULT_JWT_EXPIRY);
        Ok(Self { jwt_secret: Secret::new(jwt_secret), jwt_expiry })
    }
}
