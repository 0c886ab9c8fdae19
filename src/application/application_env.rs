use anyhow::anyhow;
use std::{net::SocketAddr, time::Duration};

const DEFAULT_SWEEP_INTERVAL_SECS: u64 = 60;
const DEFAULT_MAIL_TIMEOUT_SECS: u64 = 10;

pub struct ApplicationEnv {
    pub log_directory: String,
    pub log_filename: String,

    pub bind_address: SocketAddr,

    pub db_connection_string: String,
    pub db_name: String,

    /// Prefix of every media URL returned to clients, without trailing slash
    pub public_base_url: String,

    pub max_http_content_len: usize,
    pub max_audio_len: usize,
    pub max_image_len: usize,

    pub sweep_interval: Duration,

    /// Notifications are skipped when this is None
    pub mail: Option<MailEnv>,
}

pub struct MailEnv {
    pub api_url: String,
    pub api_key: String,
    pub from: String,
    pub timeout: Duration,
}

impl ApplicationEnv {
    pub fn parse() -> anyhow::Result<Self> {
        let log_directory = Self::env_var("TIME_CAPSULE_LOG_DIRECTORY")?;
        let log_filename = Self::env_var("TIME_CAPSULE_LOG_FILENAME")?;
        let bind_address = Self::env_var("TIME_CAPSULE_BIND_ADDRESS")?.parse()?;
        let db_connection_string = Self::env_var("TIME_CAPSULE_DB_CONNECTION_STRING")?;
        let db_name = Self::env_var("TIME_CAPSULE_DB_NAME")?;
        let public_base_url = Self::env_var("TIME_CAPSULE_PUBLIC_BASE_URL")?
            .trim_end_matches('/')
            .to_string();
        let max_http_content_len = Self::env_var("TIME_CAPSULE_MAX_HTTP_CONTENT_LEN")?.parse()?;
        let max_audio_len = Self::env_var("TIME_CAPSULE_MAX_AUDIO_LEN")?.parse()?;
        let max_image_len = Self::env_var("TIME_CAPSULE_MAX_IMAGE_LEN")?.parse()?;
        let sweep_interval = match Self::optional_env_var("TIME_CAPSULE_SWEEP_INTERVAL") {
            Some(sweep_interval) => Duration::from_secs(sweep_interval.parse()?),
            None => Duration::from_secs(DEFAULT_SWEEP_INTERVAL_SECS),
        };
        if sweep_interval.is_zero() {
            anyhow::bail!("TIME_CAPSULE_SWEEP_INTERVAL must be greater than 0");
        }
        let mail = Self::parse_mail()?;

        Ok(Self {
            log_directory,
            log_filename,
            bind_address,
            db_connection_string,
            db_name,
            public_base_url,
            max_http_content_len,
            max_audio_len,
            max_image_len,
            sweep_interval,
            mail,
        })
    }

    fn parse_mail() -> anyhow::Result<Option<MailEnv>> {
        let api_url = Self::optional_env_var("TIME_CAPSULE_MAIL_API_URL");
        let api_key = Self::optional_env_var("TIME_CAPSULE_MAIL_API_KEY");
        let from = Self::optional_env_var("TIME_CAPSULE_MAIL_FROM");

        let (Some(api_url), Some(api_key), Some(from)) = (api_url, api_key, from) else {
            return Ok(None);
        };

        let timeout = match Self::optional_env_var("TIME_CAPSULE_MAIL_TIMEOUT") {
            Some(timeout) => Duration::from_secs(timeout.parse()?),
            None => Duration::from_secs(DEFAULT_MAIL_TIMEOUT_SECS),
        };

        Ok(Some(MailEnv {
            api_url,
            api_key,
            from,
            timeout,
        }))
    }

    fn env_var(name: &'static str) -> anyhow::Result<String> {
        std::env::var(name).map_err(|_| anyhow!("environment variable {name} not set"))
    }

    fn optional_env_var(name: &'static str) -> Option<String> {
        std::env::var(name).ok().filter(|value| !value.is_empty())
    }
}
