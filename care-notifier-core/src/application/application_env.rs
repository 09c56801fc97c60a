use anyhow::anyhow;
use jsonwebtoken::{Algorithm, DecodingKey};
use jwt_auth::util::{parse_jwt_algorithms, parse_jwt_key};
use std::{net::SocketAddr, time::Duration};

pub struct ApplicationEnv {
    pub log_directory: String,
    pub log_filename: String,

    pub bind_address: SocketAddr,

    pub db_connection_string: String,
    pub db_name: String,

    pub max_http_content_len: usize,
    pub max_title_len: usize,
    pub max_message_len: usize,

    /// Algorithms must belong to the same family
    pub jwt_algorithms: Vec<Algorithm>,
    pub jwt_key: DecodingKey,

    pub websocket_ping_interval: Duration,
    pub websocket_join_timeout: Duration,
    pub websocket_connection_buffer_size: usize,
}

impl ApplicationEnv {
    pub fn parse() -> anyhow::Result<Self> {
        let log_directory = Self::env_var("CARE_NOTIFIER_CORE_LOG_DIRECTORY")?;
        let log_filename = Self::env_var("CARE_NOTIFIER_CORE_LOG_FILENAME")?;
        let bind_address = Self::env_var("CARE_NOTIFIER_CORE_BIND_ADDRESS")?.parse()?;
        let db_connection_string = Self::env_var("CARE_NOTIFIER_CORE_DB_CONNECTION_STRING")?;
        let db_name = Self::env_var("CARE_NOTIFIER_CORE_DB_NAME")?;
        let max_http_content_len =
            Self::env_var("CARE_NOTIFIER_CORE_MAX_HTTP_CONTENT_LEN")?.parse()?;
        let max_title_len = Self::env_var("CARE_NOTIFIER_CORE_MAX_TITLE_LEN")?.parse()?;
        let max_message_len = Self::env_var("CARE_NOTIFIER_CORE_MAX_MESSAGE_LEN")?.parse()?;
        let jwt_algorithms =
            parse_jwt_algorithms(&Self::env_var("CARE_NOTIFIER_CORE_JWT_ALGORITHMS")?)?;
        let jwt_algorithm = jwt_algorithms.first().ok_or(anyhow!(
            "CARE_NOTIFIER_CORE_JWT_ALGORITHMS need to contain at least one algorithm"
        ))?;
        let jwt_key = parse_jwt_key(
            jwt_algorithm,
            &Self::env_var("CARE_NOTIFIER_CORE_JWT_KEY")?,
        )?;
        let websocket_ping_interval =
            Self::env_var("CARE_NOTIFIER_CORE_WEBSOCKET_PING_INTERVAL")?.parse()?;
        let websocket_ping_interval = Duration::from_secs(websocket_ping_interval);
        let websocket_join_timeout =
            Self::env_var("CARE_NOTIFIER_CORE_WEBSOCKET_JOIN_TIMEOUT")?.parse()?;
        let websocket_join_timeout = Duration::from_secs(websocket_join_timeout);
        let websocket_connection_buffer_size =
            Self::env_var("CARE_NOTIFIER_CORE_WEBSOCKET_CONNECTION_BUFFER_SIZE")?.parse()?;

        Ok(Self {
            log_directory,
            log_filename,
            bind_address,
            db_connection_string,
            db_name,
            max_http_content_len,
            max_title_len,
            max_message_len,
            jwt_algorithms,
            jwt_key,
            websocket_ping_interval,
            websocket_join_timeout,
            websocket_connection_buffer_size,
        })
    }

    fn env_var(name: &'static str) -> anyhow::Result<String> {
        std::env::var(name).map_err(|_| anyhow!("environment variable {name} not set"))
    }
}
