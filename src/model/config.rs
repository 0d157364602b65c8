use clap::Args;

const DEFAULT_SENSOR_URL: &str = "http://airsniffer.local";

const DEFAULT_DB_HOST: &str = "localhost";
const DEFAULT_DB_PORT: u16 = 5432;
const DEFAULT_DB_NAME: &str = "airsniffer";
const DEFAULT_DB_USERNAME: &str = "airsniffer";
const DEFAULT_DB_PASSWORD: &str = "password";

const DEFAULT_LAMETRIC_URL: &str = "https://<ip-address>:4343/api/v1/dev/widget/update/com.lametric.bad002a8174dea4fbce93630df3e9afb/1";

#[derive(Args, Clone, Debug, PartialEq)]
pub struct SensorConfig {
    /// The url of the airsniffer without /?json.
    #[arg(default_value = DEFAULT_SENSOR_URL)]
    pub url: String,
}

impl Default for SensorConfig {
    fn default() -> Self {
        SensorConfig {
            url: DEFAULT_SENSOR_URL.to_string(),
        }
    }
}

#[derive(Args, Clone, Debug, PartialEq)]
pub struct DbConfig {
    /// The hostname or IP address of the Postgres server.
    #[arg(long, default_value = DEFAULT_DB_HOST)]
    pub host: String,
    /// The port number of the Postgres server.
    #[arg(long, default_value_t = DEFAULT_DB_PORT)]
    pub port: u16,
    /// Whether to use SSL/TLS to connect to the Postgres server.
    #[arg(short, long)]
    pub ssl: bool,
    /// The Postgres database.
    #[arg(short, long, default_value = DEFAULT_DB_NAME)]
    pub database: String,
    /// The Postgres username.
    #[arg(short, long, default_value = DEFAULT_DB_USERNAME)]
    pub username: String,
    /// The Postgres password.
    #[arg(short, long, default_value = DEFAULT_DB_PASSWORD)]
    pub password: String,
    /// Create the aq_entry tables if they don't exist yet.
    #[arg(long = "create-tables")]
    pub create_tables: bool,
}

impl Default for DbConfig {
    fn default() -> Self {
        DbConfig {
            host: DEFAULT_DB_HOST.to_string(),
            port: DEFAULT_DB_PORT,
            ssl: false,
            database: DEFAULT_DB_NAME.to_string(),
            username: DEFAULT_DB_USERNAME.to_string(),
            password: DEFAULT_DB_PASSWORD.to_string(),
            create_tables: false,
        }
    }
}

#[derive(Args, Clone, Debug, PartialEq)]
pub struct LametricConfig {
    /// The push-url of the Lametric Time.
    #[arg(value_name = "LAMETRIC", default_value = DEFAULT_LAMETRIC_URL)]
    pub push_url: String,
    /// The Access Token to authenticate against the Lametric Time.
    #[arg(short, long = "access-token", default_value = "")]
    pub access_token: String,
}

impl Default for LametricConfig {
    fn default() -> Self {
        LametricConfig {
            push_url: DEFAULT_LAMETRIC_URL.to_string(),
            access_token: String::new(),
        }
    }
}
