use std::path::PathBuf;

/// Server configuration
///
/// # Environment Variables
///
/// Every setting can be overridden through environment variables:
///
/// | Variable | Default | Description |
/// |----------|---------|-------------|
/// | WORK_DIR | /var/lib/fulfillment | working directory (receipts, database, logs) |
/// | HTTP_PORT | 3000 | HTTP API port |
/// | ENVIRONMENT | development | development \| staging \| production |
/// | TIMEZONE | Europe/Madrid | business timezone for dates on receipts |
/// | SHOP_NAME | Riverstone Goods | shop identity on receipts and emails |
/// | SHOP_CONTACT_EMAIL | support@riverstone.example | contact line in receipt footer |
/// | CURRENCY_SYMBOL | $ | symbol used for monetary display |
/// | SMTP_HOST | localhost | SMTP relay host |
/// | SMTP_PORT | 587 | SMTP relay port |
/// | SMTP_USERNAME | (empty) | SMTP auth username |
/// | SMTP_PASSWORD | (empty) | SMTP auth password |
/// | SMTP_FROM_EMAIL | orders@riverstone.example | sender address |
/// | SMTP_FROM_NAME | Riverstone Goods | sender display name |
///
/// # Example
///
/// ```ignore
/// WORK_DIR=/data/fulfillment HTTP_PORT=8080 cargo run
/// ```
#[derive(Debug, Clone)]
pub struct Config {
    /// Working directory for receipts, database and logs
    pub work_dir: String,
    /// HTTP API port
    pub http_port: u16,
    /// Runtime environment: development | staging | production
    pub environment: String,
    /// Business timezone (receipt dates, monthly grouping)
    pub timezone: chrono_tz::Tz,
    /// Shop identity used on receipts and notifications
    pub shop: ShopConfig,
    /// Outbound SMTP transport settings
    pub smtp: SmtpConfig,
}

/// Shop identity rendered on receipts and emails
#[derive(Debug, Clone)]
pub struct ShopConfig {
    pub name: String,
    pub contact_email: String,
    pub currency_symbol: String,
}

/// SMTP relay settings for the outbound mail transport
#[derive(Debug, Clone)]
pub struct SmtpConfig {
    pub host: String,
    pub port: u16,
    pub username: String,
    pub password: String,
    pub from_email: String,
    pub from_name: String,
}

impl Config {
    /// Load configuration from environment variables
    ///
    /// Falls back to defaults for any unset variable.
    pub fn from_env() -> Self {
        Self {
            work_dir: std::env::var("WORK_DIR").unwrap_or_else(|_| "/var/lib/fulfillment".into()),
            http_port: std::env::var("HTTP_PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(3000),
            environment: std::env::var("ENVIRONMENT").unwrap_or_else(|_| "development".into()),
            timezone: std::env::var("TIMEZONE")
                .ok()
                .and_then(|tz| tz.parse().ok())
                .unwrap_or(chrono_tz::Europe::Madrid),
            shop: ShopConfig {
                name: std::env::var("SHOP_NAME").unwrap_or_else(|_| "Riverstone Goods".into()),
                contact_email: std::env::var("SHOP_CONTACT_EMAIL")
                    .unwrap_or_else(|_| "support@riverstone.example".into()),
                currency_symbol: std::env::var("CURRENCY_SYMBOL").unwrap_or_else(|_| "$".into()),
            },
            smtp: SmtpConfig {
                host: std::env::var("SMTP_HOST").unwrap_or_else(|_| "localhost".into()),
                port: std::env::var("SMTP_PORT")
                    .ok()
                    .and_then(|p| p.parse().ok())
                    .unwrap_or(587),
                username: std::env::var("SMTP_USERNAME").unwrap_or_default(),
                password: std::env::var("SMTP_PASSWORD").unwrap_or_default(),
                from_email: std::env::var("SMTP_FROM_EMAIL")
                    .unwrap_or_else(|_| "orders@riverstone.example".into()),
                from_name: std::env::var("SMTP_FROM_NAME")
                    .unwrap_or_else(|_| "Riverstone Goods".into()),
            },
        }
    }

    /// Override selected settings
    ///
    /// Mostly used in tests.
    pub fn with_overrides(work_dir: impl Into<String>, http_port: u16) -> Self {
        let mut config = Self::from_env();
        config.work_dir = work_dir.into();
        config.http_port = http_port;
        config
    }

    /// Directory for transient receipt artifacts
    pub fn receipts_dir(&self) -> PathBuf {
        PathBuf::from(&self.work_dir).join("receipts")
    }

    /// Directory holding the embedded database
    pub fn database_dir(&self) -> PathBuf {
        PathBuf::from(&self.work_dir).join("database")
    }

    /// Create the work directory layout if missing
    pub fn ensure_work_dir_structure(&self) -> std::io::Result<()> {
        std::fs::create_dir_all(self.receipts_dir())?;
        std::fs::create_dir_all(self.database_dir())?;
        Ok(())
    }

    /// Whether this is a production environment
    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }

    /// Whether this is a development environment
    pub fn is_development(&self) -> bool {
        self.environment == "development"
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::from_env()
    }
}
