use crate::errors::{AppError, AppResult};
use crate::utils::path::expand_tilde;
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

/// Environment overrides for the SMTP credentials.
pub const ENV_SMTP_USERNAME: &str = "RINVOICER_SMTP_USERNAME";
pub const ENV_SMTP_PASSWORD: &str = "RINVOICER_SMTP_PASSWORD";

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub database: String,
    pub output_dir: String,
    pub parties: PartiesConfig,
    pub billing: BillingConfig,
    pub mail: MailConfig,
    pub server: ServerConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PartiesConfig {
    pub payee: String,
    pub payee_address: String,
    pub payor: String,
    pub payor_address: String,
    pub payor_phone: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BillingConfig {
    pub hourly_rate: f64,
    pub hours_per_day: f64,
    pub payment_terms: u32,
    pub time_in: String,
    pub time_out: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MailTransport {
    Smtp,
    File,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct MailConfig {
    pub transport: MailTransport,
    pub smtp_host: String,
    pub smtp_port: u16,
    pub username: String,
    pub password: String,
    pub from: String,
    pub approval_to: String,
    pub recipients: Vec<String>,
    pub cc: Vec<String>,
    pub outbox: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub bind: String,
    pub port: u16,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            database: Self::database_file().to_string_lossy().to_string(),
            output_dir: "./invoices".to_string(),
            parties: PartiesConfig::default(),
            billing: BillingConfig::default(),
            mail: MailConfig::default(),
            server: ServerConfig::default(),
        }
    }
}

impl Default for PartiesConfig {
    fn default() -> Self {
        Self {
            payee: "Your Name".to_string(),
            payee_address: "1 Main Street, Springfield, ST 00000".to_string(),
            payor: "Client, Inc.".to_string(),
            payor_address: "100 Market Street, Suite 1, Springfield, ST 00000".to_string(),
            payor_phone: "(000) 000-0000".to_string(),
        }
    }
}

impl Default for BillingConfig {
    fn default() -> Self {
        Self {
            hourly_rate: 80.0,
            hours_per_day: 8.0,
            payment_terms: 15,
            time_in: "10:00".to_string(),
            time_out: "18:00".to_string(),
        }
    }
}

impl Default for MailConfig {
    fn default() -> Self {
        Self {
            transport: MailTransport::Smtp,
            smtp_host: "smtp.gmail.com".to_string(),
            smtp_port: 587,
            username: String::new(),
            password: String::new(),
            from: "me@example.com".to_string(),
            approval_to: "me@example.com".to_string(),
            recipients: vec![
                "billing@example.com".to_string(),
                "timesheets@example.com".to_string(),
            ],
            cc: Vec::new(),
            outbox: "./outbox".to_string(),
        }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: "0.0.0.0".to_string(),
            port: 8000,
        }
    }
}

impl Config {
    /// Return the standard configuration directory depending on the platform
    pub fn config_dir() -> PathBuf {
        if cfg!(target_os = "windows") {
            let appdata = env::var("APPDATA").unwrap_or_else(|_| ".".to_string());
            PathBuf::from(appdata).join("rinvoicer")
        } else {
            let home = env::var("HOME").unwrap_or_else(|_| ".".to_string());
            PathBuf::from(home).join(".rinvoicer")
        }
    }

    /// Return the full path of the config file
    pub fn config_file() -> PathBuf {
        Self::config_dir().join("rinvoicer.conf")
    }

    /// Return the full path of the SQLite database
    pub fn database_file() -> PathBuf {
        Self::config_dir().join("rinvoicer.sqlite")
    }

    /// Load configuration from `path` (or the standard file), falling back to
    /// defaults when the file does not exist. Environment overrides are
    /// applied last.
    pub fn load(path: Option<&Path>) -> AppResult<Self> {
        let path = path
            .map(Path::to_path_buf)
            .unwrap_or_else(Self::config_file);

        let mut cfg = if path.exists() {
            let content = fs::read_to_string(&path)?;
            serde_yaml::from_str(&content)?
        } else {
            Config::default()
        };

        cfg.apply_env();
        cfg.database = expand_tilde(&cfg.database).to_string_lossy().to_string();
        Ok(cfg)
    }

    fn apply_env(&mut self) {
        if let Ok(user) = env::var(ENV_SMTP_USERNAME) {
            self.mail.username = user;
        }
        if let Ok(pass) = env::var(ENV_SMTP_PASSWORD) {
            self.mail.password = pass;
        }
    }

    /// True when SMTP credentials are available (or mail goes to the outbox).
    pub fn email_configured(&self) -> bool {
        match self.mail.transport {
            MailTransport::File => true,
            MailTransport::Smtp => !self.mail.username.is_empty() && !self.mail.password.is_empty(),
        }
    }

    pub fn output_path(&self) -> PathBuf {
        expand_tilde(&self.output_dir)
    }

    /// YAML dump with the SMTP password masked.
    pub fn to_redacted_yaml(&self) -> AppResult<String> {
        let mut shown = self.clone();
        if !shown.mail.password.is_empty() {
            shown.mail.password = "********".to_string();
        }
        Ok(serde_yaml::to_string(&shown)?)
    }

    /// Initialize configuration file and database location.
    /// Returns the configuration that was written (or would have been, in test mode).
    pub fn init_all(
        custom_db: Option<String>,
        config_path: Option<&Path>,
        is_test: bool,
    ) -> AppResult<Config> {
        let dir = Self::config_dir();

        let db_path = match custom_db {
            Some(name) => {
                let p = expand_tilde(&name);
                if p.is_absolute() { p } else { dir.join(p) }
            }
            None => Self::database_file(),
        };

        let config = Config {
            database: db_path.to_string_lossy().to_string(),
            ..Config::default()
        };

        if !is_test {
            let file = config_path
                .map(Path::to_path_buf)
                .unwrap_or_else(Self::config_file);
            if let Some(parent) = file.parent() {
                fs::create_dir_all(parent)?;
            }

            let yaml = serde_yaml::to_string(&config)?;
            let mut f = fs::File::create(&file)?;
            f.write_all(yaml.as_bytes())?;
            println!("✅ Config file: {:?}", file);
        }

        if let Some(parent) = db_path.parent() {
            fs::create_dir_all(parent).map_err(|e| {
                AppError::Config(format!("cannot create {}: {e}", parent.display()))
            })?;
        }

        Ok(config)
    }
}
