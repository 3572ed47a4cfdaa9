#![allow(dead_code)]
use assert_cmd::{Command, cargo_bin_cmd};
use rinvoicer::config::{Config, MailTransport};
use std::env;
use std::fs;
use std::path::PathBuf;

pub fn rinv() -> Command {
    cargo_bin_cmd!("rinvoicer")
}

/// Create a unique test DB path inside the system temp dir and remove any existing file
pub fn setup_test_db(name: &str) -> String {
    let mut path: PathBuf = env::temp_dir();
    path.push(format!("{}_rinvoicer.sqlite", name));
    let db_path = path.to_string_lossy().to_string();
    fs::remove_file(&db_path).ok();
    db_path
}

/// Fresh, empty directory inside the system temp dir
pub fn temp_dir(name: &str) -> PathBuf {
    let mut path: PathBuf = env::temp_dir();
    path.push(format!("{}_rinvoicer", name));
    fs::remove_dir_all(&path).ok();
    fs::create_dir_all(&path).expect("create temp dir");
    path
}

/// Path of a config file that does not exist: the CLI falls back to defaults
pub fn missing_config(name: &str) -> String {
    let mut path: PathBuf = env::temp_dir();
    path.push(format!("{}_missing.conf", name));
    fs::remove_file(&path).ok();
    path.to_string_lossy().to_string()
}

/// Write a config using the file transport; returns (config path, output dir, outbox dir)
pub fn write_file_config(name: &str, db_path: &str) -> (String, PathBuf, PathBuf) {
    let base = temp_dir(name);
    let out = base.join("invoices");
    let outbox = base.join("outbox");
    let conf = base.join("rinvoicer.conf");

    let yaml = format!(
        r#"database: '{db}'
output_dir: '{out}'
parties:
  payee: Jane Doe
  payee_address: 1 Elm Street, Springfield, IL 62701
  payor: Acme Corp
  payor_address: 500 Industrial Way, Springfield, IL 62702
  payor_phone: (217) 555-0100
billing:
  hourly_rate: 80.0
  hours_per_day: 8.0
  payment_terms: 15
mail:
  transport: file
  password: hunter2
  from: jane@example.com
  approval_to: jane@example.com
  recipients:
    - billing@acme.example
    - timesheets@acme.example
  outbox: '{outbox}'
"#,
        db = db_path,
        out = out.display(),
        outbox = outbox.display(),
    );
    fs::write(&conf, yaml).expect("write config");

    (conf.to_string_lossy().to_string(), out, outbox)
}

/// Initialize the DB and populate the two weeks ending 2025-10-05 and 2025-10-12
pub fn init_db_with_weeks(db_path: &str, conf: &str) {
    rinv()
        .args(["--db", db_path, "--config", conf, "--test", "init"])
        .assert()
        .success();

    rinv()
        .args([
            "--db",
            db_path,
            "--config",
            conf,
            "populate",
            "--from",
            "2025-10-05",
            "--to",
            "2025-10-12",
        ])
        .assert()
        .success();
}

/// In-process configuration matching `write_file_config`
pub fn file_config(db_path: &str, out: &PathBuf, outbox: &PathBuf) -> Config {
    let mut cfg = Config::default();
    cfg.database = db_path.to_string();
    cfg.output_dir = out.to_string_lossy().to_string();
    cfg.parties.payee = "Jane Doe".to_string();
    cfg.parties.payor = "Acme Corp".to_string();
    cfg.mail.transport = MailTransport::File;
    cfg.mail.from = "jane@example.com".to_string();
    cfg.mail.approval_to = "jane@example.com".to_string();
    cfg.mail.recipients = vec![
        "billing@acme.example".to_string(),
        "timesheets@acme.example".to_string(),
    ];
    cfg.mail.outbox = outbox.to_string_lossy().to_string();
    cfg
}

/// Files in `dir` with the given extension
pub fn files_with_ext(dir: &PathBuf, ext: &str) -> Vec<PathBuf> {
    match fs::read_dir(dir) {
        Ok(entries) => entries
            .filter_map(|e| e.ok())
            .map(|e| e.path())
            .filter(|p| p.extension().is_some_and(|x| x == ext))
            .collect(),
        Err(_) => Vec::new(),
    }
}

/// Notifier that keeps messages in memory, or fails every send
#[derive(Default)]
pub struct RecordingNotifier {
    pub sent: std::sync::Mutex<Vec<rinvoicer::notify::Notification>>,
    pub fail: bool,
}

impl RecordingNotifier {
    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::default()
        }
    }

    pub fn messages(&self) -> Vec<rinvoicer::notify::Notification> {
        self.sent.lock().unwrap().clone()
    }
}

impl rinvoicer::notify::Notifier for RecordingNotifier {
    fn send(&self, msg: &rinvoicer::notify::Notification) -> rinvoicer::errors::AppResult<()> {
        if self.fail {
            return Err(rinvoicer::errors::AppError::Transport(
                "connection refused".to_string(),
            ));
        }
        self.sent.lock().unwrap().push(msg.clone());
        Ok(())
    }
}
