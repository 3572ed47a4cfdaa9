use predicates::prelude::PredicateBooleanExt;
use predicates::str::contains;
use std::fs;

mod common;
use common::{
    files_with_ext, init_db_with_weeks, missing_config, rinv, setup_test_db, temp_dir,
    write_file_config,
};

#[test]
fn test_init_creates_database() {
    let db_path = setup_test_db("cli_init");
    let conf = missing_config("cli_init");

    rinv()
        .args(["--db", &db_path, "--config", &conf, "--test", "init"])
        .assert()
        .success()
        .stdout(contains("Database initialized"));

    assert!(fs::metadata(&db_path).is_ok());
    // test mode never writes the config file
    assert!(fs::metadata(&conf).is_err());
}

#[test]
fn test_schema_setup_keeps_stdout_clean() {
    let db_path = setup_test_db("cli_quiet_schema");
    let conf = missing_config("cli_quiet_schema");

    // first command on a fresh database creates the schema
    rinv()
        .args(["--db", &db_path, "--config", &conf, "list"])
        .assert()
        .success()
        .stdout(contains("No invoices").and(contains("invoices table").not()));
}

#[test]
fn test_populate_and_list() {
    let db_path = setup_test_db("cli_populate");
    let conf = missing_config("cli_populate");

    rinv()
        .args(["--db", &db_path, "--config", &conf, "--test", "init"])
        .assert()
        .success();

    rinv()
        .args([
            "--db",
            &db_path,
            "--config",
            &conf,
            "populate",
            "--from",
            "2025-10-05",
            "--to",
            "2025-10-12",
        ])
        .assert()
        .success()
        .stdout(contains("Inserted 2 invoices").and(contains("$6,400.00")));

    rinv()
        .args(["--db", &db_path, "--config", &conf, "list"])
        .assert()
        .success()
        .stdout(
            contains("N001")
                .and(contains("N002"))
                .and(contains("$3,200.00"))
                .and(contains("80.0 Hours")),
        );
}

#[test]
fn test_populate_twice_fails() {
    let db_path = setup_test_db("cli_populate_twice");
    let conf = missing_config("cli_populate_twice");
    init_db_with_weeks(&db_path, &conf);

    rinv()
        .args([
            "--db",
            &db_path,
            "--config",
            &conf,
            "populate",
            "--from",
            "2025-10-05",
            "--to",
            "2025-10-12",
        ])
        .assert()
        .failure()
        .stderr(contains("already exists"));
}

#[test]
fn test_populate_rejects_reversed_range() {
    let db_path = setup_test_db("cli_reversed");
    let conf = missing_config("cli_reversed");

    rinv()
        .args([
            "--db",
            &db_path,
            "--config",
            &conf,
            "populate",
            "--from",
            "2025-10-12",
            "--to",
            "2025-10-05",
        ])
        .assert()
        .failure()
        .stderr(contains("Invalid date range"));
}

#[test]
fn test_show_known_and_unknown() {
    let db_path = setup_test_db("cli_show");
    let conf = missing_config("cli_show");
    init_db_with_weeks(&db_path, &conf);

    rinv()
        .args(["--db", &db_path, "--config", &conf, "show", "N001"])
        .assert()
        .success()
        .stdout(contains("Mon 09/29/2025").and(contains("10/20/2025")));

    rinv()
        .args(["--db", &db_path, "--config", &conf, "show", "N999"])
        .assert()
        .failure()
        .stderr(contains("Invoice N999 not found"));
}

#[test]
fn test_render_and_batch() {
    let db_path = setup_test_db("cli_render");
    let conf = missing_config("cli_render");
    init_db_with_weeks(&db_path, &conf);
    let out = temp_dir("cli_render_out");
    let out_s = out.to_string_lossy().to_string();

    rinv()
        .args([
            "--db", &db_path, "--config", &conf, "render", "N001", "-o", &out_s,
        ])
        .assert()
        .success();

    let pdf = fs::read(out.join("invoice_N001.pdf")).unwrap();
    assert!(pdf.starts_with(b"%PDF"));

    let batch_out = temp_dir("cli_batch_out");
    let batch_s = batch_out.to_string_lossy().to_string();
    rinv()
        .args(["--db", &db_path, "--config", &conf, "batch", "-o", &batch_s])
        .assert()
        .success()
        .stdout(contains("Rendered 2 invoices"));

    assert_eq!(files_with_ext(&batch_out, "pdf").len(), 2);
}

#[test]
fn test_paid_and_filters() {
    let db_path = setup_test_db("cli_paid");
    let conf = missing_config("cli_paid");
    init_db_with_weeks(&db_path, &conf);

    rinv()
        .args(["--db", &db_path, "--config", &conf, "paid", "N001"])
        .assert()
        .success()
        .stdout(contains("Paid"));

    rinv()
        .args(["--db", &db_path, "--config", &conf, "list", "--status", "paid"])
        .assert()
        .success()
        .stdout(contains("N001").and(contains("N002").not()));

    rinv()
        .args(["--db", &db_path, "--config", &conf, "list", "--status", "unpaid"])
        .assert()
        .success()
        .stdout(contains("N002").and(contains("N001").not()));

    rinv()
        .args(["--db", &db_path, "--config", &conf, "submit", "N001", "--undo"])
        .assert()
        .failure()
        .stderr(contains("Invalid status change"));

    rinv()
        .args(["--db", &db_path, "--config", &conf, "paid", "N001", "--undo"])
        .assert()
        .success();

    rinv()
        .args(["--db", &db_path, "--config", &conf, "list", "--status", "outstanding"])
        .assert()
        .success()
        .stdout(contains("N001").and(contains("N002").not()));
}

#[test]
fn test_stats() {
    let db_path = setup_test_db("cli_stats");
    let conf = missing_config("cli_stats");
    init_db_with_weeks(&db_path, &conf);

    rinv()
        .args(["--db", &db_path, "--config", &conf, "submit", "N002"])
        .assert()
        .success();

    rinv()
        .args(["--db", &db_path, "--config", &conf, "stats"])
        .assert()
        .success()
        .stdout(
            contains("INVOICE STATISTICS")
                .and(contains("Submitted"))
                .and(contains("50.0%"))
                .and(contains("$6,400.00")),
        );
}

#[test]
fn test_send_without_credentials_fails() {
    let db_path = setup_test_db("cli_send_nocreds");
    let conf = missing_config("cli_send_nocreds");
    init_db_with_weeks(&db_path, &conf);

    rinv()
        .env_remove("RINVOICER_SMTP_USERNAME")
        .env_remove("RINVOICER_SMTP_PASSWORD")
        .args(["--db", &db_path, "--config", &conf, "send", "N001"])
        .assert()
        .failure()
        .stderr(contains("Configuration error"));
}

#[test]
fn test_send_writes_outbox() {
    let db_path = setup_test_db("cli_send_file");
    let (conf, out, outbox) = write_file_config("cli_send_file", &db_path);
    init_db_with_weeks(&db_path, &conf);

    rinv()
        .args(["--db", &db_path, "--config", &conf, "send", "N002"])
        .assert()
        .success();

    assert!(out.join("invoice_N002.pdf").exists());
    let mails = files_with_ext(&outbox, "eml");
    assert_eq!(mails.len(), 1);
    let eml = fs::read_to_string(&mails[0]).unwrap();
    assert!(eml.contains("Weekly Invoice N002 - Jane Doe"));
    assert!(eml.contains("billing@acme.example"));

    rinv()
        .args(["--db", &db_path, "--config", &conf, "list", "--status", "submitted"])
        .assert()
        .success()
        .stdout(contains("N002").and(contains("N001").not()));
}

#[test]
fn test_weekly_runs_once_per_week() {
    let db_path = setup_test_db("cli_weekly");
    let (conf, _out, outbox) = write_file_config("cli_weekly", &db_path);

    rinv()
        .args(["--db", &db_path, "--config", &conf, "--test", "init"])
        .assert()
        .success();

    rinv()
        .args([
            "--db", &db_path, "--config", &conf, "weekly", "--today", "2025-10-13",
        ])
        .assert()
        .success()
        .stdout(contains("N001").and(contains("marked submitted")));

    rinv()
        .args([
            "--db", &db_path, "--config", &conf, "weekly", "--today", "2025-10-14",
        ])
        .assert()
        .success()
        .stdout(contains("already submitted"));

    assert_eq!(files_with_ext(&outbox, "eml").len(), 1);
}

#[test]
fn test_config_print_redacts_password() {
    let db_path = setup_test_db("cli_config");
    let (conf, _, _) = write_file_config("cli_config", &db_path);

    rinv()
        .env_remove("RINVOICER_SMTP_PASSWORD")
        .args(["--config", &conf, "config", "--print"])
        .assert()
        .success()
        .stdout(
            contains("Jane Doe")
                .and(contains("********"))
                .and(contains("hunter2").not()),
        );
}

#[test]
fn test_log_and_db_maintenance() {
    let db_path = setup_test_db("cli_log");
    let conf = missing_config("cli_log");
    init_db_with_weeks(&db_path, &conf);

    rinv()
        .args(["--db", &db_path, "--config", &conf, "log", "--print"])
        .assert()
        .success()
        .stdout(contains("populate").and(contains("Inserted 2 weekly invoices")));

    rinv()
        .args(["--db", &db_path, "--config", &conf, "db", "--check", "--info"])
        .assert()
        .success()
        .stdout(contains("Integrity check passed").and(contains("Total invoices")));
}
