use std::fs;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn spendwatch(data_dir: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("spendwatch").unwrap();
    cmd.env("SPENDWATCH_DATA_DIR", data_dir.path())
        .env_remove("SPENDWATCH_USER")
        .env_remove("RUST_LOG");
    cmd
}

fn add_expense(data_dir: &TempDir, label: &str, amount: &str, category: &str) -> assert_cmd::assert::Assert {
    spendwatch(data_dir)
        .args(["expense", "add", label, amount, "--category", category, "--date", "2025-01-10"])
        .assert()
        .success()
}

#[test]
fn init_creates_config() {
    let dir = TempDir::new().unwrap();
    spendwatch(&dir)
        .arg("init")
        .assert()
        .success()
        .stdout(predicate::str::contains("Initialization complete"));

    assert!(dir.path().join("config.json").exists());
    assert!(dir.path().join("data").join("expenses.json").exists());
}

#[test]
fn category_budget_warns_once_then_alerts() {
    let dir = TempDir::new().unwrap();
    spendwatch(&dir)
        .args(["budget", "set", "food", "100"])
        .assert()
        .success();

    add_expense(&dir, "Groceries", "85", "food")
        .stdout(predicate::str::contains("[!] Category Budget Warning"))
        .stdout(predicate::str::contains("85.0% of budget limit"));

    add_expense(&dir, "Snack", "5", "food")
        .stdout(predicate::str::contains("Budget Warning").not());

    add_expense(&dir, "Dinner", "10", "food")
        .stdout(predicate::str::contains("[x] Category Budget Alert"));

    spendwatch(&dir)
        .args(["alerts", "history"])
        .assert()
        .success()
        .stdout(predicate::str::contains("food"))
        .stdout(predicate::str::contains("alert"));
}

#[test]
fn status_is_read_only() {
    let dir = TempDir::new().unwrap();
    add_expense(&dir, "Rent", "900", "utilities");

    // Setting the budget announces the existing spend
    spendwatch(&dir)
        .args(["budget", "set", "overall", "1000"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Budget Warning"));

    spendwatch(&dir)
        .arg("status")
        .assert()
        .success()
        .stdout(predicate::str::contains("overall"))
        .stdout(predicate::str::contains("90.0%"))
        .stdout(predicate::str::contains("WARNING"));

    spendwatch(&dir)
        .args(["alerts", "recheck"])
        .assert()
        .success()
        .stdout(predicate::str::contains("nothing new to report"));
}

#[test]
fn users_are_isolated() {
    let dir = TempDir::new().unwrap();
    spendwatch(&dir)
        .args(["--user", "alice", "expense", "add", "Book", "20"])
        .assert()
        .success();

    spendwatch(&dir)
        .args(["--user", "bob", "expense", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No expenses found."));

    spendwatch(&dir)
        .args(["--user", "alice", "expense", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Book"));
}

#[test]
fn invalid_budget_limit_is_rejected() {
    let dir = TempDir::new().unwrap();
    spendwatch(&dir)
        .args(["budget", "set", "food", "0"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Budget error"));
}

#[test]
fn unknown_category_is_rejected() {
    let dir = TempDir::new().unwrap();
    spendwatch(&dir)
        .args(["expense", "add", "Gift", "10", "--category", "gifts"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("unknown category"));
}

#[test]
fn clear_requires_confirmation() {
    let dir = TempDir::new().unwrap();
    add_expense(&dir, "Taxi", "15", "transport");

    spendwatch(&dir)
        .args(["expense", "clear"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("--yes"));

    spendwatch(&dir)
        .args(["expense", "clear", "--yes"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Deleted 1 expense(s)"));
}

#[test]
fn analyze_totals_and_skips_bad_records() {
    let dir = TempDir::new().unwrap();
    let file = dir.path().join("expenses.json");
    fs::write(
        &file,
        r#"[{"category":"food","value":10},{"category":"food","value":"2.5"},{"value":3},{"category":"food","value":"n/a"}]"#,
    )
    .unwrap();

    spendwatch(&dir)
        .arg("analyze")
        .arg(&file)
        .assert()
        .success()
        .stdout(predicate::str::contains("12.50"))
        .stdout(predicate::str::contains("other"))
        .stdout(predicate::str::contains("1 record(s) skipped"));
}

#[test]
fn analyze_rejects_non_list() {
    let dir = TempDir::new().unwrap();
    let file = dir.path().join("expenses.json");
    fs::write(&file, r#"{"category":"food","value":10}"#).unwrap();

    spendwatch(&dir)
        .arg("analyze")
        .arg(&file)
        .assert()
        .failure()
        .stderr(predicate::str::contains("expenses must be a list"));
}

#[test]
fn export_csv_writes_report() {
    let dir = TempDir::new().unwrap();
    let output = dir.path().join("report.csv");

    spendwatch(&dir)
        .args(["export", "csv", "--output"])
        .arg(&output)
        .assert()
        .failure()
        .stderr(predicate::str::contains("No expenses to export"));

    add_expense(&dir, "Groceries", "40", "food");
    spendwatch(&dir)
        .args(["export", "csv", "--output"])
        .arg(&output)
        .assert()
        .success();

    let contents = fs::read_to_string(&output).unwrap();
    assert!(contents.starts_with("Date,Category,Description,Amount,Running Total,Month,Year\n"));
    assert!(contents.contains("2025-01-10,food,Groceries,40.00,40.00,January,2025"));
    assert!(contents.contains("Total Expenses,40.00"));
}

#[test]
fn monthly_report_filters_by_month() {
    let dir = TempDir::new().unwrap();
    add_expense(&dir, "Groceries", "40", "food");

    spendwatch(&dir)
        .args(["report", "monthly", "--month", "2025-01"])
        .assert()
        .success()
        .stdout(predicate::str::contains("January 2025"))
        .stdout(predicate::str::contains("food"));

    spendwatch(&dir)
        .args(["report", "monthly", "--month", "2025-13"])
        .assert()
        .failure();
}

#[test]
fn savings_goal_progress() {
    let dir = TempDir::new().unwrap();

    spendwatch(&dir)
        .args(["savings", "progress", "--saved", "100"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("No savings goal set"));

    spendwatch(&dir)
        .args(["savings", "goal", "0"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Savings goal must be a positive amount"));

    spendwatch(&dir)
        .args(["savings", "goal", "12000"])
        .assert()
        .success()
        .stdout(predicate::str::contains("₹12000 (₹1000 per month)"));

    spendwatch(&dir)
        .args(["savings", "progress", "--saved", "11000"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Almost there! Only ₹1000.00 left to reach your goal!"));

    spendwatch(&dir)
        .args(["savings", "progress", "--saved", "3000"])
        .assert()
        .success()
        .stdout(predicate::str::contains("25.0%"))
        .stdout(predicate::str::contains("₹9000.00 away from your savings target."));

    spendwatch(&dir)
        .args(["savings", "progress", "--saved", "12000"])
        .assert()
        .success()
        .stdout(predicate::str::contains("[+] You've reached your savings goal!"));
}

#[test]
fn setting_same_budget_twice_alerts_once() {
    let dir = TempDir::new().unwrap();
    add_expense(&dir, "Groceries", "600", "food");

    spendwatch(&dir)
        .args(["budget", "set", "food", "500"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Category Budget Alert"));

    spendwatch(&dir)
        .args(["budget", "set", "food", "500"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Budget Alert").not());
}
