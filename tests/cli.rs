use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn runora(data_dir: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("runora").unwrap();
    cmd.env("RUNORA_DATA_DIR", data_dir.path())
        .env("RUST_LOG", "off");
    cmd
}

fn read_document(data_dir: &TempDir) -> serde_json::Value {
    let raw = std::fs::read_to_string(data_dir.path().join("data").join("budget.json")).unwrap();
    serde_json::from_str(&raw).unwrap()
}

#[test]
fn first_run_creates_seeded_document() {
    let dir = TempDir::new().unwrap();

    runora(&dir)
        .arg("tag")
        .arg("list")
        .assert()
        .success()
        .stdout(predicate::str::contains("Food & Dining"))
        .stdout(predicate::str::contains("Healthcare"));

    let doc = read_document(&dir);
    assert_eq!(doc["tags"].as_array().unwrap().len(), 8);
    assert_eq!(doc["symbol"], "₹");
    assert!(doc["lastBudgetUpdate"].is_string());
}

#[test]
fn budget_and_expenses_drive_the_balance() {
    let dir = TempDir::new().unwrap();

    runora(&dir)
        .args(["budget", "set", "500", "--month", "2025-01"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Budget for 2025-01 set to ₹500.00"));

    runora(&dir)
        .args([
            "expense", "add", "120.50", "Groceries run", "--date", "2025-01-10", "--tag", "groceries",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("Added expense: Groceries run ₹120.50"));

    runora(&dir)
        .args(["budget", "show", "--month", "2025-01"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Left:   ₹379.50"));

    runora(&dir)
        .args(["expense", "list", "--month", "2025-01"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Groceries run"))
        .stdout(predicate::str::contains("1 expense(s), total ₹120.50"));

    let doc = read_document(&dir);
    assert_eq!(doc["budgets"]["2025-01"], 500);
    assert_eq!(doc["expenses"]["2025-01"][0]["amount"], 120.5);
}

#[test]
fn invalid_input_fails_without_changing_data() {
    let dir = TempDir::new().unwrap();

    runora(&dir)
        .args(["budget", "set", "0", "--month", "2025-01"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("positive"));

    runora(&dir)
        .args(["expense", "add", "-5", "Refund", "--date", "2025-01-10"])
        .assert()
        .failure();

    runora(&dir)
        .args(["expense", "add", "5", "Tea", "--date", "2025-01-10", "--tag", "no-such-tag"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Tag not found"));

    let doc = read_document(&dir);
    assert!(doc["budgets"].as_object().unwrap().is_empty());
    assert!(doc["expenses"].as_object().unwrap().is_empty());
}

#[test]
fn deleting_a_tag_removes_it_from_expenses() {
    let dir = TempDir::new().unwrap();

    runora(&dir)
        .args(["tag", "add", "Pets", "--color", "#112233"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Created tag"));

    runora(&dir)
        .args(["expense", "add", "40", "Vet", "--date", "2025-02-03", "--tag", "pets", "--tag", "health"])
        .assert()
        .success();

    runora(&dir)
        .args(["tag", "delete", "Pets"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Removed from 1 expense(s)"));

    let doc = read_document(&dir);
    assert_eq!(doc["tags"].as_array().unwrap().len(), 8);
    assert_eq!(doc["expenses"]["2025-02"][0]["tags"].as_array().unwrap().len(), 1);
}

#[test]
fn export_then_import_restores_data() {
    let dir = TempDir::new().unwrap();
    let out = TempDir::new().unwrap();

    runora(&dir)
        .args(["budget", "set", "300", "--month", "2025-03"])
        .assert()
        .success();
    runora(&dir)
        .args(["expense", "add", "45", "Dinner", "--date", "2025-03-02", "--tag", "food"])
        .assert()
        .success();

    runora(&dir)
        .args(["export", "--dir"])
        .arg(out.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("runora_budget_backup_"));

    let export = std::fs::read_dir(out.path())
        .unwrap()
        .next()
        .unwrap()
        .unwrap()
        .path();
    let before = read_document(&dir);

    runora(&dir).args(["reset", "--yes"]).assert().success();
    assert!(read_document(&dir)["budgets"].as_object().unwrap().is_empty());

    runora(&dir)
        .arg("import")
        .arg(&export)
        .assert()
        .success()
        .stdout(predicate::str::contains("1 budget(s), 1 expense(s), 8 tag(s)"));

    let after = read_document(&dir);
    assert_eq!(after["budgets"], before["budgets"]);
    assert_eq!(after["expenses"], before["expenses"]);
    assert_eq!(after["tags"], before["tags"]);
}

#[test]
fn malformed_import_is_rejected() {
    let dir = TempDir::new().unwrap();
    let file = dir.path().join("bad.json");
    std::fs::write(&file, r#"{"budgets": ["2025-01"]}"#).unwrap();

    runora(&dir)
        .args(["budget", "set", "10", "--month", "2025-01"])
        .assert()
        .success();

    runora(&dir)
        .arg("import")
        .arg(&file)
        .assert()
        .failure()
        .stderr(predicate::str::contains("Import error"));

    assert_eq!(read_document(&dir)["budgets"]["2025-01"], 10);
}

#[test]
fn reset_requires_confirmation() {
    let dir = TempDir::new().unwrap();
    runora(&dir).arg("reset").assert().failure();
}

#[test]
fn settings_update_the_document() {
    let dir = TempDir::new().unwrap();

    runora(&dir)
        .args(["settings", "set-symbol", "$"])
        .assert()
        .success();
    runora(&dir)
        .args(["settings", "set-carry-over", "true"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Carry over enabled"));
    runora(&dir)
        .args(["settings", "set-rollover-policy", "replace"])
        .assert()
        .success();

    runora(&dir)
        .args(["settings", "show"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Symbol:          $"))
        .stdout(predicate::str::contains("Carry over:      true"))
        .stdout(predicate::str::contains("Rollover policy: Replace"));
}

#[test]
fn monthly_budget_is_applied_to_the_current_month() {
    let dir = TempDir::new().unwrap();

    runora(&dir)
        .args(["settings", "set-monthly-budget", "100"])
        .assert()
        .success();

    // Force the next run to treat the month as not yet rolled over
    let path = dir.path().join("data").join("budget.json");
    let mut doc = read_document(&dir);
    doc["lastBudgetUpdate"] = serde_json::Value::Null;
    std::fs::write(&path, serde_json::to_string(&doc).unwrap()).unwrap();

    runora(&dir)
        .arg("balance")
        .assert()
        .success()
        .stdout(predicate::str::contains("Remaining balance: ₹100.00"));

    // Running again in the same month does not stack another allotment
    runora(&dir)
        .arg("balance")
        .assert()
        .success()
        .stdout(predicate::str::contains("Remaining balance: ₹100.00"));
}

#[test]
fn unreadable_document_is_kept_aside() {
    let dir = TempDir::new().unwrap();
    let data = dir.path().join("data");
    std::fs::create_dir_all(&data).unwrap();
    let original = r#"{ "budgets": {"2025-01": 500}, "expenses": "#;
    std::fs::write(data.join("budget.json"), original).unwrap();

    runora(&dir).arg("balance").assert().success();

    let kept: Vec<_> = std::fs::read_dir(&data)
        .unwrap()
        .map(|entry| entry.unwrap().path())
        .filter(|p| p.to_string_lossy().contains("budget.json.corrupt-"))
        .collect();
    assert_eq!(kept.len(), 1);
    assert_eq!(std::fs::read_to_string(&kept[0]).unwrap(), original);
    assert_eq!(read_document(&dir)["tags"].as_array().unwrap().len(), 8);
}

#[test]
fn ambiguous_or_oversized_input_is_rejected() {
    let dir = TempDir::new().unwrap();

    runora(&dir)
        .args(["budget", "set", "99999999999999999", "--month", "2025-01"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("too large"));

    runora(&dir)
        .args(["expense", "add", "--date", "2025-01-10", "--", "--5", "Tea"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid amount"));

    assert!(read_document(&dir)["budgets"].as_object().unwrap().is_empty());
    assert!(read_document(&dir)["expenses"].as_object().unwrap().is_empty());
}
