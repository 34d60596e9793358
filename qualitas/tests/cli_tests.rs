use anyhow::Result;
use assert_cmd::prelude::*;
use predicates::prelude::*;
use serde_json::Value as JsonValue;
use std::path::{Path, PathBuf};
use std::process::Command;
use tempfile::TempDir;

const ORDERS: &str = "\
responsible,goodsQuantity,remarks
tmm,5,
bob,5,
tmm,0,BDE: machine stop
eve,0,
";

/// Scratch workspace: data files and an optional `qualitas.yaml`.
struct QualitasTestEnv {
    tmp: TempDir,
}

impl QualitasTestEnv {
    fn new() -> Result<Self> {
        Ok(Self {
            tmp: tempfile::tempdir()?,
        })
    }

    fn root(&self) -> &Path {
        self.tmp.path()
    }

    fn write(&self, name: &str, content: &str) -> Result<PathBuf> {
        let path = self.root().join(name);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(&path, content)?;
        Ok(path)
    }

    fn copy_fixture(&self, fixture: &str, name: &str) -> Result<PathBuf> {
        let source = Path::new(env!("CARGO_MANIFEST_DIR"))
            .join("../qualitas-core/tests/fixtures")
            .join(fixture);
        let path = self.root().join(name);
        std::fs::copy(source, &path)?;
        Ok(path)
    }

    fn qualitas(&self) -> Command {
        let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("qualitas"));
        cmd.current_dir(self.root());
        cmd.env_remove("QUALITAS_SENTINEL");
        cmd
    }

    fn assess_json(&self, args: &[&str]) -> Result<(JsonValue, std::process::Output)> {
        let output = self
            .qualitas()
            .arg("assess")
            .args(args)
            .args(["--format", "json"])
            .output()?;
        let json = serde_json::from_slice(&output.stdout)?;
        Ok((json, output))
    }
}

#[test]
fn test_assess_prints_summary_table() -> Result<()> {
    let env = QualitasTestEnv::new()?;
    env.write("orders.csv", ORDERS)?;

    env.qualitas()
        .args(["assess", "orders.csv"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Quality %"))
        .stdout(predicate::str::contains("orders.csv"))
        .stdout(predicate::str::contains("50.00"));
    Ok(())
}

#[test]
fn test_assess_json_report() -> Result<()> {
    let env = QualitasTestEnv::new()?;
    env.write("orders.csv", ORDERS)?;

    let (json, output) = env.assess_json(&["orders.csv", "--group-by", "responsible"])?;
    assert!(output.status.success());

    let dataset = &json["outcomes"][0];
    assert_eq!(dataset["status"], "assessed");
    assert_eq!(dataset["summary"]["total"], 4);
    assert_eq!(dataset["summary"]["bad"], 2);
    assert_eq!(dataset["summary"]["quality_pct"], 50.0);
    assert_eq!(dataset["breakdown"]["column"], "responsible");
    assert_eq!(dataset["breakdown"]["entries"][0]["value"], "tmm");
    assert_eq!(dataset["breakdown"]["entries"][0]["bad"], 2);

    let bad_rows = dataset["bad_rows"].as_array().map(Vec::len);
    assert_eq!(bad_rows, Some(2));
    assert_eq!(
        dataset["bad_rows"][1]["violations"][0],
        "sentinel_with_bde_remark"
    );
    assert!(json["generated_at"].is_string());
    Ok(())
}

#[test]
fn test_min_quality_fails_the_run() -> Result<()> {
    let env = QualitasTestEnv::new()?;
    env.write("orders.csv", ORDERS)?;

    env.qualitas()
        .args(["assess", "orders.csv", "--min-quality", "90"])
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("below the 90.00% threshold"));

    env.qualitas()
        .args(["assess", "orders.csv", "--min-quality", "50"])
        .assert()
        .success();
    Ok(())
}

#[test]
fn test_bad_file_does_not_hide_the_others() -> Result<()> {
    let env = QualitasTestEnv::new()?;
    env.write("orders.csv", ORDERS)?;
    env.write("partial.csv", "responsible,goodsQuantity\ntmm,3\n")?;

    let (json, output) = env.assess_json(&["partial.csv", "orders.csv"])?;
    assert_eq!(output.status.code(), Some(1));

    assert_eq!(json["outcomes"][0]["status"], "failed");
    assert_eq!(json["outcomes"][0]["code"], "qualitas::domain::missing_columns");
    assert_eq!(json["outcomes"][1]["status"], "assessed");
    assert_eq!(json["overall"]["total"], 4);

    let stderr = String::from_utf8(output.stderr)?;
    assert!(stderr.contains("Required column(s) not found: remarks"));
    Ok(())
}

#[test]
fn test_config_maps_german_headers() -> Result<()> {
    let env = QualitasTestEnv::new()?;
    env.write(
        "qualitas.yaml",
        r#"
columns:
  responsible: "Zuständiger Bearbeiter"
  goods_quantity: "Rückgemeldete Gutmenge in Lagereinheit"
  remarks: "Bemerkungen"
"#,
    )?;
    env.write(
        "export.csv",
        "Zuständiger Bearbeiter;Rückgemeldete Gutmenge in Lagereinheit;Bemerkungen\n\
         tmm;1,5;\n\
         mueller;3;\n",
    )?;

    let (json, output) = env.assess_json(&["export.csv"])?;
    assert!(output.status.success());
    assert_eq!(json["outcomes"][0]["summary"]["bad"], 1);
    assert_eq!(json["outcomes"][0]["summary"]["good"], 1);
    Ok(())
}

#[test]
fn test_sentinel_env_override() -> Result<()> {
    let env = QualitasTestEnv::new()?;
    env.write("orders.csv", ORDERS)?;

    let output = env
        .qualitas()
        .env("QUALITAS_SENTINEL", "bob")
        .args(["assess", "orders.csv", "--format", "json"])
        .output()?;
    let json: JsonValue = serde_json::from_slice(&output.stdout)?;
    assert_eq!(json["outcomes"][0]["summary"]["bad"], 1);
    assert_eq!(json["outcomes"][0]["bad_rows"][0]["values"]["responsible"], "bob");
    Ok(())
}

#[test]
fn test_settings_ignored_by_explicit_rules_are_warned() -> Result<()> {
    let env = QualitasTestEnv::new()?;
    env.write("orders.csv", ORDERS)?;
    env.write(
        "qualitas.yaml",
        r#"
rules:
  - name: eve_owned
    conditions: [{ type: equals, column: responsible, value: eve }]
"#,
    )?;

    env.qualitas()
        .env("QUALITAS_SENTINEL", "bob")
        .args(["assess", "orders.csv"])
        .assert()
        .success()
        .stderr(predicate::str::contains("ignored"))
        .stderr(predicate::str::contains("sentinel"))
        .stdout(predicate::str::contains("75.00"));
    Ok(())
}

#[test]
fn test_dir_discovery_and_report_file() -> Result<()> {
    let env = QualitasTestEnv::new()?;
    env.write("data/a.csv", ORDERS)?;
    env.write(
        "data/nested/b.json",
        r#"[{"responsible": "eve", "goodsQuantity": 2, "remarks": null}]"#,
    )?;
    env.write("data/notes.txt", "ignored")?;

    env.qualitas()
        .args(["assess", "--dir", "data", "--output", "out/report.json"])
        .assert()
        .success()
        .stdout(predicate::str::contains("JSON report saved"));

    let report: JsonValue =
        serde_json::from_str(&std::fs::read_to_string(env.root().join("out/report.json"))?)?;
    let names: Vec<&str> = report["outcomes"]
        .as_array()
        .map(|o| o.iter().filter_map(|x| x["name"].as_str()).collect())
        .unwrap_or_default();
    assert_eq!(names.len(), 2);
    assert!(names[0].ends_with("a.csv"));
    assert!(names[1].ends_with("b.json"));
    assert_eq!(report["overall"]["total"], 5);
    Ok(())
}

#[test]
fn test_file_inside_dir_is_assessed_once() -> Result<()> {
    let env = QualitasTestEnv::new()?;
    env.write("data/a.csv", ORDERS)?;

    let (json, output) = env.assess_json(&["data/a.csv", "./data/a.csv", "--dir", "data"])?;
    assert!(output.status.success());
    assert_eq!(json["outcomes"].as_array().map(Vec::len), Some(1));
    assert_eq!(json["overall"]["total"], 4);
    Ok(())
}

#[test]
fn test_assess_xlsx_workbook() -> Result<()> {
    let env = QualitasTestEnv::new()?;
    env.copy_fixture("orders.xlsx", "orders.xlsx")?;

    let (json, output) = env.assess_json(&["orders.xlsx", "--group-by", "order"])?;
    assert!(output.status.success());

    let dataset = &json["outcomes"][0];
    assert_eq!(dataset["summary"]["total"], 4);
    assert_eq!(dataset["summary"]["bad"], 2);
    assert_eq!(dataset["bad_rows"][0]["values"]["order"], "0042");
    assert_eq!(dataset["bad_rows"][1]["values"]["order"], "0043");

    env.qualitas()
        .args(["columns", "orders.xlsx"])
        .assert()
        .success()
        .stdout(predicate::str::contains("4 columns, 4 rows"));
    Ok(())
}

#[test]
fn test_missing_group_by_is_reported_not_fatal() -> Result<()> {
    let env = QualitasTestEnv::new()?;
    env.write("orders.csv", ORDERS)?;

    let (json, output) = env.assess_json(&["orders.csv", "--group-by", "plant"])?;
    assert!(output.status.success());
    assert_eq!(json["outcomes"][0]["status"], "assessed");
    assert_eq!(json["outcomes"][0]["summary"]["bad"], 2);
    assert_eq!(
        json["outcomes"][0]["breakdown_error"],
        "Required column(s) not found: plant"
    );

    env.qualitas()
        .args(["assess", "orders.csv", "--group-by", "plant"])
        .assert()
        .success()
        .stdout(predicate::str::contains("no breakdown"));
    Ok(())
}

#[test]
fn test_no_input_files() -> Result<()> {
    let env = QualitasTestEnv::new()?;
    env.qualitas()
        .arg("assess")
        .assert()
        .failure()
        .stderr(predicate::str::contains("No input files"));
    Ok(())
}

#[test]
fn test_show_bad_rows() -> Result<()> {
    let env = QualitasTestEnv::new()?;
    env.write("orders.csv", ORDERS)?;

    env.qualitas()
        .args(["assess", "orders.csv", "--show-bad"])
        .assert()
        .success()
        .stdout(predicate::str::contains("2 bad row(s)"))
        .stdout(predicate::str::contains("sentinel_with_goods_quantity"));
    Ok(())
}

#[test]
fn test_columns_command() -> Result<()> {
    let env = QualitasTestEnv::new()?;
    env.write("orders.csv", ORDERS)?;

    env.qualitas()
        .args(["columns", "orders.csv"])
        .assert()
        .success()
        .stdout(predicate::str::contains("3 columns, 4 rows"))
        .stdout(predicate::str::contains("goodsQuantity"));

    env.qualitas()
        .args(["columns", "orders.ods"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unsupported file format"));
    Ok(())
}

#[test]
fn test_rules_command() -> Result<()> {
    let env = QualitasTestEnv::new()?;

    env.qualitas()
        .arg("rules")
        .assert()
        .success()
        .stdout(predicate::str::contains("sentinel_with_goods_quantity"))
        .stdout(predicate::str::contains("sentinel_with_bde_remark"))
        .stdout(predicate::str::contains("responsible, goodsQuantity, remarks"));

    env.write(
        "dup.yaml",
        r#"
rules:
  - name: same
    conditions: [{ type: equals, column: a, value: x }]
  - name: same
    conditions: [{ type: equals, column: b, value: y }]
"#,
    )?;
    env.qualitas()
        .args(["rules", "--config", "dup.yaml"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid quality rules"));
    Ok(())
}
