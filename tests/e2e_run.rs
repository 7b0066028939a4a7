mod support;

use std::fs;

use serde_json::Value;
use tempfile::tempdir;

use support::run_uriload;
use support::spawn_http_server;

const BODY: &[u8] = b"0123456789abcdef";

fn parse_report(output: &std::process::Output) -> Result<Value, String> {
    if !output.status.success() {
        return Err(format!(
            "stdout: {}\nstderr: {}",
            String::from_utf8_lossy(&output.stdout),
            String::from_utf8_lossy(&output.stderr)
        ));
    }
    serde_json::from_slice(&output.stdout)
        .map_err(|err| format!("stdout was not a JSON report: {}", err))
}

fn field_u64(report: &Value, name: &str) -> Result<u64, String> {
    report
        .get(name)
        .and_then(Value::as_u64)
        .ok_or_else(|| format!("report field {} missing or not an integer", name))
}

#[test]
fn e2e_reports_clean_run() -> Result<(), String> {
    let (url, _server) = spawn_http_server("200 OK", BODY)?;

    let output = run_uriload(["-u", url.as_str(), "-n", "20", "-c", "4"])?;
    let report = parse_report(&output)?;

    if field_u64(&report, "failed_requests")? != 0 {
        return Err("expected a clean run against a healthy server".to_owned());
    }
    if field_u64(&report, "total_content_bytes_transferred")? != 320 {
        return Err("expected 20 bodies of 16 bytes each".to_owned());
    }
    if field_u64(&report, "cancelled_requests")? != 0 {
        return Err("nothing should be cancelled".to_owned());
    }
    if report.get("total_time").and_then(Value::as_f64).is_none() {
        return Err("total_time missing from the report".to_owned());
    }
    if report.get("requests_per_second").and_then(Value::as_f64).is_none() {
        return Err("requests_per_second missing from the report".to_owned());
    }
    if report.get("p99_latency_ms").and_then(Value::as_u64).is_none() {
        return Err("latency fields missing from the report".to_owned());
    }
    Ok(())
}

#[test]
fn e2e_counts_error_statuses() -> Result<(), String> {
    let (url, _server) = spawn_http_server("500 Internal Server Error", b"nope")?;

    let output = run_uriload(["-u", url.as_str(), "-n", "10", "-c", "2"])?;
    let report = parse_report(&output)?;

    if field_u64(&report, "failed_requests")? != 10 {
        return Err("every 500 response should count as failed".to_owned());
    }
    if field_u64(&report, "total_bytes_transferred")? != 40 {
        return Err("error bodies still count toward transferred bytes".to_owned());
    }
    Ok(())
}

#[test]
fn e2e_config_file_supplies_defaults() -> Result<(), String> {
    let (url, _server) = spawn_http_server("200 OK", BODY)?;
    let dir = tempdir().map_err(|err| format!("tempdir failed: {}", err))?;

    let config_path = dir.path().join("uriload.toml");
    let config = format!(
        r#"url = "{url}"
requests = 8
workers = 2
keepalive = true
"#
    );
    fs::write(&config_path, config).map_err(|err| format!("write config failed: {}", err))?;
    let config_arg = config_path.to_string_lossy().into_owned();

    let output = run_uriload(["--config", config_arg.as_str()])?;
    let report = parse_report(&output)?;
    if field_u64(&report, "total_content_bytes_transferred")? != 128 {
        return Err("the config file should drive the request count".to_owned());
    }

    let override_output = run_uriload(["--config", config_arg.as_str(), "-n", "3"])?;
    let override_report = parse_report(&override_output)?;
    if field_u64(&override_report, "total_content_bytes_transferred")? != 48 {
        return Err("explicit CLI flags should win over the config file".to_owned());
    }
    Ok(())
}

#[test]
fn e2e_missing_url_fails_fast() -> Result<(), String> {
    let output = run_uriload(["-n", "5"])?;
    if output.status.success() {
        return Err("a run without a URL should fail before any request".to_owned());
    }
    Ok(())
}

#[test]
fn e2e_bare_invocation_prints_help() -> Result<(), String> {
    let output = run_uriload(Vec::<&str>::new())?;
    if !output.status.success() {
        return Err("bare invocation should print help and exit cleanly".to_owned());
    }
    let stdout = String::from_utf8_lossy(&output.stdout);
    if !stdout.contains("Usage") {
        return Err(format!("expected help text on stdout, got: {}", stdout));
    }
    Ok(())
}
