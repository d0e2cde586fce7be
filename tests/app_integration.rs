use raisekit::core::PitchStore;
use raisekit::store::disk::DiskPitchStore;
use std::fs;
use std::path::Path;
use tempfile::TempDir;
use wiremock::matchers::{body_partial_json, method, path};
use wiremock::{Mock, ResponseTemplate};

mod test_utils {
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    pub async fn create_mock_backend(routes: &[(&str, &str)]) -> MockServer {
        let mock_server = MockServer::start().await;

        for (route, body) in routes {
            Mock::given(method("POST"))
                .and(path(*route))
                .respond_with(ResponseTemplate::new(200).set_body_string(*body))
                .mount(&mock_server)
                .await;
        }

        mock_server
    }
}

const PITCH_RESPONSE: &str = r#"{
    "problem": {"text": "Freelancers lose hours to bookkeeping", "confidence": 0.9},
    "solution": {"text": "Automatic categorization and tax estimates"},
    "business_model": {"text": "Monthly subscription"}
}"#;

fn write_config(dir: &Path, base_url: &str) -> String {
    let config_path = dir.join("config.yaml");
    let config_content = format!(
        r#"
backend:
  base_url: {base_url}
  timeout_secs: 5
  retries: 0
data_path: {data_path}
profile:
  company_name: "Ledgerly"
  stage: "Seed"
  industry: "Fintech"
  location: "New York"
  founded_date: "2021-04-01"
  description: "Bookkeeping for freelancers"
"#,
        data_path = dir.join("data").display()
    );
    fs::write(&config_path, config_content).expect("Failed to write config file");
    config_path.to_string_lossy().to_string()
}

async fn stored_pitch(dir: &Path) -> raisekit::core::PitchData {
    let store = DiskPitchStore::open(&dir.join("data").join("store")).expect("open store");
    store.load().await.expect("load pitch")
}

#[test_log::test(tokio::test)]
async fn test_generate_then_show_and_export() {
    let mock_server = test_utils::create_mock_backend(&[("/api/pitch", PITCH_RESPONSE)]).await;
    let dir = TempDir::new().unwrap();
    let config_path = write_config(dir.path(), &mock_server.uri());

    raisekit::run_command(raisekit::AppCommand::Generate, Some(&config_path))
        .await
        .expect("generate failed");

    let pitch = stored_pitch(dir.path()).await;
    let keys: Vec<_> = pitch.keys().collect();
    assert_eq!(keys, vec!["problem", "solution", "business_model"]);

    raisekit::run_command(raisekit::AppCommand::Show, Some(&config_path))
        .await
        .expect("show failed");

    let output = dir.path().join("pitch.md");
    raisekit::run_command(
        raisekit::AppCommand::Export {
            output: output.clone(),
        },
        Some(&config_path),
    )
    .await
    .expect("export failed");

    let markdown = fs::read_to_string(&output).unwrap();
    assert!(markdown.starts_with("# Ledgerly"));
    assert!(markdown.contains("## Business Model\n\nMonthly subscription"));
}

#[test_log::test(tokio::test)]
async fn test_improve_merges_under_resolved_key() {
    let mock_server = test_utils::create_mock_backend(&[
        ("/api/pitch", PITCH_RESPONSE),
        (
            "/api/pitch/improve",
            r#"{"revenue_model": {"text": "Tiered subscription with an annual plan", "original": "Monthly subscription"}}"#,
        ),
    ])
    .await;
    let dir = TempDir::new().unwrap();
    let config_path = write_config(dir.path(), &mock_server.uri());

    raisekit::run_command(raisekit::AppCommand::Generate, Some(&config_path))
        .await
        .expect("generate failed");

    raisekit::run_command(
        raisekit::AppCommand::Improve {
            section: "model".to_string(),
            feedback: "mention annual pricing".to_string(),
        },
        Some(&config_path),
    )
    .await
    .expect("improve failed");

    let pitch = stored_pitch(dir.path()).await;
    assert_eq!(
        pitch.get("revenue_model").unwrap().text,
        "Tiered subscription with an annual plan"
    );
    assert_eq!(pitch.get("business_model").unwrap().text, "Monthly subscription");
    assert!(!pitch.contains_key("model"));
}

#[test_log::test(tokio::test)]
async fn test_improve_reports_missing_section() {
    let mock_server = test_utils::create_mock_backend(&[("/api/pitch/improve", "{}")]).await;
    let dir = TempDir::new().unwrap();
    let config_path = write_config(dir.path(), &mock_server.uri());

    let result = raisekit::run_command(
        raisekit::AppCommand::Improve {
            section: "team".to_string(),
            feedback: "add bios".to_string(),
        },
        Some(&config_path),
    )
    .await;

    let err = result.expect_err("improve should fail");
    assert!(
        err.to_string()
            .contains("Could not locate the requested section"),
        "{err}"
    );
}

#[test_log::test(tokio::test)]
async fn test_investors_and_email() {
    let mock_server = test_utils::create_mock_backend(&[(
        "/api/investors/match",
        r#"{"investors": [
            {"name": "Jane Doe", "firm": "Acme Ventures", "match_score": 0.72, "sectors": ["Fintech"]},
            {"name": "John Roe", "firm": "Beta Capital", "match_score": 0.91}
        ]}"#,
    )])
    .await;
    // One draft per investor, each carrying the requested tone
    Mock::given(method("POST"))
        .and(path("/api/email"))
        .and(body_partial_json(serde_json::json!({
            "profile": {"company_name": "Ledgerly"},
            "tone": "warm"
        })))
        .respond_with(ResponseTemplate::new(200).set_body_string(
            r#"{"subject": "Ledgerly: bookkeeping for freelancers", "body": "Hi,\n\nWe are raising a seed round."}"#,
        ))
        .expect(2)
        .mount(&mock_server)
        .await;
    let dir = TempDir::new().unwrap();
    let config_path = write_config(dir.path(), &mock_server.uri());

    raisekit::run_command(raisekit::AppCommand::Investors, Some(&config_path))
        .await
        .expect("investors failed");

    raisekit::run_command(
        raisekit::AppCommand::Email {
            investors: vec!["Jane Doe".to_string(), "John Roe".to_string()],
            firm: None,
            tone: Some("warm".to_string()),
        },
        Some(&config_path),
    )
    .await
    .expect("email failed");

    let requests = mock_server.received_requests().await.unwrap();
    let mut drafted: Vec<String> = requests
        .iter()
        .filter(|r| r.url.path() == "/api/email")
        .map(|r| {
            let body: serde_json::Value = serde_json::from_slice(&r.body).unwrap();
            body["investor_name"].as_str().unwrap().to_string()
        })
        .collect();
    drafted.sort();
    assert_eq!(drafted, vec!["Jane Doe", "John Roe"]);
    mock_server.verify().await;
}

#[test_log::test(tokio::test)]
async fn test_backend_failure_is_reported() {
    let mock_server = wiremock::MockServer::start().await;
    let dir = TempDir::new().unwrap();
    let config_path = write_config(dir.path(), &mock_server.uri());

    // No routes mounted, wiremock answers 404
    let result = raisekit::run_command(raisekit::AppCommand::Generate, Some(&config_path)).await;
    let err = result.expect_err("generate should fail");
    assert!(format!("{err:#}").contains("404"), "{err:#}");
    assert!(stored_pitch(dir.path()).await.is_empty());
}

#[test_log::test(tokio::test)]
async fn test_valuation_from_profile() {
    let dir = TempDir::new().unwrap();
    let config_path = write_config(dir.path(), "http://127.0.0.1:9");

    let options = raisekit::cli::valuation::ValuationOptions {
        as_of: Some("2024-01-01".to_string()),
        json: true,
        ..Default::default()
    };

    let config = raisekit::core::config::AppConfig::load_from_path(&config_path).unwrap();
    let (input, result) = raisekit::cli::valuation::estimate(&config, &options).unwrap();
    assert_eq!(input.stage, "Seed");
    assert_eq!(input.location, "New York");
    assert_eq!(result.age_years, 2);
    assert!(!result.age_assumed);
    assert_eq!(result.age_multiplier, 1.0);
    assert_eq!(result.low, 7.8);
    assert_eq!(result.high, 23.4);

    raisekit::run_command(raisekit::AppCommand::Valuation(options), Some(&config_path))
        .await
        .expect("valuation failed");
}

#[test_log::test(tokio::test)]
async fn test_generate_fails_when_data_path_is_unusable() {
    let mock_server = test_utils::create_mock_backend(&[("/api/pitch", PITCH_RESPONSE)]).await;
    let dir = TempDir::new().unwrap();
    let config_path = write_config(dir.path(), &mock_server.uri());
    fs::write(dir.path().join("data"), "not a directory").unwrap();

    let result = raisekit::run_command(raisekit::AppCommand::Generate, Some(&config_path)).await;
    let err = result.expect_err("generate should not fall back to memory");
    assert!(
        format!("{err:#}").contains("Failed to open pitch store"),
        "{err:#}"
    );

    let result = raisekit::run_command(
        raisekit::AppCommand::Improve {
            section: "problem".to_string(),
            feedback: "shorter".to_string(),
        },
        Some(&config_path),
    )
    .await;
    assert!(result.is_err());
    assert!(mock_server.received_requests().await.unwrap().is_empty());
}

#[test_log::test(tokio::test)]
async fn test_missing_config_file_is_an_error() {
    let dir = TempDir::new().unwrap();
    let missing = dir.path().join("missing.yaml");

    let result =
        raisekit::run_command(raisekit::AppCommand::Show, Some(missing.to_str().unwrap())).await;
    assert!(result.is_err());
}
