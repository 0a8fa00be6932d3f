use anyhow::Result;
use fpl_transfer::core::TransferOutcome;
use fpl_transfer::utils::validation::Validate;
use fpl_transfer::{FplConfig, HttpFantasyApi, TransferEngine, TransferError};
use httpmock::prelude::*;
use tempfile::TempDir;

const EXPECTED_PAYLOAD: &str = r#"{"confirmed":true,"entry":7597109,"event":4,"transfers":[{"element_in":272,"element_out":233,"purchase_price":77,"selling_price":125}],"wildcard":false,"freehit":false}"#;

/// 將 mock server 位址寫入設定檔後載入
async fn load_config(server: &MockServer, request_section: &str) -> Result<(TempDir, FplConfig)> {
    let temp_dir = TempDir::new()?;
    let config_content = format!(
        r#"
[auth]
login = "manager@example.com"
password = "secret"

[endpoints]
login_url = "{}"
transfers_url = "{}"
api_base = "{}"
timeout_seconds = 5

{}
"#,
        server.url("/accounts/login/"),
        server.url("/api/transfers/"),
        server.url("/api/"),
        request_section
    );

    let config_path = temp_dir.path().join("fpl-transfer.toml");
    tokio::fs::write(&config_path, config_content).await?;
    let config = FplConfig::from_file(&config_path)?;
    config.validate()?;
    Ok((temp_dir, config))
}

const PRICED_REQUEST: &str = r#"
[request]
entry = 7597109
event = 4

[[request.transfers]]
element_in = 272
element_out = 233
purchase_price = 77
selling_price = 125
"#;

#[tokio::test]
async fn test_echoed_transfer_is_printed_verbatim() -> Result<()> {
    let server = MockServer::start();
    let (_dir, config) = load_config(&server, PRICED_REQUEST).await?;

    let login_mock = server.mock(|when, then| {
        when.method(POST)
            .path("/accounts/login/")
            .body_contains("login=manager%40example.com")
            .body_contains("password=secret")
            .body_contains("app=plfpl-web");
        then.status(200)
            .header("Set-Cookie", "sessionid=abc123; Path=/");
    });

    let transfer_mock = server.mock(|when, then| {
        when.method(POST)
            .path("/api/transfers/")
            .header("cookie", "sessionid=abc123")
            .header("content-type", "application/json; charset=UTF-8")
            .header("x-requested-with", "XMLHttpRequest")
            .header("referer", "https://fantasy.premierleague.com/a/squad/transfers")
            .body(EXPECTED_PAYLOAD);
        then.status(200)
            .header("Content-Type", "application/json")
            .body(EXPECTED_PAYLOAD);
    });

    let engine = TransferEngine::new(HttpFantasyApi::from_config(&config)?);
    let report = engine.run(&config.request, &config.auth).await?;

    login_mock.assert();
    transfer_mock.assert();

    assert_eq!(report.serialized_payload, EXPECTED_PAYLOAD);
    assert_eq!(report.response.body, report.serialized_payload);
    assert_eq!(report.lines()[2], EXPECTED_PAYLOAD);
    assert!(report.lines()[1].starts_with("TransferRequest { confirmed: true, entry: 7597109"));
    assert_eq!(
        report.outcome,
        TransferOutcome::Accepted {
            transfers: report.request.transfers.clone()
        }
    );
    Ok(())
}

#[tokio::test]
async fn test_failed_login_never_submits() -> Result<()> {
    let server = MockServer::start();
    let (_dir, config) = load_config(&server, PRICED_REQUEST).await?;
    let target = server.url("/accounts/login/?state=fail&reason=credentials");

    server.mock(|when, then| {
        when.method(POST).path("/accounts/login/");
        then.status(302).header("Location", target.as_str());
    });
    server.mock(|when, then| {
        when.method(GET).path("/accounts/login/");
        then.status(200).body("<html>login</html>");
    });
    let transfer_mock = server.mock(|when, then| {
        when.method(POST).path("/api/transfers/");
        then.status(200);
    });

    let engine = TransferEngine::new(HttpFantasyApi::from_config(&config)?);
    let result = engine.run(&config.request, &config.auth).await;

    match result {
        Err(TransferError::AuthenticationError { reason }) => assert_eq!(reason, "credentials"),
        other => panic!("expected authentication error, got {:?}", other.map(|r| r.outcome)),
    }
    transfer_mock.assert_hits(0);
    Ok(())
}

#[tokio::test]
async fn test_successful_login_redirect_then_forbidden_transfer() -> Result<()> {
    let server = MockServer::start();
    let (_dir, config) = load_config(&server, PRICED_REQUEST).await?;
    let target = server.url("/landing/?state=success");

    server.mock(|when, then| {
        when.method(POST).path("/accounts/login/");
        then.status(302).header("Location", target.as_str());
    });
    server.mock(|when, then| {
        when.method(GET).path("/landing/");
        then.status(200).body("welcome");
    });
    server.mock(|when, then| {
        when.method(POST).path("/api/transfers/");
        then.status(403)
            .header("Content-Type", "application/json")
            .body(r#"{"detail":"Authentication credentials were not provided."}"#);
    });

    let engine = TransferEngine::new(HttpFantasyApi::from_config(&config)?);
    let report = engine.run(&config.request, &config.auth).await?;

    assert_eq!(
        report.outcome,
        TransferOutcome::AuthFailure {
            reason: "Authentication credentials were not provided.".to_string()
        }
    );
    assert_eq!(
        report.response.body,
        r#"{"detail":"Authentication credentials were not provided."}"#
    );
    Ok(())
}

#[tokio::test]
async fn test_catalog_prices_and_squad_check() -> Result<()> {
    let server = MockServer::start();
    let (_dir, config) = load_config(
        &server,
        r#"
[request]
entry = 7597109
event = 4
verify_squad = true
transfers = [{ element_in = 272, element_out = 233 }]
"#,
    )
    .await?;

    let catalog_mock = server.mock(|when, then| {
        when.method(GET).path("/api/bootstrap-static/");
        then.status(200).json_body(serde_json::json!({
            "elements": [
                {"id": 1, "web_name": "Alisson", "now_cost": 60, "element_type": 1, "team": 12},
                {"id": 233, "web_name": "Salah", "now_cost": 125, "element_type": 3, "team": 11},
                {"id": 272, "web_name": "Pogba", "now_cost": 77, "element_type": 3, "team": 13}
            ]
        }));
    });
    server.mock(|when, then| {
        when.method(POST).path("/accounts/login/");
        then.status(200).header("Set-Cookie", "sessionid=abc123; Path=/");
    });
    let picks_mock = server.mock(|when, then| {
        when.method(GET).path("/api/entry/7597109/event/4/picks/");
        then.status(200).json_body(serde_json::json!({
            "picks": [{"element": 233}, {"element": 1}],
            "entry_history": {"bank": 0}
        }));
    });
    let transfer_mock = server.mock(|when, then| {
        when.method(POST).path("/api/transfers/").body(EXPECTED_PAYLOAD);
        then.status(200).body("{}");
    });

    let engine = TransferEngine::new(HttpFantasyApi::from_config(&config)?);
    let report = engine.run(&config.request, &config.auth).await?;

    catalog_mock.assert();
    picks_mock.assert();
    transfer_mock.assert();
    assert!(report.outcome.is_accepted());
    Ok(())
}

#[tokio::test]
async fn test_squad_rules_stop_wrong_position_swap() -> Result<()> {
    let server = MockServer::start();
    let (_dir, config) = load_config(
        &server,
        r#"
[request]
entry = 7597109
event = 4
verify_squad = true
transfers = [{ element_in = 500, element_out = 1, purchase_price = 50, selling_price = 60 }]
"#,
    )
    .await?;

    let catalog_mock = server.mock(|when, then| {
        when.method(GET).path("/api/bootstrap-static/");
        then.status(200).json_body(serde_json::json!({
            "elements": [
                {"id": 1, "web_name": "Alisson", "now_cost": 60, "element_type": 1, "team": 12},
                {"id": 233, "web_name": "Salah", "now_cost": 125, "element_type": 3, "team": 11},
                {"id": 500, "web_name": "Watkins", "now_cost": 50, "element_type": 4, "team": 2}
            ]
        }));
    });
    server.mock(|when, then| {
        when.method(POST).path("/accounts/login/");
        then.status(200).header("Set-Cookie", "sessionid=abc123; Path=/");
    });
    server.mock(|when, then| {
        when.method(GET).path("/api/entry/7597109/event/4/picks/");
        then.status(200).json_body(serde_json::json!({
            "picks": [{"element": 233}, {"element": 1}],
            "entry_history": {"bank": 100}
        }));
    });
    let transfer_mock = server.mock(|when, then| {
        when.method(POST).path("/api/transfers/");
        then.status(200).body("{}");
    });

    let engine = TransferEngine::new(HttpFantasyApi::from_config(&config)?);
    let result = engine.run(&config.request, &config.auth).await;

    catalog_mock.assert();
    match result {
        Err(TransferError::ValidationError { message }) => {
            assert!(message.contains("positions differ"), "{}", message)
        }
        other => panic!("expected squad validation error, got {:?}", other.map(|r| r.outcome)),
    }
    transfer_mock.assert_hits(0);
    Ok(())
}

#[tokio::test]
async fn test_rejected_transfer_keeps_reason() -> Result<()> {
    let server = MockServer::start();
    let (_dir, config) = load_config(&server, PRICED_REQUEST).await?;

    server.mock(|when, then| {
        when.method(POST).path("/accounts/login/");
        then.status(200).header("Set-Cookie", "sessionid=abc123; Path=/");
    });
    server.mock(|when, then| {
        when.method(POST).path("/api/transfers/");
        then.status(400).json_body(serde_json::json!({
            "non_form_errors": ["The deadline for this gameweek has passed."]
        }));
    });

    let engine = TransferEngine::new(HttpFantasyApi::from_config(&config)?);
    let report = engine.run(&config.request, &config.auth).await?;

    match report.outcome.into_result() {
        Err(TransferError::TransferRejected { reason }) => {
            assert_eq!(reason, "The deadline for this gameweek has passed.")
        }
        other => panic!("expected rejection, got {:?}", other),
    }
    Ok(())
}
