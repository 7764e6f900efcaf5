// ============================================================================
// Tests d'intégration : exécution complète avec un faux fournisseur
// ============================================================================

use std::io::Write;
use std::sync::atomic::{AtomicUsize, Ordering};

use serde_json::{json, Value};

use peratio::api::provider::InfoFuture;
use peratio::api::InfoProvider;
use peratio::app::{run, RunOptions};
use peratio::error::{FetchError, LoadError};
use peratio::models::TickerInfoRecord;

/// Fournisseur en mémoire qui compte ses appels
struct MockProvider {
    response: Result<Value, String>,
    calls: AtomicUsize,
}

impl MockProvider {
    fn returning(value: Value) -> Self {
        Self {
            response: Ok(value),
            calls: AtomicUsize::new(0),
        }
    }

    fn failing(message: &str) -> Self {
        Self {
            response: Err(message.to_string()),
            calls: AtomicUsize::new(0),
        }
    }
}

impl InfoProvider for MockProvider {
    fn name(&self) -> &str {
        "mock"
    }

    fn ticker_info<'a>(&'a self, symbol: &'a str) -> InfoFuture<'a> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let result = match &self.response {
            Ok(value) => TickerInfoRecord::from_json(symbol, value.clone()),
            Err(message) => Err(FetchError::Network(message.clone())),
        };
        Box::pin(async move { result })
    }
}

fn fixture_csv() -> tempfile::NamedTempFile {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    write!(
        file,
        "Date,Open,High,Low,Close,Adj Close,Volume\n\
         2020-01-02,296.24,300.60,295.19,300.35,298.83,33870100\n\
         2020-01-03,297.15,300.58,296.50,297.43,295.92,36580700\n"
    )
    .unwrap();
    file
}

fn options(csv: &tempfile::NamedTempFile, allow_missing: bool) -> RunOptions {
    RunOptions {
        csv_path: csv.path().to_path_buf(),
        symbol: "aapl".to_string(),
        allow_missing,
    }
}

#[tokio::test]
async fn prints_trailing_pe_from_provider() {
    let csv = fixture_csv();
    let provider = MockProvider::returning(json!({"trailingPE": 28.5}));
    let mut out = Vec::new();

    run(&options(&csv, false), &provider, &mut out).await.unwrap();

    assert_eq!(String::from_utf8(out).unwrap(), "28.5\n");
    assert_eq!(provider.calls.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn missing_trailing_pe_key_fails_by_default() {
    let csv = fixture_csv();
    let provider = MockProvider::returning(json!({"forwardPE": 1.0}));
    let mut out = Vec::new();

    let err = run(&options(&csv, false), &provider, &mut out).await.unwrap_err();

    assert!(matches!(
        err.downcast_ref::<FetchError>(),
        Some(FetchError::MissingField(_))
    ));
    assert!(out.is_empty());
}

#[tokio::test]
async fn null_trailing_pe_prints_na() {
    let csv = fixture_csv();
    let provider = MockProvider::returning(json!({"trailingPE": null}));
    let mut out = Vec::new();

    run(&options(&csv, false), &provider, &mut out).await.unwrap();

    assert_eq!(String::from_utf8(out).unwrap(), "N/A\n");
}

#[tokio::test]
async fn allow_missing_prints_na_when_key_absent() {
    let csv = fixture_csv();
    let provider = MockProvider::returning(json!({"forwardPE": -4.2}));
    let mut out = Vec::new();

    run(&options(&csv, true), &provider, &mut out).await.unwrap();

    assert_eq!(String::from_utf8(out).unwrap(), "N/A\n");
}

#[tokio::test]
async fn integral_ratio_keeps_decimal_point() {
    let csv = fixture_csv();
    let provider = MockProvider::returning(json!({"trailingPE": 30.0}));
    let mut out = Vec::new();

    run(&options(&csv, false), &provider, &mut out).await.unwrap();

    assert_eq!(String::from_utf8(out).unwrap(), "30.0\n");
}

#[tokio::test]
async fn missing_csv_aborts_before_fetch() {
    let dir = tempfile::tempdir().unwrap();
    let provider = MockProvider::returning(json!({"trailingPE": 28.5}));
    let options = RunOptions {
        csv_path: dir.path().join("AAPL.csv"),
        symbol: "aapl".to_string(),
        allow_missing: false,
    };
    let mut out = Vec::new();

    let err = run(&options, &provider, &mut out).await.unwrap_err();

    assert!(matches!(
        err.downcast_ref::<LoadError>(),
        Some(LoadError::FileNotFound(_))
    ));
    assert_eq!(provider.calls.load(Ordering::SeqCst), 0);
    assert!(out.is_empty());
}

#[tokio::test]
async fn network_failure_is_attempted_once() {
    let csv = fixture_csv();
    let provider = MockProvider::failing("connection refused");
    let mut out = Vec::new();

    let err = run(&options(&csv, false), &provider, &mut out).await.unwrap_err();

    assert!(err
        .downcast_ref::<FetchError>()
        .map(FetchError::is_network)
        .unwrap_or(false));
    assert_eq!(provider.calls.load(Ordering::SeqCst), 1);
}
