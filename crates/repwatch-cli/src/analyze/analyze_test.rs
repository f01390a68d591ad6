use std::io::Write;

use chrono::TimeZone;

use super::*;

fn now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 4, 1, 12, 0, 0).unwrap()
}

fn options(product: Option<&str>) -> AnalyzeOptions {
    AnalyzeOptions {
        input: PathBuf::from("mentions.json"),
        product: product.map(ToString::to_string),
        previous_score: None,
        window: None,
        format: OutputFormat::Json,
        generated_at: now(),
    }
}

const EXPORT: &str = r#"[
  {
    "id": "1",
    "product_id": "acme",
    "platform": "google_play",
    "sentiment": "negative",
    "intent": "complaint",
    "priority": "high",
    "confidence_score": 0.9,
    "topics": ["Crash"],
    "original_date": "2026-03-30T10:00:00Z"
  },
  {
    "id": "2",
    "product_id": "globex",
    "platform": "reddit",
    "timestamp": "2026-03-31T10:00:00Z"
  },
  {
    "id": "3",
    "product_id": "acme",
    "platform": "trustpilot",
    "sentiment": "positive",
    "intent": "recommendation",
    "priority": "low",
    "confidence": 1.0,
    "timestamp": "2026-03-31T11:00:00Z"
  }
]"#;

#[test]
fn parses_bare_array_and_wrapped_object() {
    let bare = parse_mentions(EXPORT).unwrap();
    assert_eq!(bare.len(), 3);

    let wrapped = parse_mentions(&format!(r#"{{ "mentions": {EXPORT} }}"#)).unwrap();
    assert_eq!(wrapped.len(), 3);
    assert_eq!(wrapped[0].confidence, Some(0.9));
}

#[test]
fn rejects_other_shapes() {
    assert!(parse_mentions(r#"{ "items": [] }"#).is_err());
    assert!(parse_mentions("not json").is_err());
}

#[test]
fn groups_requests_by_product_in_id_order() {
    let mentions = repwatch_engine::validate_mentions(parse_mentions(EXPORT).unwrap()).unwrap();
    let requests = build_requests(mentions, &options(None));
    let products: Vec<&str> = requests.iter().map(|r| r.product_id.as_str()).collect();
    assert_eq!(products, vec!["acme", "globex"]);
    assert_eq!(requests[0].mentions.len(), 2);
}

#[test]
fn product_filter_keeps_only_that_product() {
    let mentions = repwatch_engine::validate_mentions(parse_mentions(EXPORT).unwrap()).unwrap();
    let requests = build_requests(mentions, &options(Some("globex")));
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].product_id, "globex");
}

#[test]
fn filtered_product_without_mentions_still_gets_a_request() {
    let requests = build_requests(Vec::new(), &options(Some("initech")));
    assert_eq!(requests.len(), 1);
    assert!(requests[0].mentions.is_empty());
}

#[test]
fn no_window_unless_requested() {
    assert!(resolve_window(None, None, 30, now()).unwrap().is_none());
}

#[test]
fn window_days_alone_ends_now() {
    let window = resolve_window(Some(7), None, 30, now()).unwrap().unwrap();
    assert_eq!(window.end(), now());
    assert_eq!(window.days(), 7);
}

#[test]
fn as_of_alone_uses_configured_days() {
    let as_of = Utc.with_ymd_and_hms(2026, 1, 31, 0, 0, 0).unwrap();
    let window = resolve_window(None, Some(as_of), 30, now()).unwrap().unwrap();
    assert_eq!(window.end(), as_of);
    assert_eq!(window.days(), 30);
}

#[test]
fn zero_day_window_is_an_error() {
    assert!(resolve_window(Some(0), None, 30, now()).is_err());
}

#[tokio::test]
async fn run_analyze_reads_export_from_disk() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(EXPORT.as_bytes()).unwrap();

    let mut opts = options(None);
    opts.input = file.path().to_path_buf();
    run_analyze(&opts, &ScoringConfig::default()).await.unwrap();
}

#[tokio::test]
async fn run_analyze_fails_on_invalid_mention() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(
        br#"[{ "id": "x", "product_id": "acme", "platform": "myspace",
               "timestamp": "2026-03-31T10:00:00Z" }]"#,
    )
    .unwrap();

    let mut opts = options(None);
    opts.input = file.path().to_path_buf();
    let err = run_analyze(&opts, &ScoringConfig::default())
        .await
        .unwrap_err();
    assert!(format!("{err:#}").contains("myspace"), "{err:#}");
}

#[tokio::test]
async fn run_analyze_reports_missing_file() {
    let mut opts = options(None);
    opts.input = PathBuf::from("/nonexistent/repwatch/mentions.json");
    let err = run_analyze(&opts, &ScoringConfig::default())
        .await
        .unwrap_err();
    assert!(err.to_string().contains("failed to read mention file"));
}
