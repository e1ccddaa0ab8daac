//! Integration tests for snapshot loading and report delivery.
//!
//! These tests verify the complete workflow of reading a snapshot file,
//! building the report and handing every message to a notifier.

use chrono::{DateTime, TimeZone, Utc};
use fuelwatch_core::report::{char_len, label_from_metadata, MAX_MESSAGE_LEN};
use fuelwatch_core::{
    Config, CoreError, DataSource, RecordError, RecordingNotifier, SnapshotFile,
    StatusReportBuilder,
};

fn now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap()
}

fn write_snapshot(dir: &tempfile::TempDir, name: &str, content: &str) -> String {
    let path = dir.path().join(name);
    std::fs::write(&path, content).unwrap();
    path.to_string_lossy().into_owned()
}

const JSON_SNAPSHOT: &str = r##"[
    ["", "", "2024-05-01 06:00:00", "", "2024-05-01T06:00:00.000Z"],
    ["Names", null, null, null],
    ["", "Days Remaining", "", ""],
    ["Station-B", "10 days 0 hours", "2024-05-11 06:00:00", "Anchored"],
    ["", "", "", ""],
    ["Station-A", "5 days 10 hours", "2024-05-06 16:00:00", "Anchored"],
    ["Station-C", "#N/A", "", "Unanchored"]
]"##;

#[test]
fn test_json_snapshot_to_messages() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_snapshot(&dir, "snapshot.json", JSON_SNAPSHOT);

    let rows = SnapshotFile::new().fetch(&path).unwrap();
    let label = label_from_metadata(&rows).unwrap();
    assert_eq!(label, "2024-05-01T06:00:00.000Z");

    let notifier = RecordingNotifier::new();
    let summary = StatusReportBuilder::default()
        .send(&label, &rows, now(), &notifier)
        .unwrap();

    assert_eq!(summary.structures, 2);
    assert_eq!(summary.messages_sent, 1);
    assert_eq!(
        summary.skipped,
        vec![RecordError::MalformedRemaining {
            row: 7,
            name: "Station-C".into(),
            value: "#N/A".into(),
        }]
    );

    let a = now().timestamp() + 5 * 86_400 + 10 * 3_600;
    let b = now().timestamp() + 10 * 86_400;
    let expected = format!(
        "**OPTM Fuel Status Update (2024-05-01T06:00:00.000Z):**\n\n\
         __**Station-A** - expires <t:{a}:R> - <t:{a}:f>__\n\
         **Station-B** - expires <t:{b}:R> - <t:{b}:f>\n"
    );
    assert_eq!(notifier.messages(), vec![expected]);
}

#[test]
fn test_csv_snapshot_matches_json_snapshot() {
    let dir = tempfile::tempdir().unwrap();
    let csv = "\
,,2024-05-01 06:00:00,,2024-05-01T06:00:00.000Z
Names
,Days Remaining
Station-B,10 days 0 hours,2024-05-11 06:00:00,Anchored
Station-A,5 days 10 hours,2024-05-06 16:00:00,Anchored
";
    let csv_rows = SnapshotFile::new()
        .fetch(&write_snapshot(&dir, "snapshot.csv", csv))
        .unwrap();
    let json_rows = SnapshotFile::new()
        .fetch(&write_snapshot(&dir, "snapshot.json", JSON_SNAPSHOT))
        .unwrap();

    let builder = StatusReportBuilder::default();
    let from_csv = builder.render("x", &csv_rows, now()).unwrap();
    let from_json = builder.render("x", &json_rows, now()).unwrap();
    assert_eq!(from_csv.chunks, from_json.chunks);
}

#[test]
fn test_missing_snapshot_is_not_found() {
    let dir = tempfile::tempdir().unwrap();
    let missing = dir.path().join("absent.json");
    let err = SnapshotFile::new()
        .fetch(&missing.to_string_lossy())
        .unwrap_err();
    assert!(matches!(err, fuelwatch_core::SourceError::NotFound(_)));
}

#[test]
fn test_large_fleet_respects_message_limit() {
    let mut rows: Vec<Vec<String>> = vec![Vec::new(), Vec::new(), Vec::new()];
    for i in (0..250).rev() {
        rows.push(vec![
            format!("Upwell Structure {i:03} - Long Descriptive Name"),
            format!("{} days {} hours", i % 30, i % 24),
            String::new(),
            "Anchored".into(),
        ]);
    }

    let notifier = RecordingNotifier::new();
    let summary = StatusReportBuilder::default()
        .send("label", &rows, now(), &notifier)
        .unwrap();
    let messages = notifier.messages();

    assert_eq!(summary.structures, 250);
    assert_eq!(summary.messages_sent, messages.len());
    assert!(messages.len() > 1);
    assert!(messages.iter().all(|m| char_len(m) <= MAX_MESSAGE_LEN));
    assert!(messages.iter().all(|m| m.ends_with('\n')));

    let joined = messages.concat();
    let body: Vec<&str> = joined
        .lines()
        .skip(2)
        .map(|line| line.trim_matches('_'))
        .collect();
    let mut sorted = body.clone();
    sorted.sort();
    assert_eq!(body, sorted);
    assert_eq!(body.len(), 250);
}

#[test]
fn test_builder_follows_config() {
    let mut config = Config::default();
    config.set("report.title", "Home Fuel").unwrap();
    config.set("report.header_rows", "0").unwrap();
    config.set("report.urgent_days", "3").unwrap();

    let rows = vec![
        vec!["Keepstar".to_string(), "2 days 0 hours".to_string()],
        vec!["Astrahus".to_string(), "4 days 0 hours".to_string()],
    ];
    let report = StatusReportBuilder::from_config(&config.report)
        .render("now", &rows, now())
        .unwrap();

    assert_eq!(report.lines.len(), 2);
    assert_eq!(report.lines[0].record.name, "Astrahus");
    assert!(!report.lines[0].urgent);
    assert!(report.lines[1].urgent);
    assert!(report.chunks[0].starts_with("**Home Fuel (now):**\n\n"));
}

#[test]
fn test_partial_delivery_reports_failing_message() {
    let rows: Vec<Vec<String>> = std::iter::repeat_with(Vec::new)
        .take(3)
        .chain((0..100).map(|i| vec![format!("Structure {i:03}"), "1 days 0 hours".into()]))
        .collect();

    let notifier = RecordingNotifier::failing_after(1);
    let err = StatusReportBuilder::default()
        .with_max_message_len(500)
        .send("now", &rows, now(), &notifier)
        .unwrap_err();

    match err {
        CoreError::Delivery { index, total, .. } => {
            assert_eq!(index, 2);
            assert!(total > 2);
        }
        other => panic!("unexpected error: {other}"),
    }
    assert_eq!(notifier.messages().len(), 1);
}
