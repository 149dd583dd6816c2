//! End-to-end tests for the driver and trial runner
//!
//! These run real trials on May strands, so they are serialized to keep the
//! timing of one benchmark from bleeding into another.

use chanbench_core::{
    BenchConfig, ReportFormat, SchedulerConfig, run_benchmark, run_trial, scheduler_init,
};
use serial_test::serial;
use std::time::Duration;

fn run_to_string(config: &BenchConfig) -> (chanbench_core::Summary, String) {
    scheduler_init(&SchedulerConfig::default());
    let mut out = Vec::new();
    let summary = run_benchmark(config, &mut out).expect("benchmark");
    (summary, String::from_utf8(out).expect("utf-8 report"))
}

#[test]
#[serial]
fn test_ten_runs_numbered_in_order_then_one_average_block() {
    let config = BenchConfig::new()
        .with_runs(10)
        .with_duration(Duration::from_millis(5));
    let (_, text) = run_to_string(&config);

    let run_lines: Vec<&str> = text.lines().filter(|l| l.starts_with("Run #")).collect();
    let expected: Vec<String> = (1..=10).map(|i| format!("Run #{}...", i)).collect();
    assert_eq!(run_lines, expected);

    let message_lines = text
        .lines()
        .filter(|l| l.starts_with("  Messages: "))
        .count();
    assert_eq!(message_lines, 10);

    assert_eq!(
        text.matches("===== Average Results over 10 runs =====")
            .count(),
        1
    );
    assert_eq!(text.matches("Average Messages: ").count(), 1);

    // The footer comes after the last run
    let last_run = text.find("Run #10...").expect("last run line");
    let footer = text.find("=====").expect("footer");
    assert!(footer > last_run);
}

#[test]
#[serial]
fn test_footer_average_is_truncated_mean_of_runs() {
    let config = BenchConfig::new()
        .with_runs(10)
        .with_duration(Duration::from_millis(3));
    let (summary, text) = run_to_string(&config);

    let counts: Vec<u64> = text
        .lines()
        .filter_map(|l| l.strip_prefix("  Messages: "))
        .map(|rest| {
            rest.split(',')
                .next()
                .and_then(|n| n.parse().ok())
                .expect("message count")
        })
        .collect();
    assert_eq!(counts.len(), 10);

    let expected = counts.iter().sum::<u64>() / 10;
    assert_eq!(summary.average_messages(), expected);
    assert!(text.contains(&format!("Average Messages: {}\n", expected)));
}

#[test]
#[serial]
fn test_zero_duration_runs_count_only_sentinel() {
    let config = BenchConfig::new()
        .with_runs(3)
        .with_duration(Duration::ZERO);
    let (summary, text) = run_to_string(&config);

    assert!(summary.trials.iter().all(|t| t.messages == 1));
    assert_eq!(summary.average_messages(), 1);
    assert!(text.contains("Average Messages: 1\n"));
}

#[test]
#[serial]
fn test_json_format_emits_single_document() {
    let config = BenchConfig::new()
        .with_runs(2)
        .with_duration(Duration::from_millis(2))
        .with_format(ReportFormat::Json);
    let (summary, text) = run_to_string(&config);

    assert!(!text.contains("Run #"));
    let value: serde_json::Value = serde_json::from_str(&text).expect("json report");
    assert_eq!(value["runs"], 2);
    assert_eq!(value["trials"].as_array().map(Vec::len), Some(2));
    assert_eq!(value["average"]["messages"], summary.average_messages());
}

#[test]
#[serial]
fn test_repeated_trials_count_consistently() {
    scheduler_init(&SchedulerConfig::default());
    for _ in 0..5 {
        let result = run_trial(Duration::ZERO).expect("trial");
        assert_eq!(result.messages, 1);
    }
}

#[test]
#[serial]
#[ignore = "machine dependent: needs >= 100k round trips per second"]
fn test_one_second_trial_throughput() {
    scheduler_init(&SchedulerConfig::default());
    let result = run_trial(Duration::from_secs(1)).expect("trial");

    assert!((100_000..=10_000_000).contains(&result.messages));
    assert!(result.send_latency_us > 0.0);
    assert!(result.receive_latency_us > 0.0);
}
