//! # Batch Generation Tests
//!
//! End-to-end tests for the orchestrator: labels and payload normalization,
//! output file naming, history bookkeeping, determinism across runs, and the
//! abort-on-first-error failure policy.

use std::fs;
use std::path::Path;
use std::sync::mpsc;

use placard::color::DEFAULT_PALETTE;
use placard::template::TextSettings;
use placard::{GenerationJob, JobEvent, JobSpec, JobState, OutputFormat, Store};

fn spec_for(dir: &Path, input: &str) -> JobSpec {
    fs::write(dir.join("input.txt"), input).unwrap();
    JobSpec {
        input_file: dir.join("input.txt"),
        output_dir: dir.join("out"),
        template_id: 8,
        custom_templates: Vec::new(),
        palette: DEFAULT_PALETTE,
        text: TextSettings::default(),
        logo: None,
        format: OutputFormat::Png,
        scale: 2,
        border: 1,
    }
}

fn run(spec: JobSpec, store_dir: &Path) -> (JobState, Vec<JobEvent>) {
    let store = Store::new(store_dir);
    let (tx, rx) = mpsc::channel();
    let mut job = GenerationJob::new(spec);
    job.run(&store, &tx);
    drop(tx);
    (job.state(), rx.iter().collect())
}

#[test]
fn recognized_prefixes_keep_payloads_and_labels_count_up() {
    let dir = tempfile::tempdir().unwrap();
    let spec = spec_for(dir.path(), "https://a.example\nWIFI:T:WPA;S:net;P:pw;;\n");
    let (state, _) = run(spec, dir.path());
    assert_eq!(state, JobState::Completed);

    // Labels derive from the prefix and 1-based index.
    let out = dir.path().join("out");
    assert!(out.join("Sunrise Spotlight_VPN 1.png").is_file());
    assert!(out.join("Sunrise Spotlight_VPN 2.png").is_file());

    // The manifest records each payload verbatim: both lines already carry a
    // recognized prefix so neither is rewritten.
    let manifest = fs::read_to_string(out.join("formatted_links.txt")).unwrap();
    assert!(manifest.contains("VPN 1\n`https://a.example`"));
    assert!(manifest.contains("VPN 2\n`WIFI:T:WPA;S:net;P:pw;;`"));
}

#[test]
fn bare_host_normalized_before_encoding() {
    // The classification itself is unit-tested in encode; here we check the
    // batch path accepts bare hosts end to end.
    let dir = tempfile::tempdir().unwrap();
    let spec = spec_for(dir.path(), "example.com\n");
    let (state, _) = run(spec, dir.path());
    assert_eq!(state, JobState::Completed);
    assert_eq!(placard::encode::normalize("example.com"), "https://example.com");
}

#[test]
fn successful_run_appends_one_history_record() {
    let dir = tempfile::tempdir().unwrap();
    let store = Store::new(dir.path());
    assert!(store.load_history().is_empty());

    let spec = spec_for(dir.path(), "a.example\nb.example\nc.example\n");
    let (state, events) = run(spec, dir.path());
    assert_eq!(state, JobState::Completed);

    let history = store.load_history();
    assert_eq!(history.len(), 1);
    assert_eq!(history[0].count, 3);
    assert_eq!(history[0].template, "Sunrise Spotlight");

    // The completion message carries the output directory and count.
    let Some(JobEvent::Finished { success, message }) = events.last() else {
        panic!("expected terminal event");
    };
    assert!(success);
    assert!(message.contains('3'));
    assert!(message.contains("out"));
}

#[test]
fn failing_record_aborts_job_keeps_prior_output_no_history() {
    let dir = tempfile::tempdir().unwrap();
    // Record 2 exceeds level-H QR capacity, so encoding it fails.
    let oversized = "x".repeat(8000);
    let input = format!("a.example\n{}\nc.example\n", oversized);
    let spec = spec_for(dir.path(), &input);
    let (state, events) = run(spec, dir.path());

    assert_eq!(state, JobState::Failed);
    let Some(JobEvent::Finished { success, .. }) = events.last() else {
        panic!("expected terminal event");
    };
    assert!(!success);

    // Record 1's file was written and is not rolled back; record 3 never ran.
    let out = dir.path().join("out");
    assert!(out.join("Sunrise Spotlight_VPN 1.png").is_file());
    assert!(!out.join("Sunrise Spotlight_VPN 3.png").exists());

    // No history entry for a failed job.
    assert!(Store::new(dir.path()).load_history().is_empty());
}

#[test]
fn identical_inputs_produce_identical_filenames_across_runs() {
    let dir = tempfile::tempdir().unwrap();
    let input = "a.example\nb.example\n";

    let list_outputs = |out: &Path| {
        let mut names: Vec<String> = fs::read_dir(out)
            .unwrap()
            .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
            .collect();
        names.sort();
        names
    };

    let (state, _) = run(spec_for(dir.path(), input), dir.path());
    assert_eq!(state, JobState::Completed);
    let first = list_outputs(&dir.path().join("out"));

    let (state, _) = run(spec_for(dir.path(), input), dir.path());
    assert_eq!(state, JobState::Completed);
    let second = list_outputs(&dir.path().join("out"));

    assert_eq!(first, second);
    // One history record per run.
    assert_eq!(Store::new(dir.path()).load_history().len(), 2);
}

#[test]
fn repeated_labels_overwrite_not_version() {
    let dir = tempfile::tempdir().unwrap();
    let spec = spec_for(dir.path(), "a.example\n");
    run(spec, dir.path());
    let out = dir.path().join("out");
    let count_before = fs::read_dir(&out).unwrap().count();

    let spec = spec_for(dir.path(), "a.example\n");
    run(spec, dir.path());
    assert_eq!(fs::read_dir(&out).unwrap().count(), count_before);
}

#[test]
fn custom_template_resolves_in_batch() {
    let dir = tempfile::tempdir().unwrap();
    let store = Store::new(dir.path());
    let id = store
        .add_template(
            "Plain Banner",
            "flat background",
            "fn render(ctx) { #{ margin_x: 80, margin_y: 120, background: \"flat\" } }",
        )
        .unwrap();

    let mut spec = spec_for(dir.path(), "a.example\n");
    spec.template_id = id;
    spec.custom_templates = store.load_templates();
    let (state, _) = run(spec, dir.path());
    assert_eq!(state, JobState::Completed);
    assert!(dir
        .path()
        .join("out")
        .join("Plain Banner_VPN 1.png")
        .is_file());
}
