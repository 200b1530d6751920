//! # Batch Generation Orchestrator
//!
//! Drives the card composition engine across a full input record set on one
//! background worker thread. The loop is strictly sequential; progress and
//! the single terminal outcome are delivered over a fire-and-forget channel.
//!
//! Failure policy: the first per-record error aborts the whole job. Output
//! files already written stay on disk (no rollback) and no history record is
//! appended. This matches the long-standing behavior; do not quietly change
//! it to skip-and-continue.

use std::fs::{self, File};
use std::io::Write;
use std::path::PathBuf;
use std::str::FromStr;
use std::sync::mpsc::Sender;
use std::thread::{self, JoinHandle};

use chrono::Local;
use image::{DynamicImage, ImageFormat, RgbaImage};

use crate::color::Palette;
use crate::encode;
use crate::error::PlacardError;
use crate::store::{HistoryRecord, Store};
use crate::template::{self, CustomTemplateDef, TextSettings};

/// Raster container formats for the output files.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Png,
    Jpeg,
    Webp,
}

impl OutputFormat {
    pub fn ext(self) -> &'static str {
        match self {
            OutputFormat::Png => "png",
            OutputFormat::Jpeg => "jpg",
            OutputFormat::Webp => "webp",
        }
    }
}

impl FromStr for OutputFormat {
    type Err = PlacardError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "png" => Ok(OutputFormat::Png),
            "jpg" | "jpeg" => Ok(OutputFormat::Jpeg),
            "webp" => Ok(OutputFormat::Webp),
            other => Err(PlacardError::Validation(format!(
                "Unknown output format '{}'",
                other
            ))),
        }
    }
}

/// Everything a run needs, snapshotted before the worker starts so the
/// foreground never shares live state with it.
#[derive(Debug, Clone)]
pub struct JobSpec {
    pub input_file: PathBuf,
    pub output_dir: PathBuf,
    pub template_id: u32,
    pub custom_templates: Vec<CustomTemplateDef>,
    pub palette: Palette,
    pub text: TextSettings,
    pub logo: Option<PathBuf>,
    pub format: OutputFormat,
    pub scale: u32,
    pub border: u32,
}

/// Lifecycle of one job. There is no cancelled state; a started job runs to
/// completion or failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JobState {
    Idle,
    Running,
    Completed,
    Failed,
}

/// Events delivered from the worker. Sends are fire-and-forget; a dropped
/// receiver never blocks or fails the run.
#[derive(Debug, Clone)]
pub enum JobEvent {
    /// Percentage 0-100, monotonically non-decreasing within one job.
    Progress(u8),
    /// Exactly one terminal event per job.
    Finished { success: bool, message: String },
}

/// Transient state of one orchestrator run.
pub struct GenerationJob {
    spec: JobSpec,
    state: JobState,
}

impl GenerationJob {
    pub fn new(spec: JobSpec) -> Self {
        Self { spec, state: JobState::Idle }
    }

    pub fn state(&self) -> JobState {
        self.state
    }

    /// Run the whole batch synchronously, emitting events on `events`.
    pub fn run(&mut self, store: &Store, events: &Sender<JobEvent>) {
        self.state = JobState::Running;
        match self.execute(store, events) {
            Ok(count) => {
                self.state = JobState::Completed;
                let _ = events.send(JobEvent::Finished {
                    success: true,
                    message: format!(
                        "Generated {} QR codes successfully!\n\nPath: {}",
                        count,
                        self.spec.output_dir.display()
                    ),
                });
            }
            Err(e) => {
                self.state = JobState::Failed;
                let _ = events.send(JobEvent::Finished {
                    success: false,
                    message: format!("Failed to generate QR codes:\n{}", e),
                });
            }
        }
    }

    fn execute(&self, store: &Store, events: &Sender<JobEvent>) -> Result<usize, PlacardError> {
        let spec = &self.spec;

        // Validation happens before any output is produced.
        if !spec.input_file.is_file() {
            return Err(PlacardError::Validation(
                "Input file does not exist".to_string(),
            ));
        }
        let raw = fs::read_to_string(&spec.input_file)?;
        let records: Vec<&str> = raw.lines().map(str::trim).filter(|l| !l.is_empty()).collect();
        if records.is_empty() {
            return Err(PlacardError::Validation("Input file is empty".to_string()));
        }
        let total = records.len();

        fs::create_dir_all(&spec.output_dir)?;

        // Resolved once; shared read-only for the whole job.
        let template = template::resolve(spec.template_id, &spec.custom_templates)?;

        let _ = events.send(JobEvent::Progress(0));

        let mut manifest = File::create(spec.output_dir.join("formatted_links.txt"))?;

        for (i, payload) in records.iter().enumerate() {
            let index = i + 1;
            let label = format!("{} {}", spec.text.name_prefix, index);
            writeln!(manifest, "{}\n`{}`\n", label, payload)?;

            // The encoded bitmap lives only for this record.
            let data = encode::normalize(payload);
            let bitmap = encode::encode(&data, spec.scale, spec.border)?;
            let card = template.render(
                &bitmap,
                &label,
                &spec.palette,
                spec.logo.as_deref(),
                &spec.text,
            )?;

            let filename = format!("{}_{}.{}", template.name(), label, spec.format.ext());
            write_card(&card, &spec.output_dir.join(filename), spec.format)?;

            let _ = events.send(JobEvent::Progress((index * 100 / total) as u8));
        }

        store.append_history(HistoryRecord {
            date: Local::now().format("%Y-%m-%d %H:%M:%S").to_string(),
            template: template.name().to_string(),
            count: total,
            output_dir: spec.output_dir.display().to_string(),
        })?;

        Ok(total)
    }
}

/// Persist one card in the selected container format.
fn write_card(card: &RgbaImage, path: &std::path::Path, format: OutputFormat) -> Result<(), PlacardError> {
    let result = match format {
        OutputFormat::Png => card.save_with_format(path, ImageFormat::Png),
        // JPEG has no alpha channel; flatten first.
        OutputFormat::Jpeg => DynamicImage::ImageRgba8(card.clone())
            .to_rgb8()
            .save_with_format(path, ImageFormat::Jpeg),
        OutputFormat::Webp => card.save_with_format(path, ImageFormat::WebP),
    };
    result.map_err(|e| PlacardError::Image(format!("Failed to save {}: {}", path.display(), e)))
}

/// Start a job on a background worker thread.
///
/// The spec is moved into the worker; the foreground keeps only the event
/// receiver and this handle.
pub fn spawn(spec: JobSpec, store_dir: PathBuf, events: Sender<JobEvent>) -> JoinHandle<JobState> {
    thread::spawn(move || {
        let store = Store::new(store_dir);
        let mut job = GenerationJob::new(spec);
        job.run(&store, &events);
        job.state()
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::DEFAULT_PALETTE;
    use std::sync::mpsc;

    fn base_spec(dir: &std::path::Path) -> JobSpec {
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

    fn run_spec(spec: JobSpec, store_dir: &std::path::Path) -> (JobState, Vec<JobEvent>) {
        let store = Store::new(store_dir);
        let (tx, rx) = mpsc::channel();
        let mut job = GenerationJob::new(spec);
        assert_eq!(job.state(), JobState::Idle);
        job.run(&store, &tx);
        drop(tx);
        (job.state(), rx.iter().collect())
    }

    #[test]
    fn test_missing_input_fails_validation() {
        let dir = tempfile::tempdir().unwrap();
        let (state, events) = run_spec(base_spec(dir.path()), dir.path());
        assert_eq!(state, JobState::Failed);
        let Some(JobEvent::Finished { success, message }) = events.last() else {
            panic!("expected terminal event");
        };
        assert!(!success);
        assert!(message.contains("does not exist"));
        // No partial output.
        assert!(!dir.path().join("out").exists());
    }

    #[test]
    fn test_blank_input_fails_validation() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("input.txt"), "\n   \n\n").unwrap();
        let (state, _) = run_spec(base_spec(dir.path()), dir.path());
        assert_eq!(state, JobState::Failed);
    }

    #[test]
    fn test_progress_monotone_and_terminal() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("input.txt"), "a.example\nb.example\nc.example\n").unwrap();
        let (state, events) = run_spec(base_spec(dir.path()), dir.path());
        assert_eq!(state, JobState::Completed);

        let mut last = 0u8;
        let mut finished = 0;
        for event in &events {
            match event {
                JobEvent::Progress(p) => {
                    assert!(*p >= last, "progress went backwards");
                    last = *p;
                }
                JobEvent::Finished { success, .. } => {
                    assert!(success);
                    finished += 1;
                }
            }
        }
        assert_eq!(last, 100);
        assert_eq!(finished, 1);
    }

    #[test]
    fn test_dropped_receiver_does_not_poison_run() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("input.txt"), "a.example\n").unwrap();
        let store = Store::new(dir.path());
        let (tx, rx) = mpsc::channel();
        drop(rx);
        let mut job = GenerationJob::new(base_spec(dir.path()));
        job.run(&store, &tx);
        assert_eq!(job.state(), JobState::Completed);
    }

    #[test]
    fn test_spawn_runs_on_worker() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("input.txt"), "a.example\n").unwrap();
        let (tx, rx) = mpsc::channel();
        let handle = spawn(base_spec(dir.path()), dir.path().to_path_buf(), tx);
        let state = handle.join().unwrap();
        assert_eq!(state, JobState::Completed);
        assert!(rx
            .iter()
            .any(|e| matches!(e, JobEvent::Finished { success: true, .. })));
    }

    #[test]
    fn test_output_format_parsing() {
        assert_eq!("png".parse::<OutputFormat>().unwrap(), OutputFormat::Png);
        assert_eq!("JPEG".parse::<OutputFormat>().unwrap(), OutputFormat::Jpeg);
        assert_eq!("jpg".parse::<OutputFormat>().unwrap(), OutputFormat::Jpeg);
        assert_eq!("webp".parse::<OutputFormat>().unwrap(), OutputFormat::Webp);
        assert!("bmp".parse::<OutputFormat>().is_err());
    }
}
