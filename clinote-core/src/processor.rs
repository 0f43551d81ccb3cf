use crate::classifier::StatementClassifier;
use crate::config::ParsingConfig;
use crate::notes::NoteAnalytics;
use crate::rules::NoteParser;
use crate::types::*;
use anyhow::{Context, Result};
use std::path::Path;
use std::time::{Duration, Instant};
use tracing::info;

/// Simple profiler that collects timings for processing steps
pub struct StepProfiler {
    enabled: bool,
    timings: Vec<(String, Duration)>,
}

impl StepProfiler {
    pub fn new(enabled: bool) -> Self {
        Self {
            enabled,
            timings: Vec::new(),
        }
    }

    pub fn time_step<F, R>(&mut self, step_name: &str, f: F) -> R
    where
        F: FnOnce() -> R,
    {
        if !self.enabled {
            return f();
        }

        let start = Instant::now();
        let result = f();
        let elapsed = start.elapsed();

        info!(step = step_name, elapsed_us = elapsed.as_micros() as u64, "step finished");
        self.timings.push((step_name.to_string(), elapsed));

        result
    }

    pub fn timings(&self) -> &[(String, Duration)] {
        &self.timings
    }

    pub fn log_summary(&self) {
        if !self.enabled || self.timings.is_empty() {
            return;
        }

        let total: Duration = self.timings.iter().map(|(_, d)| *d).sum();
        for (step, duration) in &self.timings {
            let percentage = if total.is_zero() {
                0.0
            } else {
                (duration.as_secs_f64() / total.as_secs_f64()) * 100.0
            };
            info!(
                step = step.as_str(),
                elapsed_us = duration.as_micros() as u64,
                share = %format!("{percentage:.1}%"),
                "profile"
            );
        }
        info!(elapsed_us = total.as_micros() as u64, "profile total");
    }
}

/// Text in, segmented note plus profile out.
pub struct NoteProcessor {
    parser: NoteParser,
}

impl NoteProcessor {
    /// Processor with the built-in lexical classifier
    pub fn new(config: ParsingConfig) -> Result<Self> {
        Ok(Self {
            parser: NoteParser::new(config)?,
        })
    }

    /// Processor with full dependency injection of the statement classifier
    pub fn new_with_classifier(
        config: ParsingConfig,
        classifier: Box<dyn StatementClassifier + Send + Sync>,
    ) -> Result<Self> {
        Ok(Self {
            parser: NoteParser::new_with_classifier(config, classifier)?,
        })
    }

    pub fn config(&self) -> &ParsingConfig {
        self.parser.config()
    }

    pub fn process_text(&self, text: &str) -> Result<ProcessedNote> {
        self.process_text_with_profiling(text, false)
    }

    pub fn process_text_with_profiling(&self, text: &str, enable_profiling: bool) -> Result<ProcessedNote> {
        let mut profiler = StepProfiler::new(enable_profiling);

        let note = profiler.time_step("Segmentation", || self.parser.parse(text))?;
        let profile = profiler.time_step("Profile", || NoteAnalytics::profile(&note, text));
        profiler.log_summary();

        info!(
            note_id = %note.id,
            items = profile.total_items,
            sections = profile.section_count,
            "note processed"
        );
        Ok(ProcessedNote { note, profile })
    }

    /// Read a UTF-8 text file and process its contents
    pub fn process_file(&self, input: &Path) -> Result<ProcessedNote> {
        self.process_file_with_profiling(input, false)
    }

    pub fn process_file_with_profiling(&self, input: &Path, enable_profiling: bool) -> Result<ProcessedNote> {
        let text = std::fs::read_to_string(input)
            .with_context(|| format!("failed to read note text from {}", input.display()))?;
        self.process_text_with_profiling(&text, enable_profiling)
    }
}
