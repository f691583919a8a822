// Tue Jan 25 2026 - Alex

use crate::diagnostics::Diagnostic;
use crate::model::WrapperType;
use crate::output::Emitter;
use indicatif::ProgressBar;
use parking_lot::Mutex;
use rayon::prelude::*;
use serde::Serialize;
use std::borrow::Cow;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EmissionFailure {
    pub model: String,
    pub error: String,
}

#[derive(Debug, Default, Clone, Serialize)]
pub struct EmissionSummary {
    pub emitted: usize,
    pub failures: Vec<EmissionFailure>,
}

/// Hands finished models to an emitter. A failing model is logged and
/// counted; the rest are still emitted.
pub struct OutputFinalizer<'a> {
    emitter: &'a dyn Emitter,
    progress: Option<ProgressBar>,
}

impl<'a> OutputFinalizer<'a> {
    pub fn new(emitter: &'a dyn Emitter) -> Self {
        Self { emitter, progress: None }
    }

    pub fn with_progress(mut self, progress: ProgressBar) -> Self {
        self.progress = Some(progress);
        self
    }

    /// Emits in parallel; call from inside the worker pool.
    pub fn finalize(&self, models: &[Cow<'_, WrapperType>]) -> EmissionSummary {
        let emitted = AtomicUsize::new(0);
        let failures = Mutex::new(Vec::new());

        if let Some(progress) = &self.progress {
            progress.set_length(models.len() as u64);
        }

        models.par_iter().for_each(|model| {
            match self.emitter.emit(model) {
                Ok(_) => {
                    emitted.fetch_add(1, Ordering::Relaxed);
                }
                Err(e) => {
                    log::error!("Failed to emit {}: {}", model.qualified_name(), e);
                    failures.lock().push(EmissionFailure {
                        model: model.qualified_name(),
                        error: e.to_string(),
                    });
                }
            }
            if let Some(progress) = &self.progress {
                progress.inc(1);
            }
        });

        if let Some(progress) = &self.progress {
            progress.finish_and_clear();
        }

        let mut failures = failures.into_inner();
        failures.sort_by(|a, b| a.model.cmp(&b.model));
        EmissionSummary {
            emitted: emitted.into_inner(),
            failures,
        }
    }
}

/// Outcome of a whole run.
#[derive(Debug, Default, Clone, Serialize)]
pub struct PipelineReport {
    pub structs: usize,
    pub bases: usize,
    pub aliases: usize,
    pub com_objects: usize,
    pub com_methods: usize,
    pub constants: usize,
    pub emission: EmissionSummary,
    pub diagnostics: Vec<Diagnostic>,
    pub elapsed: Duration,
}

impl PipelineReport {
    pub fn summary(&self) -> String {
        format!(
            "Generated wrapper types for {} structs and {} COM objects",
            self.structs, self.com_objects
        )
    }

    pub fn is_clean(&self) -> bool {
        self.diagnostics.is_empty() && self.emission.failures.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Modifiers;
    use crate::output::{EmitError, MemoryEmitter};
    use std::path::PathBuf;

    struct RejectingEmitter;

    impl Emitter for RejectingEmitter {
        fn name(&self) -> &'static str {
            "rejecting"
        }

        fn emit(&self, model: &WrapperType) -> Result<Option<PathBuf>, EmitError> {
            if model.name.starts_with("Bad") {
                return Err(EmitError::Io {
                    path: PathBuf::from(&model.name),
                    source: std::io::Error::new(std::io::ErrorKind::PermissionDenied, "read-only"),
                });
            }
            Ok(None)
        }
    }

    fn models(names: &[&str]) -> Vec<WrapperType> {
        names.iter().map(|n| WrapperType::new("p", n, Modifiers::public())).collect()
    }

    #[test]
    fn test_failures_are_counted_not_fatal() {
        let owned = models(&["A", "BadB", "C", "BadD"]);
        let borrowed: Vec<Cow<'_, WrapperType>> = owned.iter().map(Cow::Borrowed).collect();
        let summary = OutputFinalizer::new(&RejectingEmitter).finalize(&borrowed);

        assert_eq!(summary.emitted, 2);
        let failed: Vec<&str> = summary.failures.iter().map(|f| f.model.as_str()).collect();
        assert_eq!(failed, vec!["p.BadB", "p.BadD"]);
    }

    #[test]
    fn test_memory_emitter_receives_all() {
        let emitter = MemoryEmitter::new();
        let owned = models(&["A", "B"]);
        let cows: Vec<Cow<'_, WrapperType>> = owned.into_iter().map(Cow::Owned).collect();
        let summary = OutputFinalizer::new(&emitter).finalize(&cows);

        assert_eq!(summary.emitted, 2);
        assert_eq!(emitter.len(), 2);
    }

    #[test]
    fn test_summary_line() {
        let report = PipelineReport {
            structs: 12,
            com_objects: 3,
            ..Default::default()
        };
        assert_eq!(report.summary(), "Generated wrapper types for 12 structs and 3 COM objects");
        assert!(report.is_clean());
    }
}
