// Tue Jan 25 2026 - Alex

use crate::binding::BindingSet;
use crate::com::{ComSynthesizer, ComWrapper};
use crate::config::Config;
use crate::constants::ConstantAggregator;
use crate::denylist::Denylist;
use crate::diagnostics::Diagnostics;
use crate::error::Result;
use crate::model::WrapperType;
use crate::orchestration::discovery::DiscoveryManager;
use crate::orchestration::finalizer::{EmissionSummary, OutputFinalizer, PipelineReport};
use crate::orchestration::scheduler::WorkerPool;
use crate::output::Emitter;
use crate::resolver::{ResolverContext, StructEntry, StructResolver};
use crate::utils::scoped_timer;
use indicatif::ProgressBar;
use rayon::prelude::*;
use std::borrow::Cow;
use std::fmt;
use std::time::Instant;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Idle,
    Discover,
    StructPass1,
    StructPass2,
    /// Substruct accessors and interface wrappers, built concurrently
    Generate,
    Emission,
    Completed,
    Failed,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Stage::Idle => "idle",
            Stage::Discover => "discovering types",
            Stage::StructPass1 => "deduplicating layouts",
            Stage::StructPass2 => "resolving inheritance",
            Stage::Generate => "generating accessors and interface wrappers",
            Stage::Emission => "emitting",
            Stage::Completed => "completed",
            Stage::Failed => "failed",
        };
        write!(f, "{}", label)
    }
}

/// Drives one translation run from a loaded binding set to emitted models.
pub struct Pipeline<'a> {
    config: &'a Config,
    bindings: &'a BindingSet,
    denylist: &'a Denylist,
    emitter: &'a dyn Emitter,
    progress: Option<ProgressBar>,
    stage: Stage,
}

impl<'a> Pipeline<'a> {
    pub fn new(config: &'a Config, bindings: &'a BindingSet, denylist: &'a Denylist, emitter: &'a dyn Emitter) -> Self {
        Self {
            config,
            bindings,
            denylist,
            emitter,
            progress: None,
            stage: Stage::Idle,
        }
    }

    pub fn with_progress(mut self, progress: ProgressBar) -> Self {
        self.progress = Some(progress);
        self
    }

    pub fn stage(&self) -> Stage {
        self.stage
    }

    pub fn run(&mut self) -> Result<PipelineReport> {
        let started = Instant::now();
        let diagnostics = Diagnostics::new();

        match self.execute(&diagnostics) {
            Ok(mut report) => {
                self.enter(Stage::Completed);
                report.diagnostics = diagnostics.into_inner();
                report.elapsed = started.elapsed();
                Ok(report)
            }
            Err(e) => {
                log::error!("Run failed while {}: {}", self.stage, e);
                self.enter(Stage::Failed);
                Err(e)
            }
        }
    }

    fn enter(&mut self, stage: Stage) {
        log::debug!("Stage: {}", stage);
        if let Some(progress) = &self.progress {
            progress.set_message(stage.to_string());
        }
        self.stage = stage;
    }

    fn execute(&mut self, diagnostics: &Diagnostics) -> Result<PipelineReport> {
        let config = self.config;
        let bindings = self.bindings;
        let pool = WorkerPool::new(config.max_threads)?;
        let aggregator = ConstantAggregator::from_config(config)?;

        self.enter(Stage::Discover);
        let discovery = {
            let _timer = scoped_timer("discovery");
            DiscoveryManager::new(bindings, self.denylist, config).discover()?
        };

        let resolver = StructResolver::new(bindings, self.denylist, &config.struct_package, diagnostics);
        let mut ctx = ResolverContext::new();

        self.enter(Stage::StructPass1);
        {
            let _timer = scoped_timer("struct pass 1");
            resolver.pass1(&mut ctx, &discovery.structs);
        }

        self.enter(Stage::StructPass2);
        {
            let _timer = scoped_timer("struct pass 2");
            resolver.pass2(&mut ctx, &discovery.structs)?;
        }

        self.enter(Stage::Generate);
        let com = ComSynthesizer::from_config(config, bindings);
        let (_, wrappers) = {
            let _timer = scoped_timer("generation");
            pool.join(
                || resolver.pass3(&mut ctx),
                || {
                    discovery
                        .interfaces
                        .par_iter()
                        .map(|pair| com.synthesize(pair.object, pair.table, diagnostics))
                        .collect::<Vec<ComWrapper>>()
                },
            )
        };
        log::debug!(
            "{} interface wrappers, {} with identifier accessors",
            wrappers.len(),
            wrappers.iter().filter(|w| w.has_identity_accessor()).count()
        );
        let constants = aggregator.aggregate(bindings.constants(), diagnostics);

        let mut report = PipelineReport {
            structs: ctx.struct_count(),
            bases: ctx.base_count(),
            aliases: ctx.alias_count(),
            com_objects: wrappers.len(),
            com_methods: wrappers.iter().map(ComWrapper::method_count).sum(),
            constants: constants.fields.len(),
            ..Default::default()
        };

        self.enter(Stage::Emission);
        if config.dry_run {
            log::info!("Dry run: skipping emission of {} models", report.structs + report.com_objects + 1);
            return Ok(report);
        }

        let synthesizer = resolver.synthesizer();
        let mut models: Vec<Cow<'_, WrapperType>> = Vec::with_capacity(report.structs + wrappers.len() + 1);
        for (native, entry) in ctx.entries() {
            match entry {
                StructEntry::Base(id) => models.push(Cow::Borrowed(&ctx.base(*id).model)),
                StructEntry::Alias { via, .. } => models.push(Cow::Owned(synthesizer.alias_model(native, via))),
            }
        }
        models.extend(wrappers.iter().map(|wrapper| Cow::Borrowed(&wrapper.model)));
        models.push(Cow::Borrowed(&constants));

        report.emission = {
            let _timer = scoped_timer("emission");
            let mut finalizer = OutputFinalizer::new(self.emitter);
            if let Some(progress) = &self.progress {
                finalizer = finalizer.with_progress(progress.clone());
            }
            pool.install(|| finalizer.finalize(&models))
        };
        log_emission(&report.emission, self.emitter);

        Ok(report)
    }
}

fn log_emission(summary: &EmissionSummary, emitter: &dyn Emitter) {
    if summary.failures.is_empty() {
        log::debug!("{} backend emitted {} models", emitter.name(), summary.emitted);
    } else {
        log::warn!(
            "{} backend emitted {} models, {} failed",
            emitter.name(),
            summary.emitted,
            summary.failures.len()
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::binding::TableEntry;
    use crate::diagnostics::DiagnosticKind;
    use crate::error::MapperError;
    use crate::model::TypeRef;
    use crate::output::MemoryEmitter;
    use crate::structure::{GroupLayout, PrimitiveType};
    use crate::utils::testing::{int_pair, method_entry, ManifestBuilder};

    fn config() -> Config {
        Config::default().with_threads(2)
    }

    fn sample() -> BindingSet {
        ManifestBuilder::new("win32.pure")
            .with_struct("POINT", int_pair("tagPOINT", "x", "y"))
            .with_struct("POINTL", int_pair("_POINTL", "x", "y"))
            .with_struct(
                "RECT",
                GroupLayout::new_struct(Some("tagRECT"))
                    .with_group(int_pair("topLeft", "x", "y"))
                    .with_group(int_pair("bottomRight", "x", "y")),
            )
            .with_derived("LPPOINT", "POINT")
            .with_derived("BADCHILD", "_MMIOINFO")
            .with_broken("_MMIOINFO", "initializer failed")
            .with_struct("constants$1", int_pair("c", "a", "b"))
            .with_interface(
                "IFoo",
                vec![
                    method_entry("QueryInterface", TypeRef::Primitive(PrimitiveType::Int), &[]),
                    TableEntry::value("Reserved", TypeRef::Primitive(PrimitiveType::Address)),
                ],
            )
            .with_constant("WM_PAINT", PrimitiveType::Int, 15)
            .build()
    }

    #[test]
    fn test_full_run() {
        let bindings = sample();
        let denylist = Denylist::from_names("test", ["_MMIOINFO"]);
        let config = config();
        let emitter = MemoryEmitter::new();

        let mut pipeline = Pipeline::new(&config, &bindings, &denylist, &emitter);
        let report = pipeline.run().unwrap();

        assert_eq!(pipeline.stage(), Stage::Completed);
        // POINT, POINTL, RECT, LPPOINT
        assert_eq!(report.structs, 4);
        assert_eq!(report.bases, 2);
        assert_eq!(report.com_objects, 1);
        assert_eq!(report.com_methods, 1);
        assert_eq!(report.constants, 1);
        assert_eq!(report.summary(), "Generated wrapper types for 4 structs and 1 COM objects");

        assert_eq!(report.diagnostics.iter().filter(|d| d.kind == DiagnosticKind::DeniedAncestor).count(), 1);
        assert_eq!(report.diagnostics.iter().filter(|d| d.kind == DiagnosticKind::UnsupportedEntry).count(), 1);

        // every struct entry, one interface wrapper and the constant type
        assert_eq!(report.emission.emitted, 6);
        assert_eq!(emitter.len(), 6);
        let rect = emitter.get("win32.mapped.struct.RECT").unwrap();
        assert!(rect.method("topLeft").is_some());
        let alias = emitter.get("win32.mapped.struct.LPPOINT").unwrap();
        assert_eq!(alias.supertype, Some(TypeRef::named("win32.mapped.struct", "POINT")));
        assert!(emitter.get("win32.mapped.com.IFoo_J").is_some());
        assert!(emitter.get("win32.mapped.WindowMessages").is_some());
    }

    #[test]
    fn test_dry_run_emits_nothing() {
        let bindings = sample();
        let config = config();
        let config = Config { dry_run: true, ..config };
        let emitter = MemoryEmitter::new();

        let report = Pipeline::new(&config, &bindings, &Denylist::default(), &emitter).run().unwrap();
        assert!(emitter.is_empty());
        assert_eq!(report.emission.emitted, 0);
    }

    #[test]
    fn test_missing_parent_fails_run() {
        let bindings = ManifestBuilder::new("win32.pure").with_derived("ORPHAN", "Gone").build();
        let denylist = Denylist::default();
        let config = config();
        let emitter = MemoryEmitter::new();

        let mut pipeline = Pipeline::new(&config, &bindings, &denylist, &emitter);
        let err = pipeline.run().unwrap_err();

        assert!(matches!(err, MapperError::Binding(_)));
        assert_eq!(pipeline.stage(), Stage::Failed);
        assert!(emitter.is_empty());
    }
}
