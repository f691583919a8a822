// Tue Jan 23 2026 - Alex

use crate::binding::{BindingError, BindingSet, NativeType};
use crate::denylist::Denylist;
use crate::diagnostics::{DiagnosticKind, Diagnostics};
use crate::model::WrapperMethod;
use crate::resolver::{BaseId, ResolverContext, StructSynthesizer};
use crate::structure::layout_of;
use ahash::{AHashMap, AHashSet};
use rayon::prelude::*;

/// Outcome of walking one inheritance chain in pass 2.
#[derive(Debug, Clone, PartialEq, Eq)]
enum Chain {
    Resolved { target: BaseId, via: String },
    Denied(String),
    Cycle(String),
    Excluded(String),
    Unrooted,
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct PassSummary {
    pub bases: usize,
    pub aliases: usize,
    pub skipped: usize,
    pub abandoned: usize,
}

/// Runs the three struct resolution passes against a shared context.
pub struct StructResolver<'a> {
    bindings: &'a BindingSet,
    denylist: &'a Denylist,
    synthesizer: StructSynthesizer,
    diagnostics: &'a Diagnostics,
}

impl<'a> StructResolver<'a> {
    pub fn new(
        bindings: &'a BindingSet,
        denylist: &'a Denylist,
        package: &str,
        diagnostics: &'a Diagnostics,
    ) -> Self {
        Self {
            bindings,
            denylist,
            synthesizer: StructSynthesizer::new(package),
            diagnostics,
        }
    }

    pub fn synthesizer(&self) -> &StructSynthesizer {
        &self.synthesizer
    }

    /// Deduplicates by layout: every candidate with a usable layout becomes
    /// either a new base or an alias of the first equal base.
    pub fn pass1(&self, ctx: &mut ResolverContext, candidates: &[&NativeType]) -> PassSummary {
        let mut summary = PassSummary::default();

        for native in candidates {
            match layout_of(native) {
                Ok(None) => {
                    summary.skipped += 1;
                }
                Err(e) => {
                    self.diagnostics.report(DiagnosticKind::BrokenLayout, &native.name, e.to_string());
                    ctx.exclude(&native.name);
                    summary.abandoned += 1;
                }
                Ok(Some(layout)) => match ctx.find_equal(layout) {
                    Some(id) => {
                        let via = ctx.base(id).native.clone();
                        log::trace!("{} shares the layout of {}", native.name, via);
                        ctx.register_alias(&native.name, id, &via);
                        summary.aliases += 1;
                    }
                    None => {
                        let model = self.synthesizer.base_model(&native.name, layout, self.diagnostics);
                        let id = ctx.register_base(&native.name, layout, model);
                        log::trace!("{} is base {}", native.name, id);
                        summary.bases += 1;
                    }
                },
            }
        }

        log::debug!(
            "Pass 1: {} bases, {} aliases, {} without layout, {} broken",
            summary.bases,
            summary.aliases,
            summary.skipped,
            summary.abandoned
        );
        summary
    }

    /// Aliases every remaining candidate to its nearest resolved ancestor.
    ///
    /// Each type derives from its direct parent whenever that parent is itself
    /// a candidate, so the result does not depend on candidate order. A parent
    /// missing from the binding set aborts the run.
    pub fn pass2(&self, ctx: &mut ResolverContext, candidates: &[&NativeType]) -> Result<PassSummary, BindingError> {
        let mut summary = PassSummary::default();
        let names: AHashSet<&str> = candidates.iter().map(|n| n.name.as_str()).collect();
        let mut outcomes: AHashMap<String, Chain> = AHashMap::new();

        for native in candidates {
            if ctx.is_resolved(&native.name) || ctx.is_excluded(&native.name) || native.parent.is_none() {
                continue;
            }

            let mut stack = Vec::new();
            let chain = self.walk(ctx, &names, &mut outcomes, &mut stack, &native.name)?;
            match chain {
                Chain::Resolved { .. } => summary.aliases += 1,
                Chain::Denied(ancestor) => {
                    self.diagnostics.report(
                        DiagnosticKind::DeniedAncestor,
                        &native.name,
                        format!("inherits from denylisted {}", ancestor),
                    );
                    summary.abandoned += 1;
                }
                Chain::Cycle(at) => {
                    self.diagnostics.report(
                        DiagnosticKind::CyclicInheritance,
                        &native.name,
                        format!("inheritance chain loops at {}", at),
                    );
                    summary.abandoned += 1;
                }
                Chain::Excluded(ancestor) => {
                    log::debug!("{} abandoned: ancestor {} has a broken layout", native.name, ancestor);
                    summary.abandoned += 1;
                }
                Chain::Unrooted => {
                    log::debug!("{} has no ancestor with a layout", native.name);
                    summary.skipped += 1;
                }
            }
        }

        log::debug!(
            "Pass 2: {} aliases, {} abandoned, {} unrooted",
            summary.aliases,
            summary.abandoned,
            summary.skipped
        );
        Ok(summary)
    }

    fn walk(
        &self,
        ctx: &mut ResolverContext,
        candidates: &AHashSet<&str>,
        outcomes: &mut AHashMap<String, Chain>,
        stack: &mut Vec<String>,
        name: &str,
    ) -> Result<Chain, BindingError> {
        if let Some(id) = ctx.base_of(name) {
            if let Some(ancestor) = self.denied_above(name)? {
                return Ok(Chain::Denied(ancestor));
            }
            return Ok(Chain::Resolved {
                target: id,
                via: name.to_string(),
            });
        }
        if let Some(chain) = outcomes.get(name) {
            return Ok(chain.clone());
        }
        if stack.iter().any(|s| s == name) {
            return Ok(Chain::Cycle(name.to_string()));
        }
        if self.denylist.contains(name) {
            return Ok(Chain::Denied(name.to_string()));
        }
        if ctx.is_excluded(name) {
            return Ok(Chain::Excluded(name.to_string()));
        }

        let native = self.bindings.require(name)?;
        let Some(parent) = native.parent.as_deref() else {
            return Ok(Chain::Unrooted);
        };

        stack.push(name.to_string());
        let parent_chain = self.walk(ctx, candidates, outcomes, stack, parent)?;
        stack.pop();

        let chain = match parent_chain {
            Chain::Resolved { target, via } if candidates.contains(name) => {
                ctx.register_alias(name, target, &via);
                log::trace!("{} derives from {}", name, via);
                Chain::Resolved {
                    target,
                    via: name.to_string(),
                }
            }
            other => other,
        };
        outcomes.insert(name.to_string(), chain.clone());
        Ok(chain)
    }

    /// First denylisted type anywhere above `name` in its parent chain.
    fn denied_above(&self, name: &str) -> Result<Option<String>, BindingError> {
        let mut seen: AHashSet<String> = AHashSet::new();
        let mut current = self.bindings.require(name)?.parent.clone();
        while let Some(ancestor) = current {
            if self.denylist.contains(&ancestor) {
                return Ok(Some(ancestor));
            }
            if !seen.insert(ancestor.clone()) {
                break;
            }
            current = self.bindings.require(&ancestor)?.parent.clone();
        }
        Ok(None)
    }

    /// Computes typed accessors for nested regions that match a base, in
    /// parallel, then attaches them. Call from inside the worker pool.
    pub fn pass3(&self, ctx: &mut ResolverContext) -> usize {
        let computed: Vec<(BaseId, Vec<WrapperMethod>)> = ctx
            .bases()
            .par_iter()
            .map(|base| (base.id, self.synthesizer.substruct_accessors(base, ctx)))
            .filter(|(_, accessors)| !accessors.is_empty())
            .collect();

        let mut attached = 0;
        for (id, accessors) in computed {
            let base = &mut ctx.bases_mut()[id.0];
            for accessor in accessors {
                match base.model.add_method(accessor) {
                    Ok(()) => attached += 1,
                    Err(e) => self.diagnostics.report(DiagnosticKind::MemberConflict, &base.native, e.to_string()),
                }
            }
        }

        log::debug!("Pass 3: attached {} substruct accessors", attached);
        attached
    }
}
