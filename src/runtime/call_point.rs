use crate::language::descriptor::SiteDescriptor;
use crate::options::LinkOptions;
use crate::runtime::bootstrap::{self, LinkedSite};
use crate::runtime::error::RuntimeResult;
use crate::runtime::site::ConstructionSite;
use crate::runtime::value::Value;
use std::sync::OnceLock;
use std::sync::atomic::{AtomicUsize, Ordering};
use tracing::trace;

/// The entry point compiled code calls for one range construction
/// expression. Links on first reach, then dispatches straight to the
/// installed site.
///
/// Racing first calls each link their own candidate; the first outcome stored
/// wins and the rest are dropped. A failed link is recorded like a successful
/// one, so later calls replay the same error without linking again.
#[derive(Debug)]
pub struct CallPoint {
    descriptor: SiteDescriptor,
    options: LinkOptions,
    linked: OnceLock<RuntimeResult<LinkedSite>>,
    link_runs: AtomicUsize,
}

impl CallPoint {
    pub fn new(descriptor: SiteDescriptor, options: LinkOptions) -> Self {
        Self {
            descriptor,
            options,
            linked: OnceLock::new(),
            link_runs: AtomicUsize::new(0),
        }
    }

    pub fn descriptor(&self) -> &SiteDescriptor {
        &self.descriptor
    }

    pub fn call(&self, args: &[Value]) -> RuntimeResult<Value> {
        let outcome = match self.linked.get() {
            Some(outcome) => outcome,
            None => self.install(),
        };
        match outcome {
            Ok(linked) => linked.invoke(args),
            Err(err) => Err(err.clone()),
        }
    }

    fn install(&self) -> &RuntimeResult<LinkedSite> {
        self.link_runs.fetch_add(1, Ordering::Relaxed);
        let candidate = bootstrap::link(&self.descriptor, &self.options);
        let mut won = false;
        let installed = self.linked.get_or_init(|| {
            won = true;
            candidate
        });
        if !won {
            trace!(origin = ?self.descriptor.origin, "discarded losing link outcome");
        }
        installed
    }

    pub fn is_linked(&self) -> bool {
        self.linked().is_some()
    }

    /// Whether linking ran and recorded an error.
    pub fn is_failed(&self) -> bool {
        matches!(self.linked.get(), Some(Err(_)))
    }

    pub fn linked(&self) -> Option<&LinkedSite> {
        self.linked.get().and_then(|outcome| outcome.as_ref().ok())
    }

    pub fn installed(&self) -> Option<&ConstructionSite> {
        self.linked().map(LinkedSite::site)
    }

    /// How many times linking has run, racing losers included.
    pub fn link_runs(&self) -> usize {
        self.link_runs.load(Ordering::Relaxed)
    }
}
