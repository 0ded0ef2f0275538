use crate::language::descriptor::SiteDescriptor;
use crate::options::LinkOptions;
use crate::runtime::call_point::CallPoint;
use crate::runtime::error::{RuntimeError, RuntimeResult};
use crate::runtime::value::Value;
use std::fmt;

/// Index of a call point inside its code unit.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct SiteId(pub usize);

impl fmt::Display for SiteId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// A compiled unit and the range call points it owns. Installed sites live
/// exactly as long as the unit.
#[derive(Debug)]
pub struct CodeUnit {
    name: String,
    options: LinkOptions,
    sites: Vec<CallPoint>,
}

impl CodeUnit {
    pub fn new(name: impl Into<String>, options: LinkOptions) -> Self {
        Self {
            name: name.into(),
            options,
            sites: Vec::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Registers a construction point while the unit is being emitted.
    pub fn add_site(&mut self, descriptor: SiteDescriptor) -> SiteId {
        self.sites.push(CallPoint::new(descriptor, self.options));
        SiteId(self.sites.len() - 1)
    }

    pub fn site(&self, id: SiteId) -> RuntimeResult<&CallPoint> {
        self.sites.get(id.0).ok_or_else(|| RuntimeError::UnknownSite {
            unit: self.name.clone(),
            index: id.0,
        })
    }

    pub fn call(&self, id: SiteId, args: &[Value]) -> RuntimeResult<Value> {
        self.site(id)?.call(args)
    }

    pub fn len(&self) -> usize {
        self.sites.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sites.is_empty()
    }

    pub fn linked_count(&self) -> usize {
        self.sites.iter().filter(|site| site.is_linked()).count()
    }
}
