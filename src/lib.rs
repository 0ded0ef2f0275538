pub mod diagnostics;
pub mod language;
pub mod options;
pub mod runtime;
