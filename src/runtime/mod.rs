pub mod bootstrap;
pub mod call_point;
pub mod convert;
pub mod encoding;
pub mod error;
pub mod site;
pub mod unit;
pub mod value;

pub use call_point::CallPoint;
pub use unit::{CodeUnit, SiteId};
