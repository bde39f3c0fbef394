pub mod drilldown;
pub mod dump;
pub mod modules;
pub mod util;

pub use drilldown::*;
pub use dump::*;
pub use modules::*;
pub use util::*;
