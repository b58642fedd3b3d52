//! Game Module
//!
//! The construct and everything a host game touches: configuration, the
//! element registry and the script facade.

pub mod config;
pub mod construct;
pub mod script;

pub use config::{ConfigError, ConstructConfig, SimulationConfig};
pub use construct::{Construct, ElementId, ElementRecord, ElementRegistry};
pub use script::{SCRIPT_FUNCTIONS, ScriptApi, ScriptError, ScriptValue};
