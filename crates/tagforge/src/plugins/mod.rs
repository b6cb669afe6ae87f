//! Bundled plugins: logging, client-side routing and template pipes.

pub mod logger;
pub mod pipe;
mod pipe_defaults;
pub mod router;

pub use logger::logger_plugin;
pub use pipe::{pipe_plugin, pipe_plugin_with, PipeError, PipeFn};
pub use router::{router_plugin, MemoryHistory, Navigator, RouteDef, RouteMatch, RouteTable};
