//! CLI domain: parse, route, and presentation only.
//! No domain orchestration; a single route table dispatches to the graph,
//! source, and render modules.

mod output;
mod parse;
mod presentation;
mod route;

pub use output::map_error;
pub use parse::{Cli, Commands, GraphCommands};
pub use presentation::{format_build_summary, format_listing, format_merge_result};
pub use route::RunContext;
