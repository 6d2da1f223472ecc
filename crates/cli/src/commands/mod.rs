//! Command handlers for the promptdeck CLI.

mod resolve;
mod show;

pub use resolve::ResolveCommand;
pub use show::ShowCommand;
