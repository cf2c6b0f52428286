//! CLI domain: parse, route and output only.
//! Store semantics live in the library; the route table just dispatches.

mod output;
mod parse;
mod route;

pub use output::{map_error, Format};
pub use parse::{Cli, Commands};
pub use route::{RunContext, StoreSelection};

impl Cli {
    pub fn selection(&self) -> StoreSelection {
        StoreSelection {
            root: self.root.clone(),
            schema: self.schema.clone(),
            file: self.file.clone(),
            legacy_unsaved: self.legacy_unsaved,
        }
    }
}
