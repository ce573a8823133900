//! Log setup for the terminal game. The TUI owns stdout and stderr while it
//! runs, so records go to a file instead.

use std::fs::File;
use std::io;
use std::path::Path;

use env_logger::{Builder, Target};

/// Logger builder that honours `RUST_LOG` and writes records to `path`,
/// replacing any earlier file.
pub fn file_logger(path: &Path) -> io::Result<Builder> {
    let file = File::create(path)?;
    let mut builder = Builder::from_default_env();
    builder.target(Target::Pipe(Box::new(file)));
    Ok(builder)
}
