//! List every folder below a directory in breadth-first order
//!
//! To run this example:
//! ```sh
//! cd crates/fsprobe
//! cargo run --example list_folders -- /path/to/project
//! ```

use fsprobe::{FileSystemProbe, RealFileSystem, Result};
use std::path::PathBuf;

fn main() -> Result<()> {
    let root = std::env::args()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("."));

    let probe = RealFileSystem::new();
    if !probe.exists(&root) {
        eprintln!("Not a directory: {}", root.display());
        return Ok(());
    }

    let folders = probe.enumerate_recursive(&root)?;
    println!("{} folders under {}\n", folders.len(), root.display());
    for folder in folders {
        println!("  {}", folder.display());
    }

    Ok(())
}
