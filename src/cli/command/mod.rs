pub mod fetch;
pub mod stations;

use std::path::PathBuf;

pub use fetch::fetch;
pub use stations::stations;

/// Resolves where an artifact lands, defaulting to the home directory.
pub fn output_path(out_dir: Option<PathBuf>, file_name: &str) -> PathBuf {
    out_dir
        .or_else(dirs::home_dir)
        .unwrap_or_else(|| PathBuf::from("."))
        .join(file_name)
}

// -- Tests -------------------------------------------------------------------
