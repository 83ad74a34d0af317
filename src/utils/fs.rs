use anyhow::{Context, Result};
use std::fs;
use std::io::Read;
use std::path::Path;

pub fn is_stdin(path: &Path) -> bool {
    path.as_os_str() == "-"
}

/// Reads a whole input document; `-` means stdin.
pub fn read_input(path: &Path) -> Result<String> {
    if is_stdin(path) {
        let mut content = String::new();
        std::io::stdin()
            .read_to_string(&mut content)
            .context("failed reading harness result from stdin")?;
        return Ok(content);
    }

    fs::read_to_string(path)
        .with_context(|| format!("failed reading harness result {}", path.display()))
}

pub fn display_path(path: &Path) -> String {
    if is_stdin(path) {
        "<stdin>".to_string()
    } else {
        path.to_string_lossy().replace('\\', "/")
    }
}
