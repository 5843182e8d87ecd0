use std::path::PathBuf;

use thiserror::Error;

/// Failures at the input edge. Scoring itself never fails.
#[derive(Debug, Error)]
pub enum Error {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to read stdin: {0}")]
    Stdin(#[source] std::io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;

/// Read a file, or stdin when `path` is `-`.
pub fn read_input(path: &str) -> Result<String> {
    use std::io::Read;

    if path == "-" {
        let mut input = String::new();
        std::io::stdin()
            .read_to_string(&mut input)
            .map_err(Error::Stdin)?;
        return Ok(input);
    }
    std::fs::read_to_string(path).map_err(|source| Error::Io {
        path: PathBuf::from(path),
        source,
    })
}
