use std::{
    fs::File,
    io::{self, prelude::*, BufReader},
    path::{Path, PathBuf},
};

/// Open the file at the specified path as an ordered stream of lines.
///
/// A missing file is reported as [`Error::ResourceNotFound`]; read failures after
/// opening surface as errors within the stream.
pub fn read_lines(path: &Path) -> Result<io::Lines<BufReader<File>>, Error> {
    let file = File::open(path).map_err(|source| match source.kind() {
        io::ErrorKind::NotFound => Error::ResourceNotFound(path.to_owned()),
        _ => Error::Io {
            path: path.to_owned(),
            source,
        },
    })?;
    tracing::debug!(path = %path.display(), "reading input");
    Ok(BufReader::new(file).lines())
}

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("input file not found: {}", .0.display())]
    ResourceNotFound(PathBuf),
    #[error("opening {}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}
