//! Writing filter results for the `filter` command

use breath_filter::FilterOutput;
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

#[derive(Debug, thiserror::Error)]
pub enum OutputError {
    #[error("Failed to create output file '{}': {source}", path.display())]
    Create {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("Failed to serialize filtered values: {0}")]
    Serialize(#[from] serde_json::Error),
    #[error("Failed to write filtered values: {0}")]
    Write(#[from] io::Error),
}

/// Write `{"filtered_values": [...]}` followed by a newline.
pub fn write_filtered<W: Write>(
    mut writer: W,
    output: &FilterOutput,
    compact: bool,
) -> Result<(), OutputError> {
    if compact {
        serde_json::to_writer(&mut writer, output)?;
    } else {
        serde_json::to_writer_pretty(&mut writer, output)?;
    }
    writer.write_all(b"\n")?;
    writer.flush()?;
    Ok(())
}

/// Write the result to `path`, or to stdout when no path is given.
pub fn emit(output: &FilterOutput, path: Option<&Path>, compact: bool) -> Result<(), OutputError> {
    let writer: Box<dyn Write> = match path {
        Some(path) => {
            let file = File::create(path).map_err(|source| OutputError::Create {
                path: path.to_path_buf(),
                source,
            })?;
            Box::new(BufWriter::new(file))
        }
        None => Box::new(io::stdout().lock()),
    };
    write_filtered(writer, output, compact)
}
