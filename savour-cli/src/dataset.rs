//! CSV dataset loading.

use std::io::BufReader;

use camino::Utf8Path;
use savour_core::Dataset;

use crate::{CliError, files};

/// Check that `path` names an existing regular file.
fn require_existing(path: &Utf8Path, field: &'static str) -> Result<(), CliError> {
    match files::file_is_file(path) {
        Ok(true) => Ok(()),
        Ok(false) => Err(CliError::SourcePathNotFile {
            field,
            path: path.to_path_buf(),
        }),
        Err(source) if source.kind() == std::io::ErrorKind::NotFound => {
            Err(CliError::MissingSourceFile {
                field,
                path: path.to_path_buf(),
            })
        }
        Err(source) => Err(CliError::InspectSourcePath {
            field,
            path: path.to_path_buf(),
            source,
        }),
    }
}

/// Load a restaurant dataset from a CSV file with a header row.
pub(crate) fn load_dataset(path: &Utf8Path) -> Result<Dataset, CliError> {
    require_existing(path, crate::ARG_DATASET)?;
    let file = files::open_utf8_file(path).map_err(|source| CliError::OpenDataset {
        path: path.to_path_buf(),
        source,
    })?;
    let read_error = |source: csv::Error| CliError::ReadDataset {
        path: path.to_path_buf(),
        source,
    };
    let mut reader = csv::Reader::from_reader(BufReader::new(file));
    let headers = reader.headers().map_err(read_error)?.clone();
    let rows = reader
        .records()
        .collect::<Result<Vec<_>, _>>()
        .map_err(read_error)?;
    let dataset = Dataset::from_table(headers.iter(), rows.iter()).map_err(|source| {
        CliError::Dataset {
            path: path.to_path_buf(),
            source,
        }
    })?;
    log::info!("loaded {} restaurants from {path}", dataset.len());
    Ok(dataset)
}
