use std::fs::{self, File};
use std::io::{Seek, SeekFrom};
use std::path::{Path, PathBuf};
use std::sync::Arc;

use arrow_array::RecordBatch;
use arrow_csv::ReaderBuilder;
use arrow_csv::reader::Format;
use arrow_select::concat::concat_batches;
use graphar_error::{GarResult, gar_bail};
use graphar_schema::FileType;
use log::trace;
use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;

use crate::{ChunkLoader, LoadOptions};

/// Loads chunks from the local filesystem.
///
/// Parquet chunks are decoded with the `parquet` crate's Arrow reader and CSV chunks with
/// `arrow-csv`. There is no ORC decoder, so ORC chunks fail with `UnsupportedFormat`.
#[derive(Debug, Default, Clone, Copy)]
pub struct LocalChunkLoader;

impl LocalChunkLoader {
    pub fn new() -> Self {
        Self
    }
}

impl ChunkLoader for LocalChunkLoader {
    fn load(
        &self,
        path: &Path,
        file_type: FileType,
        options: &LoadOptions,
    ) -> GarResult<RecordBatch> {
        if file_type == FileType::Orc {
            gar_bail!(UnsupportedFormat: "no {} decoder for {}", file_type, path.display());
        }
        if !path.exists() {
            gar_bail!(ChunkNotFound: "{}", path.display());
        }

        if !path.is_dir() {
            return load_file(path, file_type, options);
        }
        if !options.recursive() {
            gar_bail!(
                "{} is a directory, recursive loading must be enabled to read it",
                path.display()
            );
        }

        trace!("loading every file under {}", path.display());
        let batches = list_files(path)?
            .iter()
            .map(|file| load_file(file, file_type, options))
            .collect::<GarResult<Vec<_>>>()?;
        let Some(schema) = batches.first().map(RecordBatch::schema) else {
            gar_bail!(ChunkNotFound: "no chunk files under {}", path.display());
        };
        Ok(concat_batches(&schema, &batches)?)
    }

    fn exists(&self, path: &Path) -> bool {
        path.exists()
    }
}

fn load_file(path: &Path, file_type: FileType, options: &LoadOptions) -> GarResult<RecordBatch> {
    trace!("loading {} chunk {}", file_type, path.display());
    match file_type {
        FileType::Parquet => read_parquet(path, options),
        FileType::Csv => read_csv(path, options),
        FileType::Orc => {
            gar_bail!(UnsupportedFormat: "no {} decoder for {}", file_type, path.display())
        }
    }
}

fn read_parquet(path: &Path, options: &LoadOptions) -> GarResult<RecordBatch> {
    let builder = ParquetRecordBatchReaderBuilder::try_new(File::open(path)?)?;
    let schema = builder.schema().clone();
    let batches = builder
        .with_batch_size(options.batch_size())
        .build()?
        .collect::<Result<Vec<_>, _>>()?;
    Ok(concat_batches(&schema, &batches)?)
}

fn read_csv(path: &Path, options: &LoadOptions) -> GarResult<RecordBatch> {
    let mut file = File::open(path)?;
    let schema = match options.schema() {
        Some(schema) => schema.clone(),
        None => {
            let format = Format::default()
                .with_header(options.header())
                .with_delimiter(options.delimiter());
            let (schema, _) = format.infer_schema(&mut file, None)?;
            file.seek(SeekFrom::Start(0))?;
            Arc::new(schema)
        }
    };

    let batches = ReaderBuilder::new(schema.clone())
        .with_header(options.header())
        .with_delimiter(options.delimiter())
        .with_batch_size(options.batch_size())
        .build(file)?
        .collect::<Result<Vec<_>, _>>()?;
    Ok(concat_batches(&schema, &batches)?)
}

/// Every regular file under `dir`, in lexicographic path order. Hidden files and bookkeeping
/// files such as `_SUCCESS` are skipped.
fn list_files(dir: &Path) -> GarResult<Vec<PathBuf>> {
    let mut files = Vec::new();
    let mut pending = vec![dir.to_path_buf()];
    while let Some(next) = pending.pop() {
        for entry in fs::read_dir(&next)? {
            let path = entry?.path();
            if is_hidden(&path) {
                continue;
            }
            if path.is_dir() {
                pending.push(path);
            } else {
                files.push(path);
            }
        }
    }
    files.sort();
    Ok(files)
}

fn is_hidden(path: &Path) -> bool {
    path.file_name()
        .and_then(|name| name.to_str())
        .is_some_and(|name| name.starts_with('.') || name.starts_with('_'))
}
