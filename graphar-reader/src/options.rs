use std::borrow::Cow;

use arrow_schema::SchemaRef;
use graphar_io::LoadOptions;
use graphar_schema::FileType;

use crate::ExecutionMode;

/// Options shared by every read a reader performs.
#[derive(Debug, Clone, Default)]
pub struct ReadOptions {
    execution: ExecutionMode,
    counter_file_type: FileType,
    load_options: LoadOptions,
}

impl ReadOptions {
    /// How the chunk loads of one read are executed. Defaults to [`ExecutionMode::Inline`].
    pub fn with_execution_mode(mut self, execution: ExecutionMode) -> Self {
        self.execution = execution;
        self
    }

    /// The file type counter chunks (`vertex_count`, `edge_count<n>`) are stored in.
    /// Defaults to Parquet.
    pub fn with_counter_file_type(mut self, file_type: FileType) -> Self {
        self.counter_file_type = file_type;
        self
    }

    /// The options handed to the chunk loader for every chunk.
    pub fn with_load_options(mut self, load_options: LoadOptions) -> Self {
        self.load_options = load_options;
        self
    }

    pub fn execution_mode(&self) -> &ExecutionMode {
        &self.execution
    }

    pub fn counter_file_type(&self) -> FileType {
        self.counter_file_type
    }

    pub fn load_options(&self) -> &LoadOptions {
        &self.load_options
    }

    /// The load options for one chunk of `file_type`. CSV carries no types, so CSV chunks are
    /// decoded with the `declared` schema when there is one, and every chunk of a group agrees
    /// on its column types.
    pub(crate) fn load_options_for<F>(&self, file_type: FileType, declared: F) -> Cow<'_, LoadOptions>
    where
        F: FnOnce() -> Option<SchemaRef>,
    {
        if file_type != FileType::Csv {
            return Cow::Borrowed(&self.load_options);
        }
        match declared() {
            Some(schema) => Cow::Owned(self.load_options.clone().with_schema(schema)),
            None => Cow::Borrowed(&self.load_options),
        }
    }
}
