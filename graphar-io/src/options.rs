use arrow_schema::SchemaRef;

const DEFAULT_BATCH_SIZE: usize = 8192;

/// Options controlling how a [`crate::ChunkLoader`] decodes one chunk.
#[derive(Debug, Clone)]
pub struct LoadOptions {
    header: bool,
    recursive: bool,
    delimiter: u8,
    batch_size: usize,
    schema: Option<SchemaRef>,
}

impl Default for LoadOptions {
    fn default() -> Self {
        Self {
            header: true,
            recursive: false,
            delimiter: b',',
            batch_size: DEFAULT_BATCH_SIZE,
            schema: None,
        }
    }
}

impl LoadOptions {
    /// Whether CSV chunks start with a header row.
    pub fn with_header(mut self, header: bool) -> Self {
        self.header = header;
        self
    }

    /// Load every file under a directory path as one table.
    pub fn with_recursive(mut self, recursive: bool) -> Self {
        self.recursive = recursive;
        self
    }

    /// The CSV field delimiter.
    pub fn with_delimiter(mut self, delimiter: u8) -> Self {
        self.delimiter = delimiter;
        self
    }

    /// The number of rows decoded per internal batch before concatenation.
    pub fn with_batch_size(mut self, batch_size: usize) -> Self {
        self.batch_size = batch_size.max(1);
        self
    }

    /// The schema CSV chunks are decoded with. Without one, the schema is inferred.
    pub fn with_schema(mut self, schema: SchemaRef) -> Self {
        self.schema = Some(schema);
        self
    }

    pub fn header(&self) -> bool {
        self.header
    }

    pub fn recursive(&self) -> bool {
        self.recursive
    }

    pub fn delimiter(&self) -> u8 {
        self.delimiter
    }

    pub fn batch_size(&self) -> usize {
        self.batch_size
    }

    pub fn schema(&self) -> Option<&SchemaRef> {
        self.schema.as_ref()
    }
}
