pub use graphar_reader::*;
pub use {
    graphar_error as error, graphar_io as io, graphar_layout as layout, graphar_schema as schema,
};
