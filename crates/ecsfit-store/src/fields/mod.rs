//! Field Tree Reader: package field-definition documents per data stream

mod reader;

pub use reader::{
    fields_dir, is_excluded, read_data_stream, read_field_file, FieldTreeSet,
    EXCLUDED_FIELD_FILES, FIELD_FILE_EXTENSIONS, FIELDS_DIR,
};
