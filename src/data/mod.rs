mod loader;

pub use loader::{
    DEFAULT_DATASET_PATH, Dataset, LoadReport, coerce_number, load_dataset,
    load_dataset_from_reader, parse_dataset,
};
