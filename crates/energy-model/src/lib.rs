pub mod error;
pub mod metadata;
pub mod options;
pub mod report;
pub mod run;
pub mod schema;
pub mod table;

pub use error::{ModelError, Result};
pub use metadata::RunMetadata;
pub use options::{PipelineOptions, TransformOptions, ValidationOptions};
pub use report::{CheckName, CheckResult, ValidationReport};
pub use run::{RawTable, RunRecord};
pub use schema::StarSchema;
pub use table::{ForeignKey, TableName};
