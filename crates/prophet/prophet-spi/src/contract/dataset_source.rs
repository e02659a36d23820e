//! Dataset source trait definition.

use std::io::Read;
use std::path::Path;

use crate::error::Result;
use crate::model::Dataset;

/// Trait for sources that turn tabular input into a [`Dataset`].
pub trait DatasetSource: Send + Sync {
    /// Source name.
    fn name(&self) -> &str;

    /// Read a dataset from any byte stream.
    fn load_reader(&self, reader: &mut dyn Read) -> Result<Dataset>;

    /// Read a dataset from a file on disk.
    fn load_path(&self, path: &Path) -> Result<Dataset>;
}
