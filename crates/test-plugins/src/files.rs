// In-memory file source for exercising the post-resolution fetch path.

use async_trait::async_trait;
use std::collections::HashMap;

use reso_core::resolver::plugin::FileSource;

#[derive(Debug, Clone, Default)]
pub struct StaticFileSource {
    files: HashMap<String, Vec<u8>>,
}

impl StaticFileSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_file(mut self, path: impl Into<String>, bytes: impl Into<Vec<u8>>) -> Self {
        self.files.insert(path.into(), bytes.into());
        self
    }
}

#[async_trait]
impl FileSource for StaticFileSource {
    async fn get_file(&self, path: &str) -> anyhow::Result<Vec<u8>> {
        self.files
            .get(path)
            .cloned()
            .ok_or_else(|| anyhow::anyhow!("file '{path}' is not available"))
    }
}
