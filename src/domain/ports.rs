use crate::domain::model::Patch;
use crate::utils::error::Result;

pub trait Storage: Send + Sync {
    /// `Ok(false)` only when the file is absent; other lookup failures are errors.
    fn exists(&self, path: &str) -> impl std::future::Future<Output = Result<bool>> + Send;
    fn read_to_string(&self, path: &str)
        -> impl std::future::Future<Output = Result<String>> + Send;
    fn write(
        &self,
        path: &str,
        contents: &str,
    ) -> impl std::future::Future<Output = Result<()>> + Send;
    /// Resolved location of `path`, for messages and reports.
    fn display_path(&self, path: &str) -> String;
}

pub trait PatchSource: Send + Sync {
    fn patches(&self) -> Vec<Patch>;
    fn default_target(&self) -> Option<&str>;
}
