use crate::domain::model::{GymDocument, GymRow};
use crate::utils::error::Result;
use async_trait::async_trait;

pub trait Storage: Send + Sync {
    fn read_file(&self, path: &str) -> impl std::future::Future<Output = Result<Vec<u8>>> + Send;
    fn write_file(
        &self,
        path: &str,
        data: &[u8],
    ) -> impl std::future::Future<Output = Result<()>> + Send;
}

pub trait ConfigProvider: Send + Sync {
    fn database_path(&self) -> &str;
    fn output_path(&self) -> &str;
}

#[async_trait]
pub trait Pipeline: Send + Sync {
    async fn extract(&self) -> Result<Vec<GymRow>>;
    async fn transform(&self, rows: Vec<GymRow>) -> Result<GymDocument>;
    async fn load(&self, document: GymDocument) -> Result<String>;
}
