use crate::domain::model::{Envelope, EnvelopeRequest, EnvelopeSummary};
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

/// Connection settings for the remote signing service plus the envelope to send.
pub trait ConfigProvider: Send + Sync {
    fn base_path(&self) -> &str;
    fn access_token(&self) -> Option<&str>;
    fn account_id(&self) -> Option<&str>;
    fn timeout_seconds(&self) -> u64;
    fn output_path(&self) -> &str;
    fn envelope_request(&self) -> Result<EnvelopeRequest>;
}

#[async_trait]
pub trait EnvelopeApi: Send + Sync {
    /// Submits a fully built envelope and returns the identifier assigned by
    /// the remote service.
    async fn create_envelope(&self, envelope: &Envelope) -> Result<EnvelopeSummary>;
}
