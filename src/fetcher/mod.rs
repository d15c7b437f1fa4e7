pub mod http_fetcher;

use async_trait::async_trait;
use url::Url;

use crate::app::Result;

/// One outbound GET, one attempt. Retry policy belongs to the caller.
#[async_trait]
pub trait Fetcher {
    async fn fetch(&self, url: &Url) -> Result<Vec<u8>>;
}
