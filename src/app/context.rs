use std::sync::Arc;

use crate::app::error::Result;
use crate::client::Client;
use crate::config::Config;
use crate::store::StoryStore;

pub struct AppContext {
    pub config: Config,
    pub client: Arc<Client>,
    pub stories: StoryStore,
}

impl AppContext {
    pub fn new(config: Config) -> Result<Self> {
        let client = Arc::new(Client::from_config(&config.api)?);
        let stories = StoryStore::new(client.clone());

        Ok(Self {
            config,
            client,
            stories,
        })
    }
}
