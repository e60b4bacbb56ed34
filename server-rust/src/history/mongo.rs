use super::{HistoryStore, JokeRecord, HISTORY_LIMIT};
use crate::{config::MongoConfig, HistoryResult};
use futures::TryStreamExt;
use mongodb::{
    bson::doc,
    options::{ClientOptions, ServerApi, ServerApiVersion},
    Client, Collection,
};
use tracing::info;

/// History kept in a MongoDB collection, one document per joke.
pub struct MongoHistoryStore {
    client: Client,
    collection: Collection<JokeRecord>,
}

impl MongoHistoryStore {
    /// Connect with the stable v1 server API and check the cluster answers.
    pub async fn connect(config: &MongoConfig) -> HistoryResult<Self> {
        let mut options = ClientOptions::parse(config.connection_uri()).await?;
        options.server_api = Some(
            ServerApi::builder()
                .version(ServerApiVersion::V1)
                .strict(true)
                .deprecation_errors(true)
                .build(),
        );

        let client = Client::with_options(options)?;
        let store = Self::from_client(client, &config.database, &config.collection);
        store.ping().await?;

        info!(
            database = %config.database,
            collection = %config.collection,
            "connected to MongoDB"
        );
        Ok(store)
    }

    #[must_use]
    pub fn from_client(client: Client, database: &str, collection: &str) -> Self {
        let collection = client.database(database).collection(collection);
        Self { client, collection }
    }

    pub async fn ping(&self) -> HistoryResult<()> {
        self.client
            .database("admin")
            .run_command(doc! { "ping": 1 })
            .await?;
        Ok(())
    }
}

#[async_trait::async_trait]
impl HistoryStore for MongoHistoryStore {
    async fn append(&self, email: &str, joke_text: &str) -> HistoryResult<()> {
        self.collection
            .insert_one(JokeRecord::new(email, joke_text))
            .await?;
        Ok(())
    }

    async fn fetch_recent(&self, email: &str) -> HistoryResult<Vec<String>> {
        // ObjectIds grow with insertion, so descending _id is newest first.
        let cursor = self
            .collection
            .find(doc! { "email": email })
            .sort(doc! { "_id": -1 })
            .limit(i64::try_from(HISTORY_LIMIT).unwrap_or(i64::MAX))
            .await?;

        let records: Vec<JokeRecord> = cursor.try_collect().await?;
        Ok(records.into_iter().map(|record| record.joke_text).collect())
    }
}
