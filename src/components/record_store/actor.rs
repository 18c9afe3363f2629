use super::{RecordFields, RecordId, RecordStore, TermId, EXTERNAL_ID_KEY};
use crate::config::Config;
use crate::error::{store_error, ImportResult};
use async_trait::async_trait;
use redis::{aio::MultiplexedConnection, AsyncCommands, Client as RedisClient};
use std::sync::Arc;
use tokio::sync::{mpsc, RwLock};
use tracing::info;

// Redis key constants
mod keys {
    pub const RECORDS_NEXT_ID: &str = "records:next_id";
    pub const RECORDS_EXTERNAL_INDEX: &str = "records:external_index";
    pub const TERMS_NEXT_ID: &str = "terms:next_id";

    pub fn record(id: u64) -> String {
        format!("record:{}", id)
    }

    pub fn terms(taxonomy: &str) -> String {
        format!("terms:{}", taxonomy)
    }

    pub fn record_terms(id: u64, taxonomy: &str) -> String {
        format!("record:{}:terms:{}", id, taxonomy)
    }
}

/// The record store actor that processes messages
pub struct RecordStoreActor {
    config: Arc<RwLock<Config>>,
    client: RedisClient,
    command_rx: mpsc::Receiver<StoreCommand>,
}

/// Commands that can be sent to the record store actor
pub enum StoreCommand {
    FindByExternalId(String, mpsc::Sender<ImportResult<Option<RecordId>>>),
    CreateRecord(RecordFields, mpsc::Sender<ImportResult<RecordId>>),
    UpdateRecord(RecordId, RecordFields, mpsc::Sender<ImportResult<()>>),
    SetField(RecordId, String, String, mpsc::Sender<ImportResult<()>>),
    ResolveOrCreateTerm(String, String, mpsc::Sender<ImportResult<(TermId, bool)>>),
    AssociateTerm(RecordId, TermId, String, mpsc::Sender<ImportResult<()>>),
    Shutdown,
}

/// Handle for communicating with the record store actor
#[derive(Clone)]
pub struct RecordStoreHandle {
    command_tx: mpsc::Sender<StoreCommand>,
}

impl RecordStoreHandle {
    /// Create a new empty handle for initialization purposes
    pub fn empty() -> Self {
        let (command_tx, _) = mpsc::channel(32);
        Self { command_tx }
    }

    async fn send<T>(
        &self,
        make: impl FnOnce(mpsc::Sender<ImportResult<T>>) -> StoreCommand,
    ) -> ImportResult<T> {
        let (response_tx, mut response_rx) = mpsc::channel(1);
        self.command_tx
            .send(make(response_tx))
            .await
            .map_err(|e| store_error(&format!("Actor mailbox error: {}", e)))?;

        response_rx
            .recv()
            .await
            .ok_or_else(|| store_error("Response channel closed"))?
    }

    /// Shutdown the actor
    pub async fn shutdown(&self) -> ImportResult<()> {
        let _ = self.command_tx.send(StoreCommand::Shutdown).await;
        Ok(())
    }
}

#[async_trait]
impl RecordStore for RecordStoreHandle {
    async fn find_by_external_id(&self, external_id: &str) -> ImportResult<Option<RecordId>> {
        let external_id = external_id.to_string();
        self.send(|tx| StoreCommand::FindByExternalId(external_id, tx))
            .await
    }

    async fn create_record(&self, fields: &RecordFields) -> ImportResult<RecordId> {
        let fields = fields.clone();
        self.send(|tx| StoreCommand::CreateRecord(fields, tx)).await
    }

    async fn update_record(&self, id: RecordId, fields: &RecordFields) -> ImportResult<()> {
        let fields = fields.clone();
        self.send(|tx| StoreCommand::UpdateRecord(id, fields, tx))
            .await
    }

    async fn set_field(&self, id: RecordId, key: &str, value: &str) -> ImportResult<()> {
        let key = key.to_string();
        let value = value.to_string();
        self.send(|tx| StoreCommand::SetField(id, key, value, tx))
            .await
    }

    async fn resolve_or_create_term(
        &self,
        name: &str,
        taxonomy: &str,
    ) -> ImportResult<(TermId, bool)> {
        let name = name.to_string();
        let taxonomy = taxonomy.to_string();
        self.send(|tx| StoreCommand::ResolveOrCreateTerm(name, taxonomy, tx))
            .await
    }

    async fn associate_term(&self, id: RecordId, term: TermId, taxonomy: &str) -> ImportResult<()> {
        let taxonomy = taxonomy.to_string();
        self.send(|tx| StoreCommand::AssociateTerm(id, term, taxonomy, tx))
            .await
    }
}

impl RecordStoreActor {
    /// Create a new actor and return its handle
    pub fn new(config: Arc<RwLock<Config>>) -> ImportResult<(Self, RecordStoreHandle)> {
        let (command_tx, command_rx) = mpsc::channel(32);

        // Open with the default URL; connection() re-reads the config and
        // reconnects if a different URL is configured
        let client = RedisClient::open("redis://127.0.0.1:6379")
            .map_err(|e| store_error(&format!("Failed to create Redis client: {}", e)))?;

        let actor = Self {
            config,
            client,
            command_rx,
        };

        let handle = RecordStoreHandle { command_tx };

        Ok((actor, handle))
    }

    /// Start the actor's processing loop
    pub async fn run(&mut self) {
        info!("Record store actor started");

        while let Some(cmd) = self.command_rx.recv().await {
            match cmd {
                StoreCommand::FindByExternalId(external_id, response_tx) => {
                    let result = self.find_by_external_id(&external_id).await;
                    let _ = response_tx.send(result).await;
                }
                StoreCommand::CreateRecord(fields, response_tx) => {
                    let result = self.create_record(&fields).await;
                    let _ = response_tx.send(result).await;
                }
                StoreCommand::UpdateRecord(id, fields, response_tx) => {
                    let result = self.update_record(id, &fields).await;
                    let _ = response_tx.send(result).await;
                }
                StoreCommand::SetField(id, key, value, response_tx) => {
                    let result = self.set_field(id, &key, &value).await;
                    let _ = response_tx.send(result).await;
                }
                StoreCommand::ResolveOrCreateTerm(name, taxonomy, response_tx) => {
                    let result = self.resolve_or_create_term(&name, &taxonomy).await;
                    let _ = response_tx.send(result).await;
                }
                StoreCommand::AssociateTerm(id, term, taxonomy, response_tx) => {
                    let result = self.associate_term(id, term, &taxonomy).await;
                    let _ = response_tx.send(result).await;
                }
                StoreCommand::Shutdown => {
                    info!("Record store actor shutting down");
                    break;
                }
            }
        }

        info!("Record store actor shut down");
    }

    /// Get a redis connection
    async fn connection(&self) -> ImportResult<MultiplexedConnection> {
        // Reconnect with the configured URL if it changed since startup
        let redis_url = {
            let config_guard = self.config.read().await;
            config_guard.redis_url.clone()
        };

        let client = if redis_url != "redis://127.0.0.1:6379" {
            RedisClient::open(redis_url)
                .map_err(|e| store_error(&format!("Failed to create Redis client: {}", e)))?
        } else {
            self.client.clone()
        };

        client
            .get_multiplexed_async_connection()
            .await
            .map_err(|e| store_error(&format!("Failed to connect to Redis: {}", e)))
    }

    async fn find_by_external_id(&self, external_id: &str) -> ImportResult<Option<RecordId>> {
        let mut conn = self.connection().await?;
        let id: Option<RecordId> = conn
            .hget(keys::RECORDS_EXTERNAL_INDEX, external_id)
            .await?;
        Ok(id)
    }

    async fn create_record(&self, fields: &RecordFields) -> ImportResult<RecordId> {
        let mut conn = self.connection().await?;
        let id: RecordId = conn.incr(keys::RECORDS_NEXT_ID, 1).await?;
        self.write_fields(&mut conn, id, fields).await?;
        Ok(id)
    }

    async fn update_record(&self, id: RecordId, fields: &RecordFields) -> ImportResult<()> {
        let mut conn = self.connection().await?;
        self.write_fields(&mut conn, id, fields).await
    }

    async fn write_fields(
        &self,
        conn: &mut MultiplexedConnection,
        id: RecordId,
        fields: &RecordFields,
    ) -> ImportResult<()> {
        let items: Vec<(&str, String)> = vec![
            ("title", fields.title.clone()),
            ("content", fields.content.clone()),
            ("record_type", fields.record_type.clone()),
            ("status", fields.status.clone()),
            ("comment_status", fields.comment_status.clone()),
            ("ping_status", fields.ping_status.clone()),
            ("author", fields.author.to_string()),
        ];
        let _: () = conn.hset_multiple(keys::record(id), &items).await?;
        Ok(())
    }

    async fn set_field(&self, id: RecordId, key: &str, value: &str) -> ImportResult<()> {
        let mut conn = self.connection().await?;
        let _: () = conn.hset(keys::record(id), key, value).await?;

        // The external identifier doubles as the lookup index
        if key == EXTERNAL_ID_KEY {
            let _: () = conn
                .hset(keys::RECORDS_EXTERNAL_INDEX, value, id)
                .await?;
        }
        Ok(())
    }

    async fn resolve_or_create_term(
        &self,
        name: &str,
        taxonomy: &str,
    ) -> ImportResult<(TermId, bool)> {
        let mut conn = self.connection().await?;
        let existing: Option<TermId> = conn.hget(keys::terms(taxonomy), name).await?;
        if let Some(id) = existing {
            return Ok((id, false));
        }

        // Imports are externally serialized, so read-then-create is safe here
        let id: TermId = conn.incr(keys::TERMS_NEXT_ID, 1).await?;
        let _: () = conn.hset(keys::terms(taxonomy), name, id).await?;
        Ok((id, true))
    }

    async fn associate_term(&self, id: RecordId, term: TermId, taxonomy: &str) -> ImportResult<()> {
        let mut conn = self.connection().await?;
        let _: () = conn.sadd(keys::record_terms(id, taxonomy), term).await?;
        Ok(())
    }
}
