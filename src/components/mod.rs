// Export components
pub mod feed_import;
pub mod record_store;

// Re-export the public handles
pub use feed_import::FeedImportHandle;
pub use record_store::RecordStoreHandle;
