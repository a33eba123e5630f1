pub mod transcript_store;
