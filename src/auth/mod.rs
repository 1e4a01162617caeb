pub mod token_store;
