//! Integration tests for marathon-deploy


mod test_client;
mod test_config;
