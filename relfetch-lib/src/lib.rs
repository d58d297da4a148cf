pub mod collector;
pub mod config;
pub mod fetcher;
pub mod forge_client;
pub mod github;
pub mod logging;
pub mod repos;

#[cfg(test)]
pub mod test_helpers;
