mod mock_forge_client;

pub use mock_forge_client::MockForgeClient;

use crate::github::{Asset, Release, Repository};

pub fn repo(full_name: &str) -> Repository {
    Repository {
        full_name: full_name.to_string(),
    }
}

pub fn release(tag_name: &str, assets: Vec<Asset>) -> Release {
    Release {
        tag_name: tag_name.to_string(),
        assets,
    }
}

pub fn asset(name: &str, url: &str) -> Asset {
    Asset {
        name: name.to_string(),
        browser_download_url: url.to_string(),
        size: 1000,
    }
}
