mod provider_block_test;
mod required_providers_test;
mod source_address_test;

use provider_config::Block;
use serde_json::Value;

/// Builds a block tree the way the CLI receives it.
pub fn block_from_json(value: Value) -> Block {
    serde_json::from_value(value).expect("block json")
}
