mod node;
mod tree;

pub use node::{
    NodeFlags, OPTIONAL_KEY, PARAM_KEY, REGEX_KEY_PREFIX, RouteId, TrieNode, WILDCARD_KEY,
    segment_key,
};
pub use tree::{RouteTrie, search};
