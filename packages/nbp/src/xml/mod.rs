//! XML helpers for the NBP feed.

mod utils;

pub use utils::{
    decode_xml, find_child, find_children, find_descendant, get_tag_name, get_text, required_text,
};
