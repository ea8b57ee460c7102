mod intent;

pub use intent::{
    entity_name, extract_intent, FilterTree, Literal, QueryIntent, SortTerm, DEFAULT_LIMIT,
    DEFAULT_OFFSET,
};
