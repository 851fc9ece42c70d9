pub mod corpus_stats;
pub mod layout_stats;
pub mod optimize;
