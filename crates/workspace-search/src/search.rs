//! Search service over the query language and datastore traits.

mod engine;

pub use engine::SearchEngine;
