pub mod header;
pub mod selectors;
pub mod timeline_flow;
