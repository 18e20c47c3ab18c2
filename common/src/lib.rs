//! Trait-Theme Timeline Common Library
//!
//! CLI・デスクトップ・Web(WASM)で共有される型と処理

pub mod types;
pub mod error;
pub mod loader;
pub mod date;
pub mod selector;
pub mod view;
pub mod geometry;
pub mod chain;
pub mod viewport;

pub use types::{Combination, Record, Selection};
pub use error::{Error, Result};
pub use loader::{guess_delimiter, load_file, load_or_empty, parse_records, DEFAULT_DATA_PATH};
pub use date::{compare_dates, locale_compare, parse_timestamp, DateKey};
pub use selector::{background_image, combinations, filter_sorted, sort_by_date, theme_options, trait_options};
pub use view::TimelineView;
pub use geometry::{Point, Rect, Size, Vector};
pub use chain::{Chain, ChainEdge, ChainNode};
pub use viewport::Viewport;
