pub mod cache;
pub mod catalog;
pub mod help_table;
pub mod pagination;

pub use cache::CatalogCache;
pub use catalog::{fetch_catalog, page_count, parse_entry, parse_page, HELP_COMMAND};
pub use help_table::HelpTable;
pub use pagination::{paginate, validate_count, MAX_PAGE_SIZE};
