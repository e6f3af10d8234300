mod fetch;
mod model;
mod pagination;
mod query;

pub use fetch::NewsClient;
pub use model::{Article, Results, Source, SourceId};
pub use pagination::{PAGE_SIZE, Search, total_pages};
pub use query::{DEFAULT_ENDPOINT, search_url};
