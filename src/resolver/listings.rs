use tracing::info;

use super::ContentResolver;
use crate::models::{Category, SearchHit};
use crate::parser::{category, search};
use crate::transport::RequestDescriptor;
use crate::Result;

impl ContentResolver {
    /// First page of results for `query`, newest first. No pagination.
    pub async fn search(&self, query: &str) -> Result<Vec<SearchHit>> {
        let request = RequestDescriptor::post_json(
            self.endpoints.search_url.as_str(),
            &self.endpoints.search_body(query),
        );
        let json = self.transport.fetch(&request).await?;
        let hits = search::parse(&json)?;
        info!("Search for {:?} returned {} hits", query, hits.len());
        Ok(hits)
    }

    pub async fn fetch_categories(&self) -> Result<Vec<Category>> {
        let json = self.get(&self.endpoints.categories_url).await?;
        category::parse(&json)
    }
}
