use futures::stream::FuturesOrdered;
use futures::{StreamExt, TryStreamExt};
use tracing::{debug, info, warn};

use super::ContentResolver;
use crate::error::Failure;
use crate::models::{Episode, EpisodeKey, PartialProgram, Program, ProgramKey};
use crate::parser::program;
use crate::Result;

impl ContentResolver {
    /// Every program on the home page, fully resolved, in home page order.
    ///
    /// One task per program page. The first failure in home page order
    /// fails the whole call; siblings still in flight finish on their own
    /// and are discarded. Expensive: callers should cache the result.
    pub async fn fetch_programs(&self) -> Result<Vec<Program>> {
        let html = self.get(&self.endpoints.base_url).await?;
        let partials = program::parse_partial_programs(&html)?;
        debug!("Home page lists {} programs", partials.len());

        let programs = self.fetch_program_details(partials).await?;
        info!("Resolved {} programs", programs.len());
        Ok(programs)
    }

    async fn fetch_program_details(&self, partials: Vec<PartialProgram>) -> Result<Vec<Program>> {
        let tasks: FuturesOrdered<_> = partials
            .into_iter()
            .map(|partial| {
                let resolver = self.clone();
                let url = self.endpoints.page_url(&partial.path);
                debug!("Fetching details of {} from {}", partial.name, url);
                tokio::spawn(async move { resolver.fetch_program_at(&url).await })
            })
            .collect();

        tasks
            .map(|joined| joined.unwrap_or_else(|e| std::panic::resume_unwind(e.into_panic())))
            .try_collect::<Vec<_>>()
            .await
            .inspect_err(|e| warn!("Program fan-out stopped: {}", e))
    }

    pub async fn fetch_program(&self, key: &ProgramKey) -> Result<Program> {
        self.fetch_program_at(&self.endpoints.page_url(&key.path)).await
    }

    /// First episode of the program page whose node id matches, in playlist order.
    pub async fn fetch_episode(&self, key: &EpisodeKey) -> Result<Episode> {
        let program = self
            .fetch_program(&ProgramKey::new(key.program_path.as_str()))
            .await?;
        program
            .into_episode(&key.node_id)
            .ok_or(Failure::NoEpisodeFound)
    }

    async fn fetch_program_at(&self, url: &str) -> Result<Program> {
        let html = self.get(url).await?;
        program::parse(&html)
    }
}
