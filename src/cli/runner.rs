//! CLI runner - executes commands

use crate::cli::commands::{Cli, Commands, OutputFormat};
use crate::config::ClientConfig;
use crate::error::{Error, Result};
use crate::feed::{
    FeedView, FetchError, HttpPageFetcher, PageFetcher, PaginationController, PaginationState,
    Seed, EMPTY_FEED_HINT, EMPTY_FEED_TITLE, END_OF_FEED,
};
use crate::http::ApiClient;
use crate::scroll::{ManualVisibility, ScrollTrigger, Sentinel};
use crate::session::Session;
use crate::types::Page;
use serde_json::{json, Value};
use std::sync::Arc;
use tracing::{debug, info};

/// Sentinel the `browse` command scrolls into view
const FEED_BOTTOM: &str = "feed-bottom";

/// CLI runner
pub struct Runner {
    cli: Cli,
}

impl Runner {
    /// Create a new runner
    pub fn new(cli: Cli) -> Self {
        Self { cli }
    }

    /// Run the CLI command
    pub async fn run(&self) -> Result<()> {
        match &self.cli.command {
            Commands::Page { index } => self.page(*index).await,
            Commands::Browse {
                max_pages,
                prefetch,
            } => self.browse(*max_pages, *prefetch).await,
        }
    }

    /// Resolve client config: file, then environment, then flags
    pub fn client_config(&self) -> Result<ClientConfig> {
        let config = match &self.cli.config {
            Some(path) => ClientConfig::from_file(path)?,
            None => ClientConfig::default(),
        };
        let mut config = config.with_env_overrides()?;

        if let Some(url) = &self.cli.api_url {
            config.base_url.clone_from(url);
        }
        if let Some(size) = self.cli.page_size {
            config.page_size = size;
        }
        config.validate()?;
        Ok(config)
    }

    fn build_fetcher(&self, config: ClientConfig) -> Result<HttpPageFetcher> {
        let session = match &self.cli.token {
            Some(token) if !token.is_empty() => Session::with_token(token.as_str()),
            _ => Session::new(),
        };
        let client = ApiClient::new(config, session)?;
        Ok(HttpPageFetcher::new(client))
    }

    /// Fetch and print a single page
    async fn page(&self, index: u32) -> Result<()> {
        let config = self.client_config()?;
        let page_size = config.page_size;
        let fetcher = self.build_fetcher(config)?;

        let page = fetcher
            .fetch_page(index, page_size)
            .await
            .map_err(fetch_failure)?;

        self.output_message(&page_message(index, page_size, &page));
        Ok(())
    }

    /// Scroll through the feed until it ends, fails, or `max_pages` are loaded
    async fn browse(&self, max_pages: u32, prefetch: bool) -> Result<()> {
        let config = self.client_config()?;
        let page_size = config.page_size;
        info!(base_url = %config.base_url, page_size, max_pages, "Browsing feed");
        let fetcher = Arc::new(self.build_fetcher(config)?);

        let seed = if prefetch {
            let seed = match fetcher.fetch_page(0, page_size).await {
                Ok(page) => Seed::Page(page),
                Err(error) => Seed::Error(error),
            };
            Some(seed)
        } else {
            None
        };

        let controller = PaginationController::new(Arc::clone(&fetcher), page_size)?;
        let outcome = controller.initialize(seed).await;
        debug!(?outcome, "Feed initialized");

        let source = ManualVisibility::new();
        let sentinel = Sentinel::new(FEED_BOTTOM);
        let trigger = ScrollTrigger::attach(controller.clone(), &source, sentinel.clone())?;
        let mut updates = controller.subscribe();

        loop {
            let state = controller.state();
            // a failed load ends the run; retrying is left to the user
            if state.error.is_some()
                || state.cursor >= max_pages
                || !state.can_load_more()
            {
                break;
            }

            // error is None here, so only this load's result can satisfy the wait
            let before = state.cursor;
            source.fire(&sentinel);
            let state = updates
                .wait_for(|s| !s.loading && (s.cursor != before || s.error.is_some()))
                .await
                .map_err(|e| Error::Other(format!("Feed controller closed: {e}")))?
                .clone();
            self.output_message(&progress_message(&state));
        }

        trigger.detach();
        let view = controller.view();
        controller.teardown();

        self.output_message(&view_message(&view));
        Ok(())
    }

    /// Output a message in the selected format
    fn output_message(&self, msg: &Value) {
        match self.cli.format {
            OutputFormat::Json => {
                println!("{}", serde_json::to_string(msg).unwrap_or_default());
            }
            OutputFormat::Pretty => {
                println!("{}", serde_json::to_string_pretty(msg).unwrap_or_default());
            }
        }
    }
}

/// Turn a failed page fetch back into a CLI error
fn fetch_failure(error: FetchError) -> Error {
    match error.status {
        Some(401) => Error::Unauthorized {
            message: Some(error.message),
        },
        Some(status) => Error::http_status(status, Some(error.message)),
        None => Error::Other(error.message),
    }
}

fn page_message(index: u32, size: u32, page: &Page) -> Value {
    json!({
        "type": "PAGE",
        "page": {
            "index": index,
            "size": size,
            "count": page.count(),
            "items": page.items(),
        }
    })
}

fn progress_message(state: &PaginationState) -> Value {
    json!({
        "type": "PROGRESS",
        "progress": {
            "pages": state.cursor,
            "posts": state.len(),
            "exhausted": state.exhausted,
            "error": state.error.as_ref().map(FetchError::message),
        }
    })
}

fn view_message(view: &FeedView) -> Value {
    let feed = match view {
        FeedView::Loading => json!({ "view": "loading" }),
        FeedView::InitialLoadError { message } => json!({
            "view": "error",
            "message": message,
            "retry": true,
        }),
        FeedView::Empty => json!({
            "view": "empty",
            "title": EMPTY_FEED_TITLE,
            "hint": EMPTY_FEED_HINT,
        }),
        FeedView::Feed {
            items,
            loading,
            banner,
            end_reached,
        } => json!({
            "view": "feed",
            "items": items,
            "loading": loading,
            "banner": banner,
            "retry": banner.is_some(),
            "footer": end_reached.then_some(END_OF_FEED),
        }),
    };
    json!({ "type": "FEED", "feed": feed })
}
