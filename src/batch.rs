use std::sync::Arc;

use indicatif::{ProgressBar, ProgressStyle};
use reqwest::Client;
use tokio::sync::{mpsc, Semaphore};
use tracing::warn;

use crate::error::{FetchError, ScrapeError};
use crate::extract::{self, Heading};
use crate::fetch;

/// Result for one input URL. Empty title and headings when the fetch failed
/// or the page simply had none.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageResult {
    pub url: String,
    pub title: String,
    pub headings: Vec<Heading>,
}

impl PageResult {
    /// Empty-result entry for a URL whose fetch failed.
    pub fn failed(url: String) -> Self {
        PageResult {
            url,
            title: String::new(),
            headings: Vec::new(),
        }
    }
}

/// Batch counters returned alongside the pages.
#[derive(Debug)]
pub struct BatchStats {
    pub total: usize,
    pub ok: usize,
    pub errors: usize,
}

/// One result per input URL, in input order.
#[derive(Debug)]
pub struct Batch {
    pub pages: Vec<PageResult>,
    pub stats: BatchStats,
}

struct FetchOutcome {
    index: usize,
    page: PageResult,
    error: Option<FetchError>,
}

/// Fetch and extract every URL, bounded by `concurrency` in-flight requests.
///
/// Results land in slots keyed by input position, so the returned batch is
/// always in input order regardless of completion order. A failed URL
/// contributes an empty entry and never disturbs the rest of the batch.
pub async fn run(
    client: &Client,
    urls: Vec<String>,
    concurrency: usize,
) -> Result<Batch, ScrapeError> {
    if urls.is_empty() {
        return Err(ScrapeError::EmptyInput);
    }

    let total = urls.len();
    let semaphore = Arc::new(Semaphore::new(concurrency.max(1)));

    let pb = ProgressBar::new(total as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("[{elapsed_precise}] {bar:40} {pos}/{len} ({per_sec}, eta {eta})")
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("=> "),
    );

    // Channel: workers send outcomes, the single receiver fills the slots.
    let (tx, mut rx) = mpsc::channel::<FetchOutcome>(concurrency.max(1) * 2);

    for (index, url) in urls.iter().cloned().enumerate() {
        let client = client.clone();
        let sem = Arc::clone(&semaphore);
        let tx = tx.clone();

        tokio::spawn(async move {
            let _permit = sem.acquire().await.unwrap();
            let outcome = match fetch_and_extract(&client, &url).await {
                Ok(page) => FetchOutcome {
                    index,
                    page,
                    error: None,
                },
                Err(e) => FetchOutcome {
                    index,
                    page: PageResult::failed(url),
                    error: Some(e),
                },
            };
            let _ = tx.send(outcome).await;
        });
    }

    // Drop our copy of tx so rx closes once every task has reported.
    drop(tx);

    let mut slots: Vec<Option<PageResult>> = (0..total).map(|_| None).collect();
    let mut ok = 0usize;
    let mut errors = 0usize;

    while let Some(outcome) = rx.recv().await {
        match &outcome.error {
            Some(e) => {
                warn!("failed to fetch {}: {}", outcome.page.url, e);
                errors += 1;
            }
            None => ok += 1,
        }
        slots[outcome.index] = Some(outcome.page);
        pb.inc(1);
    }

    pb.finish_and_clear();

    // A task that died before reporting still leaves its URL an empty entry.
    let pages = slots
        .into_iter()
        .zip(urls)
        .map(|(slot, url)| slot.unwrap_or_else(|| PageResult::failed(url)))
        .collect();

    Ok(Batch {
        pages,
        stats: BatchStats { total, ok, errors },
    })
}

async fn fetch_and_extract(client: &Client, url: &str) -> Result<PageResult, FetchError> {
    let body = fetch::fetch_page(client, url).await?;
    let (title, headings) = extract::extract_page(&body);
    Ok(PageResult {
        url: url.to_string(),
        title,
        headings,
    })
}

// ── Tests ──

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fetch::build_client;

    fn page(title: &str, body: &str) -> String {
        format!(
            "<html><head><title>{}</title></head><body>{}</body></html>",
            title, body
        )
    }

    #[tokio::test]
    async fn empty_input_fails_before_any_network_call() {
        let client = build_client().unwrap();
        let err = run(&client, Vec::new(), 4).await.unwrap_err();
        assert!(matches!(err, ScrapeError::EmptyInput));
    }

    #[tokio::test]
    async fn batch_preserves_input_order() {
        let mut server = mockito::Server::new_async().await;
        let mut mocks = Vec::new();
        for (path, title) in [("/a", "Alpha"), ("/b", "Beta"), ("/c", "Gamma")] {
            mocks.push(
                server
                    .mock("GET", path)
                    .with_body(page(title, "<h1>Top</h1>"))
                    .create_async()
                    .await,
            );
        }

        let base = server.url();
        let urls: Vec<String> = ["/a", "/b", "/c"]
            .iter()
            .map(|p| format!("{base}{p}"))
            .collect();

        let client = build_client().unwrap();
        let batch = run(&client, urls.clone(), 3).await.unwrap();

        assert_eq!(batch.pages.len(), urls.len());
        for (i, result) in batch.pages.iter().enumerate() {
            assert_eq!(result.url, urls[i]);
        }
        assert_eq!(batch.pages[0].title, "Alpha");
        assert_eq!(batch.pages[2].title, "Gamma");
        assert_eq!(batch.stats.ok, 3);
        assert_eq!(batch.stats.errors, 0);
    }

    #[tokio::test]
    async fn middle_failure_is_isolated() {
        let mut server = mockito::Server::new_async().await;
        let _m1 = server
            .mock("GET", "/first")
            .with_body(page("First", "<h1>A</h1>"))
            .create_async()
            .await;
        let _m2 = server
            .mock("GET", "/broken")
            .with_status(500)
            .create_async()
            .await;
        let _m3 = server
            .mock("GET", "/last")
            .with_body(page("Last", "<h2>Z</h2>"))
            .create_async()
            .await;

        let base = server.url();
        let urls: Vec<String> = ["/first", "/broken", "/last"]
            .iter()
            .map(|p| format!("{base}{p}"))
            .collect();

        let client = build_client().unwrap();
        let batch = run(&client, urls, 2).await.unwrap();

        assert_eq!(batch.pages.len(), 3);
        assert_eq!(batch.pages[0].title, "First");
        assert_eq!(batch.pages[0].headings.len(), 1);
        assert_eq!(batch.pages[1].title, "");
        assert!(batch.pages[1].headings.is_empty());
        assert_eq!(batch.pages[2].title, "Last");
        assert_eq!(batch.pages[2].headings.len(), 1);
        assert_eq!(batch.stats.ok, 2);
        assert_eq!(batch.stats.errors, 1);
    }

    #[tokio::test]
    async fn all_failed_still_returns_full_batch() {
        let mut server = mockito::Server::new_async().await;
        let _m1 = server
            .mock("GET", "/x")
            .with_status(503)
            .create_async()
            .await;
        let _m2 = server
            .mock("GET", "/y")
            .with_status(404)
            .create_async()
            .await;

        let base = server.url();
        let urls: Vec<String> = vec![format!("{base}/x"), format!("{base}/y")];

        let client = build_client().unwrap();
        let batch = run(&client, urls.clone(), 2).await.unwrap();

        assert_eq!(batch.pages.len(), 2);
        assert_eq!(batch.stats.ok, 0);
        assert_eq!(batch.stats.errors, 2);
        for (result, url) in batch.pages.iter().zip(&urls) {
            assert_eq!(&result.url, url);
            assert!(result.headings.is_empty());
        }
    }

    #[tokio::test]
    async fn sequential_bound_behaves_the_same() {
        let mut server = mockito::Server::new_async().await;
        let _m = server
            .mock("GET", "/only")
            .with_body(page("Solo", "<h1>One</h1><h3>Three</h3>"))
            .create_async()
            .await;

        let client = build_client().unwrap();
        let batch = run(&client, vec![format!("{}/only", server.url())], 1)
            .await
            .unwrap();
        assert_eq!(batch.pages[0].headings.len(), 2);
        assert_eq!(batch.stats.ok, 1);
    }
}
