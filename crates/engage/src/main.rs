//! Engagement demo: track one view for a blog post, then poll its
//! counters until Ctrl-C.
//!
//! Configured through the environment:
//! - `API_BASE_URL`      server to talk to (default `http://localhost:3000`)
//! - `BLOG_SLUG`         post to engage with (default `hello-world`)
//! - `POLL_INTERVAL_SECS` seconds between count fetches (default `5`)
//! - `GUEST_STORE_PATH`  identity file (default `.meridian-guest.json`)

use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use meridian_engage::api::EngagementApi;
use meridian_engage::identity::{FileStore, IdentityProvider};
use meridian_engage::tracker::{CounterPoller, ViewTracker, DEFAULT_VIEW_DEBOUNCE};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "meridian_engage=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let base_url =
        std::env::var("API_BASE_URL").unwrap_or_else(|_| "http://localhost:3000".to_string());
    let slug = std::env::var("BLOG_SLUG").unwrap_or_else(|_| "hello-world".to_string());
    let poll_secs: u64 = match std::env::var("POLL_INTERVAL_SECS") {
        Ok(raw) => raw
            .parse()
            .context("POLL_INTERVAL_SECS must be a whole number of seconds")?,
        Err(_) => 5,
    };
    let store_path =
        std::env::var("GUEST_STORE_PATH").unwrap_or_else(|_| ".meridian-guest.json".to_string());

    let identity = IdentityProvider::new(FileStore::new(&store_path));
    let guest_id = identity.get_or_create();
    tracing::info!(%guest_id, %base_url, %slug, "Starting engagement demo");

    let api = Arc::new(EngagementApi::new(base_url));

    // One debounced view for this "page load".
    let tracker = ViewTracker::new(DEFAULT_VIEW_DEBOUNCE, {
        let api = api.clone();
        let slug = slug.clone();
        let guest_id = guest_id.clone();
        move || async move {
            api.track_view(&slug, Some(&guest_id))
                .await
                .map(|count| count.views)
        }
    });
    tracker.notify_view();

    // Poll the counters so concurrent likes/views from other visitors show up.
    let (poller, mut counts) = CounterPoller::spawn(Duration::from_secs(poll_secs.max(1)), {
        let api = api.clone();
        let slug = slug.clone();
        let guest_id = guest_id.clone();
        move || {
            let api = api.clone();
            let slug = slug.clone();
            let guest_id = guest_id.clone();
            async move { api.fetch_counts(&slug, Some(&guest_id)).await }
        }
    });

    loop {
        tokio::select! {
            _ = tokio::signal::ctrl_c() => {
                tracing::info!("Received Ctrl-C, stopping");
                break;
            }
            changed = counts.changed() => {
                if changed.is_err() {
                    break;
                }
                let snapshot = counts.borrow_and_update().clone();
                if let Some(snapshot) = snapshot {
                    tracing::info!(
                        views = snapshot.views,
                        likes = snapshot.likes,
                        liked = snapshot.is_liked,
                        "Current counts"
                    );
                }
            }
        }
    }

    tracker.cancel();
    poller.shutdown().await;
    tracing::info!("Engagement demo stopped");
    Ok(())
}
