//! Fetch Messages
//!
//! Fetches run as spawned tasks and report back to the UI task over an mpsc
//! channel. Results are tagged so the receiver can drop ones that belong to a
//! program mount or overlay generation that is no longer current.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use tokio::sync::mpsc;

use crate::client::{DetailFetcher, ScheduleSource};
use crate::error::FetchError;
use crate::overlay::DetailRequest;
use crate::schedule::ScheduleDocument;

static NEXT_MOUNT: AtomicU64 = AtomicU64::new(1);
static NEXT_OVERLAY: AtomicU64 = AtomicU64::new(1);

/// Identifies one lifetime of a program view
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct MountId(u64);

impl MountId {
    /// Allocate a fresh id
    pub fn next() -> Self {
        Self(NEXT_MOUNT.fetch_add(1, Ordering::Relaxed))
    }
}

/// Identifies one detail overlay
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct OverlayId(u64);

impl OverlayId {
    /// Allocate a fresh id
    pub fn next() -> Self {
        Self(NEXT_OVERLAY.fetch_add(1, Ordering::Relaxed))
    }
}

/// Completed fetch, delivered to the UI task
#[derive(Debug)]
pub enum ProgramMessage {
    /// The schedule fetch for `mount` finished
    ScheduleFetched {
        /// Mount that issued the fetch
        mount: MountId,
        /// Parsed document or the failure
        result: Result<ScheduleDocument, FetchError>,
    },
    /// A detail document fetch finished
    DetailFetched {
        /// Overlay that issued the fetch
        overlay: OverlayId,
        /// Generation of the request
        generation: u64,
        /// Markdown text or the failure
        result: Result<String, FetchError>,
    },
}

/// Run the schedule fetch for `mount` in the background
///
/// If the receiver is gone by the time the fetch completes, the result is
/// dropped.
pub fn spawn_schedule_fetch(
    source: Arc<dyn ScheduleSource>,
    mount: MountId,
    tx: mpsc::Sender<ProgramMessage>,
) -> tokio::task::JoinHandle<()> {
    tokio::spawn(async move {
        let result = source.fetch_schedule().await;
        let _ = tx.send(ProgramMessage::ScheduleFetched { mount, result }).await;
    })
}

/// Run a detail fetch in the background
pub fn spawn_detail_fetch(
    fetcher: Arc<dyn DetailFetcher>,
    request: DetailRequest,
    tx: mpsc::Sender<ProgramMessage>,
) -> tokio::task::JoinHandle<()> {
    tokio::spawn(async move {
        let result = fetcher.fetch_text(&request.url).await;
        let _ = tx
            .send(ProgramMessage::DetailFetched {
                overlay: request.overlay,
                generation: request.generation,
                result,
            })
            .await;
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;

    struct StaticSchedule;

    #[async_trait]
    impl ScheduleSource for StaticSchedule {
        fn name(&self) -> &str {
            "static"
        }

        async fn fetch_schedule(&self) -> Result<ScheduleDocument, FetchError> {
            Ok(ScheduleDocument::default())
        }
    }

    struct EchoFetcher;

    #[async_trait]
    impl DetailFetcher for EchoFetcher {
        async fn fetch_text(&self, url: &str) -> Result<String, FetchError> {
            Ok(format!("# {url}"))
        }
    }

    #[test]
    fn test_ids_are_unique() {
        assert_ne!(MountId::next(), MountId::next());
        assert_ne!(OverlayId::next(), OverlayId::next());
    }

    #[tokio::test]
    async fn test_schedule_fetch_reports_mount() {
        let (tx, mut rx) = mpsc::channel(4);
        let mount = MountId::next();
        spawn_schedule_fetch(Arc::new(StaticSchedule), mount, tx)
            .await
            .unwrap();
        match rx.recv().await {
            Some(ProgramMessage::ScheduleFetched { mount: m, result }) => {
                assert_eq!(m, mount);
                assert!(result.unwrap().days.is_empty());
            }
            other => panic!("unexpected message: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_detail_fetch_reports_generation() {
        let (tx, mut rx) = mpsc::channel(4);
        let overlay = OverlayId::next();
        let request = DetailRequest {
            overlay,
            generation: 7,
            url: "bio.md".to_string(),
        };
        spawn_detail_fetch(Arc::new(EchoFetcher), request, tx)
            .await
            .unwrap();
        match rx.recv().await {
            Some(ProgramMessage::DetailFetched {
                overlay: o,
                generation,
                result,
            }) => {
                assert_eq!(o, overlay);
                assert_eq!(generation, 7);
                assert_eq!(result.unwrap(), "# bio.md");
            }
            other => panic!("unexpected message: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_closed_receiver_does_not_panic() {
        let (tx, rx) = mpsc::channel(1);
        drop(rx);
        spawn_schedule_fetch(Arc::new(StaticSchedule), MountId::next(), tx)
            .await
            .unwrap();
    }
}
