use async_trait::async_trait;
use log::{debug, warn};
use serde_json::Value;

use crate::action::ActionRequest;
use crate::clients::errors::Result;
use crate::regions::{Region, RegionState};
use crate::view::{AlbumView, ArtistView, Clock, SystemClock};

/// Anything that can answer an action with the raw upstream JSON.
#[async_trait]
pub trait MetadataSource: Send + Sync {
    /// Run one action and return the parsed JSON body.
    async fn fetch(&self, request: &ActionRequest) -> Result<Value>;
}

/// Drives the artist and album panels. Each panel updates and fails on its own.
pub struct Explorer<S> {
    source: S,
    clock: Box<dyn Clock>,
    artist: Region<ArtistView>,
    album: Region<AlbumView>,
}

impl<S: MetadataSource> Explorer<S> {
    /// Explorer reading the year from the system clock.
    pub fn new(source: S) -> Self {
        Self::with_clock(source, Box::new(SystemClock))
    }

    /// Explorer with an injected clock, for deterministic release years.
    pub fn with_clock(source: S, clock: Box<dyn Clock>) -> Self {
        Explorer {
            source,
            clock,
            artist: Region::new("artist"),
            album: Region::new("album"),
        }
    }

    /// Current artist panel state.
    pub fn artist(&self) -> RegionState<ArtistView> {
        self.artist.snapshot()
    }

    /// Current album panel state.
    pub fn album(&self) -> RegionState<AlbumView> {
        self.album.snapshot()
    }

    /// Load an artist and their top albums. Selecting an artist empties the album panel.
    pub async fn show_artist(&self, name: &str) -> RegionState<ArtistView> {
        let ticket = self.artist.begin();
        self.album.clear();
        let outcome = self.load_artist(name).await;
        if let Err(e) = &outcome {
            warn!("Failed to load artist {name:?}: {e}");
        }
        if !self.artist.complete(ticket, outcome.map_err(|e| e.region_message())) {
            debug!("Artist {name:?} superseded by a newer request");
        }
        self.artist.snapshot()
    }

    /// Load one album into the album panel.
    pub async fn show_album(&self, artist: &str, album: &str) -> RegionState<AlbumView> {
        let ticket = self.album.begin();
        let outcome = self.load_album(artist, album).await;
        if let Err(e) = &outcome {
            warn!("Failed to load album {album:?} by {artist:?}: {e}");
        }
        if !self.album.complete(ticket, outcome.map_err(|e| e.region_message())) {
            debug!("Album {album:?} superseded by a newer request");
        }
        self.album.snapshot()
    }

    async fn load_artist(&self, name: &str) -> Result<ArtistView> {
        let info_request = ActionRequest::artist_info(name)?;
        let albums_request = ActionRequest::artist_albums(name)?;
        let (info, albums) = futures::try_join!(
            self.source.fetch(&info_request),
            self.source.fetch(&albums_request)
        )?;
        Ok(ArtistView::from_payloads(&info, &albums))
    }

    async fn load_album(&self, artist: &str, album: &str) -> Result<AlbumView> {
        let request = ActionRequest::album_info(artist, album)?;
        let payload = self.source.fetch(&request).await?;
        Ok(AlbumView::from_payload(&payload, self.clock.as_ref()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::action::Action;
    use crate::clients::errors::Error;
    use crate::view::{FixedClock, ReleaseYear};
    use serde_json::json;
    use std::collections::HashMap;
    use std::sync::Arc;
    use tokio::sync::Notify;

    #[derive(Default)]
    struct FakeSource {
        responses: HashMap<(Action, String), Value>,
        gate: Option<(String, Arc<Notify>)>,
    }

    impl FakeSource {
        fn with(mut self, action: Action, key: &str, payload: Value) -> Self {
            self.responses.insert((action, key.to_string()), payload);
            self
        }
    }

    #[async_trait]
    impl MetadataSource for FakeSource {
        async fn fetch(&self, request: &ActionRequest) -> Result<Value> {
            let key = request.album.clone().unwrap_or_else(|| request.artist.clone());
            if let Some((gated, notify)) = &self.gate {
                if *gated == key {
                    notify.notified().await;
                }
            }
            self.responses
                .get(&(request.action, key))
                .cloned()
                .ok_or(Error::ProxyStatus {
                    status: 502,
                    body: "{}".into(),
                })
        }
    }

    fn cher() -> FakeSource {
        FakeSource::default()
            .with(
                Action::ArtistInfo,
                "Cher",
                json!({"artist": {"name": "Cher", "bio": {"content": "Singer."}}}),
            )
            .with(
                Action::ArtistAlbums,
                "Cher",
                json!({"topalbums": {"album": [{"name": "Believe"}]}}),
            )
            .with(
                Action::AlbumInfo,
                "Believe",
                json!({"album": {
                    "artist": "Cher",
                    "name": "Believe",
                    "tags": {"tag": [{"name": "1998"}]},
                    "tracks": {"track": [
                        {"name": "Believe", "duration": 125, "@attr": {"rank": 1}},
                        {"name": "The Power", "duration": null, "@attr": {"rank": 2}}
                    ]}
                }}),
            )
    }

    #[tokio::test]
    async fn artist_then_album() {
        let explorer = Explorer::with_clock(cher(), Box::new(FixedClock(2026)));
        let RegionState::Ready(artist) = explorer.show_artist("Cher").await else {
            panic!("artist did not load");
        };
        assert_eq!(artist.albums, ["Believe"]);

        let RegionState::Ready(album) = explorer.show_album("Cher", "Believe").await else {
            panic!("album did not load");
        };
        assert_eq!(album.release, ReleaseYear::Year(1998));
        assert_eq!(album.tracks[0].duration, "2:05");
        assert_eq!(album.tracks[1].duration, "N/A");
        assert_eq!(album.total_runtime, "2:05");
    }

    #[tokio::test]
    async fn album_failure_leaves_artist_untouched() {
        let explorer = Explorer::with_clock(cher(), Box::new(FixedClock(2026)));
        explorer.show_artist("Cher").await;
        let before = explorer.artist();

        let state = explorer.show_album("Cher", "Unknown Album").await;
        assert!(matches!(state, RegionState::Failed(_)));
        assert_eq!(explorer.artist(), before);
        assert!(matches!(before, RegionState::Ready(_)));
    }

    #[tokio::test]
    async fn artist_failure_is_region_local() {
        let explorer = Explorer::with_clock(cher(), Box::new(FixedClock(2026)));
        let state = explorer.show_artist("Nobody").await;
        assert_eq!(
            state,
            RegionState::Failed("request failed with status 502".into())
        );
        assert_eq!(explorer.album(), RegionState::Empty);
    }

    #[tokio::test]
    async fn new_artist_clears_album_panel() {
        let explorer = Explorer::with_clock(cher(), Box::new(FixedClock(2026)));
        explorer.show_album("Cher", "Believe").await;
        assert!(matches!(explorer.album(), RegionState::Ready(_)));
        explorer.show_artist("Cher").await;
        assert_eq!(explorer.album(), RegionState::Empty);
    }

    #[tokio::test]
    async fn unexpected_payload_degrades_to_empty_album() {
        let source = cher().with(Action::AlbumInfo, "Broken", json!({"message": "?"}));
        let explorer = Explorer::with_clock(source, Box::new(FixedClock(2026)));
        let RegionState::Ready(view) = explorer.show_album("Cher", "Broken").await else {
            panic!("malformed payload should still render");
        };
        assert!(view.tracks.is_empty());
        assert_eq!(view.release, ReleaseYear::Unknown);
    }

    #[tokio::test]
    async fn stale_album_response_is_discarded() {
        let notify = Arc::new(Notify::new());
        let mut source = cher().with(
            Action::AlbumInfo,
            "Slow",
            json!({"album": {"name": "Slow"}}),
        );
        source.gate = Some(("Slow".to_string(), notify.clone()));
        let explorer = Explorer::with_clock(source, Box::new(FixedClock(2026)));

        let slow = explorer.show_album("Cher", "Slow");
        let fast = async {
            let state = explorer.show_album("Cher", "Believe").await;
            notify.notify_one();
            state
        };
        let (slow_state, fast_state) = tokio::join!(slow, fast);

        let RegionState::Ready(fast_view) = fast_state else {
            panic!("fast album did not load");
        };
        assert_eq!(fast_view.name, "Believe");
        // The slow response arrived last but must not replace the newer album
        assert_eq!(slow_state, RegionState::Ready(fast_view));
    }

    #[tokio::test]
    async fn missing_parameters_fail_without_fetching() {
        let explorer = Explorer::with_clock(FakeSource::default(), Box::new(FixedClock(2026)));
        let state = explorer.show_album("Cher", "  ").await;
        assert_eq!(
            state,
            RegionState::Failed("Missing required parameter: album".into())
        );
    }
}
