//! End-to-end catalog scenarios over fixture pages and a local file server
//!
//! Run with: cargo test --test e2e_catalog

mod common;

use chosic_dl::{Error, TrackLinks, TrackError};
use common::*;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

async fn file_server() -> MockServer {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/audio/purple-dream.mp3"))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(AUDIO_BYTES))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/audio/missing.mp3"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;
    server
}

fn lofi_tracks(server: &MockServer) -> Vec<TrackFixture> {
    let file = Some(format!("{}/audio/purple-dream.mp3", server.uri()));
    let mut popup = TrackFixture::new(45402, "Sunset Drive", "Lukrembo", file.clone());
    popup.via_popup = true;
    vec![
        TrackFixture::new(45401, "Purple Dream", "Ghostrifter Official", file.clone()),
        popup,
        TrackFixture::new(45403, "Biscuit", "Lukrembo", file),
    ]
}

#[tokio::test]
async fn test_lofi_links_and_first_track() {
    let server = file_server().await;
    let tracks = lofi_tracks(&server);
    let site = catalog_site("lofi", std::slice::from_ref(&tracks));
    let (downloader, engine, scratch) = create_test_downloader(site);

    let TrackLinks { session, links } = downloader
        .get_track_links(&category_options("lofi", &scratch), None)
        .await
        .expect("link discovery failed");
    session.close().await.expect("failed to close session");

    let expected: Vec<String> = tracks.iter().map(|t| t.detail_url.clone()).collect();
    assert_eq!(links, expected);
    assert_all_released(&engine);

    let track = downloader
        .download_track(&url_options(&links[0], &scratch))
        .await
        .expect("track download failed");

    assert_eq!(track.info.title, "Purple Dream");
    assert_eq!(track.info.artist_name, "Ghostrifter Official");
    assert_eq!(track.url, links[0]);
    assert_track_downloaded(&track, scratch.path(), AUDIO_BYTES);
    assert_all_released(&engine);
}

#[tokio::test]
async fn test_lofi_full_catalog() {
    let server = file_server().await;
    let tracks = lofi_tracks(&server);
    let pages = vec![tracks[..2].to_vec(), tracks[2..].to_vec()];
    let (downloader, engine, scratch) = create_test_downloader(catalog_site("lofi", &pages));

    let outcomes = downloader
        .download_catalog(&category_options("lofi", &scratch))
        .await
        .expect("catalog download failed");

    assert_eq!(outcomes.len(), 3);
    for (outcome, fixture) in outcomes.iter().zip(&tracks) {
        assert_eq!(outcome.url, fixture.detail_url);
        let track = outcome.result.as_ref().expect("track failed");
        assert_eq!(track.info.title, fixture.title);
        assert_eq!(track.info.artist_name, fixture.artist);
        assert_eq!(track.info.tags, fixture.tags);
        assert_track_downloaded(track, scratch.path(), AUDIO_BYTES);
    }

    // every track gets a distinct file
    assert_eq!(file_count(scratch.path()), 3);
    assert_all_released(&engine);
}

#[tokio::test]
async fn test_catalog_records_failed_tracks() {
    let server = file_server().await;
    let mut tracks = lofi_tracks(&server);
    tracks[0].file_url = Some(format!("{}/audio/missing.mp3", server.uri()));
    tracks[1].file_url = None;
    let (downloader, engine, scratch) =
        create_test_downloader(catalog_site("lofi", std::slice::from_ref(&tracks)));

    let outcomes = downloader
        .download_catalog(&category_options("lofi", &scratch))
        .await
        .expect("catalog download failed");

    assert!(matches!(
        outcomes[0].result,
        Err(Error::Track(TrackError::HttpStatus { status: 404, .. }))
    ));
    assert!(matches!(
        outcomes[1].result,
        Err(Error::Track(TrackError::DownloadButtonNotFound { .. }))
    ));
    assert!(outcomes[2].is_success());
    assert_eq!(file_count(scratch.path()), 1);
    assert_all_released(&engine);
}

#[tokio::test]
async fn test_unknown_category_fails_navigation() {
    let (downloader, engine, scratch) = create_test_downloader(Default::default());

    let err = downloader
        .get_track_links(&category_options("jazz", &scratch), None)
        .await
        .expect_err("crawl of an unknown category should fail");

    assert_eq!(err.error_code(), "navigation_failed");
    assert_all_released(&engine);
}

#[tokio::test]
async fn test_track_serializes_for_output() {
    let server = file_server().await;
    let tracks = lofi_tracks(&server);
    let (downloader, _engine, scratch) =
        create_test_downloader(catalog_site("lofi", std::slice::from_ref(&tracks)));

    let track = downloader
        .download_track(&url_options(&tracks[0].detail_url, &scratch))
        .await
        .expect("track download failed");

    let json = serde_json::to_value(&track).expect("serialize");
    assert_eq!(json["info"]["title"], "Purple Dream");
    assert_eq!(json["url"], tracks[0].detail_url);
    assert!(json["downloadedFilePath"].is_string());
}
