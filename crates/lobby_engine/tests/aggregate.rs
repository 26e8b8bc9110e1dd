use std::collections::HashSet;

use lobby_core::{MovieEntry, Provenance, ReleaseYear};
use lobby_engine::{AggregateReport, Aggregator, ArchiveSettings, EngineConfig, OmdbSettings};
use pretty_assertions::assert_eq;
use serde_json::{json, Value};
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn config(server: &MockServer) -> EngineConfig {
    EngineConfig {
        archive: ArchiveSettings {
            endpoint: format!("{}/search", server.uri()),
            media_base_url: format!("{}/media/", server.uri()),
            ..ArchiveSettings::default()
        },
        omdb: Some(OmdbSettings {
            endpoint: format!("{}/omdb", server.uri()),
            api_key: "test-key".to_string(),
        }),
        ..EngineConfig::default()
    }
}

fn with_media(title: &str, summary: Option<&str>, file: &str) -> Value {
    json!({
        "title": title,
        "summary": summary,
        "productionDates": [{ "fromYear": 1927 }],
        "preview": [{ "filePath": file }]
    })
}

fn without_media(title: &str, year: i32) -> Value {
    json!({ "title": title, "productionDates": [{ "fromYear": year }], "preview": [] })
}

async fn mount_archive(server: &MockServer, has_media: &str, results: Vec<Value>, calls: u64) {
    Mock::given(method("GET"))
        .and(path("/search"))
        .and(query_param("hasMedia", has_media))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "results": results })))
        .expect(calls)
        .mount(server)
        .await;
}

async fn mount_omdb(server: &MockServer, title: &str, body: Value) {
    Mock::given(method("GET"))
        .and(path("/omdb"))
        .and(query_param("apikey", "test-key"))
        .and(query_param("t", title))
        .and(query_param("plot", "full"))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .mount(server)
        .await;
}

async fn mount_poster(server: &MockServer, file: &str, status: u16) {
    Mock::given(method("GET"))
        .and(path(format!("/posters/{file}")))
        .respond_with(ResponseTemplate::new(status))
        .mount(server)
        .await;
}

fn assert_well_formed(entries: &[MovieEntry], limit: usize) {
    assert!(entries.len() <= limit);
    let titles: HashSet<&str> = entries.iter().map(MovieEntry::title).collect();
    assert_eq!(titles.len(), entries.len(), "duplicate titles in {entries:?}");
    assert!(entries.iter().all(|e| !e.image_url().is_empty()));
}

#[tokio::test]
async fn full_primary_pass_skips_fallback() {
    let server = MockServer::start().await;
    mount_archive(
        &server,
        "yes",
        vec![
            with_media("Metropolis", Some("A"), "m.jpg"),
            with_media("Sunrise", Some("B"), "s.jpg"),
            with_media("The General", Some("C"), "g.jpg"),
        ],
        1,
    )
    .await;
    mount_archive(&server, "no", Vec::new(), 0).await;

    let aggregator = Aggregator::from_config(&config(&server)).unwrap();
    let entries = aggregator.aggregate(1930, 2).await;

    assert_well_formed(&entries, 2);
    let titles: Vec<&str> = entries.iter().map(MovieEntry::title).collect();
    assert_eq!(titles, vec!["Metropolis", "Sunrise"]);
    assert!(entries.iter().all(|e| e.provenance() == Provenance::Primary));
    assert_eq!(entries[0].image_url(), format!("{}/media/m.jpg", server.uri()));
    assert_eq!(entries[0].year(), ReleaseYear::Known(1927));
}

#[tokio::test]
async fn alternate_titles_collapse_to_most_descriptive_record() {
    let server = MockServer::start().await;
    mount_archive(
        &server,
        "yes",
        vec![
            with_media("[Metropolis: German release]", Some("Short."), "de.jpg"),
            with_media("Sunrise", None, "s.jpg"),
            with_media("Metropolis", Some("A much longer description."), "au.jpg"),
            with_media("[Metropolis: US release]", Some("Also short."), "us.jpg"),
        ],
        1,
    )
    .await;
    mount_archive(&server, "no", Vec::new(), 1).await;

    let aggregator = Aggregator::from_config(&config(&server)).unwrap();
    let entries = aggregator.aggregate(1930, 8).await;

    assert_well_formed(&entries, 8);
    assert_eq!(entries.len(), 2);
    assert_eq!(entries[0].title(), "Metropolis");
    assert_eq!(entries[0].summary(), "A much longer description.");
    assert_eq!(entries[0].image_url(), format!("{}/media/au.jpg", server.uri()));
    assert_eq!(entries[1].title(), "Sunrise");
    assert_eq!(entries[1].summary(), "No description available.");
}

#[tokio::test]
async fn shortfall_is_backfilled_from_posters() {
    let server = MockServer::start().await;
    mount_archive(
        &server,
        "yes",
        vec![
            with_media("Metropolis", Some("A"), "m.jpg"),
            json!({ "title": "Faust", "preview": [{ "type": "thumb" }] }),
        ],
        1,
    )
    .await;
    mount_archive(
        &server,
        "no",
        vec![
            without_media("[Metropolis: German release]", 1927),
            without_media("Sunrise", 1927),
            without_media("Wings", 1927),
            without_media("Nosferatu", 1922),
            without_media("The Unknown", 1927),
        ],
        1,
    )
    .await;
    mount_omdb(
        &server,
        "Sunrise",
        json!({ "Poster": format!("{}/posters/sunrise.jpg", server.uri()), "Plot": "A farmer is tempted." }),
    )
    .await;
    mount_omdb(
        &server,
        "Wings",
        json!({ "Poster": format!("{}/posters/wings.jpg", server.uri()), "Plot": "" }),
    )
    .await;
    mount_omdb(&server, "Nosferatu", json!({ "Poster": "N/A", "Plot": "N/A" })).await;
    mount_omdb(&server, "The Unknown", json!({ "Response": "False", "Error": "Movie not found!" }))
        .await;
    mount_poster(&server, "sunrise.jpg", 200).await;
    mount_poster(&server, "wings.jpg", 404).await;

    let aggregator = Aggregator::from_config(&config(&server)).unwrap();
    let aggregation = aggregator.aggregate_with_report(1930, 8).await;
    let entries = &aggregation.entries;

    assert_well_formed(entries, 8);
    let summary: Vec<(&str, Provenance)> =
        entries.iter().map(|e| (e.title(), e.provenance())).collect();
    assert_eq!(
        summary,
        vec![
            ("Metropolis", Provenance::Primary),
            ("Sunrise", Provenance::Fallback),
        ]
    );
    assert_eq!(
        entries[1].image_url(),
        format!("{}/posters/sunrise.jpg", server.uri())
    );
    assert_eq!(entries[1].summary(), "A farmer is tempted.");
    assert_eq!(
        aggregation.report,
        AggregateReport {
            groups_seen: 7,
            duplicates: 1,
            missing_image: 3,
            rejected_image: 1,
            fallback_ran: true,
        }
    );
}

#[tokio::test]
async fn poster_lookup_sends_title_and_year() {
    let server = MockServer::start().await;
    mount_archive(&server, "yes", Vec::new(), 1).await;
    mount_archive(&server, "no", vec![without_media("Sunrise", 1927)], 1).await;
    Mock::given(method("GET"))
        .and(path("/omdb"))
        .and(query_param("t", "Sunrise"))
        .and(query_param("y", "1927"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "Poster": format!("{}/posters/sunrise.jpg", server.uri())
        })))
        .expect(1)
        .mount(&server)
        .await;
    mount_poster(&server, "sunrise.jpg", 200).await;

    let aggregator = Aggregator::from_config(&config(&server)).unwrap();
    let entries = aggregator.aggregate(1930, 8).await;

    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].provenance(), Provenance::Fallback);
}

#[tokio::test]
async fn unreachable_poster_host_skips_entry() {
    let server = MockServer::start().await;
    mount_archive(&server, "yes", Vec::new(), 1).await;
    mount_archive(&server, "no", vec![without_media("Sunrise", 1927)], 1).await;
    mount_omdb(
        &server,
        "Sunrise",
        json!({ "Poster": "http://127.0.0.1:1/sunrise.jpg" }),
    )
    .await;

    let aggregator = Aggregator::from_config(&config(&server)).unwrap();
    let aggregation = aggregator.aggregate_with_report(1930, 8).await;

    assert!(aggregation.entries.is_empty());
    assert_eq!(aggregation.report.rejected_image, 1);
}

#[tokio::test]
async fn total_stays_within_limit_across_passes() {
    let server = MockServer::start().await;
    mount_archive(&server, "yes", vec![with_media("Metropolis", None, "m.jpg")], 1).await;
    let fallback: Vec<Value> = ["Sunrise", "Wings", "Faust", "Tabu"]
        .iter()
        .map(|title| without_media(title, 1927))
        .collect();
    mount_archive(&server, "no", fallback, 1).await;
    for title in ["Sunrise", "Wings", "Faust", "Tabu"] {
        let file = format!("{}.jpg", title.to_lowercase());
        mount_omdb(
            &server,
            title,
            json!({ "Poster": format!("{}/posters/{file}", server.uri()) }),
        )
        .await;
        mount_poster(&server, &file, 200).await;
    }

    let aggregator = Aggregator::from_config(&config(&server)).unwrap();
    let entries = aggregator.aggregate(1930, 3).await;

    assert_well_formed(&entries, 3);
    let titles: Vec<&str> = entries.iter().map(MovieEntry::title).collect();
    assert_eq!(titles, vec!["Metropolis", "Sunrise", "Wings"]);
}

#[tokio::test]
async fn failing_archive_gives_empty_gallery() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/search"))
        .respond_with(ResponseTemplate::new(500))
        .expect(2)
        .mount(&server)
        .await;

    let aggregator = Aggregator::from_config(&config(&server)).unwrap();
    let aggregation = aggregator.aggregate_with_report(1930, 8).await;

    assert!(aggregation.entries.is_empty());
    assert!(aggregation.report.fallback_ran);
}

#[tokio::test]
async fn zero_limit_makes_no_requests() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let aggregator = Aggregator::from_config(&config(&server)).unwrap();
    assert!(aggregator.aggregate(1930, 0).await.is_empty());
}

async fn mount_media(server: &MockServer, file: &str, status: u16) {
    Mock::given(method("GET"))
        .and(path(format!("/media/{file}")))
        .respond_with(ResponseTemplate::new(status))
        .expect(1)
        .mount(server)
        .await;
}

#[tokio::test]
async fn fallback_without_omdb_uses_probed_preview() {
    let server = MockServer::start().await;
    mount_archive(&server, "yes", Vec::new(), 1).await;
    mount_archive(&server, "no", vec![with_media("Sunrise", None, "s.jpg")], 1).await;
    Mock::given(path("/omdb"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;
    mount_media(&server, "s.jpg", 200).await;

    let config = EngineConfig {
        omdb: None,
        ..config(&server)
    };
    let aggregator = Aggregator::from_config(&config).unwrap();
    let entries = aggregator.aggregate(1930, 8).await;

    assert_well_formed(&entries, 8);
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].provenance(), Provenance::Fallback);
    assert_eq!(entries[0].image_url(), format!("{}/media/s.jpg", server.uri()));
    assert_eq!(entries[0].summary(), "No description available.");
}

#[tokio::test]
async fn failed_poster_lookup_falls_back_to_preview() {
    let server = MockServer::start().await;
    mount_archive(&server, "yes", Vec::new(), 1).await;
    mount_archive(&server, "no", vec![with_media("Sunrise", Some("B"), "s.jpg")], 1).await;
    Mock::given(method("GET"))
        .and(path("/omdb"))
        .respond_with(ResponseTemplate::new(500))
        .expect(1)
        .mount(&server)
        .await;
    mount_media(&server, "s.jpg", 200).await;

    let aggregator = Aggregator::from_config(&config(&server)).unwrap();
    let entries = aggregator.aggregate(1930, 8).await;

    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].provenance(), Provenance::Fallback);
    assert_eq!(entries[0].image_url(), format!("{}/media/s.jpg", server.uri()));
    assert_eq!(entries[0].summary(), "B");
}

#[tokio::test]
async fn absent_poster_falls_back_to_preview() {
    let server = MockServer::start().await;
    mount_archive(&server, "yes", Vec::new(), 1).await;
    mount_archive(&server, "no", vec![with_media("Nosferatu", None, "n.jpg")], 1).await;
    mount_omdb(&server, "Nosferatu", json!({ "Poster": "N/A", "Plot": "N/A" })).await;
    mount_media(&server, "n.jpg", 200).await;

    let aggregator = Aggregator::from_config(&config(&server)).unwrap();
    let entries = aggregator.aggregate(1930, 8).await;

    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].provenance(), Provenance::Fallback);
    assert_eq!(entries[0].image_url(), format!("{}/media/n.jpg", server.uri()));
    assert_eq!(entries[0].summary(), "No description available.");
}

#[tokio::test]
async fn missing_fallback_preview_is_skipped() {
    let server = MockServer::start().await;
    mount_archive(&server, "yes", Vec::new(), 1).await;
    mount_archive(&server, "no", vec![with_media("Sunrise", None, "s.jpg")], 1).await;
    mount_media(&server, "s.jpg", 404).await;

    let config = EngineConfig {
        omdb: None,
        ..config(&server)
    };
    let aggregator = Aggregator::from_config(&config).unwrap();
    let aggregation = aggregator.aggregate_with_report(1930, 8).await;

    assert!(aggregation.entries.is_empty());
    assert_eq!(aggregation.report.rejected_image, 1);
    assert_eq!(aggregation.report.missing_image, 0);
}
