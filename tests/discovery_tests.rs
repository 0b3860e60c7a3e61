mod common;

use std::sync::Arc;

use flickpick_api::error::AppError;
use flickpick_api::models::DiscoverParams;
use rand::{rngs::StdRng, SeedableRng};
use tokio_util::sync::CancellationToken;

use common::*;

fn comedy_2000s() -> DiscoverParams {
    DiscoverParams {
        genre: Some("Comedy".to_string()),
        start_year: Some("2000".to_string()),
        end_year: Some("2020".to_string()),
        min_runtime: Some("90".to_string()),
        max_runtime: Some("120".to_string()),
        language: Some("en".to_string()),
        region: None,
        streaming_service: None,
    }
}

#[tokio::test]
async fn test_end_to_end_comedy_scenario() {
    let catalog = Arc::new(StubCatalog::new(
        page(vec![summary(42, "Test Movie", vec![35], "2010-05-01")]),
        test_movie_details(),
    ));
    let streaming = StubStreaming {
        show: show(
            "us",
            vec![offer("netflix", "subscription"), offer("netflix", "buy")],
        ),
        ..StubStreaming::default()
    };
    let discovery = discovery(catalog.clone(), streaming);

    let record = discovery
        .discover(&comedy_2000s(), &CancellationToken::new())
        .await
        .unwrap();

    assert_eq!(record.title, "Test Movie");
    assert_eq!(record.genres, vec!["Comedy"]);
    assert_eq!(record.release_year, "2010");
    assert_eq!(record.runtime, 100);
    assert_eq!(record.directors, vec!["D1"]);
    assert_eq!(record.cast, vec!["A1", "A2", "A3", "A4", "A5"]);
    assert_eq!(record.imdb_id.as_deref(), Some("tt001"));
    assert_eq!(record.streaming.len(), 1);
    assert_eq!(record.streaming[0].link, "https://netflix.example/subscription");
    assert_eq!(catalog.discover_calls(), 1);
}

#[tokio::test]
async fn test_same_seed_same_record() {
    let candidates = (1..=20)
        .map(|id| summary(id, &format!("Movie {id}"), vec![18], "1999-01-01"))
        .collect();
    let catalog = Arc::new(StubCatalog::new(page(candidates), test_movie_details()));
    let discovery = discovery(catalog, no_streaming());
    let cancel = CancellationToken::new();

    let first = discovery
        .discover_with_rng(&DiscoverParams::default(), &mut StdRng::seed_from_u64(99), &cancel)
        .await
        .unwrap();
    let second = discovery
        .discover_with_rng(&DiscoverParams::default(), &mut StdRng::seed_from_u64(99), &cancel)
        .await
        .unwrap();

    assert_eq!(first, second);
}

#[tokio::test]
async fn test_always_empty_catalog_gives_up_after_three_attempts() {
    let catalog = Arc::new(StubCatalog::empty());
    let discovery = discovery(catalog.clone(), no_streaming());

    let result = discovery
        .discover(&comedy_2000s(), &CancellationToken::new())
        .await;

    match result {
        Err(AppError::NoResults(criteria)) => {
            assert_eq!(criteria.genres(), &[35]);
            assert_eq!(criteria.start_year(), Some(2000));
        }
        other => panic!("expected NoResults, got {other:?}"),
    }
    assert_eq!(catalog.discover_calls(), 3);
}

#[tokio::test]
async fn test_unavailable_catalog_is_not_reported_as_no_results() {
    let catalog = Arc::new(StubCatalog::unavailable());
    let discovery = discovery(catalog.clone(), no_streaming());

    let result = discovery
        .discover(&DiscoverParams::default(), &CancellationToken::new())
        .await;

    assert!(matches!(result, Err(AppError::UpstreamUnavailable(_))));
    assert_eq!(catalog.discover_calls(), 3);
}

#[tokio::test]
async fn test_invalid_filters_never_reach_the_catalog() {
    let catalog = Arc::new(StubCatalog::empty());
    let discovery = discovery(catalog.clone(), no_streaming());

    let raw = DiscoverParams {
        genre: Some("Comedy,Soap Opera".to_string()),
        start_year: Some("2020".to_string()),
        end_year: Some("2000".to_string()),
        ..DiscoverParams::default()
    };

    match discovery.discover(&raw, &CancellationToken::new()).await {
        Err(AppError::Validation(violations)) => {
            let fields: Vec<&str> = violations.iter().map(|v| v.field).collect();
            assert_eq!(fields, vec!["genre", "startYear"]);
            assert!(violations[0].message.contains("Soap Opera"));
        }
        other => panic!("expected Validation, got {other:?}"),
    }
    assert_eq!(catalog.discover_calls(), 0);
}

#[tokio::test]
async fn test_streaming_region_comes_from_filters() {
    let catalog = Arc::new(StubCatalog::new(
        page(vec![summary(42, "Test Movie", vec![35], "2010-05-01")]),
        test_movie_details(),
    ));
    let streaming = StubStreaming {
        show: show("gb", vec![offer("now", "subscription")]),
        ..StubStreaming::default()
    };
    let discovery = discovery(catalog, streaming);

    let us = discovery
        .discover(&DiscoverParams::default(), &CancellationToken::new())
        .await
        .unwrap();
    assert!(us.streaming.is_empty());

    let gb = discovery
        .discover(
            &DiscoverParams {
                region: Some("GB".to_string()),
                ..DiscoverParams::default()
            },
            &CancellationToken::new(),
        )
        .await
        .unwrap();
    assert_eq!(gb.streaming.len(), 1);
    assert_eq!(gb.streaming[0].provider_id(), "now");
}

#[tokio::test]
async fn test_streaming_services_replace_catalog_sampling() {
    let catalog = Arc::new(StubCatalog::new(page(vec![]), test_movie_details()));
    let streaming = Arc::new(StubStreaming {
        search: vec![searched_show(
            12,
            "Finding Nemo",
            &["Animation", "Family"],
            100,
            vec![offer("disney", "subscription")],
        )],
        ..StubStreaming::default()
    });
    let discovery = shared_discovery(catalog.clone(), streaming.clone());

    let raw = DiscoverParams {
        streaming_service: Some("Disney".to_string()),
        start_year: Some("2000".to_string()),
        end_year: Some("2010".to_string()),
        ..DiscoverParams::default()
    };
    let record = discovery
        .discover_streaming(&raw, &CancellationToken::new())
        .await
        .unwrap();

    assert_eq!(record.movie_id, "12");
    assert_eq!(record.genres, vec!["Animation", "Family"]);
    assert_eq!(record.streaming.len(), 1);
    assert_eq!(catalog.discover_calls(), 0);

    let searches = streaming.searches();
    assert_eq!(searches.len(), 1);
    assert_eq!(searches[0].catalogs, "disney");
    assert_eq!(searches[0].year_min, Some(2000));
    assert_eq!(searches[0].year_max, Some(2010));
    assert_eq!(searches[0].country, "us");
}
