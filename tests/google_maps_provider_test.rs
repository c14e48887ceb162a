use anyhow::Result;
use geocoder::{
    Accuracy, Coordinates, DistanceQuery, GeocodeQuery, Geocoder, GeocoderError,
    GoogleMapsProvider, HttpClient, PlaceDetailsQuery, ReverseQuery, SuggestQuery, TravelMode,
};
use httpmock::prelude::*;

const GEOCODE: &str = include_str!("fixtures/google_maps_geocode.json");
const AUTOCOMPLETE: &str = include_str!("fixtures/google_maps_autocomplete.json");
const PLACE_DETAILS: &str = include_str!("fixtures/google_maps_place_details.json");
const DISTANCE: &str = include_str!("fixtures/google_maps_distance.json");

fn geocoder(server: &MockServer) -> Result<Geocoder<GoogleMapsProvider>> {
    let provider = GoogleMapsProvider::new(HttpClient::new()?, "test").with_base_url(server.base_url());
    Ok(Geocoder::new(provider))
}

fn chicago_query() -> GeocodeQuery {
    GeocodeQuery::new("1158 E 89th St")
        .with_country_code("US")
        .with_limit(3)
}

#[tokio::test]
async fn test_geocode_success() -> Result<()> {
    let server = MockServer::start();
    let api_mock = server.mock(|when, then| {
        when.method(GET)
            .path("/maps/api/geocode/json")
            .query_param("address", "1158 E 89th St")
            .query_param("components", "country:US")
            .query_param("region", "us")
            .query_param("key", "test");
        then.status(200)
            .header("content-type", "application/json")
            .body(GEOCODE);
    });

    let locations = geocoder(&server)?.geocode(&chicago_query()).await?;

    api_mock.assert();
    assert_eq!(locations.len(), 3);

    let first = &locations[0];
    assert_eq!(first.provider, "google_maps");
    assert_eq!(first.formatted_address.as_deref(), Some("1158 E 89th St, Chicago, IL 60619, USA"));
    assert_eq!(first.latitude, 41.7340186);
    assert_eq!(first.longitude, -87.5960762);
    assert_eq!(first.house_number.as_deref(), Some("1158"));
    assert_eq!(first.state_code.as_deref(), Some("IL"));
    assert_eq!(first.accuracy, Some(Accuracy::HouseNumber));
    assert!(first.raw.is_none());

    assert_eq!(locations[1].accuracy, Some(Accuracy::StreetName));
    assert_eq!(locations[2].accuracy, Some(Accuracy::City));
    Ok(())
}

#[tokio::test]
async fn test_geocode_post_processing() -> Result<()> {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(GET).path("/maps/api/geocode/json");
        then.status(200).body(GEOCODE);
    });
    let geocoder = geocoder(&server)?;

    let street_level = chicago_query().with_accuracy(Accuracy::StreetName);
    let locations = geocoder.geocode(&street_level).await?;
    assert_eq!(locations.len(), 2);

    let exact = chicago_query().with_city("Chicago").with_exact_match(true);
    let locations = geocoder.geocode(&exact).await?;
    assert_eq!(locations.len(), 2);
    assert!(locations.iter().all(|l| l.city.as_deref() == Some("Chicago")));

    let limited = chicago_query().with_limit(1).with_raw(true);
    let locations = geocoder.geocode(&limited).await?;
    assert_eq!(locations.len(), 1);
    assert_eq!(
        locations[0].raw.as_ref().and_then(|raw| raw["place_id"].as_str()),
        Some("ChIJ9xm0vj0mDogRyQAGHmFMT1g")
    );
    Ok(())
}

#[tokio::test]
async fn test_geocode_empty_payloads() -> Result<()> {
    let server = MockServer::start();
    let mut api_mock = server.mock(|when, then| {
        when.method(GET).path("/maps/api/geocode/json");
        then.status(200).body("{}");
    });
    let geocoder = geocoder(&server)?;

    assert!(geocoder.geocode(&chicago_query()).await?.is_empty());
    api_mock.delete();

    let mut api_mock = server.mock(|when, then| {
        when.method(GET).path("/maps/api/geocode/json");
        then.status(200).body(r#"{"results": [], "status": "ZERO_RESULTS"}"#);
    });
    assert!(geocoder.geocode(&chicago_query()).await?.is_empty());
    api_mock.delete();

    server.mock(|when, then| {
        when.method(GET).path("/maps/api/geocode/json");
        then.status(200).body("");
    });
    let err = geocoder.geocode(&chicago_query()).await.unwrap_err();
    assert!(matches!(err, GeocoderError::InvalidServerResponse(_)));
    assert!(err.to_string().starts_with("Invalid server response"));
    Ok(())
}

#[tokio::test]
async fn test_http_status_errors() -> Result<()> {
    let cases: [(u16, &str); 4] = [
        (401, "API key is invalid"),
        (403, "API key is invalid"),
        (429, "Quota exceeded"),
        (500, "Invalid server response (status 500)"),
    ];

    for (status, message) in cases {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(GET).path("/maps/api/geocode/json");
            then.status(status);
        });

        let err = geocoder(&server)?
            .reverse(&ReverseQuery::new(41.7340186, -87.5960762))
            .await
            .unwrap_err();

        match status {
            401 | 403 => assert!(matches!(err, GeocoderError::InvalidCredentials(_))),
            429 => assert!(matches!(err, GeocoderError::QuotaExceeded(_))),
            _ => assert!(matches!(err, GeocoderError::InvalidServerResponse(_))),
        }
        assert_eq!(err.to_string(), message);
    }
    Ok(())
}

#[tokio::test]
async fn test_payload_status_errors() -> Result<()> {
    let server = MockServer::start();
    let mut api_mock = server.mock(|when, then| {
        when.method(GET).path("/maps/api/geocode/json");
        then.status(200).body(
            r#"{"error_message": "The provided API key is invalid.", "results": [], "status": "REQUEST_DENIED"}"#,
        );
    });
    let geocoder = geocoder(&server)?;

    let err = geocoder.geocode(&chicago_query()).await.unwrap_err();
    assert!(matches!(err, GeocoderError::InvalidCredentials(_)));
    assert_eq!(err.to_string(), "API key is invalid");
    api_mock.delete();

    server.mock(|when, then| {
        when.method(GET).path("/maps/api/geocode/json");
        then.status(200)
            .body(r#"{"results": [], "status": "OVER_QUERY_LIMIT"}"#);
    });
    let err = geocoder.geocode(&chicago_query()).await.unwrap_err();
    assert!(matches!(err, GeocoderError::QuotaExceeded(_)));
    Ok(())
}

#[tokio::test]
async fn test_signed_requests() -> Result<()> {
    let server = MockServer::start();
    let api_mock = server.mock(|when, then| {
        when.method(GET)
            .path("/maps/api/geocode/json")
            .query_param("key", "test")
            .query_param_exists("signature");
        then.status(200).body(GEOCODE);
    });

    let provider = GoogleMapsProvider::with_secret(HttpClient::new()?, "test", "vNIXE0xscrmjlyV-12Nj_BvUPaw=")
        .with_base_url(server.base_url());
    let locations = Geocoder::new(provider).geocode(&chicago_query()).await?;

    api_mock.assert();
    assert_eq!(locations.len(), 3);
    Ok(())
}

#[tokio::test]
async fn test_suggest() -> Result<()> {
    let server = MockServer::start();
    let api_mock = server.mock(|when, then| {
        when.method(GET)
            .path("/maps/api/place/autocomplete/json")
            .query_param("input", "1158 E 89th")
            .query_param("location", "41.7340186,-87.5960762")
            .query_param("radius", "25000");
        then.status(200).body(AUTOCOMPLETE);
    });

    let query = SuggestQuery::new("1158 E 89th")
        .with_location(41.7340186, -87.5960762)
        .with_radius(25000)
        .with_limit(1);
    let suggestions = geocoder(&server)?.suggest(&query).await?;

    api_mock.assert();
    assert_eq!(suggestions.len(), 1);
    assert_eq!(suggestions[0].formatted_address, "1158 East 89th Street, Chicago, IL, USA");
    assert_eq!(suggestions[0].place_id.as_deref(), Some("ChIJ9xm0vj0mDogRyQAGHmFMT1g"));
    assert!(suggestions[0].raw.is_none());
    Ok(())
}

#[tokio::test]
async fn test_place_details() -> Result<()> {
    let server = MockServer::start();
    let mut api_mock = server.mock(|when, then| {
        when.method(GET)
            .path("/maps/api/place/details/json")
            .query_param("placeid", "ChIJ9xm0vj0mDogRyQAGHmFMT1g");
        then.status(200).body(PLACE_DETAILS);
    });
    let geocoder = geocoder(&server)?;

    let location = geocoder
        .place_details(&PlaceDetailsQuery::new("ChIJ9xm0vj0mDogRyQAGHmFMT1g"))
        .await?;
    api_mock.assert();
    assert_eq!(location.postal_code.as_deref(), Some("60619"));
    assert_eq!(location.accuracy, Some(Accuracy::HouseNumber));
    api_mock.delete();

    server.mock(|when, then| {
        when.method(GET).path("/maps/api/place/details/json");
        then.status(200).body(r#"{"html_attributions": [], "status": "NOT_FOUND"}"#);
    });
    let err = geocoder
        .place_details(&PlaceDetailsQuery::new("missing"))
        .await
        .unwrap_err();
    assert!(matches!(err, GeocoderError::PlaceNotFound { .. }));
    Ok(())
}

#[tokio::test]
async fn test_distance() -> Result<()> {
    let server = MockServer::start();
    let api_mock = server.mock(|when, then| {
        when.method(GET)
            .path("/maps/api/distancematrix/json")
            .query_param("origins", "41.7340186,-87.5960762")
            .query_param("destinations", "41.8781136,-87.6297982")
            .query_param("mode", "driving");
        then.status(200).body(DISTANCE);
    });

    let query = DistanceQuery::new(
        Coordinates::new(41.7340186, -87.5960762),
        Coordinates::new(41.8781136, -87.6297982),
    );
    let details = geocoder(&server)?.distance(&query).await?;

    api_mock.assert();
    assert_eq!(details.distance, 21318);
    assert_eq!(details.duration, 1421);
    assert_eq!(details.mode, TravelMode::Driving);
    assert!(details.raw.is_none());
    Ok(())
}
