//! Reqwest-backed pokémon catalog adapter.
//!
//! The adapter owns transport details only: URL construction, the request
//! timeout, status mapping, and JSON decoding into [`CatalogData`].

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode, Url};
use tracing::debug;

use super::dto::CatalogPokemonDto;
use crate::domain::ports::{PokemonCatalog, PokemonCatalogError};
use crate::domain::{CatalogData, PokemonName};

const USER_AGENT: &str = concat!("pokedex-backend/", env!("CARGO_PKG_VERSION"));

/// Catalog adapter issuing one GET per lookup against `{base}/api/v2/pokemon/{name}`.
#[derive(Clone)]
pub struct PokemonCatalogHttpSource {
    client: Client,
    base_url: Url,
}

impl PokemonCatalogHttpSource {
    /// Build an adapter whose requests give up after `timeout`.
    ///
    /// # Errors
    ///
    /// Returns an error when the reqwest client cannot be constructed.
    pub fn new(base_url: Url, timeout: Duration) -> Result<Self, reqwest::Error> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(USER_AGENT)
            .build()?;
        Ok(Self { client, base_url })
    }

    fn endpoint(&self, key: &str) -> Result<Url, PokemonCatalogError> {
        // Dot segments are normalised away by the URL builder and would
        // address the listing endpoint instead of an entry.
        if matches!(key, "." | "..") {
            return Err(PokemonCatalogError::not_found(key));
        }
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|()| {
                PokemonCatalogError::service_unavailable(format!(
                    "catalog base URL {} cannot carry a path",
                    self.base_url
                ))
            })?
            .pop_if_empty()
            .extend(["api", "v2", "pokemon", key]);
        Ok(url)
    }
}

#[async_trait]
impl PokemonCatalog for PokemonCatalogHttpSource {
    async fn fetch(&self, name: &PokemonName) -> Result<CatalogData, PokemonCatalogError> {
        let key = name.catalog_key();
        let url = self.endpoint(&key)?;
        debug!(%url, "querying pokemon catalog");

        let response = self
            .client
            .get(url)
            .header(reqwest::header::ACCEPT, "application/json")
            .send()
            .await
            .map_err(map_transport_error)?;

        let status = response.status();
        if status == StatusCode::NOT_FOUND {
            return Err(PokemonCatalogError::not_found(key));
        }
        if !status.is_success() {
            return Err(PokemonCatalogError::service_unavailable(format!(
                "status {}",
                status.as_u16()
            )));
        }

        let body = response.bytes().await.map_err(map_transport_error)?;
        parse_catalog_data(body.as_ref())
    }
}

fn parse_catalog_data(body: &[u8]) -> Result<CatalogData, PokemonCatalogError> {
    let decoded: CatalogPokemonDto = serde_json::from_slice(body).map_err(|error| {
        PokemonCatalogError::service_unavailable(format!("invalid catalog payload: {error}"))
    })?;
    Ok(decoded.into_catalog_data())
}

fn map_transport_error(error: reqwest::Error) -> PokemonCatalogError {
    let message = if error.is_timeout() {
        format!("request timed out: {error}")
    } else {
        error.to_string()
    };
    PokemonCatalogError::service_unavailable(message)
}

#[cfg(test)]
mod tests {
    //! Exercises the adapter against a local catalog double.

    use super::*;
    use actix_web::{App, HttpResponse, HttpServer, web};
    use rstest::rstest;
    use serde_json::json;

    async fn catalog_entry(path: web::Path<String>) -> HttpResponse {
        match path.into_inner().as_str() {
            "pikachu" => HttpResponse::Ok().json(json!({
                "height": 4,
                "weight": 60,
                "sprites": {
                    "front_default": "https://img/sprite/25.png",
                    "other": { "official-artwork": { "front_default": "https://img/art/25.png" } }
                }
            })),
            "ditto" => HttpResponse::Ok().json(json!({
                "height": 3,
                "weight": 40,
                "sprites": { "front_default": "https://img/sprite/132.png", "other": {} }
            })),
            "missingno" => HttpResponse::Ok().json(json!({ "height": 10, "weight": 1590 })),
            "garbled" => HttpResponse::Ok().body("not json"),
            "broken" => HttpResponse::InternalServerError().finish(),
            _ => HttpResponse::NotFound().finish(),
        }
    }

    fn start_catalog() -> Url {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").expect("bind test listener");
        let addr = listener.local_addr().expect("listener addr");
        let server = HttpServer::new(|| {
            App::new().route("/api/v2/pokemon/{name}", web::get().to(catalog_entry))
        })
        .workers(1)
        .listen(listener)
        .expect("bind test server")
        .disable_signals()
        .run();
        actix_web::rt::spawn(server);
        Url::parse(&format!("http://{addr}")).expect("catalog url")
    }

    fn source(base: Url) -> PokemonCatalogHttpSource {
        PokemonCatalogHttpSource::new(base, Duration::from_secs(5)).expect("client builds")
    }

    fn name(raw: &str) -> PokemonName {
        PokemonName::new(raw).expect("valid name")
    }

    #[rstest]
    #[case::official_artwork_preferred("Pikachu", 4, 60, Some("https://img/art/25.png"))]
    #[case::default_sprite_fallback("DITTO", 3, 40, Some("https://img/sprite/132.png"))]
    #[case::no_images("missingno", 10, 1590, None)]
    #[actix_web::test]
    async fn decodes_catalog_entries(
        #[case] raw: &str,
        #[case] height: u32,
        #[case] weight: u32,
        #[case] photo: Option<&str>,
    ) {
        let data = source(start_catalog())
            .fetch(&name(raw))
            .await
            .expect("catalog lookup succeeds");

        assert_eq!(
            data,
            CatalogData {
                height,
                weight,
                photo_url: photo.map(str::to_owned),
            }
        );
    }

    #[actix_web::test]
    async fn not_found_carries_lowercase_name() {
        let error = source(start_catalog())
            .fetch(&name("Agumon"))
            .await
            .expect_err("unknown pokemon");

        assert_eq!(error, PokemonCatalogError::not_found("agumon"));
    }

    #[rstest]
    #[case::server_error("broken")]
    #[case::undecodable_body("garbled")]
    #[actix_web::test]
    async fn failures_map_to_service_unavailable(#[case] raw: &str) {
        let error = source(start_catalog())
            .fetch(&name(raw))
            .await
            .expect_err("catalog failure");

        assert!(matches!(
            error,
            PokemonCatalogError::ServiceUnavailable { .. }
        ));
    }

    #[actix_web::test]
    async fn unreachable_catalog_maps_to_service_unavailable() {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").expect("bind");
        let addr = listener.local_addr().expect("addr");
        drop(listener);
        let base = Url::parse(&format!("http://{addr}")).expect("url");

        let error = source(base)
            .fetch(&name("pikachu"))
            .await
            .expect_err("connection refused");

        assert!(matches!(
            error,
            PokemonCatalogError::ServiceUnavailable { .. }
        ));
    }

    #[rstest]
    #[case("https://pokeapi.co", "https://pokeapi.co/api/v2/pokemon/mr.%20mime")]
    #[case("https://proxy.local/catalog/", "https://proxy.local/catalog/api/v2/pokemon/mr.%20mime")]
    fn endpoint_appends_lookup_path(#[case] base: &str, #[case] expected: &str) {
        let url = source(Url::parse(base).expect("url"))
            .endpoint("mr. mime")
            .expect("endpoint builds");
        assert_eq!(url.as_str(), expected);
    }

    #[rstest]
    #[case(".")]
    #[case("..")]
    fn endpoint_refuses_dot_segments(#[case] key: &str) {
        let error = source(Url::parse("https://pokeapi.co").expect("url"))
            .endpoint(key)
            .expect_err("dot segment");
        assert_eq!(error, PokemonCatalogError::not_found(key));
    }

    #[rstest]
    #[case(".")]
    #[case("..")]
    #[actix_web::test]
    async fn dot_only_names_are_not_found(#[case] raw: &str) {
        let error = source(start_catalog())
            .fetch(&name(raw))
            .await
            .expect_err("dot-only name");

        assert_eq!(error, PokemonCatalogError::not_found(raw));
    }

    #[test]
    fn names_containing_dots_keep_their_segment() {
        let url = source(Url::parse("https://pokeapi.co").expect("url"))
            .endpoint("...")
            .expect("endpoint builds");
        assert_eq!(url.as_str(), "https://pokeapi.co/api/v2/pokemon/...");
    }
}
