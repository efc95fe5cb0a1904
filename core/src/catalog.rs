//! Catalog Client
//!
//! Fetches one random creature's display data from the public catalog
//! service. The catalog is read-only and not under this system's control:
//! the client draws a uniform id, issues `GET {base}/pokemon/{id}`, and maps
//! the response onto [`Creature`]. Only `id`, `name` and
//! `sprites.front_default` are consumed; any shape mismatch fails closed as
//! a [`NetworkError`].
//!
//! When the catalog has artwork for the id, the PNG is fetched and decoded
//! into a [`SpriteImage`] so surfaces can draw the clue. Artwork failures
//! degrade to "no sprite" rather than failing the round.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::error::NetworkError;

/// Display data for the creature being guessed.
///
/// Immutable once fetched; replaced wholesale each round.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Creature {
    /// Catalog id the creature was fetched under.
    pub id: u32,
    /// Lowercase identifier; the string guesses are compared against.
    pub name: String,
    /// Artwork URL, absent when the catalog has no sprite for this id.
    pub image_url: Option<String>,
}

/// Decoded RGBA artwork for a creature.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpriteImage {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
    /// Row-major RGBA8 bytes, `width * height * 4` long.
    pub rgba: Vec<u8>,
}

impl SpriteImage {
    /// Decode image bytes (PNG from the catalog) into RGBA pixels.
    pub fn decode(bytes: &[u8]) -> Result<Self, NetworkError> {
        let decoded = image::load_from_memory(bytes).map_err(|e| NetworkError::Malformed {
            service: "catalog",
            detail: format!("artwork decode failed: {e}"),
        })?;
        let rgba = decoded.to_rgba8();
        Ok(Self {
            width: rgba.width(),
            height: rgba.height(),
            rgba: rgba.into_raw(),
        })
    }

    /// Sample the pixel at `(x, y)`. Out-of-bounds reads as transparent.
    #[must_use]
    pub fn pixel(&self, x: u32, y: u32) -> [u8; 4] {
        if x >= self.width || y >= self.height {
            return [0, 0, 0, 0];
        }
        let idx = ((y * self.width + x) * 4) as usize;
        match self.rgba.get(idx..idx + 4) {
            Some(px) => [px[0], px[1], px[2], px[3]],
            None => [0, 0, 0, 0],
        }
    }
}

/// A fetched round: the creature plus its decoded artwork, when available.
#[derive(Clone, Debug)]
pub struct CreatureFetch {
    /// The creature to guess.
    pub creature: Creature,
    /// Decoded artwork; `None` when the catalog has none or decoding failed.
    pub sprite: Option<SpriteImage>,
}

/// Read access to the creature catalog.
#[async_trait]
pub trait CatalogClient: Send + Sync {
    /// Fetch a uniformly random creature together with its artwork.
    async fn random_creature(&self) -> Result<CreatureFetch, NetworkError>;
}

/// Forward through a shared handle so an `Arc`-wrapped client is itself a
/// [`CatalogClient`]. Lets callers keep a handle after the engine takes one.
#[async_trait]
impl<C: CatalogClient + ?Sized> CatalogClient for Arc<C> {
    async fn random_creature(&self) -> Result<CreatureFetch, NetworkError> {
        self.as_ref().random_creature().await
    }
}

/// Wire shape of a catalog entity. Unknown fields are ignored.
#[derive(Debug, Deserialize)]
struct CreatureWire {
    id: u32,
    name: String,
    sprites: SpritesWire,
}

#[derive(Debug, Deserialize)]
struct SpritesWire {
    front_default: Option<String>,
}

/// Catalog client backed by the public PokeAPI REST service.
#[derive(Clone)]
pub struct PokeApiCatalog {
    /// Base URL without trailing slash.
    base_url: String,
    /// Highest id the random draw may pick.
    max_id: u32,
    /// HTTP client.
    http_client: reqwest::Client,
}

impl PokeApiCatalog {
    /// Default public catalog endpoint.
    pub const DEFAULT_BASE_URL: &'static str = "https://pokeapi.co/api/v2";
    /// Default upper bound for the random id draw.
    pub const DEFAULT_MAX_ID: u32 = 1000;

    /// Create a new catalog client.
    #[must_use]
    pub fn new(base_url: impl Into<String>, max_id: u32) -> Self {
        let base_url: String = base_url.into();
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            max_id: max_id.max(1),
            http_client: reqwest::Client::builder()
                .timeout(Duration::from_secs(10))
                .build()
                .expect("Failed to create HTTP client"),
        }
    }

    /// Create from environment variables.
    ///
    /// `GUESSDEX_CATALOG_URL` and `GUESSDEX_MAX_CREATURE_ID`, with the
    /// public defaults when unset.
    #[must_use]
    pub fn from_env() -> Self {
        let base_url = std::env::var("GUESSDEX_CATALOG_URL")
            .unwrap_or_else(|_| Self::DEFAULT_BASE_URL.to_string());
        let max_id = std::env::var("GUESSDEX_MAX_CREATURE_ID")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(Self::DEFAULT_MAX_ID);
        Self::new(base_url, max_id)
    }

    /// Entity endpoint URL for an id.
    fn creature_url(&self, id: u32) -> String {
        format!("{}/pokemon/{}", self.base_url, id)
    }

    /// Map a catalog response body onto a [`Creature`], failing closed.
    fn parse_creature(body: &[u8]) -> Result<Creature, NetworkError> {
        let wire: CreatureWire =
            serde_json::from_slice(body).map_err(|e| NetworkError::Malformed {
                service: "catalog",
                detail: e.to_string(),
            })?;
        Ok(Creature {
            id: wire.id,
            name: wire.name,
            image_url: wire.sprites.front_default,
        })
    }

    async fn fetch_creature(&self, id: u32) -> Result<Creature, NetworkError> {
        let response = self.http_client.get(self.creature_url(id)).send().await?;
        if !response.status().is_success() {
            return Err(NetworkError::Status {
                service: "catalog",
                status: response.status(),
            });
        }
        let body = response.bytes().await?;
        Self::parse_creature(&body)
    }

    async fn fetch_sprite(&self, url: &str) -> Result<SpriteImage, NetworkError> {
        let response = self.http_client.get(url).send().await?;
        if !response.status().is_success() {
            return Err(NetworkError::Status {
                service: "catalog",
                status: response.status(),
            });
        }
        let bytes = response.bytes().await?;
        SpriteImage::decode(&bytes)
    }
}

impl Default for PokeApiCatalog {
    fn default() -> Self {
        Self::new(Self::DEFAULT_BASE_URL, Self::DEFAULT_MAX_ID)
    }
}

#[async_trait]
impl CatalogClient for PokeApiCatalog {
    async fn random_creature(&self) -> Result<CreatureFetch, NetworkError> {
        let id = rand::thread_rng().gen_range(1..=self.max_id);
        let creature = self.fetch_creature(id).await?;

        let sprite = match creature.image_url.as_deref() {
            Some(url) => match self.fetch_sprite(url).await {
                Ok(sprite) => Some(sprite),
                Err(e) => {
                    tracing::warn!("artwork fetch for creature {} failed: {e}", creature.id);
                    None
                }
            },
            None => None,
        };

        Ok(CreatureFetch { creature, sprite })
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_catalog_client_creation() {
        let catalog = PokeApiCatalog::new("https://pokeapi.co/api/v2/", 151);
        assert_eq!(catalog.base_url, "https://pokeapi.co/api/v2");
        assert_eq!(catalog.max_id, 151);
        assert_eq!(
            catalog.creature_url(25),
            "https://pokeapi.co/api/v2/pokemon/25"
        );
    }

    #[test]
    fn test_max_id_clamped_to_one() {
        let catalog = PokeApiCatalog::new("http://localhost", 0);
        assert_eq!(catalog.max_id, 1);
    }

    #[test]
    fn test_parse_creature_consumes_only_known_fields() {
        // Trimmed-down catalog response; real ones carry dozens more fields.
        let body = br#"{
            "id": 25,
            "name": "pikachu",
            "base_experience": 112,
            "sprites": {
                "front_default": "https://example.test/25.png",
                "back_default": "https://example.test/back/25.png"
            },
            "types": [{"slot": 1}]
        }"#;

        let creature = PokeApiCatalog::parse_creature(body).unwrap();
        assert_eq!(
            creature,
            Creature {
                id: 25,
                name: "pikachu".to_string(),
                image_url: Some("https://example.test/25.png".to_string()),
            }
        );
    }

    #[test]
    fn test_parse_creature_missing_artwork_is_none() {
        let body = br#"{"id": 999, "name": "ghost", "sprites": {"front_default": null}}"#;
        let creature = PokeApiCatalog::parse_creature(body).unwrap();
        assert_eq!(creature.image_url, None);
    }

    #[test]
    fn test_parse_creature_fails_closed_on_missing_fields() {
        let body = br#"{"id": 25, "sprites": {}}"#;
        let err = PokeApiCatalog::parse_creature(body).unwrap_err();
        assert!(matches!(
            err,
            NetworkError::Malformed {
                service: "catalog",
                ..
            }
        ));
    }

    #[test]
    fn test_sprite_decode_round_trip() {
        use image::{ImageOutputFormat, RgbaImage};

        let mut img = RgbaImage::new(2, 2);
        img.put_pixel(0, 0, image::Rgba([255, 0, 0, 255]));
        img.put_pixel(1, 1, image::Rgba([0, 0, 255, 255]));
        let mut png = std::io::Cursor::new(Vec::new());
        image::DynamicImage::ImageRgba8(img)
            .write_to(&mut png, ImageOutputFormat::Png)
            .unwrap();

        let sprite = SpriteImage::decode(png.get_ref()).unwrap();
        assert_eq!((sprite.width, sprite.height), (2, 2));
        assert_eq!(sprite.pixel(0, 0), [255, 0, 0, 255]);
        assert_eq!(sprite.pixel(1, 1), [0, 0, 255, 255]);
        assert_eq!(sprite.pixel(1, 0), [0, 0, 0, 0]);
    }

    #[test]
    fn test_sprite_decode_rejects_garbage() {
        let err = SpriteImage::decode(b"not a png").unwrap_err();
        assert!(matches!(err, NetworkError::Malformed { .. }));
    }

    #[test]
    fn test_sprite_pixel_out_of_bounds_is_transparent() {
        let sprite = SpriteImage {
            width: 1,
            height: 1,
            rgba: vec![10, 20, 30, 255],
        };
        assert_eq!(sprite.pixel(0, 0), [10, 20, 30, 255]);
        assert_eq!(sprite.pixel(1, 0), [0, 0, 0, 0]);
        assert_eq!(sprite.pixel(0, 9), [0, 0, 0, 0]);
    }
}
