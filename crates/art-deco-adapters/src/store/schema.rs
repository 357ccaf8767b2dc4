//! Wire Schema Translation
//!
//! Backend versions disagree on the author field name (`author` vs `artist`).
//! Each schema version owns one field table; records are mapped to `Artwork`
//! here and nowhere else, so no backend field name escapes the store adapters.

use reqwest::Url;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::HashMap;

use art_deco::{Artwork, StoreError};

/// Backend field names for one schema version
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldNames {
    pub id: &'static str,
    pub title: &'static str,
    pub author: &'static str,
    pub url: &'static str,
}

const V1_FIELDS: FieldNames = FieldNames {
    id: "ulid",
    title: "title",
    author: "author",
    url: "image_url",
};

const V2_FIELDS: FieldNames = FieldNames {
    id: "ulid",
    title: "title",
    author: "artist",
    url: "image_url",
};

/// Backend record schema version
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WireSchema {
    /// `{ulid, title, author, image_url}`
    #[default]
    V1,
    /// `{ulid, title, artist, image_url}`
    V2,
}

impl WireSchema {
    pub fn fields(self) -> &'static FieldNames {
        match self {
            WireSchema::V1 => &V1_FIELDS,
            WireSchema::V2 => &V2_FIELDS,
        }
    }

    /// Translate one backend record
    pub fn to_artwork(self, record: &Value) -> Result<Artwork, StoreError> {
        let fields = self.fields();
        let object = record
            .as_object()
            .ok_or_else(|| StoreError::malformed("expected a JSON object"))?;

        let id = text_field(object, fields.id)?;
        if id.is_empty() {
            return Err(StoreError::malformed("empty artwork id"));
        }

        let url = text_field(object, fields.url)?;
        Url::parse(url).map_err(|e| {
            StoreError::malformed(format!("`{}` is not an absolute URL: {e}", fields.url))
        })?;

        let title = text_field(object, fields.title)?;
        let author = text_field(object, fields.author)?;

        Ok(Artwork::new(id, title, author, url))
    }

    /// Translate a ranked list of backend records, keeping their order
    pub fn to_artworks(self, records: &Value) -> Result<Vec<Artwork>, StoreError> {
        let items = records
            .as_array()
            .ok_or_else(|| StoreError::malformed("expected a JSON array"))?;

        let artworks = items
            .iter()
            .map(|record| self.to_artwork(record))
            .collect::<Result<Vec<_>, _>>()?;

        check_unique_ids(&artworks)?;
        Ok(artworks)
    }
}

fn text_field<'a>(object: &'a Map<String, Value>, name: &str) -> Result<&'a str, StoreError> {
    object
        .get(name)
        .and_then(Value::as_str)
        .ok_or_else(|| StoreError::malformed(format!("missing string field `{name}`")))
}

/// One id may repeat only if every occurrence is the same record
fn check_unique_ids(artworks: &[Artwork]) -> Result<(), StoreError> {
    let mut seen: HashMap<&str, &Artwork> = HashMap::with_capacity(artworks.len());

    for artwork in artworks {
        if let Some(previous) = seen.insert(artwork.id(), artwork) {
            if previous != artwork {
                tracing::warn!(id = artwork.id(), "Conflicting records share an id");
                return Err(StoreError::malformed(format!(
                    "id {} refers to two different records",
                    artwork.id()
                )));
            }
        }
    }

    Ok(())
}

impl std::fmt::Display for WireSchema {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            WireSchema::V1 => write!(f, "v1"),
            WireSchema::V2 => write!(f, "v2"),
        }
    }
}

impl std::str::FromStr for WireSchema {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "v1" | "author" => Ok(WireSchema::V1),
            "v2" | "artist" => Ok(WireSchema::V2),
            _ => Err(format!("Unknown wire schema: {}", s)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_v1_record() {
        let record = json!({
            "ulid": "A1",
            "title": "Starry Night",
            "author": "Van Gogh",
            "image_url": "http://x/a1.png",
        });

        assert_eq!(
            WireSchema::V1.to_artwork(&record).unwrap(),
            Artwork::new("A1", "Starry Night", "Van Gogh", "http://x/a1.png")
        );
    }

    #[test]
    fn test_v2_record_uses_artist() {
        let record = json!({
            "ulid": "A1",
            "title": "Starry Night",
            "artist": "Van Gogh",
            "image_url": "http://x/a1.png",
        });

        assert_eq!(WireSchema::V2.to_artwork(&record).unwrap().author(), "Van Gogh");
        assert!(WireSchema::V1.to_artwork(&record).is_err());
    }

    #[test]
    fn test_extra_fields_are_ignored() {
        let record = json!({
            "ulid": "A1",
            "title": "",
            "author": "",
            "description": "Oil on canvas",
            "score": "0.12",
            "image_url": "https://x/a1.png",
        });

        let artwork = WireSchema::V1.to_artwork(&record).unwrap();
        assert_eq!(artwork.title(), "");
        assert_eq!(artwork.author(), "");
    }

    #[test]
    fn test_rejects_bad_records() {
        let relative = json!({"ulid": "A1", "title": "t", "author": "a", "image_url": "a1.png"});
        let null_title = json!({"ulid": "A1", "title": null, "author": "a", "image_url": "http://x/a"});
        let empty_id = json!({"ulid": "", "title": "t", "author": "a", "image_url": "http://x/a"});

        for record in [relative, null_title, empty_id, json!("A1")] {
            assert!(matches!(
                WireSchema::V1.to_artwork(&record),
                Err(StoreError::MalformedPayload(_))
            ));
        }
    }

    #[test]
    fn test_duplicate_ids() {
        let same = json!([
            {"ulid": "A1", "title": "t", "author": "a", "image_url": "http://x/a"},
            {"ulid": "A1", "title": "t", "author": "a", "image_url": "http://x/a"},
        ]);
        assert_eq!(WireSchema::V1.to_artworks(&same).unwrap().len(), 2);

        let conflicting = json!([
            {"ulid": "A1", "title": "t", "author": "a", "image_url": "http://x/a"},
            {"ulid": "A1", "title": "other", "author": "a", "image_url": "http://x/a"},
        ]);
        assert!(WireSchema::V1.to_artworks(&conflicting).is_err());
    }

    #[test]
    fn test_parse_schema() {
        assert_eq!("V2".parse::<WireSchema>().unwrap(), WireSchema::V2);
        assert_eq!("author".parse::<WireSchema>().unwrap(), WireSchema::V1);
        assert!("v3".parse::<WireSchema>().is_err());
    }
}
