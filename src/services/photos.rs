//! Photo Service
//!
//! Fetches the public photo list shown by the photos demo.

use serde::{Deserialize, Serialize};

use crate::error::Result;

/// One record of the photo list endpoint
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Photo {
    pub album_id: u64,
    pub id: u64,
    pub title: String,
    pub url: String,
    pub thumbnail_url: String,
}

impl Photo {
    /// Display label, e.g. `12 - accusamus beatae`
    pub fn label(&self) -> String {
        format!("{} - {}", self.id, self.title)
    }
}

/// Fetch the photo list. Must run inside the tokio runtime (see `run_in_tokio`).
pub async fn fetch_photos(url: String) -> Result<Vec<Photo>> {
    tracing::info!(url = %url, "Fetching photos");
    let photos = reqwest::get(&url)
        .await?
        .error_for_status()?
        .json::<Vec<Photo>>()
        .await?;
    tracing::info!(count = photos.len(), "Fetched photos");
    Ok(photos)
}

/// Decode a photo list from JSON text
pub fn parse_photos(json: &str) -> Result<Vec<Photo>> {
    Ok(serde_json::from_str(json)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"[
        {
            "albumId": 1,
            "id": 1,
            "title": "accusamus beatae ad facilis cum similique qui sunt",
            "url": "https://via.placeholder.com/600/92c952",
            "thumbnailUrl": "https://via.placeholder.com/150/92c952"
        },
        {
            "albumId": 1,
            "id": 2,
            "title": "reprehenderit est deserunt velit ipsam",
            "url": "https://via.placeholder.com/600/771796",
            "thumbnailUrl": "https://via.placeholder.com/150/771796"
        }
    ]"#;

    #[test]
    fn test_parse_photos() {
        let photos = parse_photos(SAMPLE).expect("parse failed");
        assert_eq!(photos.len(), 2);
        assert_eq!(photos[1].id, 2);
        assert_eq!(photos[0].album_id, 1);
        assert_eq!(photos[0].thumbnail_url, "https://via.placeholder.com/150/92c952");
    }

    #[test]
    fn test_photo_label() {
        let photos = parse_photos(SAMPLE).expect("parse failed");
        assert_eq!(photos[1].label(), "2 - reprehenderit est deserunt velit ipsam");
    }

    #[test]
    fn test_parse_rejects_missing_fields() {
        assert!(parse_photos(r#"[{"id": 1}]"#).is_err());
    }
}
