use serde::Deserialize;
use url::Url;
use uuid::Uuid;

use crate::app::{LoadError, LoadResult};
use crate::domain::FeedItem;
use crate::normalizer::is_success;

#[derive(Deserialize)]
struct Root {
    items: Vec<RemoteFeedItem>,
}

#[derive(Deserialize)]
struct RemoteFeedItem {
    id: Uuid,
    description: Option<String>,
    location: Option<String>,
    image: Url,
}

pub fn map_feed_items(body: &[u8], status: u16) -> LoadResult<Vec<FeedItem>> {
    if !is_success(status) {
        return Err(LoadError::InvalidData);
    }

    let root: Root = serde_json::from_slice(body).map_err(|_| LoadError::InvalidData)?;

    Ok(root
        .items
        .into_iter()
        .map(|item| FeedItem {
            id: item.id,
            description: item.description,
            location: item.location,
            url: item.image,
        })
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejects_non_2xx_status() {
        let body = br#"{"items":[]}"#;
        for status in [199, 300, 400, 404, 500] {
            assert!(
                matches!(map_feed_items(body, status), Err(LoadError::InvalidData)),
                "status {status} should be rejected"
            );
        }
    }

    #[test]
    fn test_rejects_invalid_json() {
        assert!(matches!(
            map_feed_items(b"invalid json", 200),
            Err(LoadError::InvalidData)
        ));
    }

    #[test]
    fn test_rejects_json_without_items() {
        assert!(matches!(
            map_feed_items(br#"{"entries":[]}"#, 200),
            Err(LoadError::InvalidData)
        ));
    }

    #[test]
    fn test_empty_list() {
        for status in [200, 201, 250, 299] {
            assert!(map_feed_items(br#"{"items":[]}"#, status).unwrap().is_empty());
        }
    }

    #[test]
    fn test_maps_items() {
        let body = br#"{
            "items": [
                {
                    "id": "73A7F70C-75DA-4C2E-B5A3-EED40DC53AA6",
                    "description": "Description 1",
                    "location": "Location 1",
                    "image": "https://url-1.com"
                },
                {
                    "id": "BA298A85-6275-48D3-8315-9C8F7C1CD109",
                    "image": "https://url-2.com"
                }
            ]
        }"#;

        let items = map_feed_items(body, 200).unwrap();

        assert_eq!(items.len(), 2);
        assert_eq!(
            items[0].id,
            Uuid::parse_str("73A7F70C-75DA-4C2E-B5A3-EED40DC53AA6").unwrap()
        );
        assert_eq!(items[0].description.as_deref(), Some("Description 1"));
        assert_eq!(items[0].location.as_deref(), Some("Location 1"));
        assert_eq!(items[1].description, None);
        assert_eq!(items[1].url.as_str(), "https://url-2.com/");
    }
}
