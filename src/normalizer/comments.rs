use chrono::{DateTime, Utc};
use serde::Deserialize;
use uuid::Uuid;

use crate::app::{LoadError, LoadResult};
use crate::domain::Comment;
use crate::normalizer::is_success;

#[derive(Deserialize)]
struct Root {
    items: Vec<RemoteComment>,
}

#[derive(Deserialize)]
struct RemoteComment {
    id: Uuid,
    message: String,
    created_at: DateTime<Utc>,
    author: RemoteAuthor,
}

#[derive(Deserialize)]
struct RemoteAuthor {
    username: String,
}

pub fn map_comments(body: &[u8], status: u16) -> LoadResult<Vec<Comment>> {
    if !is_success(status) {
        return Err(LoadError::InvalidData);
    }

    let root: Root = serde_json::from_slice(body).map_err(|_| LoadError::InvalidData)?;

    Ok(root
        .items
        .into_iter()
        .map(|comment| Comment {
            id: comment.id,
            message: comment.message,
            created_at: comment.created_at,
            username: comment.author.username,
        })
        .collect())
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;

    #[test]
    fn test_rejects_non_2xx_status() {
        for status in [150, 300, 400, 500] {
            assert!(matches!(
                map_comments(br#"{"items":[]}"#, status),
                Err(LoadError::InvalidData)
            ));
        }
    }

    #[test]
    fn test_rejects_invalid_json_on_2xx() {
        assert!(matches!(
            map_comments(b"not json", 201),
            Err(LoadError::InvalidData)
        ));
    }

    #[test]
    fn test_maps_comments() {
        let body = br#"{
            "items": [
                {
                    "id": "7019D8A7-0B35-4057-B7F9-8C5471961ED0",
                    "message": "a message",
                    "created_at": "2020-05-20T11:24:59Z",
                    "author": { "username": "a username" }
                },
                {
                    "id": "1F4A3B22-9E6E-46FC-BB6C-48B33269951B",
                    "message": "another message",
                    "created_at": "2020-05-19T14:23:53+00:00",
                    "author": { "username": "another username" }
                }
            ]
        }"#;

        let comments = map_comments(body, 200).unwrap();

        assert_eq!(comments.len(), 2);
        assert_eq!(comments[0].message, "a message");
        assert_eq!(comments[0].username, "a username");
        assert_eq!(
            comments[0].created_at,
            Utc.with_ymd_and_hms(2020, 5, 20, 11, 24, 59).unwrap()
        );
        assert_eq!(
            comments[1].created_at,
            Utc.with_ymd_and_hms(2020, 5, 19, 14, 23, 53).unwrap()
        );
    }
}
