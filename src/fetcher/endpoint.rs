use url::Url;
use uuid::Uuid;

/// Remote API routes, resolved against a base URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Endpoint {
    /// A page of the feed, optionally continuing after the item `after`.
    Feed { limit: usize, after: Option<Uuid> },
    /// Comments posted on one feed image.
    ImageComments(Uuid),
}

impl Endpoint {
    /// `base` must be able to be a base (see [`Config::validate`](crate::config::Config::validate));
    /// otherwise only the query is applied.
    pub fn url(&self, base: &Url) -> Url {
        let mut url = base.clone();

        if let Ok(mut segments) = url.path_segments_mut() {
            segments.pop_if_empty();
            match self {
                Endpoint::Feed { .. } => {
                    segments.extend(["v1", "feed"]);
                }
                Endpoint::ImageComments(id) => {
                    let id = id.to_string();
                    segments.extend(["v1", "image", id.as_str(), "comments"]);
                }
            }
        }

        if let Endpoint::Feed { limit, after } = self {
            let mut query = url.query_pairs_mut();
            query.append_pair("limit", &limit.to_string());
            if let Some(after) = after {
                query.append_pair("after_id", &after.to_string());
            }
        }

        url
    }
}
