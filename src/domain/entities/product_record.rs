//! Normalized product data and the raw upstream node it is built from.

use serde::{Deserialize, Serialize};

/// Product data returned to the caller of the fetch client.
///
/// Built from whichever query shape first yields a non-null node. Transient:
/// nothing in this crate persists it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductRecord {
    pub id: String,
    pub name: String,
    pub tagline: String,
    pub description: String,
    pub logo_url: String,
    pub media: Vec<String>,
    pub votes_count: u64,
    pub comments_count: u64,
    pub url: String,
}

/// A product or post node as the upstream API returns it.
///
/// Every field is optional: the three query shapes select slightly different
/// fields (`url` on posts, `website` on products) and upstream may null any of them.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpstreamProduct {
    pub id: Option<String>,
    pub name: Option<String>,
    pub tagline: Option<String>,
    pub description: Option<String>,
    pub url: Option<String>,
    pub website: Option<String>,
    pub thumbnail: Option<UpstreamThumbnail>,
    pub media: Option<Vec<UpstreamMedia>>,
    pub votes_count: Option<u64>,
    pub comments_count: Option<u64>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpstreamThumbnail {
    pub url: Option<String>,
}

/// One media item; images carry `url`, videos may carry only `videoUrl`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpstreamMedia {
    #[serde(rename = "type")]
    pub kind: Option<String>,
    pub url: Option<String>,
    pub video_url: Option<String>,
}

impl UpstreamMedia {
    /// Still-image URL if present, otherwise the video URL.
    fn resolved_url(self) -> Option<String> {
        non_empty(self.url).or_else(|| non_empty(self.video_url))
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}

impl From<UpstreamProduct> for ProductRecord {
    fn from(node: UpstreamProduct) -> Self {
        let media = node
            .media
            .unwrap_or_default()
            .into_iter()
            .filter_map(UpstreamMedia::resolved_url)
            .collect();

        let url = non_empty(node.url)
            .or_else(|| non_empty(node.website))
            .unwrap_or_default();

        Self {
            id: node.id.unwrap_or_default(),
            name: node.name.unwrap_or_default(),
            tagline: node.tagline.unwrap_or_default(),
            description: node.description.unwrap_or_default(),
            logo_url: node.thumbnail.and_then(|t| t.url).unwrap_or_default(),
            media,
            votes_count: node.votes_count.unwrap_or(0),
            comments_count: node.comments_count.unwrap_or(0),
            url,
        }
    }
}
