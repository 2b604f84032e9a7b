//! Posts as returned by the server feed

use serde::{Deserialize, Deserializer, Serialize};

/// One stored post.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeedPost {
    #[serde(rename = "ID")]
    pub id: String,
    #[serde(rename = "Note")]
    pub note: String,
    /// Machine name of the poster.
    #[serde(rename = "Author", default)]
    pub author: String,
    /// Server-relative image path; the server sends `""` for text-only posts.
    #[serde(
        rename = "Img",
        default,
        deserialize_with = "empty_string_as_none",
        skip_serializing_if = "Option::is_none"
    )]
    pub img: Option<String>,
}

/// Body of `GET /feed`, newest post first.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeedResponse {
    #[serde(rename = "Posts", default, deserialize_with = "null_as_empty")]
    pub posts: Vec<FeedPost>,
}

fn empty_string_as_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<String>::deserialize(deserializer)?;
    Ok(crate::util::normalize_text_option(value))
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<Vec<FeedPost>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Vec<FeedPost>>::deserialize(deserializer)?.unwrap_or_default())
}
