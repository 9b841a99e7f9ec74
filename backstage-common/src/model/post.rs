//! Social-media post records

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::{ids, Error};

/// Platform a post is published on
///
/// The known platforms get their own variant; any other name is kept
/// verbatim in [`Platform::Other`].
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Platform {
    #[default]
    Instagram,
    TikTok,
    Twitter,
    YouTube,
    Facebook,
    Other(String),
}

impl Platform {
    pub fn as_str(&self) -> &str {
        match self {
            Platform::Instagram => "Instagram",
            Platform::TikTok => "TikTok",
            Platform::Twitter => "Twitter",
            Platform::YouTube => "YouTube",
            Platform::Facebook => "Facebook",
            Platform::Other(name) => name,
        }
    }
}

impl From<String> for Platform {
    fn from(name: String) -> Self {
        match name.to_ascii_lowercase().as_str() {
            "instagram" => Platform::Instagram,
            "tiktok" => Platform::TikTok,
            "twitter" | "x" => Platform::Twitter,
            "youtube" => Platform::YouTube,
            "facebook" => Platform::Facebook,
            _ => Platform::Other(name),
        }
    }
}

impl From<Platform> for String {
    fn from(platform: Platform) -> Self {
        platform.as_str().to_string()
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Publishing status of a post
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PostStatus {
    #[default]
    Draft,
    Scheduled,
    Posted,
}

impl PostStatus {
    /// Next status in the draft → scheduled → posted → draft cycle
    pub fn next(self) -> Self {
        match self {
            PostStatus::Draft => PostStatus::Scheduled,
            PostStatus::Scheduled => PostStatus::Posted,
            PostStatus::Posted => PostStatus::Draft,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            PostStatus::Draft => "draft",
            PostStatus::Scheduled => "scheduled",
            PostStatus::Posted => "posted",
        }
    }
}

impl fmt::Display for PostStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PostStatus {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "draft" => Ok(PostStatus::Draft),
            "scheduled" => Ok(PostStatus::Scheduled),
            "posted" => Ok(PostStatus::Posted),
            _ => Err(Error::InvalidInput(format!("unknown post status '{}'", s))),
        }
    }
}

/// A planned or published social-media post
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SocialPost {
    pub id: String,
    pub artist_id: String,
    pub platform: Platform,
    /// Content type: Post, Reel, Story, Video, ...
    #[serde(rename = "type")]
    pub content_type: String,
    pub date: String,
    pub caption: String,
    pub status: PostStatus,
}

impl SocialPost {
    pub fn new(artist_id: impl Into<String>, platform: Platform) -> Self {
        Self {
            id: ids::generate(),
            artist_id: artist_id.into(),
            platform,
            content_type: "Post".to_string(),
            date: String::new(),
            caption: String::new(),
            status: PostStatus::default(),
        }
    }
}

/// Partial update for a [`SocialPost`]; `None` fields are left untouched
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PostPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub platform: Option<Platform>,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub content_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub caption: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<PostStatus>,
}

impl PostPatch {
    pub fn status(status: PostStatus) -> Self {
        Self {
            status: Some(status),
            ..Self::default()
        }
    }

    /// Merge the present fields into `post`
    pub fn apply_to(self, post: &mut SocialPost) {
        if let Some(platform) = self.platform {
            post.platform = platform;
        }
        if let Some(content_type) = self.content_type {
            post.content_type = content_type;
        }
        if let Some(date) = self.date {
            post.date = date;
        }
        if let Some(caption) = self.caption {
            post.caption = caption;
        }
        if let Some(status) = self.status {
            post.status = status;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_cycle_returns_to_start() {
        let start = PostStatus::Draft;
        assert_eq!(start.next(), PostStatus::Scheduled);
        assert_eq!(start.next().next(), PostStatus::Posted);
        assert_eq!(start.next().next().next(), start);
    }

    #[test]
    fn test_platform_open_set() {
        let known: Platform = serde_json::from_str(r#""TikTok""#).unwrap();
        assert_eq!(known, Platform::TikTok);

        let other: Platform = serde_json::from_str(r#""Threads""#).unwrap();
        assert_eq!(other, Platform::Other("Threads".into()));
        assert_eq!(serde_json::to_string(&other).unwrap(), r#""Threads""#);
    }

    #[test]
    fn test_patch_only_touches_present_fields() {
        let mut post = SocialPost::new("cyril", Platform::Instagram);
        post.caption = "Studio session preview".into();

        PostPatch::status(PostStatus::Posted).apply_to(&mut post);

        assert_eq!(post.status, PostStatus::Posted);
        assert_eq!(post.caption, "Studio session preview");
        assert_eq!(post.platform, Platform::Instagram);
    }

    #[test]
    fn test_post_wire_names() {
        let mut post = SocialPost::new("cyril", Platform::YouTube);
        post.content_type = "Video".into();
        let json = serde_json::to_value(&post).unwrap();
        assert_eq!(json["artistId"], "cyril");
        assert_eq!(json["platform"], "YouTube");
        assert_eq!(json["type"], "Video");
        assert_eq!(json["status"], "draft");
    }
}
