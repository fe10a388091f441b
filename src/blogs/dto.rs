use serde::{Deserialize, Serialize};

use super::repo::Blog;
use crate::error::ApiError;

/// Wire shape of the `blogData` multipart field. Fields arrive optional so
/// presence checks can tell an empty value from an absent one.
#[derive(Debug, Deserialize)]
pub struct BlogPayload {
    pub title: Option<String>,
    pub author: Option<String>,
    #[serde(rename = "blogContent")]
    pub blog_content: Option<String>,
}

/// Fully validated blog fields, ready to persist.
#[derive(Debug, Clone)]
pub struct NewBlog {
    pub title: String,
    pub author: String,
    pub blog_content: String,
}

/// Second stage of the multipart decode: the raw `blogData` string into a
/// typed payload. An absent or unparsable field is a format error; a
/// missing required value inside a well-formed payload is reported
/// separately.
pub(crate) fn decode_blog_data(raw: Option<&str>) -> Result<NewBlog, ApiError> {
    let raw = raw.ok_or_else(|| ApiError::validation("Invalid blog data format"))?;
    let payload: BlogPayload = serde_json::from_str(raw)
        .map_err(|_| ApiError::validation("Invalid blog data format"))?;

    let require = |field: Option<String>| field.filter(|s| !s.is_empty());
    match (
        require(payload.title),
        require(payload.author),
        require(payload.blog_content),
    ) {
        (Some(title), Some(author), Some(blog_content)) => Ok(NewBlog {
            title,
            author,
            blog_content,
        }),
        _ => Err(ApiError::missing_fields("Please provide all fields")),
    }
}

#[derive(Debug, Serialize)]
pub struct BlogListResponse {
    pub success: bool,
    pub message: String,
    #[serde(rename = "totalLength")]
    pub total_length: usize,
    pub result: Vec<Blog>,
}

#[derive(Debug, Serialize)]
pub struct BlogResponse {
    pub success: bool,
    pub data: Blog,
}

#[derive(Debug, Serialize)]
pub struct CreatedBlogResponse {
    pub success: bool,
    pub message: String,
    pub data: Blog,
}

/// Update echoes the submitted fields plus the stored image name; the row
/// is not re-read after the UPDATE.
#[derive(Debug, Serialize)]
pub struct UpdatedBlog {
    pub title: String,
    pub author: String,
    #[serde(rename = "blogContent")]
    pub blog_content: String,
    pub image: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct UpdatedBlogResponse {
    pub success: bool,
    pub message: String,
    pub data: UpdatedBlog,
}

#[derive(Debug, Serialize)]
pub struct DeleteResponse {
    pub success: bool,
    pub message: String,
}
