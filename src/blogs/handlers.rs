use axum::{
    extract::{DefaultBodyLimit, Multipart, Path, State},
    http::StatusCode,
    routing::{delete, get, post, put},
    Json, Router,
};
use bytes::Bytes;
use tracing::{info, instrument};

use super::dto::{
    decode_blog_data, BlogListResponse, BlogResponse, CreatedBlogResponse, DeleteResponse,
    UpdatedBlog, UpdatedBlogResponse,
};
use super::repo::Blog;
use crate::{auth::extractors::AuthUser, error::ApiError, state::AppState};

const IMAGE_FIELD: &str = "image";
const MAX_UPLOAD_BYTES: usize = 20 * 1024 * 1024;

pub fn read_routes() -> Router<AppState> {
    Router::new()
        .route("/personalBlogs", get(list_blogs))
        .route("/personalBlog/:id", get(get_blog))
}

pub fn write_routes() -> Router<AppState> {
    Router::new()
        .route("/personalBlog", post(create_blog))
        .route("/updateBlog/:id", put(update_blog))
        .route("/delete/:id", delete(delete_blog))
        .layer(DefaultBodyLimit::max(MAX_UPLOAD_BYTES))
}

struct UploadedFile {
    original_name: String,
    body: Bytes,
}

/// First stage of the multipart decode: pull out the serialized `blogData`
/// field and the optional image file, ignoring anything else.
async fn read_form(
    multipart: &mut Multipart,
) -> Result<(Option<String>, Option<UploadedFile>), ApiError> {
    let mut blog_data = None;
    let mut upload = None;
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|_| ApiError::validation("Invalid blog data format"))?
    {
        let name = field.name().map(|s| s.to_string());
        match name.as_deref() {
            Some("blogData") => {
                blog_data = Some(
                    field
                        .text()
                        .await
                        .map_err(|_| ApiError::validation("Invalid blog data format"))?,
                );
            }
            Some(IMAGE_FIELD) => {
                let original_name = field.file_name().unwrap_or(IMAGE_FIELD).to_string();
                let body = field
                    .bytes()
                    .await
                    .map_err(|_| ApiError::validation("Invalid blog data format"))?;
                upload = Some(UploadedFile {
                    original_name,
                    body,
                });
            }
            _ => {}
        }
    }
    Ok((blog_data, upload))
}

async fn store_upload(
    state: &AppState,
    upload: Option<UploadedFile>,
) -> Result<Option<String>, ApiError> {
    match upload {
        Some(up) => {
            let name = state
                .images
                .save(IMAGE_FIELD, &up.original_name, up.body)
                .await?;
            Ok(Some(name))
        }
        None => Ok(None),
    }
}

#[instrument(skip(state))]
pub async fn list_blogs(
    State(state): State<AppState>,
) -> Result<Json<BlogListResponse>, ApiError> {
    let blogs = Blog::find_all(&state.db).await?;
    Ok(Json(BlogListResponse {
        success: true,
        message: "All Personal Blogs records".into(),
        total_length: blogs.len(),
        result: blogs,
    }))
}

#[instrument(skip(state))]
pub async fn get_blog(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<BlogResponse>, ApiError> {
    let id: i32 = id
        .parse()
        .map_err(|_| ApiError::not_found("Blog ID is Invalid.."))?;
    let blog = Blog::find_by_id(&state.db, id)
        .await?
        .ok_or_else(|| ApiError::not_found("NO Blogs Found"))?;
    Ok(Json(BlogResponse {
        success: true,
        data: blog,
    }))
}

#[instrument(skip(state, multipart))]
pub async fn create_blog(
    State(state): State<AppState>,
    AuthUser(author_email): AuthUser,
    mut multipart: Multipart,
) -> Result<(StatusCode, Json<CreatedBlogResponse>), ApiError> {
    let (blog_data, upload) = read_form(&mut multipart).await?;
    let new = decode_blog_data(blog_data.as_deref())?;
    let image = store_upload(&state, upload).await?;

    let id = Blog::create(&state.db, &new, image.as_deref()).await?;
    let blog = Blog::find_by_id(&state.db, id)
        .await?
        .ok_or_else(|| anyhow::anyhow!("Error in INSERT QUERY"))?;

    info!(blog_id = %blog.id, author = %author_email, "blog created");
    Ok((
        StatusCode::CREATED,
        Json(CreatedBlogResponse {
            success: true,
            message: "New personal blog created Successfully".into(),
            data: blog,
        }),
    ))
}

#[instrument(skip(state, multipart))]
pub async fn update_blog(
    State(state): State<AppState>,
    AuthUser(author_email): AuthUser,
    Path(id): Path<String>,
    mut multipart: Multipart,
) -> Result<Json<UpdatedBlogResponse>, ApiError> {
    let id: i32 = id
        .parse()
        .map_err(|_| ApiError::validation("Blog ID is not found"))?;

    let (blog_data, upload) = read_form(&mut multipart).await?;
    let new = decode_blog_data(blog_data.as_deref())?;
    // Full replace: when no new file is uploaded the image column is
    // cleared, not preserved.
    let image = store_upload(&state, upload).await?;

    let affected = Blog::update(&state.db, id, &new, image.as_deref()).await?;
    if affected == 0 {
        return Err(ApiError::not_found("Blog not found or no changes made"));
    }

    info!(blog_id = %id, author = %author_email, "blog updated");
    Ok(Json(UpdatedBlogResponse {
        success: true,
        message: "Personal Blog Updated Successfully".into(),
        data: UpdatedBlog {
            title: new.title,
            author: new.author,
            blog_content: new.blog_content,
            image,
        },
    }))
}

#[instrument(skip(state))]
pub async fn delete_blog(
    State(state): State<AppState>,
    AuthUser(author_email): AuthUser,
    Path(id): Path<String>,
) -> Result<Json<DeleteResponse>, ApiError> {
    let id: i32 = id
        .parse()
        .map_err(|_| ApiError::not_found("Blog ID not Found!"))?;

    let deleted = Blog::delete(&state.db, id).await?;
    if deleted == 0 {
        // Deliberately 200 with success:false rather than 404.
        return Ok(Json(DeleteResponse {
            success: false,
            message: "Blog ID not Found!".into(),
        }));
    }

    info!(blog_id = %id, author = %author_email, "blog deleted");
    Ok(Json(DeleteResponse {
        success: true,
        message: "Personal blog Delete Successfully".into(),
    }))
}
