//! # plaza-api Handlers
//!
//! This module coordinates the flow between HTTP requests and core traits.
//! Each handler issues one persistence operation and maps the result to a
//! response; response shapes match what the front-end already consumes.

use actix_multipart::Multipart;
use actix_web::{web, HttpResponse};
use chrono::Utc;
use futures_util::TryStreamExt;
use plaza_core::error::AppError;
use plaza_core::models::{Comment, Post, User};
use serde::{Deserialize, Serialize};
use serde_json::json;
use uuid::Uuid;

use crate::error::ApiError;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SignupRequest {
    pub user_name: String,
    pub user_id: String,
    pub user_pw: String,
    pub user_job: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginRequest {
    pub user_id: String,
    pub user_pw: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommentRequest {
    pub post_id: Uuid,
    pub comment: String,
}

/// A post plus its comments, rendered as the ordered bodies the board
/// front-end expects.
#[derive(Serialize)]
struct PostDetail {
    #[serde(flatten)]
    post: Post,
    comments: Vec<String>,
}

pub async fn signup(
    state: web::Data<AppState>,
    body: web::Json<SignupRequest>,
) -> Result<HttpResponse, ApiError> {
    let body = body.into_inner();
    let password_hash = state.hasher.hash_password(&body.user_pw)?;

    let user = User {
        id: Uuid::now_v7(),
        name: body.user_name,
        login_id: body.user_id,
        password_hash,
        job: body.user_job,
        created_at: Utc::now(),
    };
    state.users.create_user(user).await?;

    Ok(HttpResponse::Ok().body("User registered successfully!"))
}

pub async fn login(
    state: web::Data<AppState>,
    body: web::Json<LoginRequest>,
) -> Result<HttpResponse, ApiError> {
    // Unknown id and wrong password are indistinguishable to the caller.
    let user = state.users.find_by_login_id(&body.user_id).await?;
    match user {
        Some(user) if state.hasher.verify_password(&body.user_pw, &user.password_hash) => {
            Ok(HttpResponse::Ok().json(json!({
                "message": "Login successful!",
                "user": user,
            })))
        }
        _ => Err(AppError::Unauthorized("Invalid credentials".into()).into()),
    }
}

fn bad_multipart(err: actix_multipart::MultipartError) -> ApiError {
    AppError::ValidationError(format!("malformed multipart form: {err}")).into()
}

pub async fn submit_post(
    state: web::Data<AppState>,
    mut payload: Multipart,
) -> Result<HttpResponse, ApiError> {
    let mut title = String::new();
    let mut content = String::new();
    let mut user_name = String::new();
    let mut user_job = String::new();
    let mut stored_file: Option<String> = None;

    while let Some(mut field) = payload.try_next().await.map_err(bad_multipart)? {
        let disposition = field.content_disposition();
        let name = disposition.get_name().unwrap_or("").to_string();
        let filename = disposition.get_filename().map(str::to_string);

        let mut data = Vec::new();
        while let Some(chunk) = field.try_next().await.map_err(bad_multipart)? {
            data.extend_from_slice(&chunk);
        }

        match name.as_str() {
            "title" => title = String::from_utf8_lossy(&data).into_owned(),
            "content" => content = String::from_utf8_lossy(&data).into_owned(),
            "userName" => user_name = String::from_utf8_lossy(&data).into_owned(),
            "userJob" => user_job = String::from_utf8_lossy(&data).into_owned(),
            "file" => {
                if let Some(original) = filename.filter(|f| !f.is_empty()) {
                    stored_file = Some(state.files.store(&original, data).await?);
                }
            }
            _ => {}
        }
    }

    let post = Post {
        id: Uuid::now_v7(),
        title,
        content,
        user_name,
        user_job,
        file: stored_file,
        created_at: Utc::now(),
    };
    state.board.create_post(post).await?;

    Ok(HttpResponse::Ok().body("Post submitted successfully!"))
}

pub async fn list_posts(state: web::Data<AppState>) -> Result<HttpResponse, ApiError> {
    let posts = state.board.list_posts().await?;
    Ok(HttpResponse::Ok().json(posts))
}

pub async fn get_post(
    state: web::Data<AppState>,
    path: web::Path<Uuid>,
) -> Result<HttpResponse, ApiError> {
    let id = path.into_inner();
    let Some(post) = state.board.get_post(id).await? else {
        return Err(AppError::NotFound("Post".into()).into());
    };

    let comments = state
        .board
        .list_comments(id)
        .await?
        .into_iter()
        .map(|c| c.body)
        .filter(|body| !body.is_empty())
        .collect();

    Ok(HttpResponse::Ok().json(PostDetail { post, comments }))
}

pub async fn add_comment(
    state: web::Data<AppState>,
    body: web::Json<CommentRequest>,
) -> Result<HttpResponse, ApiError> {
    let added = state
        .board
        .add_comment(Comment::new(body.post_id, body.comment.clone()))
        .await?;

    if added {
        Ok(HttpResponse::Ok().body("Comment added successfully!"))
    } else {
        Err(AppError::NotFound("Post".into()).into())
    }
}

pub async fn list_post_comments(
    state: web::Data<AppState>,
    path: web::Path<Uuid>,
) -> Result<HttpResponse, ApiError> {
    let id = path.into_inner();
    if state.board.get_post(id).await?.is_none() {
        return Err(AppError::NotFound("Post".into()).into());
    }
    let comments = state.board.list_comments(id).await?;
    Ok(HttpResponse::Ok().json(comments))
}

pub async fn delete_comment(
    state: web::Data<AppState>,
    path: web::Path<Uuid>,
) -> Result<HttpResponse, ApiError> {
    if state.board.delete_comment(path.into_inner()).await? {
        Ok(HttpResponse::Ok().json(json!({ "message": "Comment deleted successfully" })))
    } else {
        Err(AppError::NotFound("Comment".into()).into())
    }
}

pub async fn delete_post(
    state: web::Data<AppState>,
    path: web::Path<Uuid>,
) -> Result<HttpResponse, ApiError> {
    if state.board.delete_post(path.into_inner()).await? {
        Ok(HttpResponse::Ok().json(json!({ "message": "Post deleted successfully" })))
    } else {
        Err(AppError::NotFound("Post".into()).into())
    }
}

pub async fn list_policies(
    state: web::Data<AppState>,
    path: web::Path<(String, String)>,
) -> Result<HttpResponse, ApiError> {
    // Path segments arrive URL-decoded, so regions with spaces or Hangul
    // work as-is.
    let (region, field) = path.into_inner();
    let names = state.policies.list_policy_names(&region, &field).await?;

    let rows: Vec<_> = names
        .into_iter()
        .map(|name| json!({ "policyName": name }))
        .collect();
    Ok(HttpResponse::Ok().json(rows))
}

pub async fn policy_description(
    state: web::Data<AppState>,
    path: web::Path<String>,
) -> Result<HttpResponse, ApiError> {
    match state.policies.find_description(&path.into_inner()).await? {
        Some(description) => Ok(HttpResponse::Ok().json(json!({ "description": description }))),
        None => Err(AppError::NotFound("Policy".into()).into()),
    }
}

pub async fn socket_status(state: web::Data<AppState>) -> HttpResponse {
    HttpResponse::Ok().json(json!({ "connected": state.sessions.any_connected() }))
}
