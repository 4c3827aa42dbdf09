//! Generic handlers shared by every record collection.
//!
//! | Method   | Path | Notes |
//! |----------|------|-------|
//! | `GET`    | `/{records}` | Newest first |
//! | `POST`   | `/{records}` | Body: the record's draft; returns 201 + stored record |
//! | `GET`    | `/{records}/{id}` | 404 if not found |
//! | `PUT`    | `/{records}/{id}` | Body: the record's draft; owner only |
//! | `DELETE` | `/{records}/{id}` | 204; owner only, cascades to dependents |
//! | `GET`    | `/{parents}/{id}/{records}` | Children of one parent |

use std::sync::Arc;

use axum::{
  Extension, Json,
  extract::{Path, State},
  http::StatusCode,
  response::IntoResponse,
};
use casefile_core::{Child, Record, Requester, store::RecordStore};
use uuid::Uuid;

use crate::error::ApiError;

// ─── List ─────────────────────────────────────────────────────────────────────

/// `GET /{records}`
pub async fn list<S, R>(
  State(store): State<Arc<S>>,
  Extension(who): Extension<Requester>,
) -> Result<Json<Vec<R>>, ApiError>
where
  S: RecordStore,
  R: Record,
{
  let records = store.list::<R>(who).await.map_err(ApiError::store)?;
  Ok(Json(records))
}

/// `GET /{parents}/{id}/{records}`
pub async fn list_children<S, R>(
  State(store): State<Arc<S>>,
  Extension(who): Extension<Requester>,
  Path(parent_id): Path<Uuid>,
) -> Result<Json<Vec<R>>, ApiError>
where
  S: RecordStore,
  R: Child,
{
  let records = store
    .list_children::<R>(who, parent_id)
    .await
    .map_err(ApiError::store)?;
  Ok(Json(records))
}

// ─── Create ───────────────────────────────────────────────────────────────────

/// `POST /{records}`
pub async fn create<S, R>(
  State(store): State<Arc<S>>,
  Extension(who): Extension<Requester>,
  Json(draft): Json<R::Draft>,
) -> Result<impl IntoResponse, ApiError>
where
  S: RecordStore,
  R: Record,
{
  let record = store
    .insert::<R>(who, draft)
    .await
    .map_err(ApiError::store)?;
  Ok((StatusCode::CREATED, Json(record)))
}

// ─── Get one ──────────────────────────────────────────────────────────────────

/// `GET /{records}/{id}`
pub async fn get_one<S, R>(
  State(store): State<Arc<S>>,
  Extension(who): Extension<Requester>,
  Path(id): Path<Uuid>,
) -> Result<Json<R>, ApiError>
where
  S: RecordStore,
  R: Record,
{
  let record = store
    .get::<R>(who, id)
    .await
    .map_err(ApiError::store)?
    .ok_or_else(|| ApiError::NotFound(format!("{} {id} not found", R::ENTITY)))?;
  Ok(Json(record))
}

// ─── Update ───────────────────────────────────────────────────────────────────

/// `PUT /{records}/{id}`
pub async fn update<S, R>(
  State(store): State<Arc<S>>,
  Extension(who): Extension<Requester>,
  Path(id): Path<Uuid>,
  Json(draft): Json<R::Draft>,
) -> Result<Json<R>, ApiError>
where
  S: RecordStore,
  R: Record,
{
  let record = store
    .update::<R>(who, id, draft)
    .await
    .map_err(ApiError::store)?;
  Ok(Json(record))
}

// ─── Delete ───────────────────────────────────────────────────────────────────

/// `DELETE /{records}/{id}`
pub async fn delete<S, R>(
  State(store): State<Arc<S>>,
  Extension(who): Extension<Requester>,
  Path(id): Path<Uuid>,
) -> Result<StatusCode, ApiError>
where
  S: RecordStore,
  R: Record,
{
  store
    .delete::<R>(who, id)
    .await
    .map_err(ApiError::store)?;
  Ok(StatusCode::NO_CONTENT)
}
