use crate::{
    application::ApplicationState,
    dto::{input, output},
    error::Error,
    media_store::MediaStore,
    service::capsules_service::CapsulesService,
};
use axum::{
    extract::{Multipart, Path, State},
    http::{header::CONTENT_TYPE, StatusCode},
    response::IntoResponse,
    routing::get,
    Json, Router,
};
use std::sync::Arc;

const DEFAULT_MEDIA_CONTENT_TYPE: &str = "application/octet-stream";

pub fn routing() -> Router<ApplicationState> {
    Router::new()
        .route("/api/v1/capsules", get(get_capsules).post(post_capsule))
        .route("/media/:capsule_type/:file", get(get_media))
}

async fn post_capsule(
    State(capsules_service): State<Arc<dyn CapsulesService>>,
    multipart: Multipart,
) -> Result<(StatusCode, Json<output::CreatedCapsule>), Error> {
    let capsule = read_new_capsule(multipart).await?;
    let created_capsule = capsules_service.create_capsule(capsule).await?;

    Ok((StatusCode::CREATED, Json(created_capsule)))
}

async fn get_capsules(
    State(capsules_service): State<Arc<dyn CapsulesService>>,
) -> Result<Json<Vec<output::PublicCapsule>>, Error> {
    let capsules = capsules_service.find_public_capsules().await?;

    Ok(Json(capsules))
}

async fn get_media(
    State(media_store): State<Arc<dyn MediaStore>>,
    Path((capsule_type, file)): Path<(String, String)>,
) -> Result<impl IntoResponse, Error> {
    let key = format!("{capsule_type}/{file}");
    let media = media_store
        .download(&key)
        .await?
        .ok_or(Error::MediaNotExist)?;

    Ok(([(CONTENT_TYPE, media.content_type)], media.bytes))
}

///
/// Reads form fields into unvalidated capsule.
/// Unknown fields are ignored, empty file field counts as no media.
///
async fn read_new_capsule(mut multipart: Multipart) -> Result<input::NewCapsule, Error> {
    let mut capsule = input::NewCapsule::default();

    while let Some(field) = multipart.next_field().await? {
        let name = field.name().unwrap_or_default().to_string();
        match name.as_str() {
            "title" => capsule.title = field.text().await?,
            "type" => capsule.capsule_type = field.text().await?,
            "publish_at" => capsule.publish_at = field.text().await?,
            "text_content" => capsule.text_content = Some(field.text().await?),
            "email" => capsule.email = Some(field.text().await?),
            "media" => {
                let filename = field.file_name().map(str::to_string);
                let content_type = field
                    .content_type()
                    .unwrap_or(DEFAULT_MEDIA_CONTENT_TYPE)
                    .to_string();
                let bytes = field.bytes().await?;
                if !bytes.is_empty() {
                    capsule.media = Some(input::MediaPayload {
                        filename,
                        content_type,
                        bytes: bytes.to_vec(),
                    });
                }
            }
            _ => tracing::debug!(%name, "ignoring unknown field"),
        }
    }

    Ok(capsule)
}
