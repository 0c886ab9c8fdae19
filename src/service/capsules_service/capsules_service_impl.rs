use super::{CapsulesService, CapsulesServiceConfig};
use crate::{
    dto::{input, output},
    error::Error,
    media_store::MediaStore,
    repository::{self, Capsule, CapsuleContent, CapsuleType, CapsulesRepository},
};
use axum::async_trait;
use std::{path::Path, str::FromStr, sync::Arc};
use time::{format_description::well_known::Rfc3339, OffsetDateTime, UtcOffset};
use uuid::Uuid;

const MAX_EXTENSION_LEN: usize = 8;

pub struct CapsulesServiceImpl {
    config: CapsulesServiceConfig,
    repository: Arc<dyn CapsulesRepository>,
    media_store: Arc<dyn MediaStore>,
}

struct ValidatedCapsule {
    title: String,
    publish_at: OffsetDateTime,
    body: ValidatedBody,
    email: Option<String>,
}

enum ValidatedBody {
    Text(String),
    Image(input::MediaPayload),
    Audio(input::MediaPayload),
}

impl CapsulesServiceImpl {
    pub fn new(
        config: CapsulesServiceConfig,
        repository: Arc<dyn CapsulesRepository>,
        media_store: Arc<dyn MediaStore>,
    ) -> Self {
        Self {
            config,
            repository,
            media_store,
        }
    }

    fn validate_create_capsule(&self, capsule: input::NewCapsule) -> Result<ValidatedCapsule, Error> {
        let title = Self::validate_title(&capsule.title)?;
        let capsule_type = CapsuleType::from_str(capsule.capsule_type.trim())
            .map_err(|_| Error::Validation("type must be one of text, image, audio"))?;
        let publish_at = Self::validate_publish_at(&capsule.publish_at)?;
        let email = Self::validate_email(capsule.email)?;

        let text_content = capsule.text_content.filter(|text| !text.trim().is_empty());
        let body = match capsule_type {
            CapsuleType::Text => {
                if capsule.media.is_some() {
                    return Err(Error::Validation("text capsule can't have media"));
                }
                let text = text_content
                    .ok_or(Error::Validation("text capsule requires text_content"))?;

                ValidatedBody::Text(text)
            }
            CapsuleType::Image => {
                let media = Self::validate_media(
                    text_content,
                    capsule.media,
                    "image",
                    self.config.max_image_len,
                )?;

                ValidatedBody::Image(media)
            }
            CapsuleType::Audio => {
                let media = Self::validate_media(
                    text_content,
                    capsule.media,
                    "audio",
                    self.config.max_audio_len,
                )?;

                ValidatedBody::Audio(media)
            }
        };

        Ok(ValidatedCapsule {
            title,
            publish_at,
            body,
            email,
        })
    }

    fn validate_title(title: &str) -> Result<String, Error> {
        let title = title.trim();
        if title.is_empty() {
            return Err(Error::Validation("title is empty"));
        }

        Ok(title.to_string())
    }

    ///
    /// Parses RFC 3339 timestamp, converts it to UTC and truncates it to
    /// microseconds so it compares the same before and after being stored
    ///
    fn validate_publish_at(publish_at: &str) -> Result<OffsetDateTime, Error> {
        let publish_at = OffsetDateTime::parse(publish_at.trim(), &Rfc3339)
            .map_err(|_| Error::Validation("publish_at is not RFC 3339 timestamp"))?
            .to_offset(UtcOffset::UTC);

        // offset conversion can leave the years RFC 3339 represents
        if !(0..=9999).contains(&publish_at.year()) {
            return Err(Error::Validation("publish_at is out of range"));
        }

        publish_at
            .replace_nanosecond(publish_at.nanosecond() / 1_000 * 1_000)
            .map_err(|_| Error::Validation("publish_at is out of range"))
    }

    fn validate_email(email: Option<String>) -> Result<Option<String>, Error> {
        let Some(email) = email else {
            return Ok(None);
        };

        let email = email.trim();
        if email.is_empty() {
            return Ok(None);
        }

        let valid = match email.split_once('@') {
            Some((local, domain)) => {
                !local.is_empty()
                    && !domain.is_empty()
                    && !domain.contains('@')
                    && !email.chars().any(char::is_whitespace)
            }
            None => false,
        };
        if !valid {
            return Err(Error::Validation("email is malformed"));
        }

        Ok(Some(email.to_string()))
    }

    fn validate_media(
        text_content: Option<String>,
        media: Option<input::MediaPayload>,
        family: &str,
        max_len: usize,
    ) -> Result<input::MediaPayload, Error> {
        if text_content.is_some() {
            return Err(Error::Validation("media capsule can't have text_content"));
        }
        let media = media.ok_or(Error::Validation("media capsule requires media"))?;

        let content_type = media.content_type.trim().to_ascii_lowercase();
        let family_matches = match content_type.split_once('/') {
            Some((top_level, subtype)) => top_level == family && !subtype.is_empty(),
            None => false,
        };
        if !family_matches {
            return Err(Error::Validation(
                "media content type doesn't match capsule type",
            ));
        }

        if media.bytes.is_empty() {
            return Err(Error::Validation("media is empty"));
        }
        if media.bytes.len() > max_len {
            return Err(Error::ValidationMediaTooLarge {
                size: media.bytes.len(),
                max_size: max_len,
            });
        }

        Ok(input::MediaPayload {
            content_type,
            ..media
        })
    }

    fn media_key(id: Uuid, capsule_type: CapsuleType, media: &input::MediaPayload) -> String {
        let extension = media
            .filename
            .as_deref()
            .and_then(|filename| Path::new(filename).extension())
            .and_then(|extension| extension.to_str())
            .map(str::to_ascii_lowercase)
            .filter(|extension| {
                !extension.is_empty()
                    && extension.len() <= MAX_EXTENSION_LEN
                    && extension.chars().all(|c| c.is_ascii_alphanumeric())
            })
            .unwrap_or_else(|| Self::extension_from_content_type(&media.content_type).to_string());

        format!("{capsule_type}/{id}.{extension}")
    }

    fn extension_from_content_type(content_type: &str) -> &'static str {
        match content_type {
            "image/jpeg" => "jpg",
            "image/png" => "png",
            "image/gif" => "gif",
            "image/webp" => "webp",
            "audio/mpeg" => "mp3",
            "audio/wav" | "audio/x-wav" | "audio/wave" => "wav",
            "audio/ogg" => "ogg",
            "audio/mp4" => "m4a",
            _ => "bin",
        }
    }

    async fn upload_media(
        &self,
        id: Uuid,
        capsule_type: CapsuleType,
        media: input::MediaPayload,
    ) -> Result<(String, String), Error> {
        let key = Self::media_key(id, capsule_type, &media);

        tracing::info!(%key, "uploading media");
        let url = self
            .media_store
            .upload(media.bytes, &media.content_type, &key)
            .await?;
        tracing::info!(%key, "uploaded media");

        Ok((key, url))
    }

    async fn delete_orphaned_media(&self, key: &str) {
        if let Err(err) = self.media_store.delete(key).await {
            tracing::warn!(key, %err, "failed to delete orphaned media");
        }
    }
}

#[async_trait]
impl CapsulesService for CapsulesServiceImpl {
    async fn create_capsule(
        &self,
        capsule: input::NewCapsule,
    ) -> Result<output::CreatedCapsule, Error> {
        tracing::info!("creating capsule");
        tracing::trace!(?capsule);

        let validated = self.validate_create_capsule(capsule)?;

        let id = Uuid::new_v4();
        let (content, media_key) = match validated.body {
            ValidatedBody::Text(text) => (CapsuleContent::Text(text), None),
            ValidatedBody::Image(media) => {
                let (key, url) = self.upload_media(id, CapsuleType::Image, media).await?;
                (CapsuleContent::Image { url }, Some(key))
            }
            ValidatedBody::Audio(media) => {
                let (key, url) = self.upload_media(id, CapsuleType::Audio, media).await?;
                (CapsuleContent::Audio { url }, Some(key))
            }
        };

        let capsule = Capsule {
            id,
            title: validated.title,
            content,
            publish_at: validated.publish_at,
            created_at: OffsetDateTime::now_utc(),
            email: validated.email,
            notified: false,
            version: 0,
        };

        if let Err(err) = self.repository.insert(&capsule).await {
            if let Some(key) = media_key {
                self.delete_orphaned_media(&key).await;
            }

            return Err(match err {
                repository::Error::InsertUniqueViolation => Error::CapsuleAlreadyExists,
                err => Error::Database(err),
            });
        }

        tracing::info!(%id, "created capsule");

        Ok(output::CreatedCapsule {
            id,
            publish_at: capsule.publish_at,
        })
    }

    async fn find_public_capsules(&self) -> Result<Vec<output::PublicCapsule>, Error> {
        tracing::info!("finding public capsules");

        let capsules = self
            .repository
            .find_many_public(OffsetDateTime::now_utc())
            .await?;
        tracing::info!(count = capsules.len(), "found capsules");

        let capsules = capsules
            .into_iter()
            .map(output::PublicCapsule::from)
            .collect();

        Ok(capsules)
    }
}
