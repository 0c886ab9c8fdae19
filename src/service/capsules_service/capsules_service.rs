use crate::{
    dto::{input, output},
    error::Error,
};
use axum::async_trait;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CapsulesService: Send + Sync {
    ///
    /// Validates and saves new capsule, uploading its media first.
    ///
    /// ### Returns
    /// ID and publish_at of created capsule
    ///
    /// ### Errors
    /// - [Error::Validation] when
    ///     - title is empty
    ///     - type is not one of text, image, audio
    ///     - publish_at is not RFC 3339 timestamp
    ///     - text capsule has no text content or has media
    ///     - media capsule has no media, has text content or media has wrong content type
    ///     - email is malformed
    /// - [Error::ValidationMediaTooLarge] when media exceeds limit of its type
    /// - [Error::CapsuleAlreadyExists] when generated id collides with existing capsule
    ///
    async fn create_capsule(
        &self,
        capsule: input::NewCapsule,
    ) -> Result<output::CreatedCapsule, Error>;

    ///
    /// Finds capsules that are public right now.
    /// Capsules are sorted ascending by publish_at.
    ///
    async fn find_public_capsules(&self) -> Result<Vec<output::PublicCapsule>, Error>;
}
