use super::{Error, MediaStore, StoredMedia};
use axum::async_trait;
use bson::{doc, Document};
use futures_util::io::{AsyncReadExt, AsyncWriteExt};
use mongodb::{gridfs::GridFsBucket, options::GridFsBucketOptions, Database};

const MEDIA_BUCKET: &str = "media";
const METADATA_CONTENT_TYPE: &str = "content_type";
const DEFAULT_CONTENT_TYPE: &str = "application/octet-stream";

///
/// Media store keeping files in a GridFS bucket.
/// Every file is named by its key, keys are expected to be unique.
///
pub struct GridFsMediaStore {
    bucket: GridFsBucket,
    public_base_url: String,
}

impl GridFsMediaStore {
    pub fn new(database: &Database, public_base_url: String) -> Self {
        let options = GridFsBucketOptions::builder()
            .bucket_name(MEDIA_BUCKET.to_string())
            .build();
        let bucket = database.gridfs_bucket(options);

        Self {
            bucket,
            public_base_url,
        }
    }

    fn public_url(&self, key: &str) -> String {
        format!("{}/media/{}", self.public_base_url, key)
    }
}

#[async_trait]
impl MediaStore for GridFsMediaStore {
    async fn upload(
        &self,
        bytes: Vec<u8>,
        content_type: &str,
        key: &str,
    ) -> Result<String, Error> {
        tracing::debug!(key, len = bytes.len(), "uploading media");

        let mut upload_stream = self
            .bucket
            .open_upload_stream(key)
            .metadata(doc! {
                METADATA_CONTENT_TYPE: content_type,
            })
            .await?;

        if let Err(err) = upload_stream.write_all(&bytes).await {
            // removes chunks that were already written
            if let Err(abort_err) = upload_stream.abort().await {
                tracing::warn!(key, %abort_err, "failed to abort media upload");
            }
            return Err(Error::Io(err));
        }
        upload_stream.close().await?;

        tracing::debug!(key, "uploaded media");

        Ok(self.public_url(key))
    }

    async fn download(&self, key: &str) -> Result<Option<StoredMedia>, Error> {
        let Some(file) = self.bucket.find_one(doc! { "filename": key }).await? else {
            return Ok(None);
        };

        let content_type = file
            .metadata
            .as_ref()
            .and_then(|metadata: &Document| metadata.get_str(METADATA_CONTENT_TYPE).ok())
            .unwrap_or(DEFAULT_CONTENT_TYPE)
            .to_string();

        let mut download_stream = self.bucket.open_download_stream(file.id).await?;
        let mut bytes = Vec::with_capacity(file.length as usize);
        download_stream.read_to_end(&mut bytes).await?;

        Ok(Some(StoredMedia {
            content_type,
            bytes,
        }))
    }

    async fn delete(&self, key: &str) -> Result<(), Error> {
        let Some(file) = self.bucket.find_one(doc! { "filename": key }).await? else {
            return Ok(());
        };

        self.bucket.delete(file.id).await?;
        tracing::debug!(key, "deleted media");

        Ok(())
    }
}
