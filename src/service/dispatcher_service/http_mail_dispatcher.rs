use super::{
    dto::{MailAddress, MailContent, MailMessage, MailPersonalization},
    DispatchOutcome, Error, HttpMailDispatcherConfig, NotificationDispatcher,
};
use axum::async_trait;
use reqwest::Client;
use time::{format_description::well_known::Rfc3339, OffsetDateTime};

pub struct HttpMailDispatcher {
    config: HttpMailDispatcherConfig,
    client: Client,
}

impl HttpMailDispatcher {
    pub fn new(config: HttpMailDispatcherConfig) -> Result<Self, Error> {
        let client = Client::builder().timeout(config.timeout).build()?;

        Ok(Self { config, client })
    }

    fn create_message<'a>(
        &'a self,
        to_address: &'a str,
        title: &str,
        publish_at: OffsetDateTime,
    ) -> MailMessage<'a> {
        let publish_at = publish_at
            .format(&Rfc3339)
            .unwrap_or_else(|_| publish_at.to_string());

        MailMessage {
            personalizations: [MailPersonalization {
                to: [MailAddress { email: to_address }],
            }],
            from: MailAddress {
                email: &self.config.from,
            },
            subject: format!("Your time capsule \"{title}\" is now public"),
            content: [MailContent {
                content_type: "text/plain",
                value: format!(
                    "Your time capsule \"{title}\" was released at {publish_at} and can now be viewed by everyone."
                ),
            }],
        }
    }
}

#[async_trait]
impl NotificationDispatcher for HttpMailDispatcher {
    #[tracing::instrument(name = "Mail Dispatcher", skip_all)]
    async fn send(
        &self,
        to_address: &str,
        title: &str,
        publish_at: OffsetDateTime,
    ) -> Result<DispatchOutcome, Error> {
        tracing::debug!("sending mail");

        let message = self.create_message(to_address, title, publish_at);
        let response = self
            .client
            .post(&self.config.api_url)
            .bearer_auth(&self.config.api_key)
            .json(&message)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(Error::Rejected {
                status: status.as_u16(),
            });
        }

        tracing::debug!(status = status.as_u16(), "mail sent");

        Ok(DispatchOutcome::Sent)
    }
}
