use serde::Serialize;

///
/// Message in the format accepted by SendGrid compatible mail APIs
///
#[derive(Serialize)]
pub struct MailMessage<'a> {
    pub personalizations: [MailPersonalization<'a>; 1],
    pub from: MailAddress<'a>,
    pub subject: String,
    pub content: [MailContent; 1],
}

#[derive(Serialize)]
pub struct MailPersonalization<'a> {
    pub to: [MailAddress<'a>; 1],
}

#[derive(Serialize)]
pub struct MailAddress<'a> {
    pub email: &'a str,
}

#[derive(Serialize)]
pub struct MailContent {
    #[serde(rename = "type")]
    pub content_type: &'static str,
    pub value: String,
}
