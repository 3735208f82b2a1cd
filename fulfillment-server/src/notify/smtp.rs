//! SMTP mail transport using Lettre
//!
//! Sends real email via an SMTP relay. Blocking sends run on the tokio
//! blocking pool.

use async_trait::async_trait;
use lettre::message::header::ContentType;
use lettre::message::{Attachment, Mailbox, MultiPart, SinglePart};
use lettre::transport::smtp::authentication::Credentials;
use lettre::{Message, SmtpTransport, Transport};

use super::{MailError, MailTransport, OutboundEmail};
use crate::core::SmtpConfig;

/// SMTP transport
///
/// A new connection is built per email to avoid pooled-connection staleness
/// on an otherwise mostly-idle relay link.
#[derive(Clone)]
pub struct SmtpMailer {
    config: SmtpConfig,
    credentials: Credentials,
}

impl SmtpMailer {
    pub fn new(config: SmtpConfig) -> Result<Self, MailError> {
        let credentials = Credentials::new(config.username.clone(), config.password.clone());
        Ok(Self {
            config,
            credentials,
        })
    }

    fn build_transport(&self) -> Result<SmtpTransport, MailError> {
        Ok(SmtpTransport::relay(&self.config.host)
            .map_err(|e| MailError::Send(format!("SMTP relay error: {e}")))?
            .port(self.config.port)
            .credentials(self.credentials.clone())
            .build())
    }

    fn from_mailbox(&self) -> Result<Mailbox, MailError> {
        format!("{} <{}>", self.config.from_name, self.config.from_email)
            .parse()
            .map_err(|e| MailError::Address(format!("Invalid from address: {e}")))
    }
}

#[async_trait]
impl MailTransport for SmtpMailer {
    async fn send(&self, email: OutboundEmail) -> Result<(), MailError> {
        let to: Mailbox = email
            .to
            .parse()
            .map_err(|e| MailError::Address(format!("Invalid to address: {e}")))?;

        let mut multipart = MultiPart::mixed().singlepart(
            SinglePart::builder()
                .header(ContentType::TEXT_HTML)
                .body(email.html_body),
        );

        for attachment in &email.attachments {
            let content = std::fs::read(&attachment.path).map_err(|e| {
                MailError::Build(format!(
                    "Failed to read attachment {}: {e}",
                    attachment.path.display()
                ))
            })?;
            multipart = multipart.singlepart(
                Attachment::new(attachment.filename.clone())
                    .body(content, ContentType::TEXT_PLAIN),
            );
        }

        let message = Message::builder()
            .from(self.from_mailbox()?)
            .to(to)
            .subject(email.subject)
            .multipart(multipart)
            .map_err(|e| MailError::Build(format!("Failed to build email: {e}")))?;

        let mailer = self.build_transport()?;

        tokio::task::spawn_blocking(move || {
            mailer
                .send(&message)
                .map(|_| ())
                .map_err(|e| MailError::Send(format!("Failed to send email: {e}")))
        })
        .await
        .map_err(|e| MailError::Send(format!("Email task failed: {e}")))?
    }
}
