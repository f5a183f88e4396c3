use crate::error::NotifyError;
use crate::traits::NotificationSender;
use crate::CandidateResult;
use async_trait::async_trait;
use lettre::message::{header::ContentType, Mailbox};
use lettre::transport::smtp::authentication::Credentials;
use lettre::{AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};
use serde::{Deserialize, Serialize};

pub const DEFAULT_SMTP_HOST: &str = "smtp.gmail.com";
pub const DEFAULT_SMTP_PORT: u16 = 465;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notification {
    pub recipient: String,
    pub subject: String,
    pub body: String,
}

#[derive(Debug, Clone)]
pub struct NotificationTemplate {
    pub subject: String,
    pub greeting: String,
    pub signature: String,
}

impl Default for NotificationTemplate {
    fn default() -> Self {
        Self {
            subject: "🎉 Congratulations! You have been shortlisted".to_string(),
            greeting: "Hello,".to_string(),
            signature: "Best Regards,\nHR Team".to_string(),
        }
    }
}

impl NotificationTemplate {
    pub fn render(&self, recipient: &str, score: f64) -> Notification {
        Notification {
            recipient: recipient.to_string(),
            subject: self.subject.clone(),
            body: format!(
                "{}\n\nYou have been shortlisted for the job with a score of {score:.2}%.\nWe will contact you soon.\n\n{}",
                self.greeting, self.signature
            ),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", content = "reason", rename_all = "snake_case")]
pub enum DeliveryStatus {
    Sent,
    Failed(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NotificationOutcome {
    pub file_name: String,
    pub recipient: String,
    pub status: DeliveryStatus,
}

impl NotificationOutcome {
    pub fn is_sent(&self) -> bool {
        self.status == DeliveryStatus::Sent
    }
}

/// Sends one message per ranked candidate that has an address.
///
/// Sends run one after another. A failed send is recorded and the loop moves
/// on; candidates without an address produce no outcome at all.
pub async fn notify_candidates<S>(
    sender: &S,
    ranked: &[CandidateResult],
    template: &NotificationTemplate,
) -> Vec<NotificationOutcome>
where
    S: NotificationSender + ?Sized,
{
    let mut outcomes = Vec::new();

    for candidate in ranked {
        let Some(recipient) = candidate.email.as_deref() else {
            continue;
        };

        let notification = template.render(recipient, candidate.score);
        let status = match sender.send(&notification).await {
            Ok(()) => DeliveryStatus::Sent,
            Err(error) => DeliveryStatus::Failed(error.to_string()),
        };

        outcomes.push(NotificationOutcome {
            file_name: candidate.file_name.clone(),
            recipient: recipient.to_string(),
            status,
        });
    }

    outcomes
}

#[derive(Debug, Clone)]
pub struct MailConfig {
    pub sender_address: Option<String>,
    pub sender_password: Option<String>,
    pub smtp_host: String,
    pub smtp_port: u16,
}

impl Default for MailConfig {
    fn default() -> Self {
        Self {
            sender_address: None,
            sender_password: None,
            smtp_host: DEFAULT_SMTP_HOST.to_string(),
            smtp_port: DEFAULT_SMTP_PORT,
        }
    }
}

/// SMTP over implicit TLS, one connection per message.
pub struct SmtpSender {
    config: MailConfig,
}

impl SmtpSender {
    pub fn new(config: MailConfig) -> Self {
        Self { config }
    }

    fn credentials(&self) -> Result<(&str, &str), NotifyError> {
        let address = non_blank(self.config.sender_address.as_deref())
            .ok_or(NotifyError::MissingCredentials("sender address is not set"))?;
        let password = non_blank(self.config.sender_password.as_deref())
            .ok_or(NotifyError::MissingCredentials("sender password is not set"))?;
        Ok((address, password))
    }
}

#[async_trait]
impl NotificationSender for SmtpSender {
    async fn send(&self, notification: &Notification) -> Result<(), NotifyError> {
        let (address, password) = self.credentials()?;

        let message = Message::builder()
            .from(address.parse::<Mailbox>()?)
            .to(notification.recipient.parse::<Mailbox>()?)
            .subject(notification.subject.clone())
            .header(ContentType::TEXT_PLAIN)
            .body(notification.body.clone())?;

        let transport = AsyncSmtpTransport::<Tokio1Executor>::relay(&self.config.smtp_host)?
            .port(self.config.smtp_port)
            .credentials(Credentials::new(address.to_string(), password.to_string()))
            .build();

        transport.send(message).await?;
        Ok(())
    }
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|value| !value.is_empty())
}
