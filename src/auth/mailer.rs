use crate::error::AppError;

use std::future::Future;
use std::pin::Pin;

#[derive(Debug, Clone, PartialEq)]
pub struct Mail {
    pub to: String,
    pub subject: String,
    pub body: String,
}

impl Mail {
    /// Recipient and subject only. Bodies can carry reset links.
    pub fn summary(&self) -> String {
        format!("Mail to {}: {}", self.to, self.subject)
    }
}

pub type SendFuture<'a> = Pin<Box<dyn Future<Output = Result<(), AppError>> + Send + 'a>>;

/// Outbound mail. Delivery itself belongs to an external service.
pub trait Mailer: Send + Sync {
    fn send(&self, mail: Mail) -> SendFuture<'_>;
}

/// Writes outgoing mail to the log instead of delivering it.
pub struct LogMailer;

impl Mailer for LogMailer {
    fn send(&self, mail: Mail) -> SendFuture<'_> {
        Box::pin(async move {
            tracing::info!("{}", mail.summary());
            tracing::debug!("Mail body for {}:\n{}", mail.to, mail.body);
            Ok(())
        })
    }
}
