/**
 * Notification Sender
 *
 * Outbound account emails over SMTP: the confirmation message sent on
 * registration and the password-reset message. Sends are fire-and-forget:
 * handlers spawn them and failures are logged, never surfaced to the
 * triggering request.
 */

use lettre::message::header::ContentType;
use lettre::message::Mailbox;
use lettre::transport::smtp::authentication::Credentials;
use lettre::{AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};
use thiserror::Error;

/// Errors from building or sending an email.
#[derive(Debug, Error)]
pub enum MailError {
    #[error("invalid recipient address: {0}")]
    Address(#[from] lettre::address::AddressError),
    #[error("failed to build message: {0}")]
    Message(#[from] lettre::error::Error),
    #[error("smtp transport error: {0}")]
    Transport(#[from] lettre::transport::smtp::Error),
}

/// Async SMTP mailer for account emails.
///
/// Constructed from environment at startup; when the SMTP variables are not
/// set the server runs without a mailer and skips sends with a warning.
#[derive(Clone)]
pub struct Mailer {
    transport: AsyncSmtpTransport<Tokio1Executor>,
    from: Mailbox,
    frontend_url: String,
}

impl Mailer {
    /// Build the mailer from `SMTP_HOST`, `SMTP_PORT`, `SMTP_USER`,
    /// `SMTP_PASS`, `EMAIL_FROM` and `FRONTEND_URL`.
    ///
    /// Returns `None` when the SMTP host or credentials are missing.
    pub fn from_env() -> Option<Self> {
        let host = std::env::var("SMTP_HOST").ok()?;
        let user = std::env::var("SMTP_USER").ok()?;
        let pass = std::env::var("SMTP_PASS").ok()?;
        let port = std::env::var("SMTP_PORT")
            .ok()
            .and_then(|p| p.parse::<u16>().ok())
            .unwrap_or(587);

        let from = std::env::var("EMAIL_FROM")
            .unwrap_or_else(|_| "Taskroom <accounts@taskroom.dev>".to_string());
        let from: Mailbox = match from.parse() {
            Ok(from) => from,
            Err(e) => {
                tracing::error!("[Mail] Invalid EMAIL_FROM address: {:?}", e);
                return None;
            }
        };

        let frontend_url = std::env::var("FRONTEND_URL")
            .unwrap_or_else(|_| "http://localhost:5173".to_string());

        let transport = AsyncSmtpTransport::<Tokio1Executor>::builder_dangerous(&host)
            .port(port)
            .credentials(Credentials::new(user, pass))
            .build();

        Some(Self {
            transport,
            from,
            frontend_url,
        })
    }

    /// Send the account-confirmation email carrying the single-use token.
    pub async fn send_account_confirmation(
        &self,
        email: &str,
        name: &str,
        token: &str,
    ) -> Result<(), MailError> {
        let link = confirmation_link(&self.frontend_url, token);
        let html = format!(
            "<p>Hi {name}, your account is almost ready.</p>\
             <p>Confirm it through the following link: <a href=\"{link}\">Confirm account</a></p>\
             <p>If you did not create this account you can ignore this message.</p>"
        );

        self.send_html(email, "Taskroom - Confirm your account", html)
            .await
    }

    /// Send the password-reset email carrying the single-use token.
    pub async fn send_password_reset(
        &self,
        email: &str,
        name: &str,
        token: &str,
    ) -> Result<(), MailError> {
        let link = reset_link(&self.frontend_url, token);
        let html = format!(
            "<p>Hi {name}, you asked to reset your password.</p>\
             <p>Set a new one through the following link: <a href=\"{link}\">Reset password</a></p>\
             <p>If you did not request this email you can ignore it.</p>"
        );

        self.send_html(email, "Taskroom - Reset your password", html)
            .await
    }

    async fn send_html(&self, to: &str, subject: &str, html: String) -> Result<(), MailError> {
        let message = Message::builder()
            .from(self.from.clone())
            .to(to.parse()?)
            .subject(subject)
            .header(ContentType::TEXT_HTML)
            .body(html)?;

        self.transport.send(message).await?;
        tracing::info!("[Mail] Sent \"{}\" to {}", subject, to);
        Ok(())
    }
}

fn confirmation_link(frontend_url: &str, token: &str) -> String {
    format!("{}/confirm/{}", frontend_url.trim_end_matches('/'), token)
}

fn reset_link(frontend_url: &str, token: &str) -> String {
    format!("{}/reset-password/{}", frontend_url.trim_end_matches('/'), token)
}

/// Spawn the confirmation email in the background.
///
/// A missing mailer or a transport failure only produces a log line; the
/// registration request it belongs to is never blocked or failed by email
/// delivery.
pub fn spawn_account_confirmation(
    mailer: Option<Mailer>,
    email: String,
    name: String,
    token: String,
) {
    let Some(mailer) = mailer else {
        tracing::warn!("[Mail] Mailer not configured, skipping confirmation email");
        return;
    };
    tokio::spawn(async move {
        if let Err(e) = mailer.send_account_confirmation(&email, &name, &token).await {
            tracing::warn!("[Mail] Failed to send confirmation email to {}: {:?}", email, e);
        }
    });
}

/// Spawn the password-reset email in the background.
pub fn spawn_password_reset(mailer: Option<Mailer>, email: String, name: String, token: String) {
    let Some(mailer) = mailer else {
        tracing::warn!("[Mail] Mailer not configured, skipping password-reset email");
        return;
    };
    tokio::spawn(async move {
        if let Err(e) = mailer.send_password_reset(&email, &name, &token).await {
            tracing::warn!("[Mail] Failed to send reset email to {}: {:?}", email, e);
        }
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_confirmation_link() {
        assert_eq!(
            confirmation_link("http://localhost:5173", "abc123"),
            "http://localhost:5173/confirm/abc123"
        );
    }

    #[test]
    fn test_links_tolerate_trailing_slash() {
        assert_eq!(
            confirmation_link("https://app.example.com/", "t0k"),
            "https://app.example.com/confirm/t0k"
        );
        assert_eq!(
            reset_link("https://app.example.com/", "t0k"),
            "https://app.example.com/reset-password/t0k"
        );
    }
}
