use lettre::message::{MultiPart, SinglePart, header};
use lettre::transport::smtp::authentication::Credentials;
use lettre::{Message, SmtpTransport, Transport};
use tracing::{info, instrument};

use yamdb_config::EmailConfig;
use yamdb_core::AppError;

pub struct EmailService {
    config: EmailConfig,
}

impl EmailService {
    pub fn new(config: EmailConfig) -> Self {
        Self { config }
    }

    #[instrument(skip(self, code))]
    pub async fn send_confirmation_code(
        &self,
        to_email: &str,
        username: &str,
        code: &str,
    ) -> Result<(), AppError> {
        let text_body = format!(
            "Hi {},\n\n\
             Your YaMDb confirmation code is:\n\n\
             {}\n\n\
             Send it together with your username to /api/v1/auth/token/ to get an access token.\n\
             The code can be used once. Requesting a new code replaces this one.\n\n\
             If you didn't sign up, you can ignore this email.",
            username, code
        );
        let html_body = self.confirmation_template(username, code);

        self.send_email(to_email, "Your YaMDb confirmation code", &text_body, &html_body)
            .await
    }

    #[instrument(skip(self, html_body, text_body))]
    async fn send_email(
        &self,
        to_email: &str,
        subject: &str,
        text_body: &str,
        html_body: &str,
    ) -> Result<(), AppError> {
        if !self.config.enabled {
            info!(to = %to_email, subject = %subject, body = %text_body, "SMTP disabled, email not sent");
            return Ok(());
        }

        let from = format!("{} <{}>", self.config.from_name, self.config.from_email);

        let email = Message::builder()
            .from(
                from.parse()
                    .map_err(|e| AppError::internal_error(format!("Invalid from email: {}", e)))?,
            )
            .to(to_email
                .parse()
                .map_err(|e| AppError::internal_error(format!("Invalid to email: {}", e)))?)
            .subject(subject)
            .multipart(
                MultiPart::alternative()
                    .singlepart(
                        SinglePart::builder()
                            .header(header::ContentType::TEXT_PLAIN)
                            .body(text_body.to_string()),
                    )
                    .singlepart(
                        SinglePart::builder()
                            .header(header::ContentType::TEXT_HTML)
                            .body(html_body.to_string()),
                    ),
            )
            .map_err(|e| AppError::internal_error(format!("Failed to build email: {}", e)))?;

        let mailer = if self.config.smtp_username.is_empty() {
            SmtpTransport::builder_dangerous(&self.config.smtp_host)
                .port(self.config.smtp_port)
                .build()
        } else {
            let creds = Credentials::new(
                self.config.smtp_username.clone(),
                self.config.smtp_password.clone(),
            );

            SmtpTransport::relay(&self.config.smtp_host)
                .map_err(|e| {
                    AppError::internal_error(format!("Failed to create SMTP relay: {}", e))
                })?
                .port(self.config.smtp_port)
                .credentials(creds)
                .build()
        };

        tokio::task::spawn_blocking(move || mailer.send(&email))
            .await
            .map_err(|e| AppError::internal_error(format!("Task join error: {}", e)))?
            .map_err(|e| AppError::internal_error(format!("Failed to send email: {}", e)))?;

        Ok(())
    }

    fn confirmation_template(&self, username: &str, code: &str) -> String {
        format!(
            r#"<!DOCTYPE html>
<html>
<body style="font-family: Arial, sans-serif; color: #333;">
  <p>Hi {username},</p>
  <p>Your YaMDb confirmation code is:</p>
  <p style="font-size: 20px; font-weight: bold; letter-spacing: 2px;">{code}</p>
  <p>Send it together with your username to get an access token. The code can be used once.</p>
  <p style="color: #888;">If you didn't sign up, you can ignore this email.</p>
</body>
</html>"#
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_disabled_transport_does_not_send() {
        let service = EmailService::new(EmailConfig::disabled());
        let result = service
            .send_confirmation_code("critic@example.com", "critic", "abc123")
            .await;
        assert!(result.is_ok());
    }

    #[test]
    fn test_template_contains_code() {
        let service = EmailService::new(EmailConfig::disabled());
        let html = service.confirmation_template("critic", "abc123");
        assert!(html.contains("abc123"));
        assert!(html.contains("critic"));
    }
}
