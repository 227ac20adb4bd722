use reqwest::{Client, Url};
use secrecy::{ExposeSecret, Secret};
use serde::{Deserialize, Serialize};
use timetable_core::{Email, EmailClient, EmailClientError};

use crate::config::settings::EmailClientSettings;

const POSTMARK_AUTH_HEADER: &str = "X-Postmark-Server-Token";

/// Delivers approval emails through the Postmark `/email` endpoint.
pub struct PostmarkEmailClient {
    http_client: Client,
    endpoint: Url,
    sender: Email,
    authorization_token: Secret<String>,
    message_stream: String,
}

impl PostmarkEmailClient {
    /// Builds the client from the `email_client` settings section.
    ///
    /// # Errors
    /// `EmailClientError::InvalidConfig` for an unparsable base url or sender,
    /// or when the HTTP client cannot be built.
    pub fn from_settings(settings: &EmailClientSettings) -> Result<Self, EmailClientError> {
        let endpoint = email_endpoint(&settings.base_url)?;
        let sender = Email::parse(&settings.sender)
            .map_err(|e| EmailClientError::InvalidConfig(format!("sender: {e}")))?;
        let http_client = Client::builder()
            .timeout(settings.timeout())
            .build()
            .map_err(|e| EmailClientError::InvalidConfig(e.to_string()))?;

        Ok(Self {
            http_client,
            endpoint,
            sender,
            authorization_token: settings.auth_token.clone(),
            message_stream: settings.message_stream.clone(),
        })
    }
}

// A base url without a trailing slash would have its last segment replaced by `join`.
fn email_endpoint(base_url: &str) -> Result<Url, EmailClientError> {
    let mut base = Url::parse(base_url)
        .map_err(|e| EmailClientError::InvalidConfig(format!("base_url: {e}")))?;
    if !base.path().ends_with('/') {
        base.set_path(&format!("{}/", base.path()));
    }
    base.join("email")
        .map_err(|e| EmailClientError::InvalidConfig(format!("base_url: {e}")))
}

#[async_trait::async_trait]
impl EmailClient for PostmarkEmailClient {
    #[tracing::instrument(name = "PostmarkEmailClient::send_email", skip_all)]
    async fn send_email(
        &self,
        recipient: &Email,
        subject: &str,
        content: &str,
    ) -> Result<(), EmailClientError> {
        let request_body = SendEmailRequest {
            from: self.sender.as_ref().expose_secret(),
            to: recipient.as_ref().expose_secret(),
            subject,
            html_body: content,
            text_body: content,
            message_stream: &self.message_stream,
        };

        let response = self
            .http_client
            .post(self.endpoint.clone())
            .header(POSTMARK_AUTH_HEADER, self.authorization_token.expose_secret())
            .json(&request_body)
            .send()
            .await
            .map_err(|e| EmailClientError::Transport(e.to_string()))?;

        let status = response.status();
        if status.is_success() {
            return Ok(());
        }

        let message = match response.json::<PostmarkError>().await {
            Ok(body) => format!("{} (code {})", body.message, body.error_code),
            Err(_) => status.canonical_reason().unwrap_or("unknown status").to_string(),
        };
        tracing::warn!(status = status.as_u16(), %message, "Postmark rejected email");
        Err(EmailClientError::Rejected {
            status: status.as_u16(),
            message,
        })
    }
}

#[derive(Serialize, Debug)]
#[serde(rename_all = "PascalCase")]
struct SendEmailRequest<'a> {
    from: &'a str,
    to: &'a str,
    subject: &'a str,
    html_body: &'a str,
    text_body: &'a str,
    message_stream: &'a str,
}

#[derive(Deserialize, Debug)]
#[serde(rename_all = "PascalCase")]
struct PostmarkError {
    error_code: i64,
    message: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::constants::test::email_client::{SENDER, TIMEOUT_IN_MILLIS};
    use fake::{
        Fake, Faker,
        faker::{internet::en::SafeEmail, lorem::en::Sentence},
    };
    use std::time::Duration;
    use wiremock::{
        Mock, MockServer, Request, ResponseTemplate,
        matchers::{any, header, header_exists, method, path},
    };

    const STREAM: &str = "approval-codes";

    struct SendEmailBodyMatcher {
        from: &'static str,
        stream: &'static str,
    }

    impl wiremock::Match for SendEmailBodyMatcher {
        fn matches(&self, request: &Request) -> bool {
            let Ok(body) = serde_json::from_slice::<serde_json::Value>(&request.body) else {
                return false;
            };
            body.get("From").and_then(|s| s.as_str()) == Some(self.from)
                && body.get("To").is_some()
                && body.get("Subject").is_some()
                && body.get("HtmlBody").is_some()
                && body.get("TextBody").is_some()
                && body.get("MessageStream").and_then(|s| s.as_str()) == Some(self.stream)
        }
    }

    fn subject() -> String {
        Sentence(1..2).fake()
    }

    fn content() -> String {
        Sentence(1..10).fake()
    }

    fn email() -> Email {
        Email::parse(&SafeEmail().fake::<String>()).unwrap()
    }

    fn settings(base_url: String) -> EmailClientSettings {
        EmailClientSettings {
            base_url,
            sender: SENDER.to_string(),
            auth_token: Secret::from(Faker.fake::<String>()),
            timeout_in_millis: TIMEOUT_IN_MILLIS,
            message_stream: STREAM.to_string(),
        }
    }

    fn email_client(base_url: String) -> PostmarkEmailClient {
        PostmarkEmailClient::from_settings(&settings(base_url)).unwrap()
    }

    #[tokio::test]
    async fn send_email_posts_sender_and_stream_from_settings() {
        let mock_server = MockServer::start().await;
        let email_client = email_client(mock_server.uri());

        Mock::given(header_exists(POSTMARK_AUTH_HEADER))
            .and(header("Content-Type", "application/json"))
            .and(path("/email"))
            .and(method("POST"))
            .and(SendEmailBodyMatcher {
                from: SENDER,
                stream: STREAM,
            })
            .respond_with(ResponseTemplate::new(200))
            .expect(1)
            .mount(&mock_server)
            .await;

        let outcome = email_client
            .send_email(&email(), &subject(), &content())
            .await;

        assert_eq!(outcome, Ok(()));
    }

    #[tokio::test]
    async fn base_url_path_is_kept() {
        let mock_server = MockServer::start().await;
        let email_client = email_client(format!("{}/postmark", mock_server.uri()));

        Mock::given(path("/postmark/email"))
            .respond_with(ResponseTemplate::new(200))
            .expect(1)
            .mount(&mock_server)
            .await;

        let outcome = email_client
            .send_email(&email(), &subject(), &content())
            .await;

        assert!(outcome.is_ok());
    }

    #[tokio::test]
    async fn rejected_email_carries_postmark_error() {
        let mock_server = MockServer::start().await;
        let email_client = email_client(mock_server.uri());

        let body = serde_json::json!({ "ErrorCode": 300, "Message": "Invalid 'To' address" });
        Mock::given(any())
            .respond_with(ResponseTemplate::new(422).set_body_json(body))
            .expect(1)
            .mount(&mock_server)
            .await;

        let outcome = email_client
            .send_email(&email(), &subject(), &content())
            .await;

        assert_eq!(
            outcome,
            Err(EmailClientError::Rejected {
                status: 422,
                message: "Invalid 'To' address (code 300)".to_string(),
            })
        );
    }

    #[tokio::test]
    async fn server_error_without_body_is_rejected() {
        let mock_server = MockServer::start().await;
        let email_client = email_client(mock_server.uri());

        Mock::given(any())
            .respond_with(ResponseTemplate::new(500))
            .expect(1)
            .mount(&mock_server)
            .await;

        let outcome = email_client
            .send_email(&email(), &subject(), &content())
            .await;

        assert!(matches!(
            outcome,
            Err(EmailClientError::Rejected { status: 500, .. })
        ));
    }

    #[tokio::test]
    async fn slow_server_is_a_transport_error() {
        let mock_server = MockServer::start().await;
        let email_client = email_client(mock_server.uri());

        let response = ResponseTemplate::new(200).set_delay(Duration::from_secs(180));
        Mock::given(any())
            .respond_with(response)
            .expect(1)
            .mount(&mock_server)
            .await;

        let outcome = email_client
            .send_email(&email(), &subject(), &content())
            .await;

        assert!(matches!(outcome, Err(EmailClientError::Transport(_))));
    }

    #[test]
    fn bad_settings_are_rejected() {
        let bad_url = PostmarkEmailClient::from_settings(&settings("not a url".to_string()));
        let bad_sender = PostmarkEmailClient::from_settings(&EmailClientSettings {
            sender: "nobody".to_string(),
            ..settings("https://api.postmarkapp.com/".to_string())
        });

        assert!(matches!(bad_url, Err(EmailClientError::InvalidConfig(_))));
        assert!(matches!(bad_sender, Err(EmailClientError::InvalidConfig(_))));
    }
}
