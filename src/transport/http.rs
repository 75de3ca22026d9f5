use super::{Submission, SubmitOutcome, Submitter};
use crate::{APP_USER_AGENT, config::SubmitMethod, error::Result, form::ServerErrors};
use reqwest::{
    Client,
    header::{ACCEPT, LOCATION},
    redirect::Policy,
};
use tracing::{info, instrument, warn};

/// Submits forms over HTTP the way a browser posts them: url-encoded values
/// plus the anti-forgery token. Redirects are reported, not followed.
#[derive(Debug, Clone)]
pub struct HttpSubmitter {
    client: Client,
}

impl HttpSubmitter {
    /// # Errors
    /// Returns an error if the HTTP client cannot be built.
    pub fn new() -> Result<Self> {
        let client = Client::builder()
            .user_agent(APP_USER_AGENT)
            .redirect(Policy::none())
            .build()?;
        Ok(Self { client })
    }
}

impl Submitter for HttpSubmitter {
    #[instrument(skip_all, fields(form = %submission.form, destination = %submission.destination))]
    async fn submit(&self, submission: Submission) -> Result<SubmitOutcome> {
        let pairs = submission.pairs();
        let request = match submission.method {
            SubmitMethod::Post => self.client.post(submission.destination.clone()).form(&pairs),
            SubmitMethod::Get => self.client.get(submission.destination.clone()).query(&pairs),
        };

        let response = request
            .header(ACCEPT, "application/json, text/html;q=0.9")
            .send()
            .await?;
        let status = response.status();

        if status.is_success() || status.is_redirection() {
            let location = response
                .headers()
                .get(LOCATION)
                .and_then(|value| value.to_str().ok())
                .map(str::to_string);
            info!(status = status.as_u16(), ?location, "submission accepted");
            return Ok(SubmitOutcome::Navigated { location });
        }

        let body = response.text().await?;
        let errors = ServerErrors::parse(&body)
            .ok()
            .filter(|errors| !errors.is_empty())
            .unwrap_or_else(|| {
                ServerErrors::general(format!("Request failed ({})", status.as_u16()))
            });
        warn!(status = status.as_u16(), "submission rejected by destination");
        Ok(SubmitOutcome::Rejected(errors))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::form::FieldId;
    use anyhow::Result;
    use secrecy::SecretString;
    use serde_json::json;
    use std::net::TcpListener;
    use url::Url;
    use wiremock::{
        Mock, MockServer, ResponseTemplate,
        matchers::{body_string_contains, header, method, path, query_param},
    };

    fn can_bind_localhost() -> bool {
        TcpListener::bind("127.0.0.1:0").is_ok()
    }

    fn submission(server: &MockServer, method: SubmitMethod) -> Result<Submission> {
        Ok(Submission {
            form: "register".to_string(),
            destination: Url::parse(&format!("{}/register", server.uri()))?,
            method,
            fields: vec![
                ("email".to_string(), "a@b.com".to_string()),
                ("uni".to_string(), "s128".to_string()),
            ],
            csrf_token: Some(SecretString::from("csrf-123".to_string())),
        })
    }

    #[tokio::test]
    async fn redirect_is_reported_as_navigation() -> Result<()> {
        if !can_bind_localhost() {
            eprintln!("Skipping test: cannot bind localhost");
            return Ok(());
        }
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/register"))
            .and(header("user-agent", APP_USER_AGENT))
            .and(body_string_contains("_token=csrf-123"))
            .and(body_string_contains("email=a%40b.com"))
            .and(body_string_contains("uni=s128"))
            .respond_with(ResponseTemplate::new(302).insert_header("location", "/overview"))
            .expect(1)
            .mount(&server)
            .await;

        let outcome = HttpSubmitter::new()?
            .submit(submission(&server, SubmitMethod::Post)?)
            .await?;
        assert_eq!(
            outcome,
            SubmitOutcome::Navigated {
                location: Some("/overview".to_string())
            }
        );
        Ok(())
    }

    #[tokio::test]
    async fn get_sends_query_string() -> Result<()> {
        if !can_bind_localhost() {
            eprintln!("Skipping test: cannot bind localhost");
            return Ok(());
        }
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/register"))
            .and(query_param("uni", "s128"))
            .and(query_param("_token", "csrf-123"))
            .respond_with(ResponseTemplate::new(200))
            .expect(1)
            .mount(&server)
            .await;

        let outcome = HttpSubmitter::new()?
            .submit(submission(&server, SubmitMethod::Get)?)
            .await?;
        assert_eq!(outcome, SubmitOutcome::Navigated { location: None });
        Ok(())
    }

    #[tokio::test]
    async fn validation_errors_are_returned() -> Result<()> {
        if !can_bind_localhost() {
            eprintln!("Skipping test: cannot bind localhost");
            return Ok(());
        }
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/register"))
            .respond_with(ResponseTemplate::new(422).set_body_json(json!({
                "message": "The given data was invalid.",
                "errors": { "email": ["The email has already been taken."] }
            })))
            .mount(&server)
            .await;

        let outcome = HttpSubmitter::new()?
            .submit(submission(&server, SubmitMethod::Post)?)
            .await?;
        let SubmitOutcome::Rejected(errors) = outcome else {
            panic!("expected a rejection, got {outcome:?}");
        };
        assert_eq!(
            errors.field_overrides().get(&FieldId::new("email")).map(String::as_str),
            Some("The email has already been taken.")
        );
        Ok(())
    }

    #[tokio::test]
    async fn unreadable_failure_becomes_general_error() -> Result<()> {
        if !can_bind_localhost() {
            eprintln!("Skipping test: cannot bind localhost");
            return Ok(());
        }
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/register"))
            .respond_with(ResponseTemplate::new(500).set_body_string("<h1>oops</h1>"))
            .mount(&server)
            .await;

        let outcome = HttpSubmitter::new()?
            .submit(submission(&server, SubmitMethod::Post)?)
            .await?;
        assert_eq!(
            outcome,
            SubmitOutcome::Rejected(ServerErrors::general("Request failed (500)"))
        );
        Ok(())
    }
}
