//! Job-related API endpoints

use crate::HeimdallClient;
use crate::error::Result;
use heimdall_core::domain::job::JobSummary;

impl HeimdallClient {
    /// List all jobs known to the monitoring API
    ///
    /// # Returns
    /// The job summaries in the order the server sent them
    ///
    /// # Example
    /// ```no_run
    /// # use heimdall_client::HeimdallClient;
    /// # async fn example() -> anyhow::Result<()> {
    /// let client = HeimdallClient::new("http://localhost:8080");
    /// for job in client.list_jobs().await? {
    ///     println!("{}", job.as_value());
    /// }
    /// # Ok(())
    /// # }
    /// ```
    pub async fn list_jobs(&self) -> Result<Vec<JobSummary>> {
        self.get_json("/jobs").await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ClientError;
    use serde_json::json;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[tokio::test]
    async fn test_list_jobs_returns_payload() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/jobs"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(json!([{"id": "job1"}, {"id": "job2", "status": "RUNNING"}])),
            )
            .mount(&server)
            .await;

        let client = HeimdallClient::new(server.uri());
        let jobs = client.list_jobs().await.expect("jobs");

        assert_eq!(jobs.len(), 2);
        assert_eq!(jobs[0].as_value(), &json!({"id": "job1"}));
        assert_eq!(jobs[1].as_value()["status"], "RUNNING");
    }

    #[tokio::test]
    async fn test_list_jobs_maps_status_errors() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/jobs"))
            .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
            .mount(&server)
            .await;

        let client = HeimdallClient::new(server.uri());
        let err = client.list_jobs().await.unwrap_err();

        match err {
            ClientError::ApiError { status, message } => {
                assert_eq!(status, 500);
                assert_eq!(message, "boom");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_list_jobs_rejects_non_array_body() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/jobs"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"id": "job1"})))
            .mount(&server)
            .await;

        let client = HeimdallClient::new(server.uri());
        let err = client.list_jobs().await.unwrap_err();
        assert!(matches!(err, ClientError::ParseError(_)));
    }

    #[tokio::test]
    async fn test_list_jobs_connection_refused() {
        // Nothing listens on port 9 on a test machine
        let client = HeimdallClient::new("http://127.0.0.1:9");
        let err = client.list_jobs().await.unwrap_err();
        assert!(matches!(err, ClientError::RequestFailed(_)));
    }
}
