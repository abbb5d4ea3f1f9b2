//! GitHub Issues Demo
//!
//! Wraps a configured `RequestBuilder` into a small typed API service.

#![allow(missing_docs)]
#![allow(clippy::print_stdout)]

use slingshot::prelude::*;

// ============================================================================
// Data Types
// ============================================================================

/// A GitHub issue.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Issue {
    pub id: u64,
    pub number: u32,
    pub title: String,
    pub state: String,
}

/// Query filter for listing issues.
#[derive(Debug, Clone, Default, Params)]
pub struct IssueFilter {
    #[params(skip_none)]
    pub state: Option<String>,
    #[params(format = "csv")]
    pub labels: Vec<String>,
    #[params(skip_none)]
    pub per_page: Option<u32>,
}

/// Request to create an issue.
#[derive(Debug, Clone, Serialize)]
pub struct CreateIssue {
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub body: Option<String>,
}

/// Error payload returned by GitHub on failures.
#[derive(Debug, Clone, Deserialize)]
pub struct GithubError {
    pub message: String,
}

// ============================================================================
// Service
// ============================================================================

/// Issues service for one repository.
#[derive(Debug, Clone)]
pub struct IssueService<C> {
    base: RequestBuilder<C>,
}

impl<C: HttpClient> IssueService<C> {
    /// Service rooted at `api_root` (for example `https://api.github.com/`).
    #[must_use]
    pub fn new(client: C, api_root: &str, owner: &str, repo: &str) -> Self {
        let base = slingshot::with_client(client)
            .base(api_root)
            .path(&format!("repos/{owner}/{repo}/"))
            .set("Accept", "application/vnd.github+json")
            .set("User-Agent", "slingshot-demo");
        Self { base }
    }

    /// List issues matching `filter`.
    pub async fn list(&self, filter: IssueFilter) -> Result<Vec<Issue>> {
        self.base.new_child().get("issues").params(filter).receive().await
    }

    /// Create an issue, authenticated with a token.
    pub async fn create(&self, token: &str, issue: &CreateIssue) -> Result<Issue> {
        self.base
            .new_child()
            .set("Authorization", format!("Bearer {token}"))
            .post("issues")
            .body_json(issue)
            .receive()
            .await
    }
}

/// Best human-readable message for an error.
fn describe(err: &Error) -> String {
    match err.decode_body::<GithubError>() {
        Some(Ok(failure)) => format!("GitHub said: {}", failure.message),
        _ => err.to_string(),
    }
}

#[tokio::main]
async fn main() {
    let client = HyperClient::builder().with_logging().build();
    let issues = IssueService::new(client, "https://api.github.com/", "rust-lang", "rust");

    let filter = IssueFilter {
        state: Some("open".to_string()),
        labels: vec!["C-bug".to_string()],
        per_page: Some(5),
    };

    match issues.list(filter).await {
        Ok(found) => {
            for issue in found {
                println!("#{} {}", issue.number, issue.title);
            }
        }
        Err(err) => println!("listing failed: {}", describe(&err)),
    }
}

// ============================================================================
// Tests using wiremock
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::{
        Mock, MockServer, ResponseTemplate,
        matchers::{body_json, header, method, path, query_param},
    };

    fn issue(number: u32, title: &str) -> Issue {
        Issue {
            id: u64::from(number) * 100,
            number,
            title: title.to_string(),
            state: "open".to_string(),
        }
    }

    fn service(server: &MockServer) -> IssueService<HyperClient> {
        IssueService::new(
            HyperClient::new(),
            &format!("{}/", server.uri()),
            "rust-lang",
            "rust",
        )
    }

    #[tokio::test]
    async fn test_list_issues() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/repos/rust-lang/rust/issues"))
            .and(header("Accept", "application/vnd.github+json"))
            .and(query_param("state", "open"))
            .and(query_param("labels", "A,B"))
            .respond_with(ResponseTemplate::new(200).set_body_json(vec![issue(1, "first")]))
            .mount(&mock_server)
            .await;

        let issues = service(&mock_server);
        let filter = IssueFilter {
            state: Some("open".to_string()),
            labels: vec!["A".to_string(), "B".to_string()],
            per_page: None,
        };

        let found = issues.list(filter).await.expect("issues");

        assert_eq!(found, vec![issue(1, "first")]);
    }

    #[tokio::test]
    async fn test_create_issue() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/repos/rust-lang/rust/issues"))
            .and(header("Authorization", "Bearer t0k3n"))
            .and(body_json(serde_json::json!({"title": "crash"})))
            .respond_with(ResponseTemplate::new(201).set_body_json(issue(2, "crash")))
            .mount(&mock_server)
            .await;

        let issues = service(&mock_server);
        let created = issues
            .create(
                "t0k3n",
                &CreateIssue {
                    title: "crash".to_string(),
                    body: None,
                },
            )
            .await
            .expect("created");

        assert_eq!(created.number, 2);
    }

    #[tokio::test]
    async fn test_failure_message() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/repos/rust-lang/rust/issues"))
            .respond_with(
                ResponseTemplate::new(401)
                    .set_body_json(serde_json::json!({"message": "Bad credentials"})),
            )
            .mount(&mock_server)
            .await;

        let issues = service(&mock_server);
        let err = issues
            .create(
                "wrong",
                &CreateIssue {
                    title: "x".to_string(),
                    body: None,
                },
            )
            .await
            .expect_err("401");

        assert_eq!(err.status(), Some(401));
        assert_eq!(describe(&err), "GitHub said: Bad credentials");
    }
}
