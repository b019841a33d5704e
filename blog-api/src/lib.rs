pub mod endpoints;
mod error;
mod macros;
pub mod repositories;

pub use crate::error::RequestError;
use repositories::*;
use std::sync::{Arc, Mutex, PoisonError, RwLock};
use tower_api_client::Client as ApiClient;
pub use tower_api_client::{Method, Request as ApiRequest, RequestData};

pub const DEFAULT_BASE_URL: &str = "http://localhost:3000";

/// Editable base URL shared between the UI and the [`Client`].
///
/// The client reads it on every request, so edits apply to the next call.
#[derive(Debug, Clone)]
pub struct BaseUrl(Arc<RwLock<String>>);

impl BaseUrl {
    pub fn new(url: impl Into<String>) -> Self {
        Self(Arc::new(RwLock::new(url.into())))
    }

    pub fn set(&self, url: impl Into<String>) {
        *self.0.write().unwrap_or_else(PoisonError::into_inner) = url.into();
    }

    /// The value as the user entered it.
    pub fn raw(&self) -> String {
        self.0.read().unwrap_or_else(PoisonError::into_inner).clone()
    }

    /// The value used to build request URLs, without a trailing slash.
    pub fn resolve(&self) -> String {
        let raw = self.raw();
        raw.strip_suffix('/').unwrap_or(&raw).to_string()
    }
}

impl Default for BaseUrl {
    fn default() -> Self {
        Self::new(DEFAULT_BASE_URL)
    }
}

pub struct Client {
    base_url: BaseUrl,
    /// Client for the last base URL seen, shared by requests until the URL changes.
    inner: Mutex<Option<(String, ApiClient)>>,
}

impl Client {
    pub fn new(base_url: BaseUrl) -> Self {
        Self {
            base_url,
            inner: Mutex::new(None),
        }
    }

    pub fn base_url(&self) -> &BaseUrl {
        &self.base_url
    }

    fn api_client(&self) -> ApiClient {
        let base = self.base_url.resolve();
        let mut inner = self.inner.lock().unwrap_or_else(PoisonError::into_inner);
        if let Some((current, client)) = inner.as_ref() {
            if *current == base {
                return client.clone();
            }
        }

        let client = ApiClient::new(base.as_str());
        *inner = Some((base, client.clone()));
        client
    }

    pub async fn send<R>(&self, request: R) -> Result<R::Response, RequestError>
    where
        R: ApiRequest,
    {
        let method = R::METHOD.to_string();
        let path = request.endpoint().into_owned();
        let inner = self.api_client();

        inner
            .send(request)
            .await
            .map_err(|e| RequestError::from_api(method, path, e))
    }
}

pub struct Request;

impl Request {
    pub fn posts() -> PostRepository {
        PostRepository::new()
    }

    pub fn comments() -> CommentRepository {
        CommentRepository::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::endpoints::posts::Post;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::{TcpListener, TcpStream};

    type Route = (&'static str, u16, &'static str);

    /// Serve canned responses keyed by `"METHOD /path"`; returns the base URL
    /// with a trailing slash.
    async fn serve(routes: &'static [Route]) -> String {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();

        tokio::spawn(async move {
            while let Ok((mut socket, _)) = listener.accept().await {
                tokio::spawn(async move {
                    let target = read_request(&mut socket).await;
                    let (status, body) = routes
                        .iter()
                        .find(|(route, ..)| *route == target)
                        .map(|(_, status, body)| (*status, *body))
                        .unwrap_or((418, ""));
                    let response = format!(
                        "HTTP/1.1 {status} Canned\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
                        body.len()
                    );
                    socket.write_all(response.as_bytes()).await.unwrap();
                });
            }
        });

        format!("http://{addr}/")
    }

    /// Read one request, body included, and return its method and path.
    async fn read_request(socket: &mut TcpStream) -> String {
        let mut buf = Vec::new();
        let mut chunk = [0u8; 1024];
        let header_end = loop {
            let n = socket.read(&mut chunk).await.unwrap();
            assert!(n > 0, "connection closed mid-request");
            buf.extend_from_slice(&chunk[..n]);
            if let Some(pos) = buf.windows(4).position(|w| w == b"\r\n\r\n") {
                break pos + 4;
            }
        };

        let head = String::from_utf8_lossy(&buf[..header_end]).to_string();
        let content_length = head
            .lines()
            .filter_map(|line| line.split_once(':'))
            .find(|(name, _)| name.eq_ignore_ascii_case("content-length"))
            .and_then(|(_, value)| value.trim().parse::<usize>().ok())
            .unwrap_or(0);
        while buf.len() < header_end + content_length {
            let n = socket.read(&mut chunk).await.unwrap();
            assert!(n > 0, "connection closed mid-body");
            buf.extend_from_slice(&chunk[..n]);
        }

        let request_line = head.lines().next().unwrap_or_default();
        request_line
            .rsplit_once(' ')
            .map(|(target, _version)| target.to_string())
            .unwrap_or_default()
    }

    const ROUTES: &[Route] = &[
        ("GET /posts", 200, r#"[{"id":1,"title":"a","views":2}]"#),
        ("GET /comments", 500, "boom"),
        ("PATCH /posts/7", 404, "{}"),
    ];

    #[tokio::test]
    async fn test_non_success_status_becomes_request_error() {
        let client = Client::new(BaseUrl::new(serve(ROUTES).await));

        let err = client
            .send(Request::posts().soft_delete("7".into()))
            .await
            .expect_err("server answers 404");
        assert_eq!(err.status, Some(404));
        assert_eq!(err.to_string(), "PATCH /posts/7 fail: 404");

        let err = client
            .send(Request::comments().list())
            .await
            .expect_err("server answers 500");
        assert_eq!(err.status, Some(500));
        assert_eq!(err.to_string(), "GET /comments fail: 500");
    }

    #[tokio::test]
    async fn test_success_body_is_decoded() {
        let client = Client::new(BaseUrl::new(serve(ROUTES).await));

        let posts = client.send(Request::posts().list()).await.unwrap();
        assert_eq!(posts.into_inner(), vec![Post::new("1", "a", 2)]);
    }

    #[tokio::test]
    async fn test_base_url_edit_reaches_next_request() {
        let base = BaseUrl::new("http://127.0.0.1:1");
        let client = Client::new(base.clone());
        assert!(client.send(Request::posts().list()).await.is_err());

        base.set(serve(ROUTES).await);
        let posts = client.send(Request::posts().list()).await.unwrap();
        assert_eq!(posts.len(), 1);
    }

    #[test]
    fn test_base_url_strips_single_trailing_slash() {
        let base = BaseUrl::new("http://localhost:3000/");
        assert_eq!(base.resolve(), "http://localhost:3000");
        assert_eq!(base.raw(), "http://localhost:3000/");

        base.set("http://example.test//");
        assert_eq!(base.resolve(), "http://example.test/");
    }

    #[test]
    fn test_base_url_edits_are_visible_through_clones() {
        let base = BaseUrl::default();
        let client = Client::new(base.clone());
        base.set("http://127.0.0.1:4000");
        assert_eq!(client.base_url().resolve(), "http://127.0.0.1:4000");
    }

    #[tokio::test]
    async fn test_transport_failure_carries_method_and_path() {
        let client = Client::new(BaseUrl::new("http://127.0.0.1:1"));
        let err = client
            .send(Request::posts().list())
            .await
            .expect_err("nothing listens on port 1");

        assert_eq!(err.method, "GET");
        assert_eq!(err.path, "/posts");
        assert_eq!(err.status, None);
        assert!(err.to_string().starts_with("GET /posts fail: "));
    }
}
