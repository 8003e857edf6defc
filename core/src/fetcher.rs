use alloc::string::{String, ToString};
use core::future::Future;
use rebus_protocol::{ErrorResponse, GeneratePuzzleRequest, GeneratePuzzleResponse, endpoint_url};

use crate::*;

/// Raw HTTP reply as seen by the fetcher.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TransportReply {
    pub status: u16,
    pub body: String,
}

impl TransportReply {
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    pub const fn is_success(&self) -> bool {
        self.status >= 200 && self.status < 300
    }
}

/// Sends a JSON body with `POST` and hands back whatever came in.
///
/// Implementations only report transport failures, HTTP statuses are interpreted by [`PuzzleFetcher`].
pub trait PuzzleTransport {
    fn post_json(
        &self,
        url: &str,
        body: String,
    ) -> impl Future<Output = Result<TransportReply, NetworkError>>;
}

/// Anything able to produce a puzzle for a topic.
pub trait PuzzleSource {
    fn fetch(&self, topic: &str) -> impl Future<Output = Result<Puzzle>>;
}

#[derive(Clone, Debug)]
pub struct PuzzleFetcher<T> {
    transport: T,
    api_base: String,
}

impl<T: PuzzleTransport> PuzzleFetcher<T> {
    pub fn new(transport: T, api_base: impl Into<String>) -> Self {
        Self {
            transport,
            api_base: api_base.into(),
        }
    }

    pub fn endpoint(&self) -> String {
        endpoint_url(&self.api_base)
    }
}

impl<T: PuzzleTransport> PuzzleSource for PuzzleFetcher<T> {
    async fn fetch(&self, topic: &str) -> Result<Puzzle> {
        let url = self.endpoint();
        let body = GeneratePuzzleRequest::new(topic)
            .to_json()
            .map_err(|err| NetworkError::Transport(err.to_string()))?;

        log::debug!("requesting puzzle, topic: {:?}", topic);
        let reply = self.transport.post_json(&url, body).await?;
        decode_reply(&reply)
    }
}

/// Turns a raw reply from the generation endpoint into a puzzle.
pub fn decode_reply(reply: &TransportReply) -> Result<Puzzle> {
    if !reply.is_success() {
        let detail = ErrorResponse::from_json(&reply.body).map(|err| err.detail);
        log::warn!("puzzle service answered {}: {:?}", reply.status, detail);
        return Err(NetworkError::Status {
            status: reply.status,
            detail,
        }
        .into());
    }

    let envelope = GeneratePuzzleResponse::from_json(&reply.body)
        .map_err(|err| ParseError::InvalidEnvelope(err.to_string()))?;
    let puzzle = Puzzle::from_generation_output(&envelope.puzzle)?;
    Ok(puzzle)
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use alloc::{vec, vec::Vec};
    use core::cell::RefCell;
    use core::future::ready;
    use futures_util::FutureExt;

    /// Replies immediately with a canned response and records requests.
    #[derive(Debug, Default)]
    pub(crate) struct MockTransport {
        replies: RefCell<Vec<Result<TransportReply, NetworkError>>>,
        pub(crate) requests: RefCell<Vec<(String, String)>>,
    }

    impl MockTransport {
        pub(crate) fn replying(reply: Result<TransportReply, NetworkError>) -> Self {
            Self {
                replies: RefCell::new(vec![reply]),
                requests: RefCell::default(),
            }
        }

        pub(crate) fn ok(body: &str) -> Self {
            Self::replying(Ok(TransportReply::new(200, body)))
        }
    }

    impl PuzzleTransport for MockTransport {
        fn post_json(
            &self,
            url: &str,
            body: String,
        ) -> impl Future<Output = Result<TransportReply, NetworkError>> {
            self.requests.borrow_mut().push((url.to_string(), body));
            let reply = self
                .replies
                .borrow_mut()
                .pop()
                .unwrap_or_else(|| Err(NetworkError::Transport("no reply queued".to_string())));
            ready(reply)
        }
    }

    fn fetch_now(fetcher: &PuzzleFetcher<MockTransport>, topic: &str) -> Result<Puzzle> {
        fetcher
            .fetch(topic)
            .now_or_never()
            .expect("mock transport resolves immediately")
    }

    #[test]
    fn posts_topic_to_generate_endpoint() {
        let fetcher = PuzzleFetcher::new(
            MockTransport::ok(r#"{"puzzle": "{\"word\":\"cat\",\"svg\":\"<svg></svg>\"}"}"#),
            "https://puzzles.example/",
        );

        let puzzle = fetch_now(&fetcher, "Circus Acts").unwrap();

        assert_eq!(puzzle, Puzzle::new("cat", "<svg></svg>"));
        assert_eq!(
            fetcher.transport.requests.borrow().as_slice(),
            &[(
                "https://puzzles.example/generate-puzzle".to_string(),
                r#"{"topic":"Circus Acts"}"#.to_string()
            )]
        );
    }

    #[test]
    fn wrapped_generator_output_is_extracted() {
        let fetcher = PuzzleFetcher::new(
            MockTransport::ok(
                r#"{"puzzle": "Sure! {\"word\":\"cat\",\"svg\":\"<svg></svg>\"} Hope that helps"}"#,
            ),
            "api",
        );

        assert_eq!(
            fetch_now(&fetcher, "Pets").unwrap(),
            Puzzle::new("cat", "<svg></svg>")
        );
    }

    #[test]
    fn non_success_status_is_a_network_error() {
        let fetcher = PuzzleFetcher::new(
            MockTransport::replying(Ok(TransportReply::new(
                500,
                r#"{"detail": "API Key not configured"}"#,
            ))),
            "api",
        );

        let err = fetch_now(&fetcher, "Pets").unwrap_err();

        assert_eq!(
            err,
            FetchError::Network(NetworkError::Status {
                status: 500,
                detail: Some("API Key not configured".to_string()),
            })
        );
    }

    #[test]
    fn transport_failure_is_a_network_error() {
        let fetcher = PuzzleFetcher::new(
            MockTransport::replying(Err(NetworkError::Transport("offline".to_string()))),
            "api",
        );

        assert_eq!(
            fetch_now(&fetcher, "Pets"),
            Err(FetchError::Network(NetworkError::Transport("offline".to_string())))
        );
    }

    #[test]
    fn output_without_braces_is_a_parse_error() {
        let fetcher = PuzzleFetcher::new(MockTransport::ok(r#"{"puzzle": "no puzzle today"}"#), "api");

        assert_eq!(
            fetch_now(&fetcher, "Pets"),
            Err(FetchError::Parse(ParseError::NoJsonObject))
        );
    }

    #[test]
    fn unexpected_envelope_is_a_parse_error() {
        let reply = TransportReply::new(200, r#"{"message": "Puzzle API is running"}"#);

        let err = decode_reply(&reply).unwrap_err();

        assert!(matches!(err, FetchError::Parse(ParseError::InvalidEnvelope(_))));
    }
}
