use gloo::net::http::Request;
use rebus_core::{NetworkError, PuzzleTransport, TransportReply};

/// Browser `fetch` through `gloo::net`.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub(crate) struct FetchTransport;

fn transport_error(err: gloo::net::Error) -> NetworkError {
    NetworkError::Transport(err.to_string())
}

impl PuzzleTransport for FetchTransport {
    async fn post_json(&self, url: &str, body: String) -> Result<TransportReply, NetworkError> {
        let response = Request::post(url)
            .header("Content-Type", "application/json")
            .body(body)
            .map_err(transport_error)?
            .send()
            .await
            .map_err(transport_error)?;

        let status = response.status();
        let body = response.text().await.map_err(transport_error)?;
        log::trace!("POST {} -> {} ({} bytes)", url, status, body.len());
        Ok(TransportReply::new(status, body))
    }
}
