use crate::dispatcher::Dispatcher;
use crate::queue::QueueCategory;

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use thiserror::Error;
use url::Url;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

// Every failure collapses to the same absent-result callback; the variants
// exist only for logging.
#[derive(Debug, Error)]
enum FetchError {
    #[error("transport: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("status {0}")]
    Status(u16),
}

/// Response metadata delivered alongside a successful load.
pub struct ResponseMeta {
    pub status: u16,
    pub mime_type: Option<String>,
    pub text_encoding: Option<String>,
    /// Final URL after redirects, for use as the render base URL.
    pub url: Url,
}

/// Issues one HTTP GET per load on the background tier.
///
/// HTTP 200 delivers `(Some(bytes), Some(meta))`; any transport error or
/// other status collapses to `(None, None)`. The callback is always delivered
/// through the main queue. There is no retry: every load is attempted exactly
/// once.
pub struct WebLoader {
    loading: Arc<AtomicBool>,
}

impl WebLoader {
    pub fn new() -> Self {
        Self {
            loading: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Whether a load is currently outstanding.
    pub fn is_loading(&self) -> bool {
        self.loading.load(Ordering::Acquire)
    }

    /// Starts a load. A second call while one is outstanding returns
    /// immediately as a no-op; no error is signaled.
    pub fn load<F>(&self, dispatcher: &Dispatcher, url: &str, done: F)
    where
        F: FnOnce(Option<Vec<u8>>, Option<ResponseMeta>) + Send + 'static,
    {
        if self
            .loading
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_err()
        {
            return;
        }

        let main = dispatcher.queue(QueueCategory::Main);
        let loading = self.loading.clone();
        let url = url.to_string();

        dispatcher.spawn(QueueCategory::Background, move || {
            let outcome = fetch(&url);
            loading.store(false, Ordering::Release);

            match outcome {
                Ok((bytes, meta)) => {
                    tracing::info!(url = %url, bytes = bytes.len(), "load finished");
                    main.submit(move || done(Some(bytes), Some(meta)));
                }
                Err(error) => {
                    tracing::warn!(url = %url, %error, "load failed");
                    main.submit(move || done(None, None));
                }
            }
        });
    }
}

impl Default for WebLoader {
    fn default() -> Self {
        Self::new()
    }
}

fn fetch(url: &str) -> Result<(Vec<u8>, ResponseMeta), FetchError> {
    let client = reqwest::blocking::Client::builder()
        .timeout(REQUEST_TIMEOUT)
        .build()?;

    let response = client.get(url).send()?;

    let status = response.status().as_u16();
    if status != 200 {
        return Err(FetchError::Status(status));
    }

    let (mime_type, text_encoding) = content_type(&response);
    let final_url = response.url().clone();
    let bytes = response.bytes()?.to_vec();

    Ok((
        bytes,
        ResponseMeta {
            status,
            mime_type,
            text_encoding,
            url: final_url,
        },
    ))
}

fn content_type(response: &reqwest::blocking::Response) -> (Option<String>, Option<String>) {
    let Some(header) = response.headers().get(reqwest::header::CONTENT_TYPE) else {
        return (None, None);
    };
    let Ok(value) = header.to_str() else {
        return (None, None);
    };

    let mut parts = value.split(';');

    let mime = parts
        .next()
        .map(|part| part.trim().to_ascii_lowercase())
        .filter(|part| !part.is_empty());

    let charset = parts.find_map(|part| {
        let lower = part.trim().to_ascii_lowercase();
        lower
            .strip_prefix("charset=")
            .map(|charset| charset.trim_matches('"').to_string())
    });

    (mime, charset)
}
