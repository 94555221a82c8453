use crate::bridge::{self, BridgeCompletion};
use crate::dispatcher::Dispatcher;
use crate::queue::MainQueue;
use crate::web::loader::{ResponseMeta, WebLoader};

use std::sync::Arc;

use url::Url;

/// The embedded-browser seam: a rendering surface for loaded content.
pub trait ContentHost: Send + Sync {
    fn render(&self, bytes: &[u8], mime_type: &str, text_encoding: &str, base_url: &Url);

    /// Starts an asynchronous script evaluation and reports the result
    /// through `completion` exactly once.
    fn evaluate(&self, script: &str, completion: BridgeCompletion);

    fn set_hidden(&self, hidden: bool);
}

/// Ties a loader to a rendering host: loads a URL, hands a successful
/// response to the host, and measures rendered content through the
/// synchronous bridge.
pub struct ContentFrame {
    host: Arc<dyn ContentHost>,
    loader: WebLoader,
}

impl ContentFrame {
    pub fn new(host: Arc<dyn ContentHost>) -> Self {
        Self {
            host,
            loader: WebLoader::new(),
        }
    }

    /// Loads `url` and renders the response on success. A load already in
    /// flight makes this a no-op. Failures are logged, never surfaced as
    /// typed errors; the host stays unrendered.
    pub fn load(&self, dispatcher: &Dispatcher, url: &str) {
        if self.loader.is_loading() {
            return;
        }

        let host = self.host.clone();
        self.loader.load(dispatcher, url, move |bytes, meta| {
            match (bytes, meta) {
                (
                    Some(bytes),
                    Some(ResponseMeta {
                        mime_type: Some(mime_type),
                        text_encoding: Some(text_encoding),
                        url,
                        ..
                    }),
                ) => {
                    host.render(&bytes, &mime_type, &text_encoding, &url);
                }
                _ => tracing::warn!("content load failed"),
            }
        });
    }

    /// Measures the rendered document height by evaluating a script through
    /// the synchronous bridge, then unhides the host.
    ///
    /// Call from the thread pumping the main queue. A missing or unparsable
    /// measurement is logged and returns `None`; the host stays hidden.
    pub fn measure_height(&self, main: &MainQueue) -> Option<f64> {
        let text = bridge::block_on_value(main, |completion| {
            self.host.evaluate("document.body.offsetHeight", completion)
        });

        match text.as_deref().and_then(|text| text.parse::<f64>().ok()) {
            Some(height) => {
                tracing::debug!(height, "content height measured");
                self.host.set_hidden(false);
                Some(height)
            }
            None => {
                tracing::warn!("content height measurement failed");
                None
            }
        }
    }
}
