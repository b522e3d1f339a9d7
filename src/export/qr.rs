//! QR rendering for transfer codes
//!
//! Rendering is delegated to a [`QrRenderer`]. The bundled
//! [`ChartApiRenderer`] produces an image URL from a chart service. Large
//! datasets make payloads too long to scan reliably; such payloads are still
//! rendered but a warning is logged. Splitting a payload over several codes
//! is not supported.

/// Largest payload, in bytes, that fits one QR code (version 40, low error correction)
pub const MAX_SCANNABLE_PAYLOAD: usize = 2953;

/// Turns a payload into a displayable image reference
pub trait QrRenderer {
    /// Render `payload` as a square image `size` pixels wide
    fn render(&self, payload: &str, size: u32) -> String;
}

/// Renderer that builds an image URL for a chart service
#[derive(Debug, Clone)]
pub struct ChartApiRenderer {
    base_url: String,
}

impl ChartApiRenderer {
    pub const DEFAULT_BASE_URL: &'static str = "https://chart.googleapis.com/chart";

    /// Create a renderer for a different chart endpoint
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
        }
    }
}

impl Default for ChartApiRenderer {
    fn default() -> Self {
        Self::with_base_url(Self::DEFAULT_BASE_URL)
    }
}

impl QrRenderer for ChartApiRenderer {
    fn render(&self, payload: &str, size: u32) -> String {
        format!(
            "{}?cht=qr&chs={}x{}&chl={}",
            self.base_url,
            size,
            size,
            encode_component(payload)
        )
    }
}

/// Check whether a payload fits in a single QR code
pub fn is_scannable(payload: &str) -> bool {
    payload.len() <= MAX_SCANNABLE_PAYLOAD
}

/// Render a transfer payload, warning when it is too long to scan
pub fn render_transfer_qr<R: QrRenderer + ?Sized>(renderer: &R, payload: &str, size: u32) -> String {
    if !is_scannable(payload) {
        tracing::warn!(
            payload_len = payload.len(),
            limit = MAX_SCANNABLE_PAYLOAD,
            "transfer code is too long to scan reliably; copy the full code instead"
        );
    }
    renderer.render(payload, size)
}

/// Percent-encode a URL query component
///
/// Leaves the same characters unescaped as JavaScript's `encodeURIComponent`.
fn encode_component(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for byte in input.bytes() {
        match byte {
            b'A'..=b'Z'
            | b'a'..=b'z'
            | b'0'..=b'9'
            | b'-'
            | b'_'
            | b'.'
            | b'!'
            | b'~'
            | b'*'
            | b'\''
            | b'('
            | b')' => out.push(byte as char),
            _ => out.push_str(&format!("%{:02X}", byte)),
        }
    }
    out
}
