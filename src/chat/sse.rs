const SSE_DELIMITER: &str = "\n\n";
pub(crate) const DONE_EVENT: &str = "[DONE]";

/// Accumulates raw SSE bytes and yields complete events.
///
/// Bytes may arrive split inside a multi-byte UTF-8 sequence or inside an
/// event; both are held back until complete.
#[derive(Debug, Default)]
pub(crate) struct SseEventBuffer {
    buffer: String,
    utf8_buffer: Vec<u8>,
}

impl SseEventBuffer {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn push_bytes(&mut self, bytes: &[u8]) {
        self.utf8_buffer.extend_from_slice(bytes);
        match std::str::from_utf8(&self.utf8_buffer) {
            Ok(text) => {
                self.buffer.push_str(text);
                self.utf8_buffer.clear();
            }
            Err(err) => self.consume_valid_prefix(err.valid_up_to()),
        }
    }

    pub(crate) fn drain_events(&mut self) -> Vec<String> {
        let mut events = Vec::new();
        while let Some(event) = self.next_event() {
            events.push(event);
        }
        events
    }

    fn consume_valid_prefix(&mut self, valid_up_to: usize) {
        if valid_up_to == 0 {
            return;
        }

        let valid = String::from_utf8_lossy(&self.utf8_buffer[..valid_up_to]);
        self.buffer.push_str(&valid);
        self.utf8_buffer.drain(..valid_up_to);
    }

    fn next_event(&mut self) -> Option<String> {
        let pos = self.buffer.find(SSE_DELIMITER)?;
        let end = pos + SSE_DELIMITER.len();
        let event = self.buffer[..end].to_string();
        self.buffer.drain(..end);
        Some(event)
    }
}

/// Joins the `data:` lines of one event.
pub(crate) fn extract_payload(event: &str) -> Option<String> {
    let mut payload = String::new();
    for line in event.lines() {
        let Some(data) = line.strip_prefix("data:") else {
            continue;
        };
        let data = data.trim_start();
        if data == DONE_EVENT {
            return Some(DONE_EVENT.to_string());
        }
        payload.push_str(data);
    }
    if payload.is_empty() {
        None
    } else {
        Some(payload)
    }
}

#[cfg(test)]
#[path = "sse_tests.rs"]
mod tests;
