//! OSC address pattern matching and handler registration.

/// Check an address against a registration pattern.
///
/// `*` matches exactly one path segment; segment counts must agree.
pub fn matches(address: &str, pattern: &str) -> bool {
    let mut addr_parts = address.split('/');
    let mut pattern_parts = pattern.split('/');

    loop {
        match (addr_parts.next(), pattern_parts.next()) {
            (Some(seg), Some(pat)) => {
                if pat != "*" && pat != seg {
                    return false;
                }
            }
            (None, None) => return true,
            _ => return false,
        }
    }
}

/// Decoder entry points messages can be dispatched to.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Handler {
    CommandLine,
    Cue,
    CueText,
}

/// Pattern registrations for inbound messages.
///
/// One handler may be registered under several overlapping patterns, so
/// dispatch deduplicates.
#[derive(Debug, Default)]
pub struct Registry {
    entries: Vec<(String, Handler)>,
}

impl Registry {
    pub fn new() -> Registry {
        Registry { entries: vec![] }
    }

    pub fn register(&mut self, pattern: &str, handler: Handler) {
        self.entries.push((pattern.to_string(), handler));
    }

    /// Handlers whose pattern matches the address, in registration order.
    pub fn dispatch(&self, address: &str) -> Vec<Handler> {
        let mut handlers: Vec<Handler> = vec![];
        for (pattern, handler) in &self.entries {
            if matches(address, pattern) && !handlers.contains(handler) {
                handlers.push(*handler);
            }
        }
        handlers
    }
}
