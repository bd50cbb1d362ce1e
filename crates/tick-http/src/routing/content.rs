use std::fmt;

use crate::checksum::checksum;

/// The stored callback producing a response body from the verbatim,
/// undecoded parameter string of a request.
pub type Handler = Box<dyn Fn(&str) -> String + Send + Sync>;

/// A leaf resource: a name bound to a handler, plus optional response
/// metadata.
///
/// The name checksum is computed once at construction with the
/// case-sensitive checksum variant; content lookups are case-sensitive.
pub struct Content {
    name: String,
    name_checksum: u32,
    handler: Handler,
    content_type: Option<String>,
    charset: Option<String>,
    language: Option<String>,
}

impl Content {
    pub fn new<F>(name: impl Into<String>, handler: F) -> Self
    where
        F: Fn(&str) -> String + Send + Sync + 'static,
    {
        let name = name.into();
        let name_checksum = checksum(name.as_bytes());
        Self { name, name_checksum, handler: Box::new(handler), content_type: None, charset: None, language: None }
    }

    /// Sets the `Content-Type` reported for this resource.
    pub fn with_content_type(mut self, value: impl Into<String>) -> Self {
        self.content_type = Some(value.into());
        self
    }

    /// Sets the charset suffixed to the `Content-Type`.
    pub fn with_charset(mut self, value: impl Into<String>) -> Self {
        self.charset = Some(value.into());
        self
    }

    /// Sets the `Content-Language` reported for this resource.
    pub fn with_language(mut self, value: impl Into<String>) -> Self {
        self.language = Some(value.into());
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub(crate) fn name_checksum(&self) -> u32 {
        self.name_checksum
    }

    pub fn content_type(&self) -> Option<&str> {
        self.content_type.as_deref()
    }

    pub fn charset(&self) -> Option<&str> {
        self.charset.as_deref()
    }

    pub fn language(&self) -> Option<&str> {
        self.language.as_deref()
    }

    /// Invokes the handler with the request's parameter string.
    pub fn execute(&self, parameters: &str) -> String {
        (self.handler)(parameters)
    }
}

impl fmt::Debug for Content {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Content")
            .field("name", &self.name)
            .field("name_checksum", &self.name_checksum)
            .field("content_type", &self.content_type)
            .field("charset", &self.charset)
            .field("language", &self.language)
            .finish_non_exhaustive()
    }
}
