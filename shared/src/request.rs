//! Request types for the admin API
//!
//! Listing filters and the transport-neutral form body used for every
//! create/update submission.

/// Listing filters, sent as query parameters
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Filters {
    params: Vec<(String, String)>,
}

impl Filters {
    /// Empty filter set (fetch everything the endpoint returns by default)
    pub fn new() -> Self {
        Self::default()
    }

    /// Page number (1-based)
    pub fn page(self, page: u32) -> Self {
        self.with("page", page.to_string())
    }

    /// Items per page
    pub fn per_page(self, per_page: u32) -> Self {
        self.with("per_page", per_page.to_string())
    }

    /// Free-text search
    pub fn search(self, term: impl Into<String>) -> Self {
        self.with("search", term)
    }

    /// Arbitrary key/value filter; a repeated key replaces the earlier value
    pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        let key = key.into();
        let value = value.into();
        match self.params.iter_mut().find(|(k, _)| *k == key) {
            Some(slot) => slot.1 = value,
            None => self.params.push((key, value)),
        }
        self
    }

    pub fn is_empty(&self) -> bool {
        self.params.is_empty()
    }

    /// Query pairs in insertion order
    pub fn as_pairs(&self) -> &[(String, String)] {
        &self.params
    }

    /// Render as `a=1&b=2` with percent-encoded values
    pub fn to_query_string(&self) -> String {
        self.params
            .iter()
            .map(|(k, v)| {
                format!(
                    "{}={}",
                    crate::util::percent_encode(k),
                    crate::util::percent_encode(v)
                )
            })
            .collect::<Vec<_>>()
            .join("&")
    }
}

/// A file attached to a form submission
#[derive(Debug, Clone, PartialEq)]
pub struct FilePart {
    /// Form field name (e.g. `image`, `logo`)
    pub field: String,
    pub file_name: String,
    /// MIME type, e.g. `image/png`
    pub mime: String,
    pub bytes: Vec<u8>,
}

impl FilePart {
    pub fn new(
        field: impl Into<String>,
        file_name: impl Into<String>,
        mime: impl Into<String>,
        bytes: Vec<u8>,
    ) -> Self {
        Self {
            field: field.into(),
            file_name: file_name.into(),
            mime: mime.into(),
            bytes,
        }
    }
}

/// Multipart form body: ordered text fields plus optional files
///
/// Kept independent of any HTTP crate so that drafts can be built and
/// inspected without a client. Each adapter encodes it for its transport.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FormPayload {
    pub fields: Vec<(String, String)>,
    pub files: Vec<FilePart>,
}

impl FormPayload {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a text field
    pub fn text(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.fields.push((name.into(), value.into()));
        self
    }

    /// Append a text field only when a value is present
    pub fn text_opt<V: ToString>(self, name: impl Into<String>, value: Option<V>) -> Self {
        match value {
            Some(v) => self.text(name, v.to_string()),
            None => self,
        }
    }

    /// Attach a file
    pub fn file(mut self, part: FilePart) -> Self {
        self.files.push(part);
        self
    }

    /// Attach a file only when present
    pub fn file_opt(self, part: Option<FilePart>) -> Self {
        match part {
            Some(p) => self.file(p),
            None => self,
        }
    }

    /// Look up a text field by name (first match)
    pub fn field(&self, name: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.as_str())
    }

    pub fn has_files(&self) -> bool {
        !self.files.is_empty()
    }
}
