/// Manifest entry builder (admin page)
///
/// Turns the admin form into a ready-to-paste manifest entry. Nothing is
/// written anywhere: the operator copies the JSON text and appends it to
/// the manifest by hand.

use chrono::{NaiveDate, Utc};
use serde::Serialize;
use std::sync::atomic::{AtomicI64, Ordering};

/// Extension every stored document carries
pub const DOCUMENT_EXTENSION: &str = ".pdf";

/// Path segment used when no class is picked, so the URL stays well-formed
pub const CLASS_PLACEHOLDER: &str = "XX";

/// Category folder used when no subject is picked
pub const DEFAULT_CATEGORY: &str = "general";

/// How long the "Copied!" acknowledgement stays up
pub const COPY_FEEDBACK_SECS: u64 = 2;

/// The four admin form fields
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AdminForm {
    pub standard: Option<String>,
    pub subject: Option<String>,
    pub title: String,
    pub filename: String,
}

impl AdminForm {
    /// Pick a class; picking the selected one again clears it
    pub fn toggle_class(&mut self, class: String) {
        self.standard = if self.standard.as_deref() == Some(class.as_str()) {
            None
        } else {
            Some(class)
        };
    }

    pub fn select_subject(&mut self, subject: String) {
        self.subject = Some(subject);
    }

    pub fn set_title(&mut self, title: String) {
        self.title = title;
    }

    pub fn set_filename(&mut self, filename: String) {
        self.filename = filename;
    }

    pub fn is_empty(&self) -> bool {
        self.standard.is_none()
            && self.subject.is_none()
            && self.title.is_empty()
            && self.filename.is_empty()
    }
}

/// Entry as it will appear in the manifest. Field order is the JSON key order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PreviewRecord {
    pub id: i64,
    pub title: String,
    pub standard: String,
    pub subject: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub date: String,
    pub url: String,
}

/// A built entry and its pretty-printed JSON
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Preview {
    pub record: PreviewRecord,
    pub text: String,
}

/// Hands out millisecond-timestamp ids that never repeat within a process
#[derive(Debug, Default)]
pub struct IdGenerator {
    last: AtomicI64,
}

impl IdGenerator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn next_id(&self) -> i64 {
        self.next_after(Utc::now().timestamp_millis())
    }

    /// Use `now` unless an id at or after it was already handed out
    fn next_after(&self, now: i64) -> i64 {
        let mut last = self.last.load(Ordering::Relaxed);
        loop {
            let candidate = now.max(last + 1);
            match self
                .last
                .compare_exchange_weak(last, candidate, Ordering::Relaxed, Ordering::Relaxed)
            {
                Ok(_) => return candidate,
                Err(actual) => last = actual,
            }
        }
    }
}

/// Append ".pdf" unless already present. Empty stays empty.
pub fn normalize_filename(raw: &str) -> String {
    if raw.is_empty() {
        return String::new();
    }
    if raw.ends_with(DOCUMENT_EXTENSION) {
        raw.to_string()
    } else {
        format!("{}{}", raw, DOCUMENT_EXTENSION)
    }
}

/// `/materials/class<class>/<subject>/<file>`
pub fn derive_url(form: &AdminForm) -> String {
    let class = form.standard.as_deref().unwrap_or(CLASS_PLACEHOLDER);
    let category = form
        .subject
        .as_deref()
        .map(str::to_lowercase)
        .unwrap_or_else(|| DEFAULT_CATEGORY.to_string());

    format!(
        "/materials/class{}/{}/{}",
        class,
        category,
        normalize_filename(&form.filename)
    )
}

/// Helper text under the filename field. Uses friendlier defaults than
/// `derive_url` and shows the filename as typed.
pub fn path_hint(form: &AdminForm) -> String {
    let class = form.standard.as_deref().unwrap_or("10");
    let category = form
        .subject
        .as_deref()
        .map(str::to_lowercase)
        .unwrap_or_else(|| "science".to_string());
    let filename = if form.filename.is_empty() {
        "file.pdf"
    } else {
        form.filename.as_str()
    };

    format!("Will generate: /materials/class{}/{}/{}", class, category, filename)
}

/// Build the entry for today's date, or None when the form is untouched
pub fn build_preview(form: &AdminForm, ids: &IdGenerator) -> Option<Preview> {
    build_preview_on(form, ids.next_id(), Utc::now().date_naive())
}

/// Same as `build_preview` with a fixed id and date
pub fn build_preview_on(form: &AdminForm, id: i64, date: NaiveDate) -> Option<Preview> {
    if form.is_empty() {
        return None;
    }

    let record = PreviewRecord {
        id,
        title: form.title.clone(),
        standard: form.standard.clone().unwrap_or_default(),
        subject: form.subject.clone().unwrap_or_default(),
        kind: "PDF".to_string(),
        date: date.format("%Y-%m-%d").to_string(),
        url: derive_url(form),
    };

    // A struct of plain strings and an integer always serializes
    let text = serde_json::to_string_pretty(&record).unwrap_or_default();

    Some(Preview { record, text })
}

/// "Copied!" acknowledgement state.
///
/// Every copy attempt gets a generation number. The acknowledgement only
/// shows once the clipboard is confirmed to hold the copied text, and an
/// expiry only clears it if no newer copy has started since.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CopyFeedback {
    generation: u64,
    pending: Option<String>,
    copied: bool,
}

impl CopyFeedback {
    /// Start a copy of `text`, returning its generation
    pub fn begin(&mut self, text: String) -> u64 {
        self.generation += 1;
        self.pending = Some(text);
        self.copied = false;
        self.generation
    }

    /// Clipboard read-back for `generation`. Returns true if the
    /// acknowledgement is now showing and an expiry should be scheduled.
    pub fn confirm(&mut self, generation: u64, clipboard: Option<&str>) -> bool {
        if generation != self.generation {
            return false;
        }
        let expected = self.pending.take();
        self.copied = expected.is_some() && expected.as_deref() == clipboard;
        self.copied
    }

    pub fn expire(&mut self, generation: u64) {
        if generation == self.generation {
            self.copied = false;
        }
    }

    pub fn is_copied(&self) -> bool {
        self.copied
    }
}
