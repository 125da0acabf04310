use serde_json::Value;

use super::api::{ApiClient, StatusLine};

/// A dropdown: a placeholder entry followed by the fetched options.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OptionList {
    placeholder: String,
    label: String,
    options: Vec<String>,
}

impl OptionList {
    pub fn new(placeholder: impl Into<String>) -> Self {
        let placeholder = placeholder.into();
        Self {
            label: placeholder.clone(),
            placeholder,
            options: Vec::new(),
        }
    }

    /// Current text of the placeholder entry.
    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn options(&self) -> &[String] {
        &self.options
    }

    /// Replaces the options with the string list at `endpoint`. Errors go to
    /// `status` and the placeholder; the list is left empty.
    pub async fn populate(
        &mut self,
        client: &ApiClient,
        endpoint: &str,
        status: &mut StatusLine,
    ) -> bool {
        self.begin_loading();
        let items = client.fetch_data(endpoint, &[], status).await;
        self.finish_loading(items)
    }

    fn begin_loading(&mut self) {
        self.options.clear();
        self.label = format!("{} (loading...)", self.placeholder);
    }

    fn finish_loading(&mut self, items: Option<Value>) -> bool {
        match items {
            Some(Value::Array(items)) => {
                self.options = items
                    .into_iter()
                    .map(|item| match item {
                        Value::String(s) => s,
                        other => other.to_string(),
                    })
                    .collect();
                self.label = self.placeholder.clone();
                true
            }
            _ => {
                self.label = format!("{} (failed to load)", self.placeholder);
                false
            }
        }
    }
}
