//! Render helpers available to theme templates.
//!
//! Helpers live in a `HelperTable` that is installed into each template
//! engine instance explicitly; nothing is registered globally.
//!
//! | Name          | Kind     | Usage                                   |
//! |---------------|----------|-----------------------------------------|
//! | `format_date` | filter   | `{{ job.startDate \| format_date }}`    |
//! | `has_items`   | filter   | `{% if skills \| has_items %}`          |
//! | `t`           | function | `{{ t(key="sections.experience") }}`    |

use crate::i18n::{LocaleBundle, LocaleEntry};
use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;
use tera::{Tera, Value};

pub type FilterFn =
    Arc<dyn Fn(&Value, &HashMap<String, Value>) -> tera::Result<Value> + Send + Sync>;
pub type FunctionFn = Arc<dyn Fn(&HashMap<String, Value>) -> tera::Result<Value> + Send + Sync>;

const ENGLISH_MONTHS: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];
const ENGLISH_PRESENT: &str = "Present";

/// Named filters and functions to install into a template engine.
#[derive(Clone, Default)]
pub struct HelperTable {
    filters: BTreeMap<String, FilterFn>,
    functions: BTreeMap<String, FunctionFn>,
}

impl std::fmt::Debug for HelperTable {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HelperTable")
            .field("filters", &self.filters.keys().collect::<Vec<_>>())
            .field("functions", &self.functions.keys().collect::<Vec<_>>())
            .finish()
    }
}

impl HelperTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Helpers that do not depend on a language: `has_items` and an English
    /// `format_date`.
    pub fn standard() -> Self {
        let mut table = Self::new();
        table.add_filter("has_items", has_items);
        table.add_filter("format_date", date_filter(DateLabels::english()));
        table
    }

    /// Helpers bound to one language's locale bundle: `t` and a localized
    /// `format_date`. Install after `standard()` to override it.
    pub fn localized(locale: &LocaleBundle) -> Self {
        let mut table = Self::new();
        table.add_filter("format_date", date_filter(DateLabels::from_locale(locale)));
        let locale = Arc::new(locale.clone());
        table.add_function("t", move |args: &HashMap<String, Value>| {
            translate(&locale, args)
        });
        table
    }

    pub fn add_filter<F>(&mut self, name: &str, filter: F)
    where
        F: Fn(&Value, &HashMap<String, Value>) -> tera::Result<Value> + Send + Sync + 'static,
    {
        self.filters.insert(name.to_string(), Arc::new(filter));
    }

    pub fn add_function<F>(&mut self, name: &str, function: F)
    where
        F: Fn(&HashMap<String, Value>) -> tera::Result<Value> + Send + Sync + 'static,
    {
        self.functions.insert(name.to_string(), Arc::new(function));
    }

    /// Add every helper of `other`, replacing same-named ones.
    pub fn extend(&mut self, other: HelperTable) {
        self.filters.extend(other.filters);
        self.functions.extend(other.functions);
    }

    pub fn has_filter(&self, name: &str) -> bool {
        self.filters.contains_key(name)
    }

    pub fn has_function(&self, name: &str) -> bool {
        self.functions.contains_key(name)
    }

    /// Register every helper on a Tera instance.
    pub fn install(&self, tera: &mut Tera) {
        for (name, filter) in &self.filters {
            let filter = Arc::clone(filter);
            tera.register_filter(
                name,
                move |value: &Value, args: &HashMap<String, Value>| filter(value, args),
            );
        }
        for (name, function) in &self.functions {
            let function = Arc::clone(function);
            tera.register_function(name, move |args: &HashMap<String, Value>| function(args));
        }
    }
}

fn has_items(value: &Value, _args: &HashMap<String, Value>) -> tera::Result<Value> {
    let present = match value {
        Value::Array(items) => !items.is_empty(),
        Value::Object(map) => !map.is_empty(),
        _ => false,
    };
    Ok(Value::Bool(present))
}

#[derive(Debug, Clone)]
struct DateLabels {
    months: Vec<String>,
    present: String,
}

impl DateLabels {
    fn english() -> Self {
        Self {
            months: ENGLISH_MONTHS.iter().map(|m| m.to_string()).collect(),
            present: ENGLISH_PRESENT.to_string(),
        }
    }

    /// Month names from `dates.months` (when it has twelve entries) and the
    /// `labels.present` label, each falling back to English.
    fn from_locale(locale: &LocaleBundle) -> Self {
        let english = Self::english();
        Self {
            months: locale
                .list("dates.months")
                .filter(|months| months.len() == 12)
                .map(|months| months.to_vec())
                .unwrap_or(english.months),
            present: locale
                .text("labels.present")
                .map(str::to_string)
                .unwrap_or(english.present),
        }
    }

    /// `2020-05` and `2020-05-17` become `May 2020`; `present` becomes the
    /// present label; anything else is returned unchanged.
    fn format(&self, date: &str) -> String {
        if date.eq_ignore_ascii_case("present") {
            return self.present.clone();
        }

        let mut parts = date.split('-');
        let (Some(year), Some(month)) = (parts.next(), parts.next()) else {
            return date.to_string();
        };
        match month.parse::<usize>() {
            Ok(index) if (1..=self.months.len()).contains(&index) => {
                format!("{} {}", self.months[index - 1], year)
            }
            _ => date.to_string(),
        }
    }
}

fn date_filter(
    labels: DateLabels,
) -> impl Fn(&Value, &HashMap<String, Value>) -> tera::Result<Value> + Send + Sync + 'static {
    move |value: &Value, _args: &HashMap<String, Value>| match value {
        Value::Null => Ok(Value::String(String::new())),
        Value::String(date) if date.is_empty() => Ok(Value::String(String::new())),
        Value::String(date) => Ok(Value::String(labels.format(date))),
        Value::Number(number) => Ok(Value::String(number.to_string())),
        other => Err(tera::Error::msg(format!(
            "format_date expects a string, got {}",
            other
        ))),
    }
}

fn translate(locale: &LocaleBundle, args: &HashMap<String, Value>) -> tera::Result<Value> {
    let key = args
        .get("key")
        .and_then(Value::as_str)
        .ok_or_else(|| tera::Error::msg("t function requires a 'key' parameter"))?;

    match locale.get(key) {
        Some(LocaleEntry::Text(text)) if !text.is_empty() => Ok(Value::String(text.clone())),
        Some(LocaleEntry::List(items)) => Ok(Value::Array(
            items.iter().cloned().map(Value::String).collect(),
        )),
        Some(LocaleEntry::Nested(bundle)) => serde_json::to_value(bundle)
            .map_err(|e| tera::Error::msg(format!("t({}): {}", key, e))),
        _ => Ok(Value::String(key.to_string())),
    }
}
