//! Composite formatter plugged into `tracing-subscriber`.
//!
//! # Responsibilities
//! - Turn a `tracing::Event` into a [`LogEntry`]
//! - Inject caller metadata underneath the event's own fields
//! - Delegate rendering to the [`TemplateFormatter`]

use std::fmt;

use tracing::field::{Field, Visit};
use tracing::{Event, Subscriber};
use tracing_subscriber::fmt::format::Writer;
use tracing_subscriber::fmt::{FmtContext, FormatEvent, FormatFields};
use tracing_subscriber::registry::LookupSpan;

use crate::caller::{BacktraceInspector, CallSite, CallerInfo, CallerResolver, StackInspector};
use crate::config::schema::CallerConfig;
use crate::format::entry::{FieldValue, Level, LogEntry};
use crate::format::template::TemplateFormatter;
use crate::format::SEVERITY_FIELD;

const MESSAGE_FIELD: &str = "message";

/// Event formatter that adds `function`, `package`, `file` and `line`.
#[derive(Debug, Clone)]
pub struct RuntimeFormatter<I = BacktraceInspector> {
    resolver: CallerResolver<I>,
    template: TemplateFormatter,
}

impl RuntimeFormatter<BacktraceInspector> {
    pub fn new(caller: CallerConfig, template: TemplateFormatter) -> Self {
        Self::with_resolver(CallerResolver::new(caller), template)
    }
}

impl<I: StackInspector> RuntimeFormatter<I> {
    pub fn with_resolver(resolver: CallerResolver<I>, template: TemplateFormatter) -> Self {
        Self { resolver, template }
    }

    pub fn template(&self) -> &TemplateFormatter {
        &self.template
    }

    /// Replace `entry.fields` with the caller fields overlaid by the
    /// original ones.
    fn merge_caller(&self, entry: &mut LogEntry, caller: CallerInfo) {
        let mut fields = caller.into_fields(self.resolver.config());
        fields.extend(std::mem::take(&mut entry.fields));
        entry.fields = fields;
    }
}

impl<S, N, I> FormatEvent<S, N> for RuntimeFormatter<I>
where
    S: Subscriber + for<'a> LookupSpan<'a>,
    N: for<'a> FormatFields<'a> + 'static,
    I: StackInspector + 'static,
{
    #[inline(never)]
    fn format_event(
        &self,
        _ctx: &FmtContext<'_, S, N>,
        mut writer: Writer<'_>,
        event: &Event<'_>,
    ) -> fmt::Result {
        let mut entry = collect_entry(event);
        let meta = event.metadata();
        let call_site = CallSite {
            module_path: meta.module_path(),
            file: meta.file(),
            line: meta.line(),
        };
        let caller = self.resolver.resolve(!entry.fields.is_empty(), &call_site);
        self.merge_caller(&mut entry, caller);
        self.template.render_into(&mut writer, &entry)
    }
}

/// Build an entry from the event's level, message and fields.
fn collect_entry(event: &Event<'_>) -> LogEntry {
    let mut entry = LogEntry::new(Level::from(*event.metadata().level()), String::new());
    event.record(&mut FieldCollector { entry: &mut entry });

    if let Some(FieldValue::Str(severity)) = entry.fields.remove(SEVERITY_FIELD) {
        if let Ok(level) = severity.parse() {
            entry.level = level;
        }
    }
    entry
}

struct FieldCollector<'a> {
    entry: &'a mut LogEntry,
}

impl FieldCollector<'_> {
    fn insert(&mut self, field: &Field, value: FieldValue) {
        self.entry.fields.insert(field.name().to_string(), value);
    }
}

impl Visit for FieldCollector<'_> {
    fn record_str(&mut self, field: &Field, value: &str) {
        if field.name() == MESSAGE_FIELD {
            self.entry.message = value.to_string();
        } else {
            self.insert(field, FieldValue::Str(value.to_string()));
        }
    }

    fn record_i64(&mut self, field: &Field, value: i64) {
        self.insert(field, FieldValue::I64(value));
    }

    fn record_u64(&mut self, field: &Field, value: u64) {
        self.insert(field, FieldValue::U64(value));
    }

    fn record_f64(&mut self, field: &Field, value: f64) {
        self.insert(field, FieldValue::F64(value));
    }

    fn record_bool(&mut self, field: &Field, value: bool) {
        self.insert(field, FieldValue::Bool(value));
    }

    fn record_debug(&mut self, field: &Field, value: &dyn fmt::Debug) {
        let text = format!("{value:?}");
        if field.name() == MESSAGE_FIELD {
            self.entry.message = text;
        } else {
            self.insert(field, FieldValue::Formatted(text));
        }
    }
}
