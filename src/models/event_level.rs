use serde::Serialize;

/// Whether an event gets a full card or a compact marker on the timeline.
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq, Default)]
pub enum EventLevel {
    #[default]
    Primary,
    Minor,
}

impl EventLevel {
    /// Parse the dataset's `EventLevel` tag. Anything unrecognized is primary.
    pub fn from_tag(tag: Option<&str>) -> Self {
        match tag.map(|t| t.trim().to_lowercase()).as_deref() {
            Some("level2") | Some("minor") | Some("secondary") => EventLevel::Minor,
            _ => EventLevel::Primary,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            EventLevel::Primary => "primary",
            EventLevel::Minor => "level2",
        }
    }

    pub fn is_minor(&self) -> bool {
        matches!(self, EventLevel::Minor)
    }
}
