use serde::{Deserialize, Serialize};

/// Built-in content renderers a dashboard section can wrap.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SectionKind {
    SystemHealth,
    ActivityFeed,
    QuickActions,
}

impl SectionKind {
    pub const ALL: [SectionKind; 3] = [
        SectionKind::SystemHealth,
        SectionKind::ActivityFeed,
        SectionKind::QuickActions,
    ];

    pub fn label(self) -> &'static str {
        match self {
            SectionKind::SystemHealth => "System Health",
            SectionKind::ActivityFeed => "Activity & Alerts",
            SectionKind::QuickActions => "Quick Actions",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            SectionKind::SystemHealth => "CPU, memory, disk & uptime metrics",
            SectionKind::ActivityFeed => "Recent activity log and security alerts",
            SectionKind::QuickActions => "Admin shortcuts for common tasks",
        }
    }

    pub fn default_title(self) -> &'static str {
        self.label()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DashboardSection {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: SectionKind,
    pub title: String,
    #[serde(default)]
    pub collapsed: bool,
    #[serde(default)]
    pub order: i64,
}

super::ordered_item!(DashboardSection);

impl DashboardSection {
    pub fn new(kind: SectionKind) -> Self {
        Self {
            id: String::new(),
            kind,
            title: kind.default_title().to_string(),
            collapsed: false,
            order: 0,
        }
    }
}

pub fn default_sections() -> Vec<DashboardSection> {
    [
        ("w-health", SectionKind::SystemHealth),
        ("w-activity", SectionKind::ActivityFeed),
        ("w-actions", SectionKind::QuickActions),
    ]
    .into_iter()
    .enumerate()
    .map(|(i, (id, kind))| DashboardSection {
        id: id.to_string(),
        order: i as i64,
        ..DashboardSection::new(kind)
    })
    .collect()
}

/// Section kinds not yet present on the dashboard.
pub fn available_section_kinds(sections: &[DashboardSection]) -> Vec<SectionKind> {
    SectionKind::ALL
        .into_iter()
        .filter(|kind| !sections.iter().any(|s| s.kind == *kind))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_missing_kinds_are_offered() {
        let mut sections = default_sections();
        assert!(available_section_kinds(&sections).is_empty());
        sections.retain(|s| s.kind != SectionKind::ActivityFeed);
        assert_eq!(
            available_section_kinds(&sections),
            vec![SectionKind::ActivityFeed]
        );
    }

    #[test]
    fn kind_serializes_as_type() {
        let json = serde_json::to_value(DashboardSection::new(SectionKind::QuickActions)).unwrap();
        assert_eq!(json["type"], "quick-actions");
        assert_eq!(json["title"], "Quick Actions");
    }
}
