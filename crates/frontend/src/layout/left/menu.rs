//! Static navigation tree of the sidebar.

#[derive(Debug, Clone, Copy)]
pub struct MenuEntry {
    pub id: &'static str,
    pub label: &'static str,
    pub icon: &'static str,
    pub link: Option<&'static str>,
    pub children: &'static [MenuEntry],
}

impl MenuEntry {
    const fn link(id: &'static str, label: &'static str, link: &'static str) -> Self {
        Self {
            id,
            label,
            icon: "",
            link: Some(link),
            children: &[],
        }
    }

    pub fn has_children(&self) -> bool {
        !self.children.is_empty()
    }

    /// The entry, or any entry below it, links to `path`.
    pub fn is_active(&self, path: &str) -> bool {
        self.link.map(|link| link == path).unwrap_or(false)
            || self.children.iter().any(|child| child.is_active(path))
    }
}

const CRM_CHILDREN: &[MenuEntry] = &[
    MenuEntry::link("crm-leads", "Leads", "/crm"),
    MenuEntry::link("crm-deals", "Deals", "/crm/deals"),
];

const HOSPITAL_CHILDREN: &[MenuEntry] = &[
    MenuEntry::link("hospital-patients", "Patients", "/hospital"),
    MenuEntry::link("hospital-doctors", "Doctors", "/hospital/doctors"),
];

const APPS_CHILDREN: &[MenuEntry] = &[
    MenuEntry {
        id: "crm",
        label: "CRM",
        icon: "users",
        link: None,
        children: CRM_CHILDREN,
    },
    MenuEntry {
        id: "hospital",
        label: "Hospital",
        icon: "users",
        link: None,
        children: HOSPITAL_CHILDREN,
    },
    MenuEntry::link("events", "Events", "/events"),
    MenuEntry::link("ecommerce", "E-commerce", "/ecommerce"),
];

pub const MENU: &[MenuEntry] = &[
    MenuEntry {
        id: "dashboard",
        label: "Dashboard",
        icon: "dashboard",
        link: Some("/"),
        children: &[],
    },
    MenuEntry {
        id: "apps",
        label: "Apps",
        icon: "apps",
        link: None,
        children: APPS_CHILDREN,
    },
    MenuEntry {
        id: "calendar",
        label: "Calendar",
        icon: "calendar",
        link: Some("/events"),
        children: &[],
    },
];

#[cfg(test)]
mod tests {
    use super::*;

    fn find(id: &str) -> &'static MenuEntry {
        MENU.iter().find(|e| e.id == id).unwrap()
    }

    #[test]
    fn group_is_active_for_nested_links() {
        let apps = find("apps");
        assert!(apps.is_active("/crm/deals"));
        assert!(apps.is_active("/hospital"));
        assert!(!apps.is_active("/"));
    }

    #[test]
    fn leaf_matches_exact_path_only() {
        let dashboard = find("dashboard");
        assert!(dashboard.is_active("/"));
        assert!(!dashboard.is_active("/crm"));
        assert!(!dashboard.has_children());
    }

    #[test]
    fn menu_ids_are_unique() {
        fn collect(entries: &[MenuEntry], out: &mut Vec<&'static str>) {
            for entry in entries {
                out.push(entry.id);
                collect(entry.children, out);
            }
        }
        let mut ids = Vec::new();
        collect(MENU, &mut ids);
        let total = ids.len();
        ids.sort_unstable();
        ids.dedup();
        assert_eq!(ids.len(), total);
    }
}
