//! Navigation Tests
//!
//! Route table, sidebar state and the session gate.

use clinic_core::shell::SIDEBAR_ITEMS;
use clinic_core::Route;

/// Routes reachable from the sidebar, in menu order
pub fn sidebar_routes() -> Vec<Route> {
    SIDEBAR_ITEMS.iter().map(|item| item.route).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use clinic_core::shell::check_access;
    use clinic_core::{Access, MemoryStore, Sidebar};
    use futures::executor::block_on;

    #[test]
    fn test_parse_ignores_decorations() {
        assert_eq!(Route::parse("/patients/"), Route::Patients);
        assert_eq!(Route::parse("/reports?page=2"), Route::Reports);
        assert_eq!(Route::parse("/records#top"), Route::Records);
        assert_eq!(Route::parse(""), Route::Entry);
        assert_eq!(Route::parse("/billing"), Route::NotFound);
    }

    #[test]
    fn test_sidebar_only_links_protected_pages() {
        let routes = sidebar_routes();
        assert_eq!(routes.len(), 6);
        assert!(routes.iter().all(|r| r.is_protected()));
        assert!(!routes.contains(&Route::Entry));
        assert!(!routes.contains(&Route::NotFound));
    }

    #[test]
    fn test_collapse_hides_labels_only() {
        let mut sidebar = Sidebar::new();
        sidebar.toggle_collapsed();
        for item in sidebar.items() {
            assert_eq!(sidebar.label(item), None);
            assert!(!item.icon.is_empty());
        }
        sidebar.toggle_collapsed();
        assert_eq!(sidebar.label(&SIDEBAR_ITEMS[0]), Some("Dashboard"));
    }

    #[test]
    fn test_exactly_one_item_active_per_page() {
        let sidebar = Sidebar::new();
        for route in sidebar_routes() {
            let active = sidebar
                .items()
                .iter()
                .filter(|item| sidebar.is_active(item, route))
                .count();
            assert_eq!(active, 1, "{:?}", route);
        }
    }

    #[test]
    fn test_gate_follows_session() {
        let store = MemoryStore::new();
        assert_eq!(block_on(check_access(&store)), Access::Redirect(Route::Entry));

        let store = MemoryStore::signed_in("staff-1");
        assert!(matches!(block_on(check_access(&store)), Access::Granted(_)));
    }
}
