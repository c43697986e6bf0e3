//! Presentation shell state: routes, sidebar and the session gate.

use tracing::{debug, error};

use crate::store::{RemoteStore, Session};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Route {
    /// Landing and sign-in page
    Entry,
    Dashboard,
    Patients,
    Appointments,
    Records,
    Register,
    Reports,
    NotFound,
}

impl Route {
    pub const ALL: [Route; 8] = [
        Route::Entry,
        Route::Dashboard,
        Route::Patients,
        Route::Appointments,
        Route::Records,
        Route::Register,
        Route::Reports,
        Route::NotFound,
    ];

    /// Resolve a location path; query string, fragment and a trailing slash are ignored
    pub fn parse(path: &str) -> Route {
        let path = path.split(['?', '#']).next().unwrap_or("");
        let path = match path.trim_end_matches('/') {
            "" => "/",
            trimmed => trimmed,
        };
        match path {
            "/" => Route::Entry,
            "/dashboard" => Route::Dashboard,
            "/patients" => Route::Patients,
            "/appointments" => Route::Appointments,
            "/records" => Route::Records,
            "/register" => Route::Register,
            "/reports" => Route::Reports,
            _ => Route::NotFound,
        }
    }

    pub fn path(self) -> &'static str {
        match self {
            Route::Entry => "/",
            Route::Dashboard => "/dashboard",
            Route::Patients => "/patients",
            Route::Appointments => "/appointments",
            Route::Records => "/records",
            Route::Register => "/register",
            Route::Reports => "/reports",
            Route::NotFound => "/404",
        }
    }

    /// Every route except entry and not-found needs a session
    pub fn is_protected(self) -> bool {
        !matches!(self, Route::Entry | Route::NotFound)
    }

    pub fn title(self) -> &'static str {
        match self {
            Route::Entry => "Wellness+",
            Route::Dashboard => "Dashboard",
            Route::Patients => "Patient Management",
            Route::Appointments => "Appointment Management",
            Route::Records => "Medical Records",
            Route::Register => "Patient Registration",
            Route::Reports => "Reports & Analytics",
            Route::NotFound => "Page not found",
        }
    }

    pub fn subtitle(self) -> &'static str {
        match self {
            Route::Entry => "Patient management for modern clinics",
            Route::Dashboard => "Today's clinic activity at a glance",
            Route::Patients => "Manage and view patient records and information",
            Route::Appointments => "Schedule, manage and track patient appointments",
            Route::Records => "Access and manage patient medical records and documents",
            Route::Register => "Register a new patient in six steps",
            Route::Reports => "Generate, view and download medical reports and analytics",
            Route::NotFound => "The page you are looking for does not exist",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SidebarItem {
    pub title: &'static str,
    pub route: Route,
    /// Icon name, rendered even when the sidebar is collapsed
    pub icon: &'static str,
}

pub const SIDEBAR_ITEMS: [SidebarItem; 6] = [
    SidebarItem { title: "Dashboard", route: Route::Dashboard, icon: "layout-dashboard" },
    SidebarItem { title: "Patients", route: Route::Patients, icon: "users" },
    SidebarItem { title: "Patient Registration", route: Route::Register, icon: "user-plus" },
    SidebarItem { title: "Appointments", route: Route::Appointments, icon: "calendar" },
    SidebarItem { title: "Medical Records", route: Route::Records, icon: "file-text" },
    SidebarItem { title: "Reports", route: Route::Reports, icon: "activity" },
];

/// Local sidebar state
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Sidebar {
    collapsed: bool,
}

impl Sidebar {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn items(&self) -> &'static [SidebarItem] {
        &SIDEBAR_ITEMS
    }

    pub fn is_collapsed(&self) -> bool {
        self.collapsed
    }

    /// Hide or show the labels; icons stay visible
    pub fn toggle_collapsed(&mut self) {
        self.collapsed = !self.collapsed;
    }

    pub fn is_active(&self, item: &SidebarItem, current: Route) -> bool {
        item.route == current
    }

    /// Label to render for `item`, `None` while collapsed
    pub fn label(&self, item: &SidebarItem) -> Option<&'static str> {
        if self.collapsed {
            None
        } else {
            Some(item.title)
        }
    }
}

/// What the protected-route gate renders
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Access {
    /// Session check still running
    Pending,
    Granted(Session),
    Redirect(Route),
}

/// Ask the store for a session; no session or a failed check sends the user to entry
pub async fn check_access(store: &dyn RemoteStore) -> Access {
    match store.current_session().await {
        Ok(Some(session)) => {
            debug!(user = %session.user_id, "session active");
            Access::Granted(session)
        }
        Ok(None) => Access::Redirect(Route::Entry),
        Err(err) => {
            error!(error = %err, "session check failed");
            Access::Redirect(Route::Entry)
        }
    }
}
