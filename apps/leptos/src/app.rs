use std::rc::Rc;

use clinic_core::config::{ENV_ACCESS_TOKEN, ENV_ANON_KEY, ENV_URL};
use clinic_core::shell::{self, Access};
use clinic_core::{ConfigError, RemoteStore, RestStore, Route as Page, StoreConfig};
use leptos::prelude::*;
use leptos_meta::{provide_meta_context, Title};
use leptos_router::components::{Redirect, Route, Router, Routes};
use leptos_router::path;

use crate::components::appointments::AppointmentsPage;
use crate::components::common::{Loading, PageHeader};
use crate::components::dashboard::DashboardPage;
use crate::components::entry::{EntryPage, NotFound};
use crate::components::patients::PatientsPage;
use crate::components::records::RecordsPage;
use crate::components::registration::RegistrationPage;
use crate::components::reports::ReportsPage;
use crate::components::sidebar::SidebarNav;
use crate::components::toast::{ToastCenter, ToastHost};

/// Handle to the remote store, shared through context
#[derive(Clone, Copy)]
pub struct AppStore(StoredValue<Rc<dyn RemoteStore>, LocalStorage>);

impl AppStore {
    pub fn get(&self) -> Rc<dyn RemoteStore> {
        self.0.get_value()
    }
}

pub fn use_store() -> AppStore {
    expect_context::<AppStore>()
}

/// Connection settings baked in at build time
fn compiled_config() -> Result<StoreConfig, ConfigError> {
    StoreConfig::from_lookup(|key| {
        let value = match key {
            ENV_URL => option_env!("CLINIC_SUPABASE_URL"),
            ENV_ANON_KEY => option_env!("CLINIC_SUPABASE_ANON_KEY"),
            ENV_ACCESS_TOKEN => option_env!("CLINIC_ACCESS_TOKEN"),
            _ => None,
        };
        value.map(str::to_string)
    })
}

#[component]
pub fn App() -> impl IntoView {
    provide_meta_context();
    provide_context(ToastCenter::new());

    let store = match compiled_config().and_then(RestStore::new) {
        Ok(store) => store,
        Err(err) => {
            tracing::error!(error = %err, "portal is not configured");
            return view! { <ConfigProblem message=err.to_string()/> }.into_any();
        }
    };
    let store: Rc<dyn RemoteStore> = Rc::new(store);
    provide_context(AppStore(StoredValue::new_local(store)));

    view! {
        <Router>
            <Routes fallback=|| view! { <NotFound/> }>
                <Route path=path!("/") view=EntryPage/>
                <Route path=path!("/dashboard") view=|| view! { <Protected page=Page::Dashboard><DashboardPage/></Protected> }/>
                <Route path=path!("/patients") view=|| view! { <Protected page=Page::Patients><PatientsPage/></Protected> }/>
                <Route path=path!("/appointments") view=|| view! { <Protected page=Page::Appointments><AppointmentsPage/></Protected> }/>
                <Route path=path!("/records") view=|| view! { <Protected page=Page::Records><RecordsPage/></Protected> }/>
                <Route path=path!("/register") view=|| view! { <Protected page=Page::Register><RegistrationPage/></Protected> }/>
                <Route path=path!("/reports") view=|| view! { <Protected page=Page::Reports><ReportsPage/></Protected> }/>
            </Routes>
        </Router>
        <ToastHost/>
    }
    .into_any()
}

/// Session gate: renders the page only when the store reports a session
#[component]
fn Protected(page: Page, children: ChildrenFn) -> impl IntoView {
    let store = use_store();
    let access = LocalResource::new(move || {
        let store = store.get();
        async move { shell::check_access(&*store).await }
    });

    move || match access.get() {
        None | Some(Access::Pending) => view! { <Loading label="Checking session..."/> }.into_any(),
        Some(Access::Redirect(route)) => view! { <Redirect path=route.path()/> }.into_any(),
        Some(Access::Granted(_)) => view! {
            <Title text=page.title()/>
            <div class="flex min-h-screen bg-slate-50">
                <SidebarNav current=page/>
                <main class="flex-1 p-6">
                    <PageHeader page=page/>
                    {children()}
                </main>
            </div>
        }
        .into_any(),
    }
}

#[component]
fn ConfigProblem(message: String) -> impl IntoView {
    view! {
        <div class="max-w-xl mx-auto mt-24 p-6 border rounded-lg bg-white">
            <h1 class="text-xl font-semibold mb-2">"Portal not configured"</h1>
            <p class="text-slate-600 mb-4">{message}</p>
            <p class="text-sm text-slate-500">
                "Set CLINIC_SUPABASE_URL and CLINIC_SUPABASE_ANON_KEY when building."
            </p>
        </div>
    }
}
