use clinic_core::shell::SidebarItem;
use clinic_core::{Route, Sidebar};
use leptos::prelude::*;

fn icon(name: &str) -> &'static str {
    match name {
        "layout-dashboard" => "▦",
        "users" => "👥",
        "user-plus" => "➕",
        "calendar" => "📅",
        "file-text" => "📄",
        "activity" => "📈",
        _ => "•",
    }
}

#[component]
pub fn SidebarNav(current: Route) -> impl IntoView {
    let sidebar = RwSignal::new(Sidebar::new());

    let item_view = move |item: SidebarItem| {
        let active = sidebar.with_untracked(|s| s.is_active(&item, current));
        let class = if active {
            "flex items-center gap-3 px-3 py-2 rounded bg-blue-600 text-white"
        } else {
            "flex items-center gap-3 px-3 py-2 rounded text-slate-700 hover:bg-slate-100"
        };
        view! {
            <a href=item.route.path() class=class title=item.title>
                <span class="w-5 text-center">{icon(item.icon)}</span>
                {move || sidebar.with(|s| s.label(&item)).map(|label| view! { <span class="font-medium">{label}</span> })}
            </a>
        }
    };

    view! {
        <aside class=move || {
            if sidebar.with(|s| s.is_collapsed()) {
                "w-16 border-r bg-white p-2 transition-all"
            } else {
                "w-64 border-r bg-white p-4 transition-all"
            }
        }>
            <div class="flex items-center justify-between mb-6">
                <Show when=move || !sidebar.with(|s| s.is_collapsed())>
                    <span class="font-semibold text-lg">"Wellness+"</span>
                </Show>
                <button
                    class="p-1 rounded hover:bg-slate-100"
                    on:click=move |_| sidebar.update(|s| s.toggle_collapsed())
                >
                    "☰"
                </button>
            </div>
            <nav class="space-y-1">
                {sidebar.with_untracked(|s| s.items()).iter().copied().map(item_view).collect_view()}
            </nav>
        </aside>
    }
}
