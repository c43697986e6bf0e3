//! Clinic Portal - browser dashboard over the clinic core.

mod app;
mod components;
mod download;
mod logging;

fn main() {
    console_error_panic_hook::set_once();
    logging::init();
    leptos::mount::mount_to_body(app::App);
}
