//! Voter Central Frontend
//!
//! Runs inside each page of the site. The page is picked from the
//! location's file name, its flow runs against the backend on the same
//! origin, and the rendered containers replace the contents of the page
//! elements with matching ids.
//!
//! The polling location page also reruns its lookup on every submit of
//! the address form, and the directory page reloads when its state
//! filter changes.

use voter_central::config::RenderConfig;
use voter_central::pages::{
    load_page, load_polling_location, refilter_directory_query, Page, PageOutcome,
};
use voter_central::query::PollingQuery;
use voter_central::render::ids;
use voter_central::BackendClient;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::spawn_local;
use web_sys::{Document, Event, HtmlFormElement, HtmlInputElement, HtmlSelectElement};

mod dom;
mod fetch;

use fetch::{backend_base, BrowserFetcher};

fn main() {
    // Set up panic hook for better error messages in WASM
    console_error_panic_hook::set_once();

    if let Err(e) = start() {
        web_sys::console::error_1(&e);
    }
}

fn start() -> Result<(), JsValue> {
    let window = web_sys::window().ok_or("no window")?;
    let document = window.document().ok_or("no document")?;
    let location = window.location();

    let path = location.pathname()?;
    let Some(page) = Page::from_path(&path) else {
        web_sys::console::log_1(&format!("{} is not a Voter Central page", path).into());
        return Ok(());
    };

    let search = location.search()?;
    let query = search.trim_start_matches('?').to_string();

    match page {
        Page::PollingLocation => {
            attach_polling_form(&document)?;
            // Only look up on arrival when the link carried an address
            if PollingQuery::parse(&query).is_ok() {
                spawn_local(run_page(document, page, query));
            }
        }
        Page::Directory => {
            attach_state_filter(&document, &query)?;
            spawn_local(run_page(document, page, query));
        }
        Page::Candidate => spawn_local(run_page(document, page, query)),
    }
    Ok(())
}

async fn run_page(document: Document, page: Page, query: String) {
    let client = BackendClient::new(backend_base(), BrowserFetcher);
    let config = RenderConfig::default();
    let mut shell = page.shell();

    let outcome = load_page(page, &client, &config, &query, &mut shell).await;
    finish(&document, page, outcome, &shell);
}

fn attach_polling_form(document: &Document) -> Result<(), JsValue> {
    let Some(form) = document.get_element_by_id(ids::POLLING_LOCATION_INPUT) else {
        web_sys::console::warn_1(&format!("No form #{}", ids::POLLING_LOCATION_INPUT).into());
        return Ok(());
    };
    let form: HtmlFormElement = form.dyn_into()?;

    let document = document.clone();
    let on_submit = Closure::wrap(Box::new(move |event: Event| {
        event.prevent_default();

        let address = address_input(&document).map(|input| input.value()).unwrap_or_default();
        let document = document.clone();
        spawn_local(async move {
            let client = BackendClient::new(backend_base(), BrowserFetcher);
            let mut shell = Page::PollingLocation.shell();
            let outcome = load_polling_location(&client, &address, &mut shell).await;
            finish(&document, Page::PollingLocation, outcome, &shell);
        });
    }) as Box<dyn FnMut(Event)>);
    form.add_event_listener_with_callback("submit", on_submit.as_ref().unchecked_ref())?;
    on_submit.forget();

    Ok(())
}

/// Reload the directory whenever the state dropdown changes.
///
/// The dropdown is re-rendered on every load, so the listener sits on its
/// container and picks up `change` events bubbling from the `select`.
fn attach_state_filter(document: &Document, page_query: &str) -> Result<(), JsValue> {
    let Some(container) = document.get_element_by_id(ids::STATE_FILTER) else {
        return Ok(());
    };

    let document = document.clone();
    let page_query = page_query.to_string();
    let on_change = Closure::wrap(Box::new(move |event: Event| {
        let Some(select) = event
            .target()
            .and_then(|target| target.dyn_into::<HtmlSelectElement>().ok())
        else {
            return;
        };

        let query = match refilter_directory_query(&page_query, &select.value()) {
            Ok(query) => query,
            Err(e) => {
                web_sys::console::warn_1(&format!("Ignoring state filter: {}", e).into());
                return;
            }
        };
        spawn_local(run_page(document.clone(), Page::Directory, query));
    }) as Box<dyn FnMut(Event)>);
    container.add_event_listener_with_callback("change", on_change.as_ref().unchecked_ref())?;
    on_change.forget();

    Ok(())
}

/// First input of the address form
fn address_input(document: &Document) -> Option<HtmlInputElement> {
    document
        .get_element_by_id(ids::POLLING_LOCATION_INPUT)?
        .query_selector("input")
        .ok()??
        .dyn_into()
        .ok()
}

fn finish(
    document: &Document,
    page: Page,
    outcome: PageOutcome,
    shell: &voter_central::PageShell,
) {
    if let Err(e) = dom::apply_shell(document, shell) {
        web_sys::console::error_1(&e);
    }
    if let PageOutcome::Failed(failure) = outcome {
        web_sys::console::error_1(&format!("{} page failed: {}", page.name(), failure).into());
    }
}
