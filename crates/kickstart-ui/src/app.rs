//! Main application component.

use std::cell::RefCell;
use std::rc::Rc;

use kickstart_core::storage::memory::MemoryStorage;
use kickstart_core::{
    Dom, IconSet, PageConfig, PageController, StepCard, StorageMedium, run_examples,
};
use leptos::prelude::*;
use tracing::{debug, error, info, warn};
use wasm_bindgen::JsValue;

use crate::error::{WebError, js_error_message};
use crate::theme::generate_css_variables;
use crate::web_dom::WebDom;
use crate::web_storage::LocalStorage;

/// Global the host page may set to override the page configuration.
pub const CONFIG_GLOBAL: &str = "KICKSTART_CONFIG";

type Controller = PageController<WebDom, Rc<dyn StorageMedium>>;

thread_local! {
    static PAGE: RefCell<Option<Controller>> = const { RefCell::new(None) };
}

/// Main application component.
#[component]
pub fn App() -> impl IntoView {
    let css_vars = generate_css_variables();
    let config = load_config();
    let steps = config.steps.clone();

    // Wire behavior once the markup is in the document.
    Effect::new(move |started: Option<bool>| {
        if started == Some(true) {
            return true;
        }
        match start_page(config.clone()) {
            Ok(()) => true,
            Err(e) => {
                error!(error = %e, "Failed to initialize page");
                false
            }
        }
    });

    on_cleanup(|| {
        PAGE.with(|page| {
            if let Some(mut controller) = page.borrow_mut().take()
                && let Err(e) = controller.destroy()
            {
                warn!(error = %e, "Failed to tear down page");
            }
        });
    });

    view! {
        <style>{css_vars}</style>
        <style>{include_str!("../styles/main.css")}</style>
        <header>
            <div id="main-nav"></div>
        </header>
        <section class="jumbotron">
            <h1>"Kickstart"</h1>
            <p class="lead">"Everything you need to start a new project, in three steps."</p>
            <a class="btn btn-primary" href="#main">"Get Started"</a>
        </section>
        <main id="main">
            <div class="steps">
                {steps.into_iter().map(step_card).collect_view()}
            </div>
        </main>
        <footer>
            <p>"Built with Kickstart"</p>
        </footer>
    }
}

fn step_card(step: StepCard) -> impl IntoView {
    view! {
        <div class="step-card">
            <div class="step-icon"></div>
            <h3>{format!("Step {}", step.number)}</h3>
            <p>{step.description}</p>
        </div>
    }
}

/// Read `window.KICKSTART_CONFIG`, falling back to the stock page.
fn load_config() -> PageConfig {
    let Some(window) = web_sys::window() else {
        return PageConfig::default();
    };
    let value = match js_sys::Reflect::get(&window, &JsValue::from_str(CONFIG_GLOBAL)) {
        Ok(value) if !value.is_undefined() && !value.is_null() => value,
        Ok(_) => return PageConfig::default(),
        Err(e) => {
            warn!(error = %js_error_message(&e), "Could not read page configuration");
            return PageConfig::default();
        }
    };
    match serde_wasm_bindgen::from_value::<PageConfig>(value) {
        Ok(config) => match config.validate() {
            Ok(()) => {
                info!("Using page configuration from {CONFIG_GLOBAL}");
                config
            }
            Err(e) => {
                warn!(error = %e, "Invalid page configuration, using defaults");
                PageConfig::default()
            }
        },
        Err(e) => {
            warn!(error = %e, "Malformed page configuration, using defaults");
            PageConfig::default()
        }
    }
}

fn open_storage() -> Rc<dyn StorageMedium> {
    match LocalStorage::open() {
        Ok(storage) => Rc::new(storage),
        Err(e) => {
            warn!(error = %e, "Preferences will not persist");
            Rc::new(MemoryStorage::new())
        }
    }
}

fn start_page(config: PageConfig) -> Result<(), WebError> {
    let dom = WebDom::new()?;
    let root = dom.root();
    let controller = PageController::initialize(
        dom.clone(),
        open_storage(),
        IconSet::builtin(),
        &root,
        config,
    )?;

    let report = run_examples(&dom, controller.store()?, &root, &chrono::Local::now());
    debug!(
        step_cards = report.step_cards,
        keys = ?report.keys,
        "Walkthrough finished"
    );

    PAGE.with(|page| {
        if let Some(mut previous) = page.borrow_mut().replace(controller)
            && let Err(e) = previous.destroy()
        {
            warn!(error = %e, "Failed to tear down previous page");
        }
    });
    Ok(())
}
