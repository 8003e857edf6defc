use wasm_bindgen::prelude::*;

mod app;
mod config;
mod game;
mod landing;
mod puzzle_view;
mod transport;
mod utils;

/// Percent-decoded location hash, so `#--topic=Time%20Travel` reads as `--topic=Time Travel`.
fn location_hash() -> String {
    use gloo::utils::window;

    let hash = window()
        .location()
        .hash()
        .unwrap_or_else(|_| "".to_string());
    js_sys::decode_uri_component(&hash)
        .map(String::from)
        .unwrap_or(hash)
}

#[wasm_bindgen(start)]
pub fn run_app() {
    use gloo::utils::document;

    #[cfg(feature = "console_error_panic_hook")]
    {
        console_error_panic_hook::set_once();
    }

    let (args, args_err) = match config::Args::from_location_hash(&location_hash()) {
        Ok(args) => (args, None),
        Err(err) => (config::Args::default(), Some(err)),
    };
    if let Some(log_level) = args.verbose.log_level() {
        if let Err(err) = console_log::init_with_level(log_level) {
            web_sys::console::error_1(&format!("Error initializing logger: {}", err).into());
        }
    }
    if let Some(err) = args_err {
        log::error!("ignoring location hash: {}", err);
    }

    let config = config::ClientConfig::from_args(&args);
    log::debug!("config: {:?}", config);

    let Some(root) = document().get_element_by_id("game") else {
        log::error!("Could not find id=\"game\" element");
        return;
    };

    log::debug!("App started");
    yew::Renderer::<app::App>::with_root_and_props(root, app::AppProps { config }).render();
}
