use punchclock_ui::bootstrap;

fn main() {
    // Set up panic hook for better error messages in WASM
    console_error_panic_hook::set_once();

    if let Err(e) = bootstrap::init_logging() {
        web_sys::console::error_1(&format!("Logging unavailable: {}", e).into());
    }

    if let Err(e) = bootstrap::run() {
        log::error!("Startup failed: {}", e);
        wasm_bindgen::throw_str(&e.to_string());
    }
}
