use dioxus_logger::tracing::{info, Level};

use quiz_funnel_editor::App;

fn main() {
    dioxus_logger::init(Level::INFO).ok();
    info!("Starting quiz funnel editor");
    dioxus::launch(App);
}
