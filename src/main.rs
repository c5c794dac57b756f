mod app;
mod catalog;
mod util;

use clap::Parser;

use crate::app::GraphFilter;
use crate::util::normalize_tag;

#[derive(Debug, Parser)]
#[command(author, version, about)]
struct Args {
    /// JSON item list with id, title, link and categories per entry.
    #[arg(long, default_value = "categorized.json")]
    data: String,

    /// Minimum number of shared categories for two items to be linked.
    #[arg(long, default_value_t = 1)]
    min_shared: usize,

    /// Restrict the graph to items carrying this category.
    #[arg(long)]
    category: Option<String>,
}

fn main() -> eframe::Result<()> {
    env_logger::init();

    let args = Args::parse();
    let filter = GraphFilter {
        category: args.category.as_deref().and_then(normalize_tag),
        min_shared: args.min_shared.max(1),
    };
    log::info!("starting tagweave with data file {}", args.data);

    let options = eframe::NativeOptions {
        viewport: eframe::egui::ViewportBuilder::default()
            .with_inner_size([1440.0, 920.0])
            .with_min_inner_size([720.0, 480.0]),
        ..Default::default()
    };

    eframe::run_native(
        "tagweave",
        options,
        Box::new(move |cc| {
            Ok(Box::new(app::TagweaveApp::new(
                cc,
                args.data.clone(),
                filter.clone(),
            )))
        }),
    )
}
