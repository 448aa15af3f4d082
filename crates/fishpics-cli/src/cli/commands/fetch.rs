//! `fishpics fetch` – walk the family index pages and download photos.

use anyhow::Result;
use fishpics_core::config::FetchConfig;
use fishpics_core::pipeline::{self, FetchEvent};
use std::io::Write;

/// One console line per family, one `*` per downloaded image.
pub fn run_fetch(cfg: &FetchConfig) -> Result<()> {
    let report = pipeline::fetch_all(cfg, |event| match event {
        FetchEvent::FamilyListed { code, .. } => {
            print!("{}: ", code.query_value());
            let _ = std::io::stdout().flush();
        }
        FetchEvent::ImageFetched { .. } => {
            print!("*");
            let _ = std::io::stdout().flush();
        }
        FetchEvent::FamilyDone { .. } => println!(),
    })?;

    if report.images == 0 {
        println!("No images found in {} family page(s).", report.families);
    } else {
        println!(
            "Fetched {} image(s) across {} family page(s) into {}.",
            report.images,
            report.families,
            cfg.output_dir.display()
        );
    }
    Ok(())
}
