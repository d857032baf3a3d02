//! Runs the loading screen on the software backend and saves the first menu
//! frame to `menu.png`.
//!
//! Usage: `loading-screen [ASSET_ROOT]`. The root needs `boot.ron`,
//! `manifest.ron` and the `fonts/`, `images/` and `sounds/` directories they
//! name. The repository's `assets/` only ships the two `.ron` files, so pass a
//! root that also holds the game's media.

use std::path::PathBuf;

use anyhow::Context as _;
use broadside::{
    BootConfig, Catalog, Engine, boot, engine::software::SoftwareEngine, free_resources,
};

fn main() -> anyhow::Result<()> {
    let root = std::env::args()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(concat!(env!("CARGO_MANIFEST_DIR"), "/../../assets")));

    let (config, err) = BootConfig::load_or_default(root.join("boot.ron"));
    let catalog = Catalog::load(root.join("manifest.ron")).context("read asset manifest")?;

    let mut engine = SoftwareEngine::new(&root, 1024, 768);
    let booted = boot::run(&mut engine, &config, &catalog);
    // the logger exists once boot::run has installed it
    if let Some(err) = err {
        log::warn!("using default boot settings: {err}");
    }
    let mut ctx = booted?;

    // draw the main menu once, as the game would on its first frame
    let menu = ctx.image("Menu")?;
    engine.draw_image(menu, Default::default());
    engine.refresh_screen();
    engine.save_frame("menu.png")?;
    log::info!("first frame written to menu.png");

    let report = free_resources(&mut ctx, &mut engine);
    log::info!("{} asset(s) released", report.total());
    Ok(())
}
