use broadside::{
    AssetError, LoadingSequencer, ResourceContext, ResourceKind, free_resources,
    loading::{Headless, SilentProgress},
    teardown::RELEASE_ORDER,
};

use crate::common::test_utils::{Call, RecordingEngine, small_catalog};

mod common;

fn loaded_context(engine: &mut RecordingEngine) -> ResourceContext {
    let catalog = small_catalog();
    let mut ctx = ResourceContext::new();
    LoadingSequencer::new(&catalog)
        .run(engine, &mut Headless::new(), &mut SilentProgress::default(), &mut ctx)
        .unwrap();
    engine.calls.clear();
    ctx
}

fn freed_kind(call: &Call) -> Option<ResourceKind> {
    match call {
        Call::FreeFont(_) => Some(ResourceKind::Font),
        Call::FreeImage(_) => Some(ResourceKind::Image),
        Call::FreeMusic(_) => Some(ResourceKind::Music),
        Call::FreeSound(_) => Some(ResourceKind::Sound),
        _ => None,
    }
}

#[test]
fn frees_fonts_images_music_then_sounds() {
    let mut engine = RecordingEngine::new();
    let mut ctx = loaded_context(&mut engine);

    let report = free_resources(&mut ctx, &mut engine);

    let kinds: Vec<ResourceKind> = engine.calls.iter().filter_map(freed_kind).collect();
    assert_eq!(
        kinds,
        vec![
            ResourceKind::Font,
            ResourceKind::Font,
            ResourceKind::Image,
            ResourceKind::Image,
            ResourceKind::Music,
            ResourceKind::Sound,
        ]
    );
    let order: Vec<ResourceKind> = report.released.iter().map(|(kind, _)| *kind).collect();
    assert_eq!(order, RELEASE_ORDER.to_vec());
    assert_eq!(report.released_of(ResourceKind::Image), 2);
    assert_eq!(report.total(), 6);
}

#[test]
fn events_are_pumped_once_at_the_end() {
    let mut engine = RecordingEngine::new();
    let mut ctx = loaded_context(&mut engine);

    free_resources(&mut ctx, &mut engine);

    assert_eq!(engine.count(|c| *c == Call::Pump), 1);
    assert_eq!(engine.calls.last(), Some(&Call::Pump));
}

#[test]
fn registries_are_empty_afterwards() {
    let mut engine = RecordingEngine::new();
    let mut ctx = loaded_context(&mut engine);

    free_resources(&mut ctx, &mut engine);

    for kind in ResourceKind::ALL {
        assert_eq!(ctx.count(kind), 0);
    }
    assert!(matches!(ctx.font("Title"), Err(AssetError::NotFound { .. })));
    assert!(matches!(ctx.image("Board"), Err(AssetError::NotFound { .. })));
    assert!(matches!(ctx.sound("Hit"), Err(AssetError::NotFound { .. })));
    assert!(matches!(ctx.music("Theme"), Err(AssetError::NotFound { .. })));
    assert_eq!(engine.live_handles(), 0);
    assert_eq!(engine.bad_frees(), 0);
}

#[test]
fn empty_context_only_pumps() {
    let mut engine = RecordingEngine::new();
    let mut ctx = ResourceContext::new();

    let report = free_resources(&mut ctx, &mut engine);

    assert_eq!(report.total(), 0);
    assert_eq!(report.released.len(), 4);
    assert_eq!(engine.calls, vec![Call::Pump]);

    // and again, nothing is freed twice
    free_resources(&mut ctx, &mut engine);
    assert_eq!(engine.count(Call::is_free), 0);
}
