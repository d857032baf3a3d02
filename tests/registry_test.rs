use std::path::Path;

use broadside::{
    AssetError, Engine, ImageHandle, ResourceContext, ResourceKind, ResourceRegistry, free_resources,
};

use crate::common::test_utils::{Call, RecordingEngine};

mod common;

fn load_images(engine: &mut RecordingEngine, n: usize) -> Vec<ImageHandle> {
    (0..n)
        .map(|i| {
            engine
                .load_image(Path::new(&format!("images/{i}.png")), None)
                .unwrap()
        })
        .collect()
}

#[test]
fn lookup_returns_the_registered_handle() {
    let mut engine = RecordingEngine::new();
    let handles = load_images(&mut engine, 2);
    let mut registry = ResourceRegistry::new();
    registry.register("Menu", handles[0]).unwrap();
    registry.register("Deploy", handles[1]).unwrap();

    assert_eq!(registry.lookup("Menu").unwrap(), handles[0]);
    assert_eq!(registry.lookup("Menu").unwrap(), handles[0]);
    assert_eq!(registry.lookup("Deploy").unwrap(), handles[1]);
    assert_eq!(registry.len(), 2);

    registry.release_all(&mut engine);
}

#[test]
fn duplicate_name_keeps_the_first_handle() {
    let mut engine = RecordingEngine::new();
    let handles = load_images(&mut engine, 2);
    let mut registry = ResourceRegistry::new();
    registry.register("Menu", handles[0]).unwrap();

    let err = registry.register("Menu", handles[1]).unwrap_err();
    assert!(matches!(
        err,
        AssetError::DuplicateKey { kind: ResourceKind::Image, ref name } if name == "Menu"
    ));
    assert_eq!(registry.lookup("Menu").unwrap(), handles[0]);
    assert_eq!(registry.len(), 1);

    // the rejected handle still belongs to the caller
    engine.free_image(handles[1]);
    registry.release_all(&mut engine);
    assert_eq!(engine.bad_frees(), 0);
}

#[test]
fn unknown_name_is_not_found() {
    let registry: ResourceRegistry<ImageHandle> = ResourceRegistry::new();
    let err = registry.lookup("Nope").unwrap_err();
    assert!(matches!(err, AssetError::NotFound { kind: ResourceKind::Image, .. }));
    assert_eq!(err.to_string(), "image `Nope` is not registered");
}

#[test]
fn names_are_case_sensitive() {
    let mut engine = RecordingEngine::new();
    let handles = load_images(&mut engine, 1);
    let mut registry = ResourceRegistry::new();
    registry.register("Menu", handles[0]).unwrap();
    assert!(registry.lookup("menu").is_err());
    assert!(registry.contains("Menu"));
    registry.release_all(&mut engine);
}

#[test]
fn same_name_in_two_kinds_is_independent() {
    let mut engine = RecordingEngine::new();
    let mut ctx = ResourceContext::new();
    let font = engine.load_font(Path::new("fonts/ffaccess.ttf"), 9).unwrap();
    let image = engine.load_image(Path::new("images/main_menu.jpg"), None).unwrap();
    ctx.fonts.register("Menu", font).unwrap();
    ctx.images.register("Menu", image).unwrap();

    assert_eq!(ctx.font("Menu").unwrap(), font);
    assert_eq!(ctx.image("Menu").unwrap(), image);
    assert_eq!(ctx.total(), 2);

    free_resources(&mut ctx, &mut engine);
}

#[test]
fn release_all_frees_every_handle_once() {
    let mut engine = RecordingEngine::new();
    let handles = load_images(&mut engine, 3);
    let mut registry = ResourceRegistry::new();
    for (i, handle) in handles.iter().enumerate() {
        registry.register(format!("img{i}"), *handle).unwrap();
    }

    assert_eq!(registry.release_all(&mut engine), 3);
    assert!(registry.is_empty());
    assert_eq!(engine.live_handles(), 0);
    assert_eq!(engine.bad_frees(), 0);
    for handle in &handles {
        assert_eq!(engine.count(|c| *c == Call::FreeImage(*handle)), 1);
    }
    assert!(registry.lookup("img0").is_err());

    // a second release has nothing left to free
    let frees = engine.count(Call::is_free);
    assert_eq!(registry.release_all(&mut engine), 0);
    assert_eq!(engine.count(Call::is_free), frees);
}
