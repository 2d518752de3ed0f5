//! Integration tests for the closable `Panel`.

use harbor_test_utils::{MockDockSurface, SurfaceCall};
use harbor_ui::*;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

fn counting_panel(title: &str, allocator: &IdAllocator) -> (Panel, Arc<AtomicUsize>) {
    let draws = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&draws);
    let panel = Panel::with_allocator(title, allocator).with_content(move |_surface| {
        counter.fetch_add(1, Ordering::Relaxed);
    });
    (panel, draws)
}

#[test]
fn test_panel_draws_inside_dock_region() {
    let allocator = IdAllocator::new(1);
    let mut manager = DockManager::with_allocator(&allocator).with_label("Editor");
    let (panel, draws) = counting_panel("Scene", &allocator);
    manager.add_panel(panel);
    let mut surface = MockDockSurface::new();

    manager.update(&mut surface);

    let calls = surface.calls();
    let region = calls
        .iter()
        .position(|call| *call == SurfaceCall::BeginDockRegion)
        .unwrap();
    assert_eq!(
        calls[region + 1],
        SurfaceCall::BeginPanel {
            key: "Scene###2".to_string(),
            visible: true,
        }
    );
    assert_eq!(calls[region + 2], SurfaceCall::EndPanel);
    assert_eq!(draws.load(Ordering::Relaxed), 1);
    assert!(surface.is_balanced());
}

#[test]
fn test_hidden_panel_skips_content_but_ends() {
    let allocator = IdAllocator::default();
    let (mut panel, draws) = counting_panel("Scene", &allocator);
    let mut surface = MockDockSurface::new();
    surface.set_panels_visible(false);

    panel.update(&mut surface);

    assert_eq!(draws.load(Ordering::Relaxed), 0);
    assert_eq!(surface.count_panel_begins(), 1);
    assert!(surface.is_balanced());
    assert!(!panel.should_be_removed());
}

#[test]
fn test_close_button_retires_panel_same_frame() {
    let allocator = IdAllocator::default();
    let mut manager = DockManager::with_allocator(&allocator);
    let (scene, _) = counting_panel("Scene", &allocator);
    let (inspector, inspector_draws) = counting_panel("Inspector", &allocator);
    let scene_key = scene.surface_key();
    manager.add_panel(scene);
    manager.add_panel(inspector);
    let mut surface = MockDockSurface::new();
    surface.close_panel(scene_key);

    manager.update(&mut surface);
    assert_eq!(manager.controls().len(), 1);
    assert_eq!(
        manager.controls().iter().next().map(|c| c.debug_name()),
        Some("Inspector")
    );

    manager.update(&mut surface);
    assert_eq!(surface.count_panel_begins(), 3);
    assert_eq!(inspector_draws.load(Ordering::Relaxed), 2);
}

#[test]
fn test_closed_panel_makes_no_surface_calls() {
    let mut panel = Panel::new("Log");
    let mut surface = MockDockSurface::new();

    panel.close();
    assert!(!panel.is_open());
    panel.update(&mut surface);

    assert!(panel.should_be_removed());
    assert_eq!(surface.call_count(), 0);
    assert_eq!(panel.title(), "Log");
}
