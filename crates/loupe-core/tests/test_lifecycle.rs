mod common;

use approx::assert_relative_eq;

use common::{client, empty_page, fixed_width_options, page_with_image, IMAGE_URL};
use loupe_core::config::{Offset, ZoomOptions, ZoomPosition};
use loupe_core::controller::{ImageZoom, LifecycleState};
use loupe_core::error::LoupeError;
use loupe_core::geometry::{Point, Size};
use loupe_core::headless::{Background, HeadlessSurface};
use loupe_core::style::Visibility;
use loupe_core::surface::{ElementId, EventKind, EventTarget, Surface, ZoomEvent};

const NATURAL: Size = Size {
    width: 800.0,
    height: 500.0,
};

fn armed_fixed_width() -> ImageZoom<HeadlessSurface> {
    let page = page_with_image(Some(NATURAL));
    ImageZoom::attach(page.surface, page.container, fixed_width_options()).unwrap()
}

// ---------------------------------------------------------------------------
// Setup
// ---------------------------------------------------------------------------

#[test]
fn test_setup_with_loaded_image_resolves_geometry() {
    let zoom = armed_fixed_width();
    let info = zoom.instance_info();

    assert_eq!(info.state, LifecycleState::Armed);
    assert!(info.is_loaded());
    let scale = info.scale().unwrap();
    assert_relative_eq!(scale.x, 2.0);
    assert_relative_eq!(scale.y, 2.0);
    assert_eq!(info.lens_size(), Some(Size::new(250.0, 125.0)));
    assert_eq!(info.magnified_size(), Some(Size::new(500.0, 250.0)));
    assert_eq!(info.source_origin, Some(client(0.0, 0.0)));
    assert_eq!(info.subscriptions, 7);
    assert_eq!(zoom.surface().created_count(), 2);
}

#[test]
fn test_setup_registers_expected_interest() {
    let zoom = armed_fixed_width();
    let info = zoom.instance_info();
    let surface = zoom.surface();
    let container = EventTarget::Element(zoom.container());
    let lens = EventTarget::Element(info.lens.unwrap());
    let source = EventTarget::Element(info.source.unwrap());

    assert!(surface.is_subscribed(container, EventKind::PointerMove));
    assert!(surface.is_subscribed(container, EventKind::PointerEnter));
    assert!(surface.is_subscribed(container, EventKind::PointerLeave));
    assert!(surface.is_subscribed(lens, EventKind::PointerEnter));
    assert!(surface.is_subscribed(lens, EventKind::PointerLeave));
    assert!(surface.is_subscribed(EventTarget::Window, EventKind::Scroll));
    assert!(surface.is_subscribed(source, EventKind::ImageLoaded));
    assert_eq!(surface.subscription_count(), 7);
}

#[test]
fn test_setup_places_view_right_of_source_with_offset() {
    let page = page_with_image(Some(NATURAL));
    let options = ZoomOptions {
        offset: Offset {
            vertical: 0.0,
            horizontal: 10.0,
        },
        ..fixed_width_options()
    };
    let zoom = ImageZoom::attach(page.surface, page.container, options).unwrap();
    let magnified = zoom.instance_info().magnified.unwrap();
    let record = zoom.surface().element(magnified).unwrap();

    assert_eq!(record.position, Point::new(410.0, 0.0));
    assert_eq!(record.width, Some(500.0));
    assert_eq!(record.height, Some(250.0));
    assert_eq!(record.visibility, Visibility::Hidden);
}

#[test]
fn test_setup_applies_styles_and_background() {
    let page = page_with_image(Some(NATURAL));
    let options = ZoomOptions {
        zoom_style: Some("opacity:0.1;".into()),
        zoom_lens_style: Some("opacity: 0.6;background-color: red;".into()),
        ..fixed_width_options()
    };
    let zoom = ImageZoom::attach(page.surface, page.container, options).unwrap();
    let info = zoom.instance_info();
    let lens = zoom.surface().element(info.lens.unwrap()).unwrap();
    let view = zoom.surface().element(info.magnified.unwrap()).unwrap();

    assert_eq!(lens.style.get("position"), Some("absolute"));
    assert_eq!(lens.style.get_f64("opacity"), Some(0.6));
    assert_eq!(lens.style.get("background-color"), Some("red"));
    assert_eq!(view.style.get_f64("opacity"), Some(0.1));
    assert_eq!(view.style.get("background-repeat"), Some("no-repeat"));
    assert_eq!(
        view.background,
        Some(Background {
            url: IMAGE_URL.to_string(),
            size: NATURAL,
        })
    );
}

#[test]
fn test_missing_source_image_is_fatal() {
    let mut surface = HeadlessSurface::new();
    let container = surface.add_region(None, "container", Point::ZERO, Size::new(400.0, 250.0));
    let mut zoom = ImageZoom::new(surface, container, fixed_width_options());

    let err = zoom.setup().unwrap_err();
    assert!(matches!(err, LoupeError::MissingSourceImage));
    assert_eq!(zoom.state(), LifecycleState::Uninitialized);
    assert_eq!(zoom.surface().created_count(), 0);
    assert_eq!(zoom.surface().subscription_count(), 0);
}

#[test]
fn test_missing_container_is_fatal() {
    let result = ImageZoom::attach(
        HeadlessSurface::new(),
        ElementId(999),
        fixed_width_options(),
    );
    assert!(matches!(result, Err(LoupeError::MissingContainer)));
}

#[test]
fn test_unresolved_zoom_container_is_fatal() {
    let page = page_with_image(Some(NATURAL));
    let options = ZoomOptions {
        zoom_container: Some("nowhere".into()),
        ..fixed_width_options()
    };
    let mut zoom = ImageZoom::new(page.surface, page.container, options);
    match zoom.setup() {
        Err(LoupeError::MissingZoomContainer(name)) => assert_eq!(name, "nowhere"),
        other => panic!("unexpected result: {:?}", other.err()),
    }
    assert_eq!(zoom.surface().created_count(), 0);
}

#[test]
fn test_invalid_scale_is_rejected_at_setup() {
    let page = page_with_image(Some(NATURAL));
    let options = ZoomOptions {
        scale: Some(-2.0),
        ..fixed_width_options()
    };
    let result = ImageZoom::attach(page.surface, page.container, options);
    assert!(matches!(
        result,
        Err(LoupeError::InvalidOption { name: "scale", .. })
    ));
}

// ---------------------------------------------------------------------------
// Pointer tracking
// ---------------------------------------------------------------------------

#[test]
fn test_pointer_move_before_enter_is_ignored() {
    let mut zoom = armed_fixed_width();
    zoom.handle_event(ZoomEvent::PointerMove {
        client: client(200.0, 125.0),
    });
    let info = zoom.instance_info();
    assert_eq!(info.state, LifecycleState::Armed);
    assert_eq!(info.lens_origin, None);
}

#[test]
fn test_enter_move_leave_cycle() {
    let mut zoom = armed_fixed_width();
    let info = zoom.instance_info();
    let (lens, magnified) = (info.lens.unwrap(), info.magnified.unwrap());

    zoom.handle_event(ZoomEvent::PointerEnter);
    assert_eq!(zoom.state(), LifecycleState::Tracking);
    assert!(zoom.surface().element(lens).unwrap().visibility.is_visible());
    assert!(zoom.surface().element(magnified).unwrap().visibility.is_visible());

    zoom.handle_event(ZoomEvent::PointerMove {
        client: client(200.0, 125.0),
    });
    let info = zoom.instance_info();
    assert_eq!(info.lens_origin, Some(Point::new(75.0, 62.5)));
    assert_eq!(info.background_offset, Some(Point::new(150.0, 125.0)));
    assert_eq!(zoom.surface().element(lens).unwrap().position, Point::new(75.0, 62.5));
    assert_eq!(
        zoom.surface().element(magnified).unwrap().background_offset,
        Some(Point::new(150.0, 125.0))
    );

    zoom.handle_event(ZoomEvent::PointerLeave);
    assert_eq!(zoom.state(), LifecycleState::Idle);
    assert!(!zoom.surface().element(lens).unwrap().visibility.is_visible());
    assert!(!zoom.surface().element(magnified).unwrap().visibility.is_visible());

    zoom.handle_event(ZoomEvent::PointerEnter);
    assert_eq!(zoom.state(), LifecycleState::Tracking);
}

#[test]
fn test_leave_without_enter_is_ignored() {
    let mut zoom = armed_fixed_width();
    zoom.handle_event(ZoomEvent::PointerLeave);
    assert_eq!(zoom.state(), LifecycleState::Armed);
}

#[test]
fn test_corner_positions_with_square_lens() {
    // Auto-fit into a 200x200 zoom box at scale 2 gives a 100x100 lens.
    let mut page = page_with_image(Some(NATURAL));
    page.surface
        .add_region(None, "zoom-box", Point::new(600.0, 50.0), Size::new(200.0, 200.0));
    let options = ZoomOptions {
        width: Some(400.0),
        height: Some(250.0),
        zoom_container: Some("zoom-box".into()),
        ..ZoomOptions::default()
    };
    let mut zoom = ImageZoom::attach(page.surface, page.container, options).unwrap();
    assert_eq!(zoom.instance_info().lens_size(), Some(Size::new(100.0, 100.0)));

    zoom.handle_event(ZoomEvent::PointerEnter);
    zoom.handle_event(ZoomEvent::PointerMove {
        client: client(0.0, 0.0),
    });
    assert_eq!(zoom.instance_info().lens_origin, Some(Point::new(0.0, 0.0)));

    zoom.handle_event(ZoomEvent::PointerMove {
        client: client(400.0, 250.0),
    });
    let info = zoom.instance_info();
    assert_eq!(info.lens_origin, Some(Point::new(300.0, 150.0)));
    assert_eq!(info.background_offset, Some(Point::new(600.0, 300.0)));

    // Detached views sit at the offset inside their own container.
    let view = zoom.surface().element(info.magnified.unwrap()).unwrap();
    assert_eq!(view.position, Point::ZERO);
}

#[test]
fn test_lens_larger_than_source_is_centered() {
    let page = page_with_image(Some(Size::new(200.0, 125.0)));
    let mut zoom =
        ImageZoom::attach(page.surface, page.container, fixed_width_options()).unwrap();
    assert_eq!(zoom.instance_info().lens_size(), Some(Size::new(1000.0, 500.0)));

    zoom.handle_event(ZoomEvent::PointerEnter);
    for (x, y) in [(0.0, 0.0), (123.0, 45.0), (400.0, 250.0)] {
        zoom.handle_event(ZoomEvent::PointerMove {
            client: client(x, y),
        });
        assert_eq!(
            zoom.instance_info().lens_origin,
            Some(Point::new(-300.0, -125.0))
        );
    }
}

#[test]
fn test_scroll_refreshes_cached_origin() {
    let mut zoom = armed_fixed_width();
    zoom.handle_event(ZoomEvent::PointerEnter);

    zoom.surface_mut().scroll_to(Point::new(0.0, 100.0));
    // Cached until a scroll notification arrives.
    assert_eq!(zoom.instance_info().source_origin, Some(client(0.0, 0.0)));

    zoom.handle_event(ZoomEvent::Scroll);
    assert_eq!(zoom.instance_info().source_origin, Some(Point::new(100.0, -50.0)));
    assert_eq!(zoom.state(), LifecycleState::Tracking);

    zoom.handle_event(ZoomEvent::PointerMove {
        client: Point::new(300.0, 75.0),
    });
    assert_eq!(zoom.instance_info().lens_origin, Some(Point::new(75.0, 62.5)));
}

// ---------------------------------------------------------------------------
// Asynchronous load
// ---------------------------------------------------------------------------

#[test]
fn test_pointer_events_before_load_are_absorbed() {
    let (surface, container) = empty_page();
    let options = ZoomOptions {
        width: Some(400.0),
        height: Some(250.0),
        scale: Some(1.5),
        img: Some(IMAGE_URL.into()),
        ..ZoomOptions::default()
    };
    let mut zoom = ImageZoom::attach(surface, container, options).unwrap();
    let source = zoom.instance_info().source.unwrap();
    assert!(!zoom.instance_info().is_loaded());

    zoom.handle_event(ZoomEvent::PointerEnter);
    zoom.handle_event(ZoomEvent::PointerMove {
        client: client(200.0, 125.0),
    });
    assert_eq!(zoom.instance_info().lens_origin, None);

    // A premature load notification changes nothing either.
    zoom.handle_event(ZoomEvent::ImageLoaded);
    assert!(!zoom.instance_info().is_loaded());

    assert!(zoom.surface_mut().finish_loading(source));
    zoom.handle_event(ZoomEvent::ImageLoaded);
    let info = zoom.instance_info();
    assert_eq!(info.magnified_size(), Some(Size::new(600.0, 375.0)));
    assert_eq!(info.lens_size(), Some(Size::new(300.0, 187.5)));

    zoom.handle_event(ZoomEvent::PointerMove {
        client: client(200.0, 125.0),
    });
    let info = zoom.instance_info();
    assert_eq!(info.lens_origin, Some(Point::new(50.0, 31.25)));
    assert_eq!(info.background_offset, Some(Point::new(100.0, 62.5)));
}

#[test]
fn test_unset_height_resolves_from_rendered_image() {
    let page = page_with_image(Some(Size::new(800.0, 1110.0)));
    let options = ZoomOptions {
        scale: Some(1.5),
        ..ZoomOptions::with_width(400.0)
    };
    let zoom = ImageZoom::attach(page.surface, page.container, options).unwrap();
    let info = zoom.instance_info();

    assert_eq!(info.display_size(), Some(Size::new(400.0, 555.0)));
    let source = zoom.surface().element(page.image).unwrap();
    assert_eq!(source.height, Some(555.0));
}

#[test]
fn test_auto_fit_measures_then_hides_view() {
    let page = page_with_image(Some(NATURAL));
    let options = ZoomOptions {
        height: Some(250.0),
        ..ZoomOptions::with_width(400.0)
    };
    let zoom = ImageZoom::attach(page.surface, page.container, options).unwrap();
    let info = zoom.instance_info();

    assert_eq!(info.magnified_size(), Some(Size::new(400.0, 250.0)));
    assert_eq!(info.lens_size(), Some(Size::new(200.0, 125.0)));
    let view = zoom.surface().element(info.magnified.unwrap()).unwrap();
    assert_eq!(view.visibility, Visibility::Hidden);
}

#[test]
fn test_repeated_load_is_idempotent() {
    let mut zoom = armed_fixed_width();
    let first = zoom.instance_info().geometry;
    zoom.handle_event(ZoomEvent::ImageLoaded);
    zoom.handle_event(ZoomEvent::ImageLoaded);
    assert_eq!(zoom.instance_info().geometry, first);
}

#[test]
fn test_zero_sized_image_stays_unresolved() {
    let page = page_with_image(Some(Size::ZERO));
    let mut zoom =
        ImageZoom::attach(page.surface, page.container, fixed_width_options()).unwrap();
    zoom.handle_event(ZoomEvent::PointerEnter);
    zoom.handle_event(ZoomEvent::PointerMove {
        client: client(10.0, 10.0),
    });
    let info = zoom.instance_info();
    assert!(!info.is_loaded());
    assert_eq!(info.lens_origin, None);
}

#[test]
fn test_unusable_reload_drops_previous_geometry() {
    let page = page_with_image(Some(NATURAL));
    let image = page.image;
    let mut zoom =
        ImageZoom::attach(page.surface, page.container, fixed_width_options()).unwrap();
    zoom.handle_event(ZoomEvent::PointerEnter);
    zoom.handle_event(ZoomEvent::PointerMove {
        client: client(200.0, 125.0),
    });
    assert_eq!(zoom.instance_info().lens_origin, Some(Point::new(75.0, 62.5)));

    zoom.surface_mut().set_natural_size(image, Size::ZERO);
    zoom.handle_event(ZoomEvent::ImageLoaded);
    let info = zoom.instance_info();
    assert!(!info.is_loaded());
    assert_eq!(info.lens_origin, None);
    assert_eq!(info.background_offset, None);

    zoom.handle_event(ZoomEvent::PointerMove {
        client: client(200.0, 125.0),
    });
    assert_eq!(zoom.instance_info().lens_origin, None);

    // Usable data on the next load resolves it again.
    zoom.surface_mut().set_natural_size(image, NATURAL);
    zoom.handle_event(ZoomEvent::ImageLoaded);
    zoom.handle_event(ZoomEvent::PointerMove {
        client: client(200.0, 125.0),
    });
    let info = zoom.instance_info();
    assert!(info.is_loaded());
    assert_eq!(info.lens_origin, Some(Point::new(75.0, 62.5)));
}

// ---------------------------------------------------------------------------
// Teardown and re-arm
// ---------------------------------------------------------------------------

#[test]
fn test_kill_releases_everything() {
    let mut zoom = armed_fixed_width();
    zoom.handle_event(ZoomEvent::PointerEnter);
    zoom.kill();

    assert_eq!(zoom.state(), LifecycleState::TornDown);
    assert_eq!(zoom.surface().created_count(), 0);
    assert_eq!(zoom.surface().subscription_count(), 0);
    // The host's own image stays where it was.
    assert!(zoom.surface().first_image_child(zoom.container()).is_some());

    let info = zoom.instance_info();
    assert_eq!(info.subscriptions, 0);
    assert_eq!(info.geometry, None);
    assert_eq!(info.lens, None);
}

#[test]
fn test_kill_detaches_created_source_image() {
    let (surface, container) = empty_page();
    let options = ZoomOptions {
        img: Some(IMAGE_URL.into()),
        ..fixed_width_options()
    };
    let mut zoom = ImageZoom::attach(surface, container, options).unwrap();
    assert_eq!(zoom.surface().created_count(), 3);

    zoom.kill();
    assert_eq!(zoom.surface().created_count(), 0);
    assert_eq!(zoom.surface().first_image_child(container), None);
}

#[test]
fn test_kill_before_load_is_safe() {
    let (surface, container) = empty_page();
    let options = ZoomOptions {
        img: Some(IMAGE_URL.into()),
        ..fixed_width_options()
    };
    let mut zoom = ImageZoom::attach(surface, container, options).unwrap();
    zoom.kill();
    assert_eq!(zoom.surface().created_count(), 0);
    assert_eq!(zoom.surface().subscription_count(), 0);
}

#[test]
fn test_kill_without_setup_is_a_no_op() {
    let page = page_with_image(Some(NATURAL));
    let mut zoom = ImageZoom::new(page.surface, page.container, fixed_width_options());
    zoom.kill();
    assert_eq!(zoom.state(), LifecycleState::Uninitialized);
}

#[test]
fn test_events_after_kill_are_ignored() {
    let mut zoom = armed_fixed_width();
    zoom.kill();
    zoom.handle_event(ZoomEvent::PointerEnter);
    zoom.handle_event(ZoomEvent::PointerMove {
        client: client(50.0, 50.0),
    });
    zoom.handle_event(ZoomEvent::Scroll);
    zoom.handle_event(ZoomEvent::ImageLoaded);

    assert_eq!(zoom.state(), LifecycleState::TornDown);
    assert_eq!(zoom.instance_info().lens_origin, None);
    assert_eq!(zoom.surface().created_count(), 0);
}

#[test]
fn test_rearm_recomputes_from_scratch() {
    let page = page_with_image(Some(NATURAL));
    let image = page.image;
    let mut zoom =
        ImageZoom::attach(page.surface, page.container, fixed_width_options()).unwrap();
    zoom.handle_event(ZoomEvent::PointerEnter);
    zoom.handle_event(ZoomEvent::PointerMove {
        client: client(200.0, 125.0),
    });
    assert_relative_eq!(zoom.instance_info().scale().unwrap().x, 2.0);

    zoom.kill();
    zoom.surface_mut()
        .set_natural_size(image, Size::new(1600.0, 500.0));
    zoom.setup().unwrap();

    let info = zoom.instance_info();
    assert_eq!(info.state, LifecycleState::Armed);
    assert_relative_eq!(info.scale().unwrap().x, 4.0);
    assert_relative_eq!(info.scale().unwrap().y, 2.0);
    assert_eq!(info.lens_origin, None);
    assert_eq!(info.background_offset, None);
    assert_eq!(info.visibility, Visibility::Hidden);
}

#[test]
fn test_setup_twice_does_not_double_register() {
    let mut zoom = armed_fixed_width();
    zoom.setup().unwrap();
    assert_eq!(zoom.state(), LifecycleState::Armed);
    assert_eq!(zoom.surface().subscription_count(), 7);
    assert_eq!(zoom.surface().created_count(), 2);
}

#[test]
fn test_reconfigure_moves_view() {
    let mut zoom = armed_fixed_width();
    zoom.reconfigure(ZoomOptions {
        zoom_position: ZoomPosition::Left,
        offset: Offset {
            vertical: 0.0,
            horizontal: 10.0,
        },
        ..fixed_width_options()
    })
    .unwrap();

    let info = zoom.instance_info();
    assert_eq!(info.state, LifecycleState::Armed);
    assert_eq!(
        info.geometry.unwrap().magnified_origin,
        Point::new(-510.0, 0.0)
    );
    assert_eq!(zoom.surface().subscription_count(), 7);
    assert_eq!(zoom.surface().created_count(), 2);
}
