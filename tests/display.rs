//! Display façade driven against the in-memory server

use std::sync::{Arc, Mutex};

use xlibwrap::event::ClientMessageEvent;
use xlibwrap::wrappers::*;
use xlibwrap::*;

fn open() -> Display<NullBackend> {
    Display::with_backend(NullBackend::new())
}

fn top_level(display: &mut Display<NullBackend>, mask: std::os::raw::c_long) -> Window {
    let root = display.default_root_window().unwrap();
    let screen = display.default_screen_info().unwrap();
    let window = display
        .create_simple_window(root, 10, 20, 200, 100, 1, screen.black_pixel, screen.white_pixel)
        .unwrap();
    display.select_input(window, mask).unwrap();
    window
}

#[test]
fn test_server_description() {
    let display = open();
    assert_eq!(display.screen_count(), 1);
    assert_eq!(display.default_screen(), 0);
    assert_eq!(display.protocol_version(), (11, 0));
    assert!(!display.server_vendor().is_empty());
    assert!(display.connection_number().is_none());

    let formats = display.pixmap_formats().unwrap();
    assert!(formats.iter().any(|f| f.depth() == 24 && f.bits_per_pixel() == 32));
    assert!(display.depths(0).unwrap().contains(&1));
    assert!(display.list_extensions().unwrap().contains(&"BIG-REQUESTS".to_string()));

    let visual = display
        .match_visual_info(0, 24, VisualClass::TrueColor)
        .unwrap()
        .unwrap();
    assert_eq!(visual.visual_id(), display.default_screen_info().unwrap().root_visual);
}

#[test]
fn test_window_lifecycle() {
    let mut display = open();
    let root = display.default_root_window().unwrap();
    let window = top_level(&mut display, ffi::StructureNotifyMask | ffi::ExposureMask);

    display.map_window(window).unwrap();
    display.move_resize_window(window, 50, 60, 300, 150).unwrap();

    let geometry = display.get_geometry(window.into()).unwrap();
    assert_eq!((geometry.x, geometry.y, geometry.width, geometry.height), (50, 60, 300, 150));
    assert_eq!(geometry.border_width, 1);
    assert_eq!(geometry.root, root);

    let tree = display.query_tree(window).unwrap();
    assert_eq!(tree.parent, root);
    assert!(tree.children.is_empty());

    display.destroy_window(window).unwrap();
    let events: Vec<Event> = display.events().collect();
    assert!(matches!(events.first(), Some(Event::MapNotify(m)) if m.window() == window));
    assert!(events.iter().any(|e| matches!(e, Event::ConfigureNotify(c) if c.width() == 300)));
    assert!(matches!(events.last(), Some(Event::DestroyNotify(d)) if d.window() == window));
    assert!(display.get_window_attributes(window).is_err());
}

#[test]
fn test_stacking_order() {
    let mut display = open();
    let root = display.default_root_window().unwrap();
    let a = top_level(&mut display, 0);
    let b = top_level(&mut display, 0);
    let c = top_level(&mut display, 0);
    let children = |d: &Display<NullBackend>| d.query_tree(root).unwrap().children;
    assert_eq!(children(&display), vec![a, b, c]);

    display.raise_window(a).unwrap();
    assert_eq!(children(&display), vec![b, c, a]);
    display.lower_window(a).unwrap();
    assert_eq!(children(&display), vec![a, b, c]);
}

#[test]
fn test_window_manager_hints() {
    let mut display = open();
    let window = top_level(&mut display, 0);
    let delete = display.intern_atom("WM_DELETE_WINDOW", false).unwrap();

    display.store_name(window, "demo window").unwrap();
    display.set_class_hint(window, &ClassHint::new("demo", "Demo")).unwrap();
    display.set_wm_protocols(window, &[delete]).unwrap();

    assert_eq!(display.fetch_name(window).unwrap().as_deref(), Some("demo window"));
    assert_eq!(display.get_class_hint(window).unwrap(), Some(ClassHint::new("demo", "Demo")));
    assert_eq!(display.get_wm_protocols(window).unwrap(), vec![delete]);
    assert_eq!(display.get_atom_name(delete).unwrap(), "WM_DELETE_WINDOW");

    let names = display.list_properties(window).unwrap();
    assert!(names.contains(&Atom::WM_NAME));
    assert!(names.contains(&Atom::WM_CLASS));
}

#[test]
fn test_client_message_round_trip() {
    let mut display = open();
    let window = top_level(&mut display, 0);
    let protocols = display.intern_atom("WM_PROTOCOLS", false).unwrap();
    let delete = display.intern_atom("WM_DELETE_WINDOW", false).unwrap();

    let mut message = ClientMessageEvent::default();
    message.set_window(window);
    message.set_message_type(protocols);
    message.set_data_l([delete.0 as std::os::raw::c_long, 0, 0, 0, 0]);
    display
        .send_event(window, false, 0, &Event::ClientMessage(message))
        .unwrap();

    match display.next_event().unwrap() {
        Event::ClientMessage(received) => {
            assert!(Event::ClientMessage(received).is_send_event());
            assert_eq!(received.message_type(), protocols);
            assert_eq!(received.format(), 32);
            assert_eq!(received.data_l()[0] as ffi::Atom, delete.0);
        }
        other => panic!("unexpected event {:?}", other),
    }
}

#[test]
fn test_drawing_into_a_pixmap() {
    let mut display = open();
    let root = display.default_root_window().unwrap();
    let pixmap = display.create_pixmap(root.into(), 16, 16, 24).unwrap();
    let gc = display
        .create_gc(pixmap.into(), &GcValues::new().with_foreground(0x00ff00))
        .unwrap();

    display
        .fill_rectangle(pixmap.into(), gc, Rectangle::new(4, 4, 4, 4))
        .unwrap();
    display.set_foreground(gc, 0x0000ff).unwrap();
    display.draw_point(pixmap.into(), gc, 0, 0).unwrap();
    display
        .fill_arc(pixmap.into(), gc, ArcSegment::ellipse(10, 10, 4, 4))
        .unwrap();

    let image = display
        .get_image(pixmap.into(), 0, 0, 16, 16, ffi::AllPlanes, ImageFormat::ZPixmap)
        .unwrap();
    assert_eq!(image.get_pixel(5, 5), Some(0x00ff00));
    assert_eq!(image.get_pixel(0, 0), Some(0x0000ff));
    assert_eq!(image.get_pixel(12, 12), Some(0x0000ff));
    assert_eq!(image.get_pixel(1, 10), Some(0));

    display.free_gc(gc).unwrap();
    display.free_pixmap(pixmap).unwrap();
}

#[test]
fn test_errors_reach_the_handler() {
    let mut display = open();
    let seen = Arc::new(Mutex::new(Vec::new()));
    let sink = seen.clone();
    display.set_error_handler(Some(Box::new(move |e: &ErrorEvent| {
        sink.lock().unwrap().push(e.code());
    })));

    display.unmap_window(Window::new(0xbad)).unwrap();
    assert_eq!(*seen.lock().unwrap(), vec![Some(ErrorCode::Window)]);

    // A trap takes the error instead of the handler
    let (_, trapped) = display.trap_errors(|d| d.free_pixmap(Pixmap::new(0xbad)));
    assert_eq!(trapped.len(), 1);
    assert_eq!(trapped[0].code(), Some(ErrorCode::Pixmap));
    assert_eq!(seen.lock().unwrap().len(), 1);
}

#[test]
fn test_reply_errors_are_returned() {
    let mut display = open();
    let (result, errors) = display.trap_errors(|d| d.get_geometry(Drawable::new(0xbad)));
    assert!(matches!(result, Err(Error::Status { .. })));
    assert_eq!(errors[0].code(), Some(ErrorCode::Drawable));
}

#[test]
fn test_named_colors_and_fonts() {
    let mut display = open();
    let colormap = display.default_screen_info().unwrap().default_colormap;
    let red = display.alloc_named_color(colormap, "red").unwrap();
    assert_eq!(red.screen.pixel(), 0xff0000);
    assert!(matches!(
        display.alloc_named_color(colormap, "not a color"),
        Err(Error::BadName(_))
    ));

    let font = display.load_query_font("fixed").unwrap();
    assert_eq!(display.text_width(&font, b"abc").unwrap(), 18);
    assert_eq!(display.text_extents(&font, b"abc").unwrap().overall.width(), 18);
    assert!(display.list_fonts("fixed", 10).unwrap().contains(&"fixed".to_string()));
}

#[test]
fn test_keyboard_lookup() {
    let display = open();
    let (min, max) = display.display_keycodes();
    assert!(min <= max);

    let keycode = display.keysym_to_keycode(KeySym::new(0x61)).unwrap();
    let mut key = event::KeyEvent::default();
    key.set_keycode(keycode);
    let looked_up = display.lookup_string(&key);
    assert_eq!(looked_up.text, "a");
    assert_eq!(looked_up.keysym, Some(KeySym::new(0x61)));
}

#[test]
fn test_resource_defaults() {
    let display = Display::with_backend(NullBackend::with_resources("demo.geometry: 300x200\n"));
    assert_eq!(
        display.get_default("demo", "geometry").unwrap().as_deref(),
        Some("300x200")
    );
    assert_eq!(display.get_default("other", "geometry").unwrap(), None);
}

#[test]
fn test_requests_go_through_the_backend() {
    let mut display = open();
    let window = top_level(&mut display, 0);
    display.backend_mut().clear_requests();

    display.map_raised(window).unwrap();
    display.bell(0).unwrap();
    display.flush().unwrap();
    assert_eq!(
        display.backend().requests(),
        vec!["XConfigureWindow", "XMapWindow", "XBell", "XFlush"]
    );

    let backend = display.into_backend();
    assert_eq!(backend.lock_depth(), 0);
}
