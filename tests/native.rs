//! Smoke test against a real server. Skipped when libX11 cannot be loaded
//! or no display is available.

use std::time::Duration;

use xlibwrap::wrappers::WindowParams;
use xlibwrap::*;

fn connect() -> Option<Display> {
    if std::env::var_os("DISPLAY").is_none() {
        eprintln!("skipping: DISPLAY is not set");
        return None;
    }
    match Display::open(None) {
        Ok(display) => Some(display),
        Err(e) => {
            eprintln!("skipping: {}", e);
            None
        }
    }
}

#[test]
fn test_native_round_trips() {
    let Some(mut display) = connect() else {
        return;
    };

    assert!(display.screen_count() >= 1);
    assert_eq!(display.protocol_version().0, 11);
    assert!(display.connection_number().is_some());

    let screen = display.default_screen_info().unwrap();
    let window = display
        .create_simple_window(screen.root, 0, 0, 64, 64, 0, screen.black_pixel, screen.white_pixel)
        .unwrap();
    display.store_name(window, "xlibwrap smoke test").unwrap();
    assert_eq!(
        display.fetch_name(window).unwrap().as_deref(),
        Some("xlibwrap smoke test")
    );

    let child = display
        .create_window(
            &WindowParams::new(window, 4, 4, 16, 16)
                .depth(screen.root_depth as i32)
                .class(WindowClass::InputOutput),
        )
        .unwrap();
    assert_eq!(display.query_tree(window).unwrap().children, vec![child]);

    // A key event built locally carries no connection pointer
    let keycode = display.keysym_to_keycode(KeySym::new(0x61)).unwrap();
    let mut key = event::KeyEvent::default();
    key.set_keycode(keycode);
    assert_eq!(display.lookup_string(&key).keysym, Some(KeySym::new(0x61)));

    let font = display.load_query_font("fixed").unwrap();
    let width = display.text_width(&font, b"abc").unwrap();
    assert_eq!(width, font.text_width(b"abc"));
    assert_eq!(i32::from(display.text_extents(&font, b"abc").unwrap().overall.width()), width);

    let atom = display.intern_atom("_XLIBWRAP_SMOKE", false).unwrap();
    assert_eq!(display.get_atom_name(atom).unwrap(), "_XLIBWRAP_SMOKE");

    let (_, errors) = display.trap_errors(|d| d.map_window(Window::new(1)));
    assert_eq!(errors.len(), 1);
    assert_eq!(errors[0].code(), Some(ErrorCode::Window));

    display.destroy_window(window).unwrap();
    display.sync(true).unwrap();
    assert!(display
        .wait_event_timeout(Duration::from_millis(10))
        .unwrap()
        .is_none());
    display.close();
}
