//! xlibinfo - Describe an X server through xlibwrap
//!
//! Prints what the server reports about itself and, with `-window`, opens a
//! small window and logs the events it receives.

use std::env;
use std::process;

use xlibwrap::backend::Backend;
use xlibwrap::wrappers::{ClassHint, GcValues};
use xlibwrap::{ffi, ArcSegment, ConnectOptions, Display, Event, Point, Rectangle, Result};

const VERSION: &str = env!("CARGO_PKG_VERSION");

fn print_usage() {
    println!("xlibinfo v{}", VERSION);
    println!("Print information about an X server");
    println!();
    println!("Usage: xlibinfo [OPTIONS]");
    println!();
    println!("Options:");
    println!("  -display <name>       Server to connect to (default: $DISPLAY)");
    println!("  -sync                 Synchronous mode, errors reported per request");
    println!("  -window               Open a test window and log its events");
    println!("  -extensions           List server extensions");
    println!("  -visuals              List visuals of each screen");
    println!("  -h, --help            Show this help message");
    println!();
    println!("Environment:");
    println!("  XLIBWRAP_LIBRARY      Colon-separated libX11 names to try");
    println!("  XLIBWRAP_SYNC         Synchronous mode when set to 1");
    println!();
}

#[derive(Debug, Default)]
struct Config {
    options: ConnectOptions,
    window: bool,
    extensions: bool,
    visuals: bool,
}

fn parse_args() -> std::result::Result<Config, String> {
    let mut config = Config {
        options: ConnectOptions::from_env(),
        ..Config::default()
    };
    let args: Vec<String> = env::args().collect();
    let mut i = 1;

    while i < args.len() {
        match args[i].as_str() {
            "-h" | "--help" => {
                print_usage();
                process::exit(0);
            }
            "-display" => {
                i += 1;
                if i >= args.len() {
                    return Err("Missing value for -display".to_string());
                }
                config.options.display_name = Some(args[i].clone());
            }
            "-sync" => {
                config.options.synchronous = true;
            }
            "-window" => {
                config.window = true;
            }
            "-extensions" => {
                config.extensions = true;
            }
            "-visuals" => {
                config.visuals = true;
            }
            arg => {
                return Err(format!("Unknown option: {}", arg));
            }
        }
        i += 1;
    }

    Ok(config)
}

fn print_info<B: Backend>(display: &Display<B>, config: &Config) -> Result<()> {
    let (major, minor) = display.protocol_version();
    println!("name of display:    {}", display.display_string());
    println!("version number:     {}.{}", major, minor);
    println!("vendor string:      {}", display.server_vendor());
    println!("vendor release:     {}", display.vendor_release());
    println!("maximum request:    {} bytes", display.max_request_size() * 4);
    println!("image byte order:   {:?}", display.image_byte_order());
    println!();

    let formats = display.pixmap_formats()?;
    println!("number of supported pixmap formats: {}", formats.len());
    for format in &formats {
        println!(
            "    depth {}, bits_per_pixel {}, scanline_pad {}",
            format.depth(),
            format.bits_per_pixel(),
            format.scanline_pad()
        );
    }

    let (min_keycode, max_keycode) = display.display_keycodes();
    println!("keycode range:      minimum {}, maximum {}", min_keycode.0, max_keycode.0);

    if config.extensions {
        let extensions = display.list_extensions()?;
        println!("number of extensions: {}", extensions.len());
        for name in &extensions {
            match display.query_extension(name)? {
                Some(info) => println!("    {} (opcode {})", name, info.major_opcode),
                None => println!("    {}", name),
            }
        }
    }

    println!("default screen number: {}", display.default_screen());
    println!("number of screens:  {}", display.screen_count());
    for number in 0..display.screen_count() {
        print_screen(display, number, config.visuals)?;
    }
    Ok(())
}

fn print_screen<B: Backend>(display: &Display<B>, number: i32, visuals: bool) -> Result<()> {
    let screen = display.screen_info(number)?;
    println!();
    println!("screen #{}:", number);
    println!(
        "  dimensions:    {}x{} pixels ({}x{} millimeters)",
        screen.width, screen.height, screen.width_mm, screen.height_mm
    );
    println!("  root window id:    {}", screen.root);
    println!("  depth of root window:    {} planes", screen.root_depth);

    let depths = display.depths(number)?;
    let listed: Vec<String> = depths.iter().map(|d| d.to_string()).collect();
    println!("  depths ({}):    {}", depths.len(), listed.join(", "));
    println!("  default colormap:    {} ({} cells)", screen.default_colormap, screen.cells);
    println!(
        "  black, white pixels:    0x{:x}, 0x{:x}",
        screen.black_pixel, screen.white_pixel
    );

    if visuals {
        let template = xlibwrap::wrappers::VisualTemplate::new().screen(number);
        let infos = display.get_visual_info(&template)?;
        println!("  number of visuals:    {}", infos.len());
        for info in &infos {
            println!("  visual:");
            println!("    visual id:    0x{:x}", info.visual_id().get());
            match info.class() {
                Some(class) => println!("    class:    {:?}", class),
                None => println!("    class:    unknown"),
            }
            println!("    depth:    {} planes", info.depth());
            println!(
                "    red, green, blue masks:    0x{:x}, 0x{:x}, 0x{:x}",
                info.red_mask(),
                info.green_mask(),
                info.blue_mask()
            );
            println!("    colormap entries:    {}", info.colormap_size());
            println!("    significant bits in color specification:    {} bits", info.bits_per_rgb());
        }
    }
    Ok(())
}

fn run_window<B: Backend>(display: &mut Display<B>) -> Result<()> {
    let screen = display.default_screen_info()?;
    let window = display.create_simple_window(
        screen.root,
        0,
        0,
        320,
        200,
        1,
        screen.black_pixel,
        screen.white_pixel,
    )?;
    display.store_name(window, "xlibinfo")?;
    display.set_class_hint(window, &ClassHint::new("xlibinfo", "XlibInfo"))?;
    let protocols = display.intern_atom("WM_PROTOCOLS", false)?;
    let delete_window = display.intern_atom("WM_DELETE_WINDOW", false)?;
    display.set_wm_protocols(window, &[delete_window])?;
    display.select_input(
        window,
        ffi::ExposureMask
            | ffi::KeyPressMask
            | ffi::ButtonPressMask
            | ffi::StructureNotifyMask
            | ffi::PointerMotionMask,
    )?;

    let values = GcValues::new()
        .with_foreground(screen.black_pixel)
        .with_background(screen.white_pixel)
        .with_line_width(2);
    let gc = display.create_gc(window.into(), &values)?;
    display.map_window(window)?;
    log::info!("Opened window {}", window);

    loop {
        let event = display.next_event()?;
        log::info!("{:?}", event);
        match event {
            Event::Expose(expose) if expose.count() == 0 => {
                let drawable: xlibwrap::Drawable = window.into();
                display.draw_rectangle(drawable, gc, Rectangle::new(10, 10, 120, 80))?;
                display.fill_arc(drawable, gc, ArcSegment::ellipse(160, 20, 60, 60))?;
                let points = [Point::new(240, 100), Point::new(300, 100), Point::new(270, 40)];
                display.fill_polygon(
                    drawable,
                    gc,
                    &points,
                    xlibwrap::Shape::Convex,
                    xlibwrap::CoordMode::Origin,
                )?;
                display.draw_string(drawable, gc, 10, 150, b"Press any key to quit")?;
            }
            Event::KeyPress(key) => {
                let text = display.lookup_string(&key).text;
                log::info!("Key {} pressed ({:?}), quitting", key.keycode().0, text);
                break;
            }
            Event::ClientMessage(message)
                if message.message_type() == protocols
                    && message.data_l()[0] as ffi::Atom == delete_window.0 =>
            {
                log::info!("Window closed by the window manager");
                break;
            }
            Event::DestroyNotify(_) => break,
            _ => {}
        }
    }

    display.free_gc(gc)?;
    display.destroy_window(window)?;
    display.sync(false)
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = match parse_args() {
        Ok(config) => config,
        Err(err) => {
            eprintln!("Error: {}", err);
            eprintln!();
            print_usage();
            process::exit(1);
        }
    };

    let mut display = match Display::open_with(&config.options) {
        Ok(display) => display,
        Err(e) => {
            eprintln!("Error: {}", e);
            process::exit(1);
        }
    };

    if let Err(e) = print_info(&display, &config) {
        eprintln!("Error: {}", e);
        process::exit(1);
    }

    if config.window {
        if let Err(e) = run_window(&mut display) {
            eprintln!("Error: {}", e);
            process::exit(1);
        }
    }

    display.close();
}
