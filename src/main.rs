// What you SEE when this runs:
// • A window with the live camera feed, with everything close to the key
//   color replaced by the background image (white by default: hold up a
//   sheet of paper and it becomes a window onto the background).
// • A ghosted thumbnail of the current background in the corner.
// • O prompts for a new background image on the terminal; C resets it.
// • K shows the raw feed, G the background alone (debug views). ESC quits.

use std::path::PathBuf;
use std::time::{Duration, Instant};

use clap::Parser;
use log::{debug, info, warn};

use chromacam::background::Background;
use chromacam::camera::CameraCapture;
use chromacam::chroma::{parse_hex_color, ChromaKey};
use chromacam::draw::{draw_text_5x7, draw_thumbnail, Drawer};
use chromacam::error::Result;
use chromacam::picker::{ImagePicker, Pick};
use chromacam::types::FrameBuffer;

/// Live chroma-key camera: pixels matching the key color are replaced by a
/// background image.
#[derive(Parser)]
#[command(name = "chromacam", version)]
struct Cli {
    /// Camera device index (0 = default webcam)
    #[arg(long, default_value_t = 0)]
    camera: u32,

    /// Requested capture width
    #[arg(long, default_value_t = 640)]
    width: u32,

    /// Requested capture height
    #[arg(long, default_value_t = 480)]
    height: u32,

    /// Color to key out, as #rrggbb
    #[arg(long, default_value = "#ffffff")]
    key_color: String,

    /// Background image shown where the key color is removed
    /// (a built-in gradient is used when omitted)
    #[arg(long)]
    background: Option<PathBuf>,
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();
    if let Err(e) = run(cli) {
        log::error!("{e}");
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<()> {
    let keyer = ChromaKey::new(parse_hex_color(&cli.key_color)?);

    /* --- Camera + window setup ---
       Visual: window opens with the composited feed. */
    let mut cam = CameraCapture::new(cli.camera, cli.width, cli.height)?;
    let (w, h) = cam.resolution();
    let (w, h) = (w as usize, h as usize);
    info!("camera streaming at {w}x{h}");

    let mut drawer = Drawer::new("Chromacam — Live Chroma Key", w, h)?;

    /* --- Background: configured image, else the gradient --- */
    let mut background = match &cli.background {
        Some(path) => match Background::load(path, w, h) {
            Ok(bg) => {
                info!("background loaded: {}", path.display());
                bg
            }
            Err(e) => {
                warn!("{e}; using the fallback background");
                Background::fallback(w, h)
            }
        },
        None => Background::fallback(w, h),
    };

    let mut picker = ImagePicker::new();

    /* --- Reusable screen buffer ---
       Visual: this is the image you actually see each frame. */
    let mut screen = FrameBuffer::new(w, h);

    /* --- Debug toggles ---
       Visual: K shows the raw feed, G the background by itself. */
    let mut show_live = false;
    let mut show_background = false;

    /* --- FPS accounting --- */
    let mut last_fps_time = Instant::now();
    let mut frames_this_second: u32 = 0;
    let mut hud_fps_text = String::from("FPS: 0.0");

    /* ------------------------------ Main loop ------------------------------ */
    while drawer.is_open() && !drawer.esc_pressed() {
        /* 1) Grab a fresh live frame. */
        let live = cam.next_frame()?;

        /* 2) Inputs */
        if drawer.k_pressed_once() {
            show_live = !show_live;
            if show_live {
                show_background = false;
            }
        }
        if drawer.g_pressed_once() {
            show_background = !show_background;
            if show_background {
                show_live = false;
            }
        }
        if drawer.c_pressed_once() {
            background.reset(); // visual: gradient returns
            info!("background reset");
        }
        if drawer.o_pressed_once() {
            picker.request(); // prompt appears on the terminal
        }

        /* 3) Did a pick finish? Cancel leaves everything as it was. */
        match picker.poll() {
            Some(Pick::Chosen(path)) => match background.replace_from(&path) {
                Ok(()) => info!("background swapped: {}", path.display()),
                Err(e) => warn!("{e}; keeping the previous background"),
            },
            Some(Pick::Cancelled) => debug!("pick cancelled, background unchanged"),
            None => {}
        }

        /* 4) Compose this frame's view. */
        if show_background {
            screen.pixels.copy_from_slice(&background.frame().pixels);
        } else if show_live {
            screen.pixels.copy_from_slice(&live.pixels);
        } else {
            keyer.composite_over(&live, background.frame(), &mut screen)?;
        }

        /* 5) Thumbnail + HUD on top. */
        draw_thumbnail(&mut screen, background.frame());

        let status = if show_background {
            "BG"
        } else if show_live {
            "LIVE"
        } else {
            "KEYED"
        };
        let hud = format!("{status} | O: PICK  C: RESET  K: LIVE  G: BG | {hud_fps_text}");
        draw_text_5x7(&mut screen, 8, 8, &hud, 0x00FFFFFF);

        /* 6) Present to the window. */
        drawer.present(&screen)?;

        /* 7) FPS counter (HUD + log once per second). */
        frames_this_second += 1;
        let now = Instant::now();
        if now.duration_since(last_fps_time) >= Duration::from_secs(1) {
            let secs = now.duration_since(last_fps_time).as_secs_f32();
            let fps = frames_this_second as f32 / secs;
            debug!("FPS: {fps:.1}");
            hud_fps_text = format!("FPS: {fps:.1}");
            frames_this_second = 0;
            last_fps_time = now;
        }
    }

    Ok(())
}
