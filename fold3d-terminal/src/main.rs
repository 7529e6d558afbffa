/// Fold3D Terminal Demo - Interactive 3D Book
///
/// Renders a hinged book in the terminal. Drag horizontally with the mouse
/// to open or close it; it snaps to whichever state is nearer on release.
/// Controls:
///   - Mouse drag: open/close the covers
///   - Space/Enter: toggle open/closed
///   - Q/ESC: quit
use std::io;
use std::path::PathBuf;

use clap::Parser;
use tracing::warn;

use fold3d_core::texture::{compose, load_base_image, PAGE_MAP_HEIGHT, PAGE_MAP_WIDTH};
use fold3d_core::{BookDimensions, BookMaterials, Material};
use fold3d_terminal::TerminalApp;

#[derive(Parser)]
#[command(name = "fold3d", about = "An interactive 3D book in your terminal")]
struct Args {
    /// Image for the front cover
    #[arg(long)]
    cover_front: Option<PathBuf>,
    /// Image for the back cover
    #[arg(long)]
    cover_back: Option<PathBuf>,
    /// Image behind the left page text
    #[arg(long)]
    page_left: Option<PathBuf>,
    /// Image behind the right page text
    #[arg(long)]
    page_right: Option<PathBuf>,
    /// Title drawn on the front cover
    #[arg(long, default_value = "Greeting Card 2025")]
    title: String,
    /// Text on the back cover
    #[arg(long, default_value = "From\nFold3D")]
    back_text: String,
    /// Text on the left inner page
    #[arg(long, default_value = "Happy New Year!\nMay all your dreams come true")]
    left_text: String,
    /// Text on the right inner page
    #[arg(long, default_value = "With love,\nFold3D")]
    right_text: String,
    /// Book width in scene units
    #[arg(long, default_value_t = 2.4)]
    width: f32,
    /// Book height in scene units
    #[arg(long, default_value_t = 1.6)]
    height: f32,
    /// Cover thickness in scene units
    #[arg(long, default_value_t = 0.02)]
    thickness: f32,
}

/// Log to a file when RUST_LOG is set; the alternate screen owns stdout
fn init_tracing() {
    if std::env::var_os("RUST_LOG").is_none() {
        return;
    }
    if let Ok(file) = std::fs::File::create("fold3d.log") {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .with_writer(std::sync::Arc::new(file))
            .with_ansi(false)
            .try_init();
    }
}

/// Decode an optional image; failures log and fall back to the gradient
fn load_optional(path: Option<&PathBuf>) -> Option<image::RgbaImage> {
    let path = path?;
    match load_base_image(path) {
        Ok(img) => Some(img),
        Err(err) => {
            warn!("{err}, using gradient background");
            None
        }
    }
}

fn main() -> io::Result<()> {
    init_tracing();
    let args = Args::parse();

    let cover_front = load_optional(args.cover_front.as_ref());
    let cover_back = load_optional(args.cover_back.as_ref());
    let page_left = load_optional(args.page_left.as_ref());
    let page_right = load_optional(args.page_right.as_ref());

    let materials = BookMaterials {
        cover_front: Material::new(compose(
            cover_front.as_ref(),
            &args.title,
            PAGE_MAP_WIDTH,
            PAGE_MAP_HEIGHT,
        )),
        cover_back: Material::new(compose(
            cover_back.as_ref(),
            &args.back_text,
            PAGE_MAP_WIDTH,
            PAGE_MAP_HEIGHT,
        )),
        page_left: Material::new(compose(
            page_left.as_ref(),
            &args.left_text,
            PAGE_MAP_WIDTH,
            PAGE_MAP_HEIGHT,
        )),
        page_right: Material::new(compose(
            page_right.as_ref(),
            &args.right_text,
            PAGE_MAP_WIDTH,
            PAGE_MAP_HEIGHT,
        )),
    };

    let dims = BookDimensions {
        width: args.width,
        height: args.height,
        thickness: args.thickness,
    };

    let mut app = TerminalApp::new(dims, materials)?;
    app.run()
}
