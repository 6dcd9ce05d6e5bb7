use anyhow::Context;
use clap::{ArgAction, Parser};
use log::{debug, info};
use movesel::input::MouseButton;
use movesel::{Config, Document, Editor, LayerHost, MoveSelectedTool};
use std::path::PathBuf;

const LONG_VERSION: &str = concat!(
    env!("CARGO_PKG_VERSION"),
    " (",
    env!("MOVESEL_GIT_HASH"),
    ")"
);

#[derive(Parser, Debug)]
#[command(name = "movesel")]
#[command(
    version,
    long_version = LONG_VERSION,
    about = "Move selected pixels of a PNG image"
)]
struct Cli {
    /// Image to edit
    #[arg(long, short = 'i', value_name = "PNG")]
    input: PathBuf,

    /// Where to write the result
    #[arg(long, short = 'o', value_name = "PNG")]
    output: PathBuf,

    /// Select a rectangle before moving (default: whole image)
    #[arg(long, value_name = "X,Y,W,H", value_parser = parse_box, conflicts_with = "select_ellipse")]
    select_rect: Option<[f64; 4]>,

    /// Select the ellipse inscribed in a box before moving
    #[arg(long, value_name = "X,Y,W,H", value_parser = parse_box)]
    select_ellipse: Option<[f64; 4]>,

    /// Drag the selection by DX,DY; repeat for several gestures
    #[arg(long = "drag", value_name = "DX,DY", value_parser = parse_delta, allow_hyphen_values = true)]
    drags: Vec<(f64, f64)>,

    /// Motion events per drag
    #[arg(long, default_value_t = 1, value_parser = clap::value_parser!(u32).range(1..=1000))]
    steps: u32,

    /// Draw the selection outline onto the output
    #[arg(long, action = ArgAction::SetTrue)]
    outline: bool,

    /// Config file (default: ~/.config/movesel/config.toml)
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let cli = Cli::parse();
    let config = Config::load(cli.config.as_deref())?;

    let mut document = Document::from_png(&cli.input)
        .with_context(|| format!("Failed to load image {}", cli.input.display()))?;

    if let Some([x, y, w, h]) = cli.select_rect {
        document.select_rect(x, y, w, h);
    } else if let Some([x, y, w, h]) = cli.select_ellipse {
        document.select_ellipse(x, y, w, h);
    }

    let mut editor = Editor::new(document);
    editor.activate_tool(Box::new(MoveSelectedTool::from_config(&config)))?;

    for &(dx, dy) in &cli.drags {
        replay_drag(&mut editor, dx, dy, cli.steps)?;
    }

    // Deactivating the tool commits any floating pixels.
    editor.deactivate_tool()?;

    let options = config.render_options(cli.outline);
    editor
        .document
        .save_png(&cli.output, &options)
        .with_context(|| format!("Failed to write image {}", cli.output.display()))?;

    info!(
        "Applied {} drag(s); wrote {}",
        cli.drags.len(),
        cli.output.display()
    );
    Ok(())
}

/// Replays one press / motion / release gesture that moves the selection by `(dx, dy)`.
///
/// The gesture starts at the centre of the selection and reaches the target in
/// `steps` evenly spaced motion events.
fn replay_drag(editor: &mut Editor, dx: f64, dy: f64, steps: u32) -> anyhow::Result<()> {
    let start = editor
        .document
        .selection_path()
        .center()
        .unwrap_or_else(|| editor.document.center());
    debug!("Drag from ({:.1}, {:.1}) by ({dx}, {dy})", start.x, start.y);

    editor.on_mouse_press(MouseButton::Left, start.x, start.y)?;
    for step in 1..=steps {
        let t = step as f64 / steps as f64;
        editor.on_mouse_motion(start.x + dx * t, start.y + dy * t)?;
    }
    editor.on_mouse_release(MouseButton::Left, start.x + dx, start.y + dy)?;
    Ok(())
}

fn parse_numbers<const N: usize>(value: &str) -> Result<[f64; N], String> {
    let parts: Vec<&str> = value.split(',').map(str::trim).collect();
    if parts.len() != N {
        return Err(format!("expected {N} comma-separated numbers, got '{value}'"));
    }

    let mut numbers = [0.0; N];
    for (slot, part) in numbers.iter_mut().zip(parts) {
        *slot = part
            .parse::<f64>()
            .map_err(|_| format!("'{part}' is not a number"))?;
        if !slot.is_finite() {
            return Err(format!("'{part}' is not a finite number"));
        }
    }
    Ok(numbers)
}

fn parse_box(value: &str) -> Result<[f64; 4], String> {
    let numbers = parse_numbers::<4>(value)?;
    if numbers[2] <= 0.0 || numbers[3] <= 0.0 {
        return Err("width and height must be positive".to_string());
    }
    Ok(numbers)
}

fn parse_delta(value: &str) -> Result<(f64, f64), String> {
    let [dx, dy] = parse_numbers::<2>(value)?;
    Ok((dx, dy))
}
