use movesel::config::Config;
use movesel::document::{Document, Layer};
use movesel::input::{Editor, MouseButton, MoveSelectedTool};
use movesel::LayerHost;

fn editor_with_square() -> Editor {
    let mut document = Document::new(60, 40).unwrap();
    {
        let ctx = document.current_layer().context().unwrap();
        ctx.set_source_rgb(1.0, 1.0, 0.0);
        ctx.rectangle(10.0, 10.0, 20.0, 20.0);
        ctx.fill().unwrap();
    }
    document.select_rect(10.0, 10.0, 20.0, 20.0);
    Editor::new(document)
}

#[test]
fn floating_pixels_render_before_commit() {
    let mut editor = editor_with_square();
    editor
        .activate_tool(Box::new(MoveSelectedTool::default()))
        .unwrap();
    editor.on_mouse_press(MouseButton::Left, 20.0, 20.0).unwrap();
    editor.on_mouse_motion(45.0, 20.0).unwrap();

    // Base layer no longer holds the pixels, the flattened view still shows them.
    assert!(editor.document.current_layer().pixel(20, 20).unwrap().is_clear());
    let options = Config::default().render_options(false);
    let flat = Layer::from_surface("flat", editor.document.flatten(&options).unwrap());
    let moved = flat.pixel(40, 20).unwrap();
    assert_eq!((moved.r, moved.g, moved.a), (255, 255, 255));
    assert!(flat.pixel(15, 20).unwrap().is_clear());
}

#[test]
fn outline_follows_the_drag() {
    let mut editor = editor_with_square();
    editor
        .activate_tool(Box::new(MoveSelectedTool::default()))
        .unwrap();
    editor.on_mouse_press(MouseButton::Left, 20.0, 20.0).unwrap();
    editor.on_mouse_motion(45.0, 20.0).unwrap();
    editor.on_mouse_release(MouseButton::Left, 45.0, 20.0).unwrap();
    editor.deactivate_tool().unwrap();

    let options = Config::default().render_options(true);
    let flat = Layer::from_surface("flat", editor.document.flatten(&options).unwrap());
    // The old outline position is empty; the new one is stroked.
    assert!(flat.pixel(10, 5).unwrap().is_clear());
    assert!(flat.pixel(10, 20).unwrap().is_clear());
    assert!(!flat.pixel(55, 20).unwrap().is_clear());
}
