// Render a single title card to PNG, for checking fonts and sizes without encoding a video

use slideshow_compositor::{
    config::Config,
    text::{TextRenderer, TextStyle},
};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let mut args = std::env::args().skip(1);
    let font_path = args.next().ok_or("usage: title_card <font.ttf> [text] [out.png]")?;
    let defaults = Config::default();
    let text = args.next().unwrap_or(defaults.title.text.clone());
    let output = args.next().unwrap_or_else(|| "title_card.png".to_string());

    println!("🔤 Rendering title card");
    println!("   Font: {}", font_path);
    println!("   Text: {}", text);

    let renderer = TextRenderer::from_file(&font_path)?;
    let style = TextStyle {
        font_size: defaults.title.font_size,
        text_color: defaults.title.text_color,
        background_color: defaults.title.background_color,
        canvas: defaults.video.params.resolution,
    };

    let (w, h) = renderer.measure(&text, style.font_size);
    println!("   Text box: {}x{} on {}x{}", w, h, style.canvas.0, style.canvas.1);
    if w > style.canvas.0 {
        println!("   ⚠️  Text is wider than the canvas and will be clipped");
    }

    let frame = renderer.render(&text, &style)?;
    frame.save_png(&output)?;
    println!("   📁 Saved to: {}", output);

    Ok(())
}
