//! Key tips panel.
use crate::config::KeybindingsConfig;
use crate::draw::Color;

// ============================================================================
// Layout constants (not configurable)
// ============================================================================

/// Panel left edge, measured from the right screen edge
const TIPS_RIGHT_OFFSET: f64 = 300.0;
/// Baseline of the first tip
const TIPS_TOP: f64 = 100.0;
/// Line advance as a multiple of the font size
const TIPS_LINE_SPACING: f64 = 1.6;
/// Padding around the panel background
const TIPS_PADDING: f64 = 12.0;
/// Panel background
const TIPS_BG: Color = Color::new(1.0, 1.0, 1.0, 0.6);

/// Hint shown for the fixed arrow-key nudge controls
pub const ARROW_TIP: &str = "Arrow keys resize selection";

/// One line per action (first binding only) plus the arrow-key hint.
///
/// Actions with no binding are left out.
pub fn tip_lines(keybindings: &KeybindingsConfig) -> Vec<String> {
    let mut lines: Vec<String> = keybindings
        .entries()
        .iter()
        .filter_map(|(action, bindings)| {
            let first = bindings.first()?;
            let label = crate::config::KeyBinding::parse(first)
                .map(|binding| binding.display())
                .unwrap_or_else(|_| first.clone());
            Some(format!("{}: {}", label, action.label()))
        })
        .collect();
    lines.push(ARROW_TIP.to_string());
    lines
}

/// Render the tips panel along the right side of the screen.
pub fn render_tips(
    ctx: &cairo::Context,
    lines: &[String],
    text_color: Color,
    font_size: f64,
    screen_width: u32,
) {
    if lines.is_empty() {
        return;
    }

    let _ = ctx.save();
    ctx.set_antialias(cairo::Antialias::Best);

    let layout = pangocairo::functions::create_layout(ctx);
    let font_desc = pango::FontDescription::from_string(&format!("Sans Bold {}", font_size));
    layout.set_font_description(Some(&font_desc));
    layout.set_spacing((font_size * (TIPS_LINE_SPACING - 1.0) * pango::SCALE as f64) as i32);
    layout.set_text(&lines.join("\n"));

    let (_ink, logical) = layout.pixel_extents();
    let x = (screen_width as f64 - TIPS_RIGHT_OFFSET).max(0.0);
    let top = TIPS_TOP - layout.baseline() as f64 / pango::SCALE as f64;

    TIPS_BG.set_source(ctx);
    ctx.rectangle(
        x - TIPS_PADDING,
        top - TIPS_PADDING,
        logical.width() as f64 + TIPS_PADDING * 2.0,
        logical.height() as f64 + TIPS_PADDING * 2.0,
    );
    let _ = ctx.fill();

    text_color.set_source(ctx);
    ctx.move_to(x, top);
    pangocairo::functions::show_layout(ctx, &layout);

    let _ = ctx.restore();
}
