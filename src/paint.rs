//! Scene building for the owner-drawn chrome.
//!
//! Painting is split in two: [`build_scene`] turns the chrome state into a
//! list of [`DrawCommand`]s and a [`Painter`] backend replays them. The scene
//! depends on nothing but its inputs, so it can be inspected in tests.

use crate::buttons::{ButtonPhase, ButtonState, ChromeButton};
use crate::color::Color;
use crate::geometry::{PointF, Rect, RectF};
use crate::layout::ChromeLayout;

/// Overlay under a hovered caption button (about 8% black).
pub const HOVER_OVERLAY: Color = Color::rgba(0, 0, 0, 20);
/// Overlay under a pressed caption button (about 12% black).
pub const PRESSED_OVERLAY: Color = Color::rgba(0, 0, 0, 30);
/// Alpha of glyphs and title text while the window is inactive.
pub const INACTIVE_ALPHA: u8 = 97;

const GLYPH_START: f32 = 0.33;
const GLYPH_END: f32 = 0.66;
const GLYPH_MIDDLE: f32 = 0.50;
const GLYPH_BOX: f32 = 0.35;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum HorizontalAlign {
    #[default]
    Near,
    Center,
    Far,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum VerticalAlign {
    Near,
    #[default]
    Center,
    Far,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Trimming {
    None,
    #[default]
    EllipsisWord,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TextLayout {
    pub align: HorizontalAlign,
    pub vertical: VerticalAlign,
    pub trimming: Trimming,
}

#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    Clear(Color),
    FillRect {
        rect: RectF,
        color: Color,
    },
    Line {
        from: PointF,
        to: PointF,
        color: Color,
        width: f32,
    },
    StrokeRect {
        rect: RectF,
        color: Color,
        width: f32,
    },
    Text {
        text: String,
        bounds: RectF,
        color: Color,
        layout: TextLayout,
    },
}

/// 2D drawing backend.
pub trait Painter {
    fn clear(&mut self, color: Color);
    fn fill_rect(&mut self, rect: RectF, color: Color);
    fn line(&mut self, from: PointF, to: PointF, color: Color, width: f32);
    fn stroke_rect(&mut self, rect: RectF, color: Color, width: f32);
    fn text(&mut self, text: &str, bounds: RectF, color: Color, layout: TextLayout);
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct Scene {
    commands: Vec<DrawCommand>,
}

impl Scene {
    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    pub fn push(&mut self, command: DrawCommand) {
        self.commands.push(command);
    }

    pub fn replay(&self, painter: &mut dyn Painter) {
        for command in &self.commands {
            match command {
                DrawCommand::Clear(color) => painter.clear(*color),
                DrawCommand::FillRect { rect, color } => painter.fill_rect(*rect, *color),
                DrawCommand::Line {
                    from,
                    to,
                    color,
                    width,
                } => painter.line(*from, *to, *color, *width),
                DrawCommand::StrokeRect { rect, color, width } => {
                    painter.stroke_rect(*rect, *color, *width)
                }
                DrawCommand::Text {
                    text,
                    bounds,
                    color,
                    layout,
                } => painter.text(text, *bounds, *color, *layout),
            }
        }
    }

    fn fill(&mut self, rect: RectF, color: Color) {
        self.push(DrawCommand::FillRect { rect, color });
    }

    fn line(&mut self, from: PointF, to: PointF, color: Color, width: f32) {
        self.push(DrawCommand::Line {
            from,
            to,
            color,
            width,
        });
    }

    fn stroke(&mut self, rect: RectF, color: Color, width: f32) {
        self.push(DrawCommand::StrokeRect { rect, color, width });
    }
}

/// Everything a frame of chrome depends on.
#[derive(Debug, Clone, Copy)]
pub struct ChromeVisuals<'a> {
    pub layout: &'a ChromeLayout,
    pub title: &'a str,
    pub backdrop_color: Color,
    pub title_bar_color: Color,
    pub border_color: Color,
    /// Contrast color picked for the title bar.
    pub text_color: Color,
    pub button_state: ButtonState,
    pub maximized: bool,
    pub active: bool,
}

impl ChromeVisuals<'_> {
    pub fn foreground(&self) -> Color {
        if self.active {
            self.text_color
        } else {
            self.text_color.with_alpha(INACTIVE_ALPHA)
        }
    }

    fn overlay_for(&self, button: ChromeButton) -> Option<Color> {
        self.button_state.phase_of(button).map(|phase| match phase {
            ButtonPhase::Hover => HOVER_OVERLAY,
            ButtonPhase::Pressed => PRESSED_OVERLAY,
        })
    }
}

pub fn build_scene(visuals: &ChromeVisuals<'_>) -> Scene {
    let mut scene = Scene::default();
    let layout = visuals.layout;

    scene.push(DrawCommand::Clear(visuals.backdrop_color));
    scene.fill(layout.title_bar().to_f32(), visuals.title_bar_color);
    push_border(&mut scene, visuals);

    for button in ChromeButton::ALL {
        if let (Some(slot), Some(overlay)) = (layout.button_bounds(button), visuals.overlay_for(button)) {
            scene.fill(slot.to_f32(), overlay);
        }
    }

    let pen = layout.scale().scale_f(1.0);
    let fg = visuals.foreground();
    if let Some(slot) = layout.button_bounds(ChromeButton::Minimize) {
        push_minimize_glyph(&mut scene, layout, slot, fg, pen);
    }
    if let Some(slot) = layout.button_bounds(ChromeButton::Maximize) {
        push_maximize_glyph(&mut scene, visuals, slot, fg, pen);
    }
    if let Some(slot) = layout.button_bounds(ChromeButton::Close) {
        push_close_glyph(&mut scene, layout, slot, fg, pen);
    }

    push_title(&mut scene, visuals, fg);
    scene
}

fn push_border(scene: &mut Scene, visuals: &ChromeVisuals<'_>) {
    let size = visuals.layout.window_size();
    let (w, h) = (size.width as f32, size.height as f32);
    let color = visuals.border_color;
    let width = visuals.layout.border_width() as f32;
    if width <= 0.0 {
        return;
    }
    scene.line(PointF::new(0.0, 0.0), PointF::new(0.0, h), color, width);
    scene.line(PointF::new(1.0, h - 1.0), PointF::new(w - 1.0, h - 1.0), color, width);
    scene.line(PointF::new(w - 1.0, h - 2.0), PointF::new(w - 1.0, 1.0), color, width);
    scene.line(PointF::new(w - 1.0, 0.0), PointF::new(1.0, 0.0), color, width);
}

/// Horizontal inset that centers a square glyph box in a wider slot.
fn glyph_inset(layout: &ChromeLayout) -> f32 {
    (layout.button_width() - layout.title_bar_height()) as f32 / 2.0
}

fn frac(height: i32, fraction: f32) -> f32 {
    (height as f32 * fraction).floor()
}

fn push_minimize_glyph(scene: &mut Scene, layout: &ChromeLayout, slot: Rect, color: Color, pen: f32) {
    let h = slot.height as f32;
    let x = slot.x as f32 + glyph_inset(layout);
    let y = slot.y as f32 + h * GLYPH_MIDDLE;
    scene.line(
        PointF::new(x + h * GLYPH_START, y),
        PointF::new(x + h * GLYPH_END, y),
        color,
        pen,
    );
}

fn push_maximize_glyph(
    scene: &mut Scene,
    visuals: &ChromeVisuals<'_>,
    slot: Rect,
    color: Color,
    pen: f32,
) {
    let layout = visuals.layout;
    let x = slot.x as f32 + glyph_inset(layout) + frac(slot.height, GLYPH_START);
    let y = slot.y as f32 + frac(slot.height, GLYPH_START);
    let side = frac(slot.height, GLYPH_BOX);

    if !visuals.maximized {
        scene.stroke(RectF::new(x, y, side, side), color, pen);
        return;
    }

    // Restore icon: a back square up-right, a front square down-left whose
    // interior hides the back square's lines.
    let offset = layout.scale().factor();
    scene.stroke(RectF::new(x + offset, y - offset, side, side), color, pen);
    let front = RectF::new(x - offset, y + offset, side, side);
    scene.fill(front, visuals.title_bar_color);
    if let Some(overlay) = visuals.overlay_for(ChromeButton::Maximize) {
        scene.fill(front, overlay);
    }
    scene.stroke(front, color, pen);
}

fn push_close_glyph(scene: &mut Scene, layout: &ChromeLayout, slot: Rect, color: Color, pen: f32) {
    let x = slot.x as f32 + glyph_inset(layout);
    let y = slot.y as f32;
    let near = frac(slot.height, GLYPH_START);
    let far = frac(slot.height, GLYPH_END);
    scene.line(
        PointF::new(x + near, y + near),
        PointF::new(x + far, y + far),
        color,
        pen,
    );
    scene.line(
        PointF::new(x + far, y + near),
        PointF::new(x + near, y + far),
        color,
        pen,
    );
}

fn push_title(scene: &mut Scene, visuals: &ChromeVisuals<'_>, color: Color) {
    let layout = visuals.layout;
    let bar = layout.title_bar();
    let padding = layout.title_padding();
    let width = bar.width as f32 - padding - layout.button_cluster_width() as f32;
    if visuals.title.is_empty() || width <= 0.0 {
        return;
    }
    scene.push(DrawCommand::Text {
        text: visuals.title.to_string(),
        bounds: RectF::new(padding, bar.y as f32, width, bar.height as f32),
        color,
        layout: TextLayout::default(),
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::{DpiScale, Size};
    use crate::settings::ChromeSettings;

    fn layout() -> ChromeLayout {
        let settings = ChromeSettings::default();
        let mut layout = ChromeLayout::new(&settings, DpiScale::new(96));
        layout.resize(&settings, Size::new(400, 300));
        layout
    }

    fn visuals(layout: &ChromeLayout) -> ChromeVisuals<'_> {
        ChromeVisuals {
            layout,
            title: "Demo",
            backdrop_color: Color::SNOW,
            title_bar_color: Color::DARK_SLATE_GRAY,
            border_color: Color::DARK_SLATE_GRAY,
            text_color: Color::WHITE,
            button_state: ButtonState::None,
            maximized: false,
            active: true,
        }
    }

    #[test]
    fn scene_starts_with_backdrop_and_title_bar() {
        let layout = layout();
        let scene = build_scene(&visuals(&layout));
        assert_eq!(scene.commands()[0], DrawCommand::Clear(Color::SNOW));
        assert_eq!(
            scene.commands()[1],
            DrawCommand::FillRect {
                rect: RectF::new(0.0, 0.0, 400.0, 28.0),
                color: Color::DARK_SLATE_GRAY
            }
        );
    }

    #[test]
    fn title_is_clipped_before_buttons() {
        let layout = layout();
        let scene = build_scene(&visuals(&layout));
        let text = scene
            .commands()
            .iter()
            .find_map(|c| match c {
                DrawCommand::Text { bounds, .. } => Some(*bounds),
                _ => None,
            })
            .expect("title text");
        assert_eq!(text, RectF::new(14.0, 0.0, 400.0 - 14.0 - 126.0, 28.0));
    }

    #[test]
    fn inactive_window_dims_foreground() {
        let layout = layout();
        let mut v = visuals(&layout);
        v.active = false;
        assert_eq!(v.foreground(), Color::rgba(255, 255, 255, INACTIVE_ALPHA));
    }
}
