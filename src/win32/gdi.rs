use crate::color::Color;
use crate::geometry::{PointF, RectF, Size};
use crate::paint::{HorizontalAlign, Painter, TextLayout, Trimming, VerticalAlign};
use windows::Win32::Foundation::{COLORREF, RECT};
use windows::Win32::Graphics::Gdi::{
    AlphaBlend, CreateCompatibleBitmap, CreateCompatibleDC, CreatePen, CreateSolidBrush, DeleteDC,
    DeleteObject, DrawTextW, FillRect, GetStockObject, LineTo, MoveToEx, SelectObject, SetBkMode,
    SetTextColor, AC_SRC_OVER, BLENDFUNCTION, DEFAULT_GUI_FONT, DRAW_TEXT_FORMAT, DT_BOTTOM,
    DT_CENTER, DT_LEFT, DT_NOPREFIX, DT_RIGHT, DT_SINGLELINE, DT_TOP, DT_VCENTER, DT_WORD_ELLIPSIS,
    HDC, PS_SOLID, TRANSPARENT,
};

fn colorref(color: Color) -> COLORREF {
    COLORREF((color.r as u32) | ((color.g as u32) << 8) | ((color.b as u32) << 16))
}

fn mix(top: Color, under: Color) -> Color {
    let a = top.a as u32;
    let channel = |t: u8, u: u8| ((t as u32 * a + u as u32 * (255 - a)) / 255) as u8;
    Color::rgb(
        channel(top.r, under.r),
        channel(top.g, under.g),
        channel(top.b, under.b),
    )
}

fn to_rect(rect: RectF) -> RECT {
    RECT {
        left: rect.x.round() as i32,
        top: rect.y.round() as i32,
        right: rect.right().round() as i32,
        bottom: rect.bottom().round() as i32,
    }
}

/// [`Painter`] over a GDI device context.
///
/// GDI pens and text have no alpha, so translucent strokes are mixed with the
/// topmost opaque fill beneath them; translucent fills go through `AlphaBlend`.
pub struct GdiPainter {
    hdc: HDC,
    size: Size,
    fills: Vec<(RectF, Color)>,
}

impl GdiPainter {
    pub fn new(hdc: HDC, size: Size) -> Self {
        Self {
            hdc,
            size,
            fills: Vec::new(),
        }
    }

    fn underlay(&self, at: PointF) -> Color {
        self.fills
            .iter()
            .rev()
            .find(|(rect, _)| {
                at.x >= rect.x && at.x < rect.right() && at.y >= rect.y && at.y < rect.bottom()
            })
            .map(|(_, color)| *color)
            .unwrap_or(Color::WHITE)
    }

    fn solid(&self, color: Color, at: PointF) -> Color {
        if color.is_opaque() {
            color
        } else {
            mix(color, self.underlay(at))
        }
    }

    fn blend_fill(&self, rect: RECT, color: Color) {
        unsafe {
            let src = CreateCompatibleDC(self.hdc);
            if src.0.is_null() {
                return;
            }
            let bitmap = CreateCompatibleBitmap(self.hdc, 1, 1);
            let old = SelectObject(src, bitmap);
            let brush = CreateSolidBrush(colorref(color));
            let pixel = RECT {
                left: 0,
                top: 0,
                right: 1,
                bottom: 1,
            };
            FillRect(src, &pixel, brush);
            let blend = BLENDFUNCTION {
                BlendOp: AC_SRC_OVER as u8,
                BlendFlags: 0,
                SourceConstantAlpha: color.a,
                AlphaFormat: 0,
            };
            let _ = AlphaBlend(
                self.hdc,
                rect.left,
                rect.top,
                rect.right - rect.left,
                rect.bottom - rect.top,
                src,
                0,
                0,
                1,
                1,
                blend,
            );
            SelectObject(src, old);
            let _ = DeleteObject(brush);
            let _ = DeleteObject(bitmap);
            let _ = DeleteDC(src);
        }
    }

    fn segment(&self, from: PointF, to: PointF, color: Color, width: f32) {
        let mid = PointF::new((from.x + to.x) / 2.0, (from.y + to.y) / 2.0);
        let color = self.solid(color, mid);
        unsafe {
            let pen = CreatePen(PS_SOLID, width.round().max(1.0) as i32, colorref(color));
            let old = SelectObject(self.hdc, pen);
            let _ = MoveToEx(self.hdc, from.x.round() as i32, from.y.round() as i32, None);
            let _ = LineTo(self.hdc, to.x.round() as i32, to.y.round() as i32);
            SelectObject(self.hdc, old);
            let _ = DeleteObject(pen);
        }
    }
}

impl Painter for GdiPainter {
    fn clear(&mut self, color: Color) {
        self.fills.clear();
        let rect = RectF::new(0.0, 0.0, self.size.width as f32, self.size.height as f32);
        self.fill_rect(rect, color);
    }

    fn fill_rect(&mut self, rect: RectF, color: Color) {
        let native = to_rect(rect);
        if !color.is_opaque() {
            self.blend_fill(native, color);
            return;
        }
        unsafe {
            let brush = CreateSolidBrush(colorref(color));
            FillRect(self.hdc, &native, brush);
            let _ = DeleteObject(brush);
        }
        self.fills.push((rect, color));
    }

    fn line(&mut self, from: PointF, to: PointF, color: Color, width: f32) {
        self.segment(from, to, color, width);
    }

    fn stroke_rect(&mut self, rect: RectF, color: Color, width: f32) {
        let (l, t, r, b) = (rect.x, rect.y, rect.right(), rect.bottom());
        self.segment(PointF::new(l, t), PointF::new(r, t), color, width);
        self.segment(PointF::new(r, t), PointF::new(r, b), color, width);
        self.segment(PointF::new(r, b), PointF::new(l, b), color, width);
        // LineTo leaves out the last pixel; close the corner.
        self.segment(PointF::new(l, b), PointF::new(l, t - 1.0), color, width);
    }

    fn text(&mut self, text: &str, bounds: RectF, color: Color, layout: TextLayout) {
        let color = self.solid(color, PointF::new(bounds.x, bounds.y + bounds.height / 2.0));
        let mut wide: Vec<u16> = text.encode_utf16().collect();
        let mut rect = to_rect(bounds);
        let mut format = DT_SINGLELINE | DT_NOPREFIX;
        format |= match layout.align {
            HorizontalAlign::Near => DT_LEFT,
            HorizontalAlign::Center => DT_CENTER,
            HorizontalAlign::Far => DT_RIGHT,
        };
        format |= match layout.vertical {
            VerticalAlign::Near => DT_TOP,
            VerticalAlign::Center => DT_VCENTER,
            VerticalAlign::Far => DT_BOTTOM,
        };
        if layout.trimming == Trimming::EllipsisWord {
            format |= DT_WORD_ELLIPSIS;
        }
        unsafe {
            let old_font = SelectObject(self.hdc, GetStockObject(DEFAULT_GUI_FONT));
            SetBkMode(self.hdc, TRANSPARENT);
            SetTextColor(self.hdc, colorref(color));
            DrawTextW(self.hdc, &mut wide, &mut rect, DRAW_TEXT_FORMAT(format.0));
            SelectObject(self.hdc, old_font);
        }
    }
}
