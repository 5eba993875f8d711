//! Cairo-based rendering functions for strokes and stamps.

use super::color::Color;
use super::stamp::{ListNodeLayout, Stamp};
use crate::util;

/// Fills the whole target with a solid color.
///
/// Used when flattening the (transparent) canvas onto a background for export.
pub fn render_background(ctx: &cairo::Context, color: Color) {
    ctx.set_source_rgba(color.r, color.g, color.b, color.a);
    let _ = ctx.paint();
}

/// Renders one freehand segment from the previous pointer position to the current one.
///
/// Segments are stroked individually as the pointer moves, so round caps are
/// used to keep consecutive segments visually joined.
pub fn render_segment(
    ctx: &cairo::Context,
    from: (i32, i32),
    to: (i32, i32),
    color: Color,
    thick: f64,
) {
    ctx.set_source_rgba(color.r, color.g, color.b, color.a);
    ctx.set_line_width(thick);
    ctx.set_line_cap(cairo::LineCap::Round);
    ctx.set_line_join(cairo::LineJoin::Round);

    ctx.move_to(from.0 as f64, from.1 as f64);
    ctx.line_to(to.0 as f64, to.1 as f64);
    let _ = ctx.stroke();
}

/// Renders a single stamp to a Cairo context.
pub fn render_stamp(ctx: &cairo::Context, stamp: &Stamp) {
    match stamp {
        Stamp::Circle {
            cx,
            cy,
            radius,
            color,
            thick,
        } => render_circle(ctx, *cx, *cy, *radius, *color, *thick),
        Stamp::Rect {
            x,
            y,
            size,
            color,
            thick,
        } => render_rect(ctx, *x, *y, *size, *size, *color, *thick),
        Stamp::Arrow {
            x1,
            y1,
            x2,
            y2,
            color,
            thick,
            arrow_length,
            arrow_angle,
        } => render_arrow(
            ctx,
            (*x1, *y1),
            (*x2, *y2),
            *color,
            *thick,
            *arrow_length,
            *arrow_angle,
        ),
        Stamp::ListNode {
            layout,
            color,
            thick,
            arrow_length,
            arrow_angle,
        } => render_list_node(ctx, layout, *color, *thick, *arrow_length, *arrow_angle),
    }
}

fn render_circle(ctx: &cairo::Context, cx: f64, cy: f64, radius: f64, color: Color, thick: f64) {
    if radius <= 0.0 {
        return;
    }
    ctx.set_source_rgba(color.r, color.g, color.b, color.a);
    ctx.set_line_width(thick);
    ctx.new_sub_path();
    ctx.arc(cx, cy, radius, 0.0, 2.0 * std::f64::consts::PI);
    let _ = ctx.stroke();
}

fn render_rect(ctx: &cairo::Context, x: f64, y: f64, w: f64, h: f64, color: Color, thick: f64) {
    ctx.set_source_rgba(color.r, color.g, color.b, color.a);
    ctx.set_line_width(thick);
    ctx.set_line_join(cairo::LineJoin::Miter);
    ctx.rectangle(x, y, w, h);
    let _ = ctx.stroke();
}

fn render_line(ctx: &cairo::Context, from: (f64, f64), to: (f64, f64), color: Color, thick: f64) {
    ctx.set_source_rgba(color.r, color.g, color.b, color.a);
    ctx.set_line_width(thick);
    ctx.set_line_cap(cairo::LineCap::Round);
    ctx.move_to(from.0, from.1);
    ctx.line_to(to.0, to.1);
    let _ = ctx.stroke();
}

/// Render an arrow from `tail` to `tip` with a V head at the tip.
fn render_arrow(
    ctx: &cairo::Context,
    tail: (f64, f64),
    tip: (f64, f64),
    color: Color,
    thick: f64,
    arrow_length: f64,
    arrow_angle: f64,
) {
    render_line(ctx, tail, tip, color, thick);

    let [left, right] =
        util::calculate_arrowhead_custom(tip.0, tip.1, tail.0, tail.1, arrow_length, arrow_angle);
    render_line(ctx, tip, left, color, thick);
    render_line(ctx, tip, right, color, thick);
}

fn render_list_node(
    ctx: &cairo::Context,
    layout: &ListNodeLayout,
    color: Color,
    thick: f64,
    arrow_length: f64,
    arrow_angle: f64,
) {
    render_rect(
        ctx,
        layout.x,
        layout.y,
        layout.width,
        layout.height,
        color,
        thick,
    );
    render_line(
        ctx,
        (layout.divider_x, layout.y),
        (layout.divider_x, layout.y + layout.height),
        color,
        thick,
    );

    ctx.set_source_rgba(color.r, color.g, color.b, color.a);
    ctx.new_sub_path();
    ctx.arc(
        layout.dot.0,
        layout.dot.1,
        layout.dot_radius,
        0.0,
        2.0 * std::f64::consts::PI,
    );
    let _ = ctx.fill();

    render_arrow(
        ctx,
        layout.dot,
        layout.arrow_tip,
        color,
        thick,
        arrow_length,
        arrow_angle,
    );
}
