//! SVG renderer: converts `RenderCommand` lists into standalone SVG strings.

use std::fmt::Write as _;

use gantt_protocol::{Paint, RenderCommand, Surface, TextAlign, ThemeToken};

/// Render one frame as an SVG document with the light palette.
pub fn render_svg(commands: &[RenderCommand], surface: Surface) -> String {
    render_svg_themed(commands, surface, false)
}

/// Render one frame as an SVG document. `dark` selects the palette for
/// theme tokens; group colors are written as they are.
pub fn render_svg_themed(commands: &[RenderCommand], surface: Surface, dark: bool) -> String {
    let Surface { width, height } = surface;
    let mut svg = String::with_capacity(commands.len() * 120);
    // Writing into a String cannot fail; results are ignored below.
    let _ = write!(
        svg,
        r#"<svg xmlns="http://www.w3.org/2000/svg" viewBox="0 0 {width} {height}" width="{width}" height="{height}" style="font-family:sans-serif">"#,
    );

    let mut clips = 0usize;
    let mut clip_open = false;

    for cmd in commands {
        match cmd {
            RenderCommand::Clear { rect } => {
                let _ = write!(
                    svg,
                    r#"<rect x="{}" y="{}" width="{}" height="{}" fill="{}"/>"#,
                    rect.x,
                    rect.y,
                    rect.w,
                    rect.h,
                    resolve_token(ThemeToken::Background, dark),
                );
            }
            RenderCommand::DrawRect { rect, fill, stroke } => {
                let fill = fill.map_or_else(|| "none".to_string(), |p| resolve(p, dark));
                let _ = write!(
                    svg,
                    r#"<rect x="{}" y="{}" width="{}" height="{}" fill="{fill}""#,
                    rect.x, rect.y, rect.w, rect.h,
                );
                if let Some(stroke) = stroke {
                    let _ = write!(
                        svg,
                        r#" stroke="{}" stroke-width="{}""#,
                        resolve(stroke.paint, dark),
                        stroke.width,
                    );
                }
                svg.push_str("/>");
            }
            RenderCommand::DrawLine {
                from,
                to,
                paint,
                width: line_width,
            } => {
                let _ = write!(
                    svg,
                    r#"<line x1="{}" y1="{}" x2="{}" y2="{}" stroke="{}" stroke-width="{line_width}"/>"#,
                    from.x,
                    from.y,
                    to.x,
                    to.y,
                    resolve(*paint, dark),
                );
            }
            RenderCommand::DrawText {
                position,
                text,
                paint,
                font_size,
                align,
            } => {
                let anchor = match align {
                    TextAlign::Left => "start",
                    TextAlign::Center => "middle",
                    TextAlign::Right => "end",
                };
                let _ = write!(
                    svg,
                    r#"<text x="{}" y="{}" fill="{}" font-size="{font_size}" text-anchor="{anchor}">{}</text>"#,
                    position.x,
                    position.y,
                    resolve(*paint, dark),
                    escape_xml(text),
                );
            }
            RenderCommand::SetClip { rect } => {
                if clip_open {
                    svg.push_str("</g>");
                }
                clips += 1;
                let _ = write!(
                    svg,
                    r#"<clipPath id="clip{clips}"><rect x="{}" y="{}" width="{}" height="{}"/></clipPath><g clip-path="url(#clip{clips})">"#,
                    rect.x, rect.y, rect.w, rect.h,
                );
                clip_open = true;
            }
            RenderCommand::ClearClip => {
                if clip_open {
                    svg.push_str("</g>");
                    clip_open = false;
                }
            }
            RenderCommand::BeginGroup { id } => {
                let _ = write!(svg, r#"<g id="{}">"#, escape_xml(id));
            }
            RenderCommand::EndGroup => svg.push_str("</g>"),
        }
    }

    if clip_open {
        svg.push_str("</g>");
    }
    svg.push_str("</svg>");
    svg
}

fn resolve(paint: Paint, dark: bool) -> String {
    match paint {
        Paint::Theme(token) => resolve_token(token, dark).to_string(),
        Paint::Color(color) => color.to_hex(),
    }
}

fn resolve_token(token: ThemeToken, dark: bool) -> &'static str {
    if dark {
        match token {
            ThemeToken::Background => "#181818",
            ThemeToken::GridLine => "#ffffff40",
            ThemeToken::AxisLine | ThemeToken::AxisText => "#ececec",
            ThemeToken::BlockBorder => "#00000060",
            ThemeToken::CursorHalo => "#000000",
            ThemeToken::CursorCore => "#ffffff",
        }
    } else {
        match token {
            ThemeToken::Background => "#ffffff",
            ThemeToken::GridLine => "#00000040",
            ThemeToken::AxisLine | ThemeToken::AxisText => "#000000",
            ThemeToken::BlockBorder => "#00000060",
            ThemeToken::CursorHalo => "#000000",
            ThemeToken::CursorCore => "#ffffff",
        }
    }
}

fn escape_xml(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&apos;")
}

#[cfg(test)]
mod tests {
    use super::*;
    use gantt_protocol::{Color, Point, Rect, Stroke};

    fn surface() -> Surface {
        Surface::new(800.0, 100.0)
    }

    #[test]
    fn basic_svg_output() {
        let commands = vec![
            RenderCommand::Clear {
                rect: surface().bounds(),
            },
            RenderCommand::DrawRect {
                rect: Rect::new(10.0, 20.0, 100.0, 21.0),
                fill: Some(Paint::Color(Color::rgb(0xff, 0x66, 0x66))),
                stroke: Some(Stroke::new(ThemeToken::BlockBorder, 1.0)),
            },
        ];
        let svg = render_svg(&commands, surface());
        assert!(svg.starts_with("<svg"));
        assert!(svg.ends_with("</svg>"));
        assert!(svg.contains(r##"fill="#ff6666""##));
        assert!(svg.contains(r##"stroke="#00000060""##));
        assert!(svg.contains(r##"fill="#ffffff""##));
    }

    #[test]
    fn clip_becomes_clip_path() {
        let commands = vec![
            RenderCommand::BeginGroup {
                id: "blocks".into(),
            },
            RenderCommand::SetClip {
                rect: Rect::new(140.0, 1.0, 600.0, 64.0),
            },
            RenderCommand::DrawRect {
                rect: Rect::new(100.0, 6.5, 700.0, 21.0),
                fill: None,
                stroke: None,
            },
            RenderCommand::ClearClip,
            RenderCommand::EndGroup,
        ];
        let svg = render_svg(&commands, surface());
        assert!(svg.contains(r#"<clipPath id="clip1">"#));
        assert!(svg.contains(r#"<g clip-path="url(#clip1)">"#));
        assert!(svg.contains(r#"fill="none""#));
        assert_eq!(svg.matches("<g").count(), svg.matches("</g>").count());
    }

    #[test]
    fn unclosed_clip_is_closed() {
        let commands = vec![RenderCommand::SetClip {
            rect: Rect::new(0.0, 0.0, 10.0, 10.0),
        }];
        let svg = render_svg(&commands, surface());
        assert!(svg.ends_with("</g></svg>"));
    }

    #[test]
    fn text_is_escaped_and_anchored() {
        let commands = vec![RenderCommand::DrawText {
            position: Point::new(137.0, 22.0),
            text: "io<1> & co".into(),
            paint: ThemeToken::AxisText.into(),
            font_size: 14.0,
            align: TextAlign::Right,
        }];
        let svg = render_svg_themed(&commands, surface(), true);
        assert!(svg.contains("io&lt;1&gt; &amp; co"));
        assert!(svg.contains(r#"text-anchor="end""#));
        assert!(svg.contains("#ececec"));
    }
}
