use gantt_protocol::{Paint, ThemeToken};

/// Resolved RGBA color for egui rendering.
#[derive(Debug, Clone, Copy)]
pub struct ResolvedColor {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl ResolvedColor {
    const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    pub fn to_color32(self) -> egui::Color32 {
        egui::Color32::from_rgba_unmultiplied(self.r, self.g, self.b, self.a)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum ThemeMode {
    #[default]
    Light,
    Dark,
}

impl ThemeMode {
    pub fn is_dark(self) -> bool {
        self == ThemeMode::Dark
    }

    pub fn toggled(self) -> Self {
        match self {
            ThemeMode::Light => ThemeMode::Dark,
            ThemeMode::Dark => ThemeMode::Light,
        }
    }

    pub fn visuals(self) -> egui::Visuals {
        match self {
            ThemeMode::Light => egui::Visuals::light(),
            ThemeMode::Dark => egui::Visuals::dark(),
        }
    }
}

pub fn resolve(token: ThemeToken, mode: ThemeMode) -> egui::Color32 {
    match mode {
        ThemeMode::Dark => resolve_dark(token),
        ThemeMode::Light => resolve_light(token),
    }
    .to_color32()
}

/// Group colors pass through; tokens follow the theme.
pub fn resolve_paint(paint: Paint, mode: ThemeMode) -> egui::Color32 {
    match paint {
        Paint::Theme(token) => resolve(token, mode),
        Paint::Color(c) => egui::Color32::from_rgb(c.r, c.g, c.b),
    }
}

fn resolve_light(token: ThemeToken) -> ResolvedColor {
    use ThemeToken::*;
    match token {
        Background => ResolvedColor::rgb(0xff, 0xff, 0xff),
        GridLine => ResolvedColor::rgba(0x00, 0x00, 0x00, 0x40),
        AxisLine | AxisText => ResolvedColor::rgb(0x00, 0x00, 0x00),
        BlockBorder => ResolvedColor::rgba(0x00, 0x00, 0x00, 0x60),
        CursorHalo => ResolvedColor::rgb(0x00, 0x00, 0x00),
        CursorCore => ResolvedColor::rgb(0xff, 0xff, 0xff),
    }
}

fn resolve_dark(token: ThemeToken) -> ResolvedColor {
    use ThemeToken::*;
    match token {
        Background => ResolvedColor::rgb(0x18, 0x18, 0x18),
        GridLine => ResolvedColor::rgba(0xff, 0xff, 0xff, 0x40),
        AxisLine | AxisText => ResolvedColor::rgb(0xec, 0xec, 0xec),
        // Group colors stay light in both themes, so the border stays dark.
        BlockBorder => ResolvedColor::rgba(0x00, 0x00, 0x00, 0x60),
        CursorHalo => ResolvedColor::rgb(0x00, 0x00, 0x00),
        CursorCore => ResolvedColor::rgb(0xff, 0xff, 0xff),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gantt_protocol::Color;

    #[test]
    fn group_colors_ignore_theme() {
        let paint = Paint::Color(Color::rgb(0xff, 0x66, 0x66));
        assert_eq!(
            resolve_paint(paint, ThemeMode::Light),
            resolve_paint(paint, ThemeMode::Dark)
        );
    }

    #[test]
    fn cursor_core_contrasts_with_halo() {
        for mode in [ThemeMode::Light, ThemeMode::Dark] {
            assert_ne!(
                resolve(ThemeToken::CursorHalo, mode),
                resolve(ThemeToken::CursorCore, mode)
            );
        }
    }

    #[test]
    fn toggle_round_trips() {
        assert_eq!(ThemeMode::Light.toggled().toggled(), ThemeMode::Light);
        assert!(ThemeMode::Light.toggled().is_dark());
    }
}
