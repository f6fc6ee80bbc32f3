use ratatui::style::Color;

#[derive(Debug, Clone)]
pub struct Theme {
    pub name: &'static str,
    pub header_accent_bg: Color,
    pub header_accent_fg: Color,
    pub statusbar_bg: Color,
    pub overlay_border: Color,
    pub text_primary: Color,
    pub text_secondary: Color,
    pub no_data: Color,
    pub pill_key_bg: Color,
    pub pill_key_fg: Color,
    pub pill_desc_fg: Color,
    pub surface_bg: Color,
    pub gauge_unfilled: Color,
    pub download: Color,
    pub upload: Color,
    pub heat_colors: [Color; 4],
}

impl Theme {
    pub fn from_config(theme_name: &str) -> Self {
        match theme_name.to_lowercase().as_str() {
            "light" => Self::light(),
            _ => Self::dark(),
        }
    }

    /// Gauge fill for a usage percentage: calm below 50, warning up to 75,
    /// hot up to 90, critical above.
    pub fn heat_color(&self, percent: f64) -> Color {
        if percent > 90.0 {
            self.heat_colors[3]
        } else if percent > 75.0 {
            self.heat_colors[2]
        } else if percent > 50.0 {
            self.heat_colors[1]
        } else {
            self.heat_colors[0]
        }
    }

    pub fn dark() -> Self {
        Theme {
            name: "dark",
            header_accent_bg: Color::Green,
            header_accent_fg: Color::Black,
            statusbar_bg: Color::DarkGray,
            overlay_border: Color::DarkGray,
            text_primary: Color::White,
            text_secondary: Color::Gray,
            no_data: Color::Rgb(248, 113, 113),
            pill_key_bg: Color::Yellow,
            pill_key_fg: Color::Black,
            pill_desc_fg: Color::White,
            surface_bg: Color::DarkGray,
            gauge_unfilled: Color::Rgb(35, 40, 51),
            download: Color::Rgb(103, 232, 249),
            upload: Color::Rgb(251, 146, 60),
            heat_colors: [
                Color::Rgb(16, 185, 129),
                Color::Rgb(234, 179, 8),
                Color::Rgb(249, 115, 22),
                Color::Rgb(239, 68, 68),
            ],
        }
    }

    pub fn light() -> Self {
        Theme {
            name: "light",
            header_accent_bg: Color::Blue,
            header_accent_fg: Color::White,
            statusbar_bg: Color::Rgb(220, 220, 220),
            overlay_border: Color::Rgb(150, 150, 150),
            text_primary: Color::Black,
            text_secondary: Color::DarkGray,
            no_data: Color::Red,
            pill_key_bg: Color::Blue,
            pill_key_fg: Color::White,
            pill_desc_fg: Color::Black,
            surface_bg: Color::Rgb(200, 200, 200),
            gauge_unfilled: Color::Rgb(200, 200, 200),
            download: Color::Rgb(70, 130, 180),
            upload: Color::Rgb(200, 120, 40),
            heat_colors: [
                Color::Rgb(100, 180, 100),
                Color::Rgb(220, 180, 50),
                Color::Rgb(220, 120, 80),
                Color::Rgb(200, 60, 60),
            ],
        }
    }
}
