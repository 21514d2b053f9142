use ratatui::style::{Color, Modifier, Style};

#[derive(Debug, Clone)]
pub struct Theme {
    // Overall background color to paint the full frame
    pub background_color: Color,
    // Chat message styles
    pub user_prefix_style: Style,
    pub user_text_style: Style,
    pub assistant_text_style: Style,
    pub system_text_style: Style,

    // Chrome
    pub title_style: Style,
    pub activity_indicator_style: Style,
    pub input_border_style: Style,
    pub input_title_style: Style,

    // Input area
    pub input_text_style: Style,
    pub input_cursor_style: Style,

    // Transient surfaces
    pub status_style: Style,
    pub selection_style: Style,
    pub dialog_title_style: Style,
    pub dialog_text_style: Style,
    pub dialog_hint_style: Style,
}

impl Theme {
    pub fn dark_default() -> Self {
        Theme {
            background_color: Color::Black,
            user_prefix_style: Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
            user_text_style: Style::default().fg(Color::Cyan),
            assistant_text_style: Style::default().fg(Color::White),
            system_text_style: Style::default().fg(Color::DarkGray),

            title_style: Style::default().fg(Color::Gray),
            activity_indicator_style: Style::default().fg(Color::White),
            input_border_style: Style::default().fg(Color::Gray),
            input_title_style: Style::default().fg(Color::Gray),

            input_text_style: Style::default().fg(Color::White),
            input_cursor_style: Style::default().add_modifier(Modifier::REVERSED),

            status_style: Style::default().fg(Color::Green),
            selection_style: Style::default().add_modifier(Modifier::REVERSED),
            dialog_title_style: Style::default().add_modifier(Modifier::BOLD),
            dialog_text_style: Style::default().fg(Color::White),
            dialog_hint_style: Style::default().fg(Color::DarkGray),
        }
    }

    pub fn light() -> Self {
        Theme {
            background_color: Color::White,
            user_prefix_style: Style::default()
                .fg(Color::Blue)
                .add_modifier(Modifier::BOLD),
            user_text_style: Style::default().fg(Color::Blue),
            assistant_text_style: Style::default().fg(Color::Black),
            system_text_style: Style::default().fg(Color::Gray),

            title_style: Style::default().fg(Color::DarkGray),
            activity_indicator_style: Style::default().fg(Color::Black),
            input_border_style: Style::default().fg(Color::DarkGray),
            input_title_style: Style::default().fg(Color::DarkGray),

            input_text_style: Style::default().fg(Color::Black),
            input_cursor_style: Style::default().add_modifier(Modifier::REVERSED),

            status_style: Style::default().fg(Color::Green),
            selection_style: Style::default().add_modifier(Modifier::REVERSED),
            dialog_title_style: Style::default().add_modifier(Modifier::BOLD),
            dialog_text_style: Style::default().fg(Color::Black),
            dialog_hint_style: Style::default().fg(Color::Gray),
        }
    }

    pub fn from_name(name: &str) -> Option<Theme> {
        match name.to_lowercase().as_str() {
            "dark" => Some(Theme::dark_default()),
            "light" => Some(Theme::light()),
            _ => None,
        }
    }
}
