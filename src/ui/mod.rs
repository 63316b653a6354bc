/// UI building blocks
///
/// Every function here is a pure view over state owned by `ArtGallery`;
/// interaction is reported back through `Message`.
use iced::widget::{button, container, row, text};
use iced::{Alignment, Element, Length, Theme};

use crate::{Message, ViewKind};

pub mod dialog;
pub mod pager;
pub mod search;
pub mod tile;

/// Colors shared by tiles, placeholders and the dialog
pub mod palette {
    use iced::Color;

    pub const CAPTION: Color = rgb(0.6, 0.6, 0.6);
    pub const PLACEHOLDER_BG: Color = rgb(0.2, 0.2, 0.2);
    pub const PLACEHOLDER_BORDER: Color = rgb(0.333, 0.333, 0.333);
    pub const LOADING: Color = rgb(0.85, 0.2, 0.2);
    pub const BACKDROP: Color = Color {
        r: 0.0,
        g: 0.0,
        b: 0.0,
        a: 0.95,
    };

    const fn rgb(r: f32, g: f32, b: f32) -> Color {
        Color { r, g, b, a: 1.0 }
    }
}

/// View switcher shown above every gallery
pub fn nav<'a>(current: ViewKind) -> Element<'a, Message> {
    let tab = |label: &'a str, view: ViewKind| {
        let style: fn(&Theme, button::Status) -> button::Style = if view == current {
            button::primary
        } else {
            button::text
        };
        button(text(label))
            .on_press(Message::SwitchView(view))
            .style(style)
            .padding(8)
    };

    container(
        row![
            tab("Random", ViewKind::Random),
            tab("Latest", ViewKind::Latest),
            tab("Your own", ViewKind::Yours),
        ]
        .spacing(8)
        .align_y(Alignment::Center),
    )
    .width(Length::Fill)
    .center_x(Length::Fill)
    .padding(12)
    .into()
}

/// Full-area loading indicator
pub fn loading<'a>() -> Element<'a, Message> {
    container(text("Loading…").size(32).color(palette::LOADING))
        .width(Length::Fill)
        .height(Length::Fill)
        .center_x(Length::Fill)
        .center_y(Length::Fill)
        .into()
}
