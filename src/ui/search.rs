/// Address search form for the "Your own" view
use iced::widget::{button, column, container, text, text_input};
use iced::{Alignment, Color, Element, Length};
use rand::Rng;

use crate::Message;

/// Hex digits the accent color is drawn from; keeps it in a light range
const ACCENT_NIBBLES: [u8; 10] = [0xa, 0xb, 0xc, 0xd, 0xe, 0xf, 0x0, 0x1, 0x2, 0x3];

pub fn view<'a>(address: &str, accent: Color) -> Element<'a, Message> {
    let form = column![
        text_input("Enter address here", address)
            .on_input(Message::AddressChanged)
            .on_submit(Message::SubmitAddress)
            .padding(10)
            .width(Length::Fixed(300.0)),
        button(text("Submit").color(accent))
            .on_press(Message::SubmitAddress)
            .style(button::secondary)
            .width(Length::Fixed(300.0)),
        go_back(accent),
    ]
    .spacing(16)
    .align_x(Alignment::Center);

    container(form)
        .width(Length::Fill)
        .center_x(Length::Fill)
        .padding(24)
        .into()
}

/// Button that leaves the search view
pub fn go_back<'a>(accent: Color) -> Element<'a, Message> {
    button(text("Go Back").color(accent))
        .on_press(Message::GoBack)
        .style(button::secondary)
        .width(Length::Fixed(300.0))
        .into()
}

/// Random accent color for the form
pub fn random_accent() -> Color {
    let [r, g, b] = accent_rgb(&mut rand::rng());
    Color::from_rgb8(r, g, b)
}

fn accent_rgb<R: Rng>(rng: &mut R) -> [u8; 3] {
    let mut nibble = || ACCENT_NIBBLES[rng.random_range(0..ACCENT_NIBBLES.len())];
    [(); 3].map(|_| nibble() << 4 | nibble())
}
