/// Detail dialog for a single record
///
/// Stateless: the gallery decides which record is shown and closes it.
use iced::widget::{
    button, center, column, container, horizontal_rule, mouse_area, opaque, scrollable, stack,
    text,
};
use iced::{Element, Length};

use crate::config::Settings;
use crate::date::{format_date, INVALID_DATE};
use crate::media::kind::MediaKind;
use crate::media::uri::Gateway;
use crate::state::data::ArtRecord;
use crate::ui::palette;
use crate::ui::tile::{preview_frame, TileState};
use crate::Message;

/// Edge of the enlarged media frame
pub const DIALOG_MEDIA_SIZE: f32 = 500.0;

/// Text lines shown under the enlarged media
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DetailText {
    pub title: String,
    pub minted: String,
    pub supply: String,
    pub description: String,
}

impl DetailText {
    pub fn from_record(record: &ArtRecord) -> Self {
        Self {
            title: format!("Title: {}", record.name.as_deref().unwrap_or_default()),
            minted: format!(
                "Minted: {}",
                record
                    .timestamp
                    .as_deref()
                    .map(format_date)
                    .unwrap_or_else(|| INVALID_DATE.to_string())
            ),
            supply: format!(
                "Total Supply: {}",
                record.supply.map(|s| s.to_string()).unwrap_or_default()
            ),
            description: format!(
                "Description: {}",
                record.description.as_deref().unwrap_or_default()
            ),
        }
    }
}

/// Lay `content` over `base` on a dark backdrop; clicking the backdrop
/// sends `on_blur`.
pub fn modal<'a>(
    base: impl Into<Element<'a, Message>>,
    content: impl Into<Element<'a, Message>>,
    on_blur: Message,
) -> Element<'a, Message> {
    stack![
        base.into(),
        opaque(
            mouse_area(center(opaque(content)).style(|_theme| container::Style {
                background: Some(palette::BACKDROP.into()),
                ..container::Style::default()
            }))
            .on_press(on_blur)
        )
    ]
    .into()
}

/// Dialog body for `record`
pub fn view<'a>(
    record: &ArtRecord,
    preview: Option<&TileState>,
    gateway: &Gateway,
    settings: &Settings,
) -> Element<'a, Message> {
    let kind = MediaKind::classify(record);
    let enlarged = mouse_area(preview_frame(preview, kind, DIALOG_MEDIA_SIZE))
        .on_press(Message::CloseDetail);
    let asset = gateway.resolve(record.primary_uri());

    let mut body = column![enlarged].spacing(8).padding(8);

    match kind {
        MediaKind::EmbeddedDocument => {
            // Interactive pieces get the embed surface only
            body = body
                .push(open_button("Open interactive piece", asset))
                .push(close_button());
            return frame(body);
        }
        MediaKind::Video => {
            body = body.push(open_button("▶ Play video", asset));
        }
        _ => {}
    }

    let lines = DetailText::from_record(record);
    body = body
        .push(text(lines.title).size(32))
        .push(text(lines.minted))
        .push(text(lines.supply))
        .push(horizontal_rule(1));

    if let Some(creator) = record.first_creator() {
        body = body.push(
            button(text("Link to creator on OBJKT").size(12))
                .on_press(Message::OpenLink(settings.profile_link(creator)))
                .style(button::text)
                .padding(0),
        );
    }

    body = body
        .push(text(lines.description).size(12))
        .push(close_button());

    frame(body)
}

fn open_button<'a>(label: &'a str, url: Option<String>) -> Element<'a, Message> {
    button(text(label))
        .on_press_maybe(url.map(Message::OpenLink))
        .style(button::secondary)
        .width(Length::Fill)
        .into()
}

fn close_button<'a>() -> Element<'a, Message> {
    button(text("Close"))
        .on_press(Message::CloseDetail)
        .style(button::secondary)
        .width(Length::Fill)
        .into()
}

fn frame<'a>(body: impl Into<Element<'a, Message>>) -> Element<'a, Message> {
    container(scrollable(body))
        .width(Length::Fixed(DIALOG_MEDIA_SIZE + 16.0))
        .max_height(760.0)
        .style(|_theme| container::Style {
            background: Some(iced::Color::BLACK.into()),
            text_color: Some(iced::Color::WHITE),
            ..container::Style::default()
        })
        .into()
}
