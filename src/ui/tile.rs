/// Expandable media tile
///
/// One tile type covers every rendering strategy. The strategy decides what
/// sits in the 300px frame and whether clicking it opens the detail dialog.
use iced::widget::{button, column, container, image, mouse_area, text};
use iced::{Alignment, Border, ContentFit, Element, Length};

use crate::media::kind::MediaKind;
use crate::media::uri::Gateway;
use crate::state::data::ArtRecord;
use crate::ui::palette;
use crate::Message;

/// Edge of a grid tile's media frame
pub const TILE_SIZE: f32 = 300.0;

/// Preview image progress for one tile
#[derive(Debug, Clone)]
pub enum TileState {
    Loading,
    Loaded(image::Handle),
    Unavailable,
}

/// Build the tile for the `index`-th record on the page
pub fn view<'a>(
    record: &'a ArtRecord,
    index: usize,
    preview: Option<&TileState>,
    gateway: &Gateway,
) -> Element<'a, Message> {
    let kind = MediaKind::classify(record);

    let media: Element<'a, Message> = match kind {
        MediaKind::Audio => audio_control(record, gateway),
        MediaKind::Unsupported => text("Unsupported file format").into(),
        _ => preview_frame(preview, kind, TILE_SIZE),
    };

    let media = if kind.is_expandable() {
        mouse_area(media).on_press(Message::OpenDetail(index)).into()
    } else {
        media
    };

    let mut tile = column![media].spacing(8).align_x(Alignment::Center);
    if let Some(name) = record.name.as_deref().filter(|name| !name.is_empty()) {
        tile = tile.push(text(name).size(12).color(palette::CAPTION));
    }

    container(tile)
        .width(Length::Fixed(TILE_SIZE))
        .center_x(Length::Fixed(TILE_SIZE))
        .into()
}

/// Square frame showing a preview, its skeleton, or its failure label
pub fn preview_frame<'a>(preview: Option<&TileState>, kind: MediaKind, size: f32) -> Element<'a, Message> {
    match preview {
        Some(TileState::Loaded(handle)) => image(handle.clone())
            .width(Length::Fixed(size))
            .height(Length::Fixed(size))
            .content_fit(ContentFit::Contain)
            .into(),
        Some(TileState::Unavailable) => placeholder(kind.unavailable_label(), size),
        Some(TileState::Loading) | None => placeholder("", size),
    }
}

fn placeholder<'a>(label: &'a str, size: f32) -> Element<'a, Message> {
    container(text(label).size(12).color(palette::CAPTION))
        .width(Length::Fixed(size))
        .height(Length::Fixed(size))
        .center_x(Length::Fixed(size))
        .center_y(Length::Fixed(size))
        .style(|_theme| container::Style {
            background: Some(palette::PLACEHOLDER_BG.into()),
            border: Border {
                color: palette::PLACEHOLDER_BORDER,
                width: 1.0,
                radius: 4.0.into(),
            },
            ..container::Style::default()
        })
        .into()
}

fn audio_control<'a>(record: &ArtRecord, gateway: &Gateway) -> Element<'a, Message> {
    match gateway.resolve(record.primary_uri()) {
        Some(url) => button(text("▶ Play audio"))
            .on_press(Message::OpenLink(url))
            .style(button::secondary)
            .padding(10)
            .into(),
        None => text("Unsupported file format").into(),
    }
}
