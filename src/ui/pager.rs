/// Previous / next page controls
use iced::widget::{button, container, row, text};
use iced::{Alignment, Element, Length};

use crate::Message;

pub fn view<'a>(page: usize, total_pages: usize) -> Element<'a, Message> {
    let previous = button(text("← Previous"))
        .on_press_maybe((page > 1).then_some(Message::PreviousPage))
        .style(button::secondary)
        .padding(10);
    let next = button(text("Next →"))
        .on_press_maybe((page < total_pages).then_some(Message::NextPage))
        .style(button::secondary)
        .padding(10);

    container(
        row![previous, text(label(page, total_pages)).size(14), next]
            .spacing(16)
            .align_y(Alignment::Center),
    )
    .width(Length::Fill)
    .center_x(Length::Fill)
    .padding(16)
    .into()
}

pub fn label(page: usize, total_pages: usize) -> String {
    format!("Page {} of {}", page, total_pages)
}
