/// Note card shown in the catalog grid
use iced::widget::{button, column, container, row, text, Space};
use iced::{Background, Border, Color, Element, Length, Theme};

use crate::state::data::{CatalogRecord, SubjectAccent};
use crate::Message;

/// Width of one card; three fit side by side in the default window
pub const CARD_WIDTH: f32 = 280.0;

/// Badge colours (foreground, background) per subject family
fn accent_colors(accent: SubjectAccent) -> (Color, Color) {
    let (fg, bg) = match accent {
        SubjectAccent::Science => ((0x7e, 0x22, 0xce), (0xf3, 0xe8, 0xff)),
        SubjectAccent::Maths => ((0x1d, 0x4e, 0xd8), (0xdb, 0xea, 0xfe)),
        SubjectAccent::English => ((0xbe, 0x18, 0x5d), (0xfc, 0xe7, 0xf3)),
        SubjectAccent::Social => ((0xc2, 0x41, 0x0c), (0xff, 0xed, 0xd5)),
        SubjectAccent::Neutral => ((0x37, 0x41, 0x51), (0xf3, 0xf4, 0xf6)),
    };
    (Color::from_rgb8(fg.0, fg.1, fg.2), Color::from_rgb8(bg.0, bg.1, bg.2))
}

fn badge<'a>(label: &'a str, accent: SubjectAccent) -> Element<'a, Message> {
    let (fg, bg) = accent_colors(accent);
    container(text(label).size(12).color(fg))
        .padding([2, 8])
        .style(move |_theme: &Theme| container::Style {
            background: Some(Background::Color(bg)),
            border: Border {
                radius: 8.0.into(),
                ..Border::default()
            },
            ..container::Style::default()
        })
        .into()
}

/// Build the card for one record
pub fn view(record: &CatalogRecord) -> Element<'_, Message> {
    let subject: Element<'_, Message> = if record.subject.is_empty() {
        Space::with_width(Length::Shrink).into()
    } else {
        badge(&record.subject, record.accent())
    };

    let mut meta = vec![record.kind.clone()];
    if let Some(class) = record.class_label() {
        meta.insert(0, class);
    }
    if let Some(year) = record.year() {
        meta.push(year.to_string());
    }

    // No link, nothing to open
    let open = button(text("View").size(14))
        .padding([6, 14])
        .style(button::primary)
        .on_press_maybe(
            record
                .link
                .clone()
                .map(|link| Message::OpenDocument(record.id.clone(), link)),
        );

    let content = column![
        row![subject, Space::with_width(Length::Fill)],
        text(&record.title).size(16),
        text(meta.join(" • ")).size(12),
        open,
    ]
    .spacing(10);

    container(content)
        .padding(16)
        .width(CARD_WIDTH)
        .style(container::rounded_box)
        .into()
}
