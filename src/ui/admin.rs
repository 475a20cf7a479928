/// Admin page: build a manifest entry and copy it
use iced::widget::{button, column, container, row, scrollable, text, text_input};
use iced::{Alignment, Element, Font, Length};
use iced_aw::Wrap;

use crate::config::{CLASS_STANDARDS, SUBJECTS};
use crate::state::builder::{path_hint, AdminForm, Preview};
use crate::ui::header;
use crate::{Message, Route};

pub struct AdminPage<'a> {
    pub title: &'a str,
    pub dark_mode: bool,
    pub form: &'a AdminForm,
    pub preview: Option<&'a Preview>,
    pub copied: bool,
}

fn label<'a>(caption: &'a str) -> Element<'a, Message> {
    text(caption).size(14).into()
}

fn options<'a>(
    values: &[&str],
    selected: Option<&str>,
    on_press: impl Fn(String) -> Message,
    width: f32,
) -> Element<'a, Message> {
    let buttons = values
        .iter()
        .map(|value| {
            button(text(value.to_string()).size(14))
                .width(width)
                .padding(10)
                .style(if selected == Some(*value) {
                    button::primary
                } else {
                    button::secondary
                })
                .on_press(on_press(value.to_string()))
                .into()
        })
        .collect();

    Wrap::with_elements(buttons).spacing(8.0).line_spacing(8.0).into()
}

fn form_column<'a>(form: &'a AdminForm) -> Element<'a, Message> {
    column![
        label("Class Standard"),
        options(&CLASS_STANDARDS, form.standard.as_deref(), Message::AdminClassToggled, 48.0),
        label("Subject"),
        options(&SUBJECTS, form.subject.as_deref(), Message::AdminSubjectSelected, 140.0),
        label("Document Title"),
        text_input("e.g. Science 1 Question papers", &form.title)
            .on_input(Message::AdminTitleChanged)
            .padding(10),
        label("Filename (for URL)"),
        text_input("e.g. Science 1 Question papers.pdf", &form.filename)
            .on_input(Message::AdminFilenameChanged)
            .padding(10),
        text(path_hint(form)).size(12),
    ]
    .spacing(12)
    .width(Length::FillPortion(1))
    .into()
}

fn output_column<'a>(preview: Option<&'a Preview>, copied: bool) -> Element<'a, Message> {
    let copy_label = if copied { "Copied!" } else { "Copy JSON" };
    let copy = button(text(copy_label).size(13))
        .style(if copied { button::success } else { button::secondary })
        .on_press_maybe(preview.map(|_| Message::CopyPreview));

    let body: Element<'a, Message> = match preview {
        Some(preview) => column![
            text(&preview.text).font(Font::MONOSPACE).size(13),
            text(format!("Link: {}", preview.record.url)).size(12),
        ]
        .spacing(12)
        .into(),
        None => text("Fill the form to generate JSON").size(14).into(),
    };

    column![
        row![text("Generated JSON").size(16), iced::widget::horizontal_space(), copy]
            .align_y(Alignment::Center),
        container(body)
            .padding(16)
            .width(Length::Fill)
            .style(container::rounded_box),
        text("Paste this entry into materials.json").size(12),
    ]
    .spacing(12)
    .width(Length::FillPortion(1))
    .into()
}

pub fn view<'a>(page: AdminPage<'a>) -> Element<'a, Message> {
    let content = column![
        header::view(page.title, Route::Admin, page.dark_mode),
        row![form_column(page.form), output_column(page.preview, page.copied)].spacing(24),
    ]
    .spacing(24)
    .padding(24)
    .max_width(1100);

    scrollable(container(content).center_x(Length::Fill))
        .height(Length::Fill)
        .into()
}
