/// Top bar shared by both pages
use iced::widget::{button, horizontal_space, row, text};
use iced::{Alignment, Element};

use crate::{Message, Route};

pub fn view<'a>(title: &'a str, current: Route, dark_mode: bool) -> Element<'a, Message> {
    let (nav_label, target) = match current {
        Route::Catalog => ("Admin", Route::Admin),
        Route::Admin => ("Back to notes", Route::Catalog),
    };

    let theme_label = if dark_mode { "Light mode" } else { "Dark mode" };

    row![
        text(title).size(28),
        horizontal_space(),
        button(text("Contact").size(14))
            .style(button::success)
            .on_press(Message::OpenContact),
        button(text(nav_label).size(14))
            .style(button::secondary)
            .on_press(Message::Navigate(target)),
        button(text(theme_label).size(14))
            .style(button::text)
            .on_press(Message::ToggleTheme),
    ]
    .spacing(10)
    .align_y(Alignment::Center)
    .into()
}
