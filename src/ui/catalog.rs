/// Catalog page: search, filters, sort and the note grid
use iced::widget::{
    button, column, container, horizontal_space, pick_list, row, scrollable, text, text_input,
};
use iced::{Alignment, Element, Length};
use iced_aw::Wrap;

use crate::config::SUBJECTS;
use crate::state::query::{CatalogView, ClassFilter, Facet, SortOrder, ViewState};
use crate::ui::{card, header};
use crate::{Message, Route};

/// Inputs the catalog page needs besides the query result
pub struct CatalogPage<'a> {
    pub title: &'a str,
    pub dark_mode: bool,
    pub loading: bool,
    pub state: &'a ViewState,
    pub view: CatalogView<'a>,
}

fn chip<'a>(label: String, active: bool, on_press: Message) -> Element<'a, Message> {
    button(text(label).size(14))
        .padding([6, 14])
        .style(if active { button::primary } else { button::secondary })
        .on_press(on_press)
        .into()
}

fn class_chips<'a>(facets: &[Facet], selected: &ClassFilter) -> Element<'a, Message> {
    let chips = facets
        .iter()
        .map(|facet| {
            let filter = facet.filter();
            let active = filter == *selected;
            match facet {
                // Pressing the active class again goes back to "All"
                Facet::Class(class) => {
                    chip(facet.label(), active, Message::ClassToggled(class.clone()))
                }
                Facet::All => chip(facet.label(), active, Message::ClassSelected(filter)),
            }
        })
        .collect();

    Wrap::with_elements(chips).spacing(8.0).line_spacing(8.0).into()
}

fn subject_chips<'a>(selected: Option<&str>) -> Element<'a, Message> {
    let chips = SUBJECTS
        .iter()
        .map(|subject| {
            chip(
                subject.to_string(),
                selected == Some(*subject),
                Message::SubjectToggled(subject.to_string()),
            )
        })
        .collect();

    Wrap::with_elements(chips).spacing(8.0).line_spacing(8.0).into()
}

pub fn view<'a>(page: CatalogPage<'a>) -> Element<'a, Message> {
    let CatalogPage {
        title,
        dark_mode,
        loading,
        state,
        view,
    } = page;

    let toolbar = row![
        text_input("Search for notes, chapters...", &state.search)
            .on_input(Message::SearchChanged)
            .padding(10)
            .width(Length::Fill),
        pick_list(SortOrder::ALL, Some(state.sort), Message::SortChanged).padding(10),
    ]
    .spacing(10)
    .align_y(Alignment::Center);

    let mut filters = column![
        class_chips(&view.facets, &state.class_filter),
        subject_chips(state.subject.as_deref()),
    ]
    .spacing(10);

    if state.has_active_filters() {
        filters = filters.push(
            button(text("Clear all filters").size(14))
                .style(button::text)
                .on_press(Message::ClearFilters),
        );
    }

    let summary = row![
        text(state.heading()).size(22),
        horizontal_space(),
        text(view.count_label()).size(14),
    ]
    .align_y(Alignment::Center);

    let body: Element<'a, Message> = if loading {
        container(text("Loading materials...").size(16))
            .padding(40)
            .center_x(Length::Fill)
            .into()
    } else if view.records.is_empty() {
        container(
            column![
                text("No notes found").size(18),
                text("Try a different search or clear the filters.").size(14),
            ]
            .spacing(6)
            .align_x(Alignment::Center),
        )
        .padding(40)
        .center_x(Length::Fill)
        .into()
    } else {
        let cards = view.page(state).iter().map(|record| card::view(*record)).collect();
        let mut grid = column![Wrap::with_elements(cards).spacing(16.0).line_spacing(16.0)]
            .spacing(20)
            .align_x(Alignment::Center);

        if view.has_more(state) {
            grid = grid.push(
                button(text("Load More").size(14))
                    .padding([10, 24])
                    .style(button::secondary)
                    .on_press(Message::LoadMore),
            );
        }
        grid.into()
    };

    let content = column![
        header::view(title, Route::Catalog, dark_mode),
        toolbar,
        filters,
        summary,
        body,
    ]
    .spacing(20)
    .padding(24)
    .max_width(960);

    scrollable(container(content).center_x(Length::Fill))
        .height(Length::Fill)
        .into()
}
